//! Fallback composition
//!
//! Wraps two gateways: every operation is attempted on the primary and
//! retried on the fallback when the primary fails. `generate_response` is
//! the deliberate exception; its upstream failures propagate to the caller.

use async_trait::async_trait;

use crate::domain::models::{ChatSession, Message, Page, SessionPatch};
use crate::shared::errors::{AppError, Result};
use crate::shared::logging::{LogOperation, log_fallback};

use super::{
    ChatGateway, GenerateRequest, ListMessagesOptions, ListSessionsOptions, NewMessage, NewSession,
};

pub struct FallbackGateway<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackGateway<P, F>
where
    P: ChatGateway,
    F: ChatGateway,
{
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

macro_rules! with_fallback {
    ($self:ident, $operation:expr, $call:ident ( $($arg:expr),* )) => {
        match $self.primary.$call($($arg.clone()),*).await {
            Ok(value) => Ok(value),
            Err(e) if e.is_fallback_candidate() => {
                log_fallback($operation, &e.to_string());
                $self.fallback.$call($($arg),*).await
            }
            Err(e) => Err(e),
        }
    };
}

#[async_trait]
impl<P, F> ChatGateway for FallbackGateway<P, F>
where
    P: ChatGateway,
    F: ChatGateway,
{
    async fn list_sessions(
        &self,
        user_id: &str,
        options: ListSessionsOptions,
    ) -> Result<Page<ChatSession>> {
        with_fallback!(self, LogOperation::SessionList, list_sessions(user_id, options))
    }

    async fn create_session(&self, request: NewSession) -> Result<ChatSession> {
        with_fallback!(self, LogOperation::SessionCreate, create_session(request))
    }

    async fn get_session(&self, id: &str) -> Result<ChatSession> {
        with_fallback!(self, LogOperation::SessionList, get_session(id))
    }

    async fn update_session(&self, id: &str, patch: SessionPatch) -> Result<ChatSession> {
        with_fallback!(self, LogOperation::SessionUpdate, update_session(id, patch))
    }

    async fn delete_session(&self, id: &str) -> Result<()> {
        with_fallback!(self, LogOperation::SessionDelete, delete_session(id))
    }

    async fn list_messages(
        &self,
        chat_id: &str,
        options: ListMessagesOptions,
    ) -> Result<Page<Message>> {
        with_fallback!(self, LogOperation::MessageList, list_messages(chat_id, options))
    }

    async fn send_message(&self, request: NewMessage) -> Result<Message> {
        with_fallback!(self, LogOperation::MessageSend, send_message(request))
    }

    async fn generate_response(&self, request: GenerateRequest) -> Result<Message> {
        self.primary
            .generate_response(request)
            .await
            .map_err(|e| match e {
                AppError::Validation(_) | AppError::UpstreamUnavailable(_) => e,
                other => AppError::UpstreamUnavailable(other.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::gateway::MockGateway;
    use crate::infrastructure::EntityStore;

    /// A gateway whose every call fails, counting the attempts through a
    /// shared handle.
    struct DeadGateway {
        calls: Arc<AtomicUsize>,
    }

    impl DeadGateway {
        fn new() -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    calls: Arc::clone(&calls),
                },
                calls,
            )
        }

        fn refuse<T>(&self) -> Result<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AppError::UpstreamUnavailable("connection refused".to_string()))
        }
    }

    #[async_trait]
    impl ChatGateway for DeadGateway {
        async fn list_sessions(
            &self,
            _user_id: &str,
            _options: ListSessionsOptions,
        ) -> Result<Page<ChatSession>> {
            self.refuse()
        }

        async fn create_session(&self, _request: NewSession) -> Result<ChatSession> {
            self.refuse()
        }

        async fn get_session(&self, _id: &str) -> Result<ChatSession> {
            self.refuse()
        }

        async fn update_session(&self, _id: &str, _patch: SessionPatch) -> Result<ChatSession> {
            self.refuse()
        }

        async fn delete_session(&self, _id: &str) -> Result<()> {
            self.refuse()
        }

        async fn list_messages(
            &self,
            _chat_id: &str,
            _options: ListMessagesOptions,
        ) -> Result<Page<Message>> {
            self.refuse()
        }

        async fn send_message(&self, _request: NewMessage) -> Result<Message> {
            self.refuse()
        }

        async fn generate_response(&self, _request: GenerateRequest) -> Result<Message> {
            self.refuse()
        }
    }

    fn composed() -> FallbackGateway<DeadGateway, MockGateway> {
        let store = Arc::new(EntityStore::new());
        let (dead, _) = DeadGateway::new();
        FallbackGateway::new(dead, MockGateway::new(store))
    }

    fn new_session(title: &str) -> NewSession {
        NewSession {
            title: title.to_string(),
            user_id: "1".to_string(),
            id: None,
        }
    }

    #[tokio::test]
    async fn test_crud_falls_back_when_primary_fails() {
        let gateway = composed();

        let created = gateway.create_session(new_session("Fallback")).await.unwrap();
        let fetched = gateway.get_session(&created.id).await.unwrap();
        assert_eq!(fetched.title, "Fallback");

        let page = gateway.list_sessions("1", Default::default()).await.unwrap();
        assert_eq!(page.items.len(), 1);

        gateway.delete_session(&created.id).await.unwrap();
        // Second delete still succeeds: fallback removal is idempotent.
        gateway.delete_session(&created.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_generate_never_falls_back() {
        let store = Arc::new(EntityStore::new());
        let (dead, calls) = DeadGateway::new();
        let gateway = FallbackGateway::new(dead, MockGateway::new(store));

        let err = gateway
            .generate_response(GenerateRequest {
                prompt: "Comment créer une SARL ?".to_string(),
                chat_id: "chat-1".to_string(),
                user_id: "1".to_string(),
                language: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UpstreamUnavailable(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_validation_errors_do_not_fall_back() {
        // Primary rejects the malformed request; the fallback must not be
        // consulted for it.
        let store = Arc::new(EntityStore::new());
        let (dead, calls) = DeadGateway::new();
        let gateway = FallbackGateway::new(MockGateway::new(store), dead);

        let err = gateway
            .send_message(NewMessage {
                chat_id: String::new(),
                kind: crate::domain::models::MessageType::User,
                content: "hello".to_string(),
                user_id: "1".to_string(),
                suggestions: None,
                references: None,
                metadata: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
