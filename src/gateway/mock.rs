//! In-memory gateway adapter
//!
//! Serves every operation from the entity store, including canned AI
//! responses. Used standalone when no upstream URL is configured, and as
//! the fallback half of [`FallbackGateway`](super::FallbackGateway).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::models::{
    ChatSession, CompanyNameSuggestion, Message, Page, Reference, ReferenceType, SessionPatch,
    SuggestionStatus, next_message_id,
};
use crate::i18n::Language;
use crate::infrastructure::EntityStore;
use crate::shared::errors::{AppError, Result};

use super::{
    ChatGateway, GenerateRequest, ListMessagesOptions, ListSessionsOptions, NewMessage, NewSession,
    validate_generate, validate_new_message,
};

const DEFAULT_SESSION_TITLE: &str = "Nouvelle conversation";

pub struct MockGateway {
    store: Arc<EntityStore>,
}

impl MockGateway {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }

    fn canned_response(language: Language) -> &'static str {
        match language {
            Language::Fr => {
                "Voici quelques suggestions de noms pour votre entreprise basées sur votre description. \
                 J'ai vérifié leur disponibilité dans la base de données RNE :"
            }
            Language::En => {
                "Here are some company name suggestions based on your description. \
                 I've checked their availability in the RNE database:"
            }
            Language::Ar => {
                "إليك بعض اقتراحات الأسماء لشركتك بناءً على وصفك. لقد تحققت من توفرها في قاعدة بيانات السجل الوطني للمؤسسات:"
            }
        }
    }

    fn canned_suggestions() -> Vec<CompanyNameSuggestion> {
        vec![
            CompanyNameSuggestion::new("1", "TunisTech Solutions", SuggestionStatus::Available).with_score(95),
            CompanyNameSuggestion::new("2", "Carthage Innovations", SuggestionStatus::Available).with_score(88),
            CompanyNameSuggestion::new("3", "Medina Digital", SuggestionStatus::Unavailable).with_score(92),
            CompanyNameSuggestion::new("4", "Sahara Ventures", SuggestionStatus::Available).with_score(85),
            CompanyNameSuggestion::new("5", "Atlas Consulting", SuggestionStatus::Unavailable).with_score(90),
        ]
    }

    fn canned_references() -> Vec<Reference> {
        let mut guide = Reference::new(
            "ref-1",
            "Guide to Business Registration in Tunisia",
            "https://www.tunisianregistry.gov.tn/business-guide",
            ReferenceType::Article,
        );
        guide.description = Some("Official guide for registering businesses in Tunisia".to_string());
        guide.category = Some("legal".to_string());
        guide.tags = Some(vec![
            "registration".to_string(),
            "business".to_string(),
            "legal".to_string(),
        ]);

        let mut trademark = Reference::new(
            "ref-3",
            "Trademark Registration Process",
            "https://www.tunisianregistry.gov.tn/trademark",
            ReferenceType::Document,
        );
        trademark.description = Some("Step-by-step guide for trademark registration".to_string());
        trademark.category = Some("legal".to_string());
        trademark.tags = Some(vec![
            "trademark".to_string(),
            "intellectual property".to_string(),
            "registration".to_string(),
        ]);

        vec![guide, trademark]
    }
}

#[async_trait]
impl ChatGateway for MockGateway {
    async fn list_sessions(
        &self,
        user_id: &str,
        options: ListSessionsOptions,
    ) -> Result<Page<ChatSession>> {
        let mut sessions: Vec<ChatSession> = self
            .store
            .sessions_for_user(user_id)
            .await
            .into_iter()
            .filter(|session| session.status == options.status)
            .collect();
        sessions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(Page::slice(sessions, options.page, options.limit))
    }

    async fn create_session(&self, request: NewSession) -> Result<ChatSession> {
        let id = request
            .id
            .unwrap_or_else(|| format!("chat-{}", Utc::now().timestamp_millis()));
        let title = if request.title.is_empty() {
            DEFAULT_SESSION_TITLE.to_string()
        } else {
            request.title
        };
        let session = ChatSession::new(id, title, request.user_id);
        self.store.put_session(session.clone()).await;
        Ok(session)
    }

    async fn get_session(&self, id: &str) -> Result<ChatSession> {
        self.store
            .session(id)
            .await
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    async fn update_session(&self, id: &str, patch: SessionPatch) -> Result<ChatSession> {
        if self.store.session(id).await.is_none() {
            return Err(AppError::NotFound(id.to_string()));
        }
        self.store.update_session(id, &patch).await;
        self.store
            .session(id)
            .await
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    async fn delete_session(&self, id: &str) -> Result<()> {
        // Idempotent: removing an already-absent record succeeds.
        self.store.delete_session(id).await;
        Ok(())
    }

    async fn list_messages(
        &self,
        chat_id: &str,
        options: ListMessagesOptions,
    ) -> Result<Page<Message>> {
        let mut messages = self.store.messages(chat_id).await;
        messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(Page::slice(messages, options.page, options.limit))
    }

    async fn send_message(&self, request: NewMessage) -> Result<Message> {
        validate_new_message(&request)?;
        let message = Message {
            id: next_message_id(),
            chat_id: request.chat_id.clone(),
            kind: request.kind,
            content: request.content,
            timestamp: Utc::now(),
            user_id: request.user_id,
            suggestions: request.suggestions,
            references: request.references,
            metadata: request.metadata,
        };
        self.store.append_message(&request.chat_id, message.clone()).await;
        Ok(message)
    }

    async fn generate_response(&self, request: GenerateRequest) -> Result<Message> {
        validate_generate(&request)?;
        let language = request.language.unwrap_or_default();

        let mut message = Message::bot(next_message_id(), &request.chat_id, Self::canned_response(language));
        message.suggestions = Some(Self::canned_suggestions());
        message.references = Some(Self::canned_references());

        let mut metadata = serde_json::Map::new();
        metadata.insert("model".to_string(), "gpt-4".into());
        metadata.insert("processingTime".to_string(), 2000.into());
        metadata.insert("language".to_string(), language.code().into());
        message.metadata = Some(metadata);

        self.store.append_message(&request.chat_id, message.clone()).await;
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{MessageType, SessionStatus};

    fn gateway() -> MockGateway {
        MockGateway::new(Arc::new(EntityStore::new()))
    }

    fn new_session(title: &str) -> NewSession {
        NewSession {
            title: title.to_string(),
            user_id: "1".to_string(),
            id: None,
        }
    }

    fn user_message(chat_id: &str, content: &str) -> NewMessage {
        NewMessage {
            chat_id: chat_id.to_string(),
            kind: MessageType::User,
            content: content.to_string(),
            user_id: "1".to_string(),
            suggestions: None,
            references: None,
            metadata: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let gateway = gateway();
        let created = gateway.create_session(new_session("Test")).await.unwrap();

        let fetched = gateway.get_session(&created.id).await.unwrap();
        assert_eq!(fetched.title, "Test");
        assert_eq!(fetched.user_id, "1");
        assert_eq!(fetched.status, SessionStatus::Active);
        assert_eq!(fetched.message_count, 0);
    }

    #[tokio::test]
    async fn test_empty_title_gets_default() {
        let gateway = gateway();
        let created = gateway.create_session(new_session("")).await.unwrap();
        assert_eq!(created.title, DEFAULT_SESSION_TITLE);
    }

    #[tokio::test]
    async fn test_list_sessions_pagination() {
        let gateway = gateway();
        for i in 0..15 {
            gateway
                .create_session(NewSession {
                    title: format!("Session {i}"),
                    user_id: "1".to_string(),
                    id: Some(format!("chat-{i}")),
                })
                .await
                .unwrap();
        }

        let options = ListSessionsOptions {
            page: 2,
            limit: 10,
            ..Default::default()
        };
        let page = gateway.list_sessions("1", options).await.unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total, 15);
        assert!(!page.has_more);

        for i in 15..25 {
            gateway
                .create_session(NewSession {
                    title: format!("Session {i}"),
                    user_id: "1".to_string(),
                    id: Some(format!("chat-{i}")),
                })
                .await
                .unwrap();
        }
        let options = ListSessionsOptions {
            page: 2,
            limit: 10,
            ..Default::default()
        };
        let page = gateway.list_sessions("1", options).await.unwrap();
        assert_eq!(page.items.len(), 10);
        assert!(page.has_more);
    }

    #[tokio::test]
    async fn test_list_sessions_filters_owner_and_status() {
        let gateway = gateway();
        gateway.create_session(new_session("Mine")).await.unwrap();
        gateway
            .create_session(NewSession {
                title: "Theirs".to_string(),
                user_id: "2".to_string(),
                id: None,
            })
            .await
            .unwrap();

        let page = gateway.list_sessions("1", Default::default()).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Mine");

        let archived = gateway
            .list_sessions(
                "1",
                ListSessionsOptions {
                    status: SessionStatus::Archived,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(archived.items.is_empty());
    }

    #[tokio::test]
    async fn test_delete_twice_does_not_raise() {
        let gateway = gateway();
        let created = gateway.create_session(new_session("Doomed")).await.unwrap();

        gateway.delete_session(&created.id).await.unwrap();
        gateway.delete_session(&created.id).await.unwrap();

        let err = gateway.get_session(&created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_absent_session_is_not_found() {
        let gateway = gateway();
        let err = gateway
            .update_session("ghost", SessionPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_messages_sorted_ascending_regardless_of_append_order() {
        let gateway = gateway();
        let session = gateway.create_session(new_session("Ordering")).await.unwrap();

        // Append with deliberately shuffled timestamps.
        let mut early = Message::user("msg-a", &session.id, "first", "1");
        early.timestamp = Utc::now() - chrono::Duration::hours(2);
        let mut late = Message::user("msg-b", &session.id, "last", "1");
        late.timestamp = Utc::now();
        let mut middle = Message::user("msg-c", &session.id, "second", "1");
        middle.timestamp = Utc::now() - chrono::Duration::hours(1);

        let store = &gateway.store;
        store.append_message(&session.id, late).await;
        store.append_message(&session.id, early).await;
        store.append_message(&session.id, middle).await;

        let page = gateway
            .list_messages(&session.id, Default::default())
            .await
            .unwrap();
        let contents: Vec<_> = page.items.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "last"]);
    }

    #[tokio::test]
    async fn test_send_message_requires_content() {
        let gateway = gateway();
        let session = gateway.create_session(new_session("Empty")).await.unwrap();
        let err = gateway
            .send_message(user_message(&session.id, ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_full_conversation_scenario() {
        let gateway = gateway();
        let session = gateway.create_session(new_session("Test")).await.unwrap();

        gateway
            .send_message(user_message(&session.id, "Comment créer une SARL ?"))
            .await
            .unwrap();

        let reply = gateway
            .generate_response(GenerateRequest {
                prompt: "Comment créer une SARL ?".to_string(),
                chat_id: session.id.clone(),
                user_id: "1".to_string(),
                language: Some(Language::Fr),
            })
            .await
            .unwrap();

        let refreshed = gateway.get_session(&session.id).await.unwrap();
        assert_eq!(refreshed.message_count, 2);
        assert_eq!(refreshed.last_message.as_deref(), Some(reply.content.as_str()));

        let page = gateway
            .list_messages(&session.id, Default::default())
            .await
            .unwrap();
        assert_eq!(page.items[0].kind, MessageType::User);
        assert_eq!(page.items[1].kind, MessageType::Bot);
        assert_eq!(page.items[1].user_id, "ai");
        assert_eq!(page.items[1].suggestions.as_ref().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_generate_requires_prompt_chat_and_user() {
        let gateway = gateway();
        let err = gateway
            .generate_response(GenerateRequest {
                prompt: String::new(),
                chat_id: "chat-1".to_string(),
                user_id: "1".to_string(),
                language: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
