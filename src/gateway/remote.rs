//! Remote gateway adapter
//!
//! Maps the upstream chat service contract onto the local data shapes. The
//! entity store doubles as a local message cache: confirmed sends and
//! generated replies are appended to it regardless of what the upstream
//! does with them.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::models::{
    ChatSession, CompanyNameSuggestion, Message, MessageType, Page, SessionPatch,
    SuggestionStatus, next_message_id,
};
use crate::infrastructure::EntityStore;
use crate::infrastructure::upstream::UpstreamClient;
use crate::infrastructure::upstream::wire::{NamePair, SessionRecord, parse_instant};
use crate::shared::errors::{AppError, Result};
use crate::shared::logging::log_forward_failure;

use super::{
    ChatGateway, GenerateRequest, ListMessagesOptions, ListSessionsOptions, NewMessage, NewSession,
    validate_generate, validate_new_message,
};

pub struct RemoteGateway {
    client: UpstreamClient,
    store: Arc<EntityStore>,
}

impl RemoteGateway {
    pub fn new(client: UpstreamClient, store: Arc<EntityStore>) -> Self {
        Self { client, store }
    }
}

/// Human-readable stand-in for upstream sessions, which carry no title.
fn synthesized_title(session_id: &str) -> String {
    let short: String = session_id.chars().take(8).collect();
    format!("Conversation {short}")
}

fn session_from_record(record: &SessionRecord, user_id: &str) -> ChatSession {
    let timestamp = record
        .last_activity
        .as_deref()
        .or(record.created_at.as_deref());
    ChatSession {
        id: record.session_id.clone(),
        title: synthesized_title(&record.session_id),
        timestamp: parse_instant(timestamp),
        message_count: record.message_count.unwrap_or(0),
        active: false,
        user_id: user_id.to_string(),
        last_message: None,
        status: crate::domain::models::SessionStatus::Active,
    }
}

fn suggestions_from_pairs(pairs: &[NamePair]) -> Vec<CompanyNameSuggestion> {
    pairs
        .iter()
        .enumerate()
        .map(|(index, pair)| {
            CompanyNameSuggestion::new(
                (index + 1).to_string(),
                pair.french.clone(),
                SuggestionStatus::Available,
            )
            .with_arabic_name(pair.arabic.clone())
        })
        .collect()
}

fn messages_from_record(record: &SessionRecord, chat_id: &str) -> Vec<Message> {
    record
        .messages_with_states
        .as_deref()
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, upstream)| {
            let (kind, user_id) = if upstream.is_human() {
                (MessageType::User, "user".to_string())
            } else {
                (MessageType::Bot, crate::domain::models::AI_USER_ID.to_string())
            };
            let suggestions = upstream
                .state
                .as_ref()
                .and_then(|state| state.name_pairs.as_deref())
                .filter(|pairs| !pairs.is_empty())
                .map(suggestions_from_pairs);
            Message {
                id: format!("msg-{index}"),
                chat_id: chat_id.to_string(),
                kind,
                content: upstream.content.clone(),
                timestamp: parse_instant(upstream.timestamp.as_deref()),
                user_id,
                suggestions,
                references: None,
                metadata: None,
            }
        })
        .collect()
}

#[async_trait]
impl ChatGateway for RemoteGateway {
    async fn list_sessions(
        &self,
        user_id: &str,
        options: ListSessionsOptions,
    ) -> Result<Page<ChatSession>> {
        let listing = self.client.list_sessions().await?;
        let mut sessions: Vec<ChatSession> = listing
            .sessions
            .iter()
            .map(|record| session_from_record(record, user_id))
            .filter(|session| session.status == options.status)
            .collect();
        sessions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(Page::slice(sessions, options.page, options.limit))
    }

    async fn create_session(&self, request: NewSession) -> Result<ChatSession> {
        let created = self.client.create_session(request.id.clone()).await?;
        let title = if request.title.is_empty() {
            synthesized_title(&created.session_id)
        } else {
            request.title
        };
        let session = ChatSession::new(created.session_id, title, request.user_id);
        // Mirror into the store so message appends have a cache record.
        self.store.put_session(session.clone()).await;
        Ok(session)
    }

    async fn get_session(&self, id: &str) -> Result<ChatSession> {
        let record = self.client.session(id).await?;
        // Owner is not part of the upstream record; recover it from the
        // cache when we have one.
        let user_id = match self.store.session(id).await {
            Some(cached) => cached.user_id,
            None => "user".to_string(),
        };
        Ok(session_from_record(&record, &user_id))
    }

    async fn update_session(&self, id: &str, patch: SessionPatch) -> Result<ChatSession> {
        // The upstream has no update endpoint: re-fetch and return a merged
        // view. Remote state is not persisted.
        let mut session = self.get_session(id).await?;
        patch.apply_to(&mut session);
        self.store.update_session(id, &patch).await;
        Ok(session)
    }

    async fn delete_session(&self, id: &str) -> Result<()> {
        self.client.delete_session(id).await?;
        self.store.delete_session(id).await;
        Ok(())
    }

    async fn list_messages(
        &self,
        chat_id: &str,
        options: ListMessagesOptions,
    ) -> Result<Page<Message>> {
        let record = self.client.session(chat_id).await?;
        let mut messages = messages_from_record(&record, chat_id);
        messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(Page::slice(messages, options.page, options.limit))
    }

    async fn send_message(&self, request: NewMessage) -> Result<Message> {
        validate_new_message(&request)?;

        if request.kind == MessageType::User {
            // Forward failures must not lose the user-visible message.
            if let Err(e) = self.client.chat(&request.content, &request.chat_id).await {
                log_forward_failure(&request.chat_id, &e.to_string());
            }
        }

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

        let started = Instant::now();
        let reply = self
            .client
            .chat(&request.prompt, &request.chat_id)
            .await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

        let mut message = Message::bot(next_message_id(), &request.chat_id, &reply.response);
        message.suggestions = reply
            .message_state
            .as_ref()
            .and_then(|state| state.name_pairs.as_deref())
            .filter(|pairs| !pairs.is_empty())
            .map(suggestions_from_pairs);

        let mut metadata = serde_json::Map::new();
        metadata.insert(
            "processingTime".to_string(),
            (started.elapsed().as_millis() as u64).into(),
        );
        metadata.insert("language".to_string(), language.code().into());
        if let Ok(raw) = serde_json::to_value(&reply) {
            metadata.insert("raw".to_string(), raw);
        }
        message.metadata = Some(metadata);

        self.store.append_message(&request.chat_id, message.clone()).await;
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: serde_json::Value) -> SessionRecord {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_session_mapping_synthesizes_title() {
        let record = record(serde_json::json!({
            "session_id": "4f2a9c01-77aa-4b6e",
            "last_activity": "2024-05-01T10:00:00Z",
            "message_count": 4
        }));

        let session = session_from_record(&record, "1");
        assert_eq!(session.title, "Conversation 4f2a9c01");
        assert_eq!(session.message_count, 4);
        assert_eq!(session.user_id, "1");
    }

    #[test]
    fn test_message_mapping_discriminates_authorship() {
        let record = record(serde_json::json!({
            "session_id": "abc",
            "messages_with_states": [
                { "type": "HumanMessage", "content": "Comment créer une SARL ?",
                  "timestamp": "2024-05-01T10:00:00Z" },
                { "type": "AIMessage", "content": "Voici quelques pistes",
                  "timestamp": "2024-05-01T10:00:05Z",
                  "state": { "name_pairs": [
                      { "french": "Atlas Conseil", "arabic": "أطلس للاستشارات" },
                      { "french": "Carthage Digital", "arabic": "قرطاج الرقمية" }
                  ] } }
            ]
        }));

        let messages = messages_from_record(&record, "abc");
        assert_eq!(messages[0].kind, MessageType::User);
        assert_eq!(messages[1].kind, MessageType::Bot);
        assert_eq!(messages[1].user_id, "ai");

        let suggestions = messages[1].suggestions.as_ref().unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].name, "Atlas Conseil");
        assert_eq!(suggestions[0].arabic_name.as_deref(), Some("أطلس للاستشارات"));
        assert_eq!(suggestions[0].status, SuggestionStatus::Available);
    }

    #[test]
    fn test_human_message_without_state_has_no_suggestions() {
        let record = record(serde_json::json!({
            "session_id": "abc",
            "messages_with_states": [
                { "type": "HumanMessage", "content": "bonjour" }
            ]
        }));
        let messages = messages_from_record(&record, "abc");
        assert!(messages[0].suggestions.is_none());
    }
}
