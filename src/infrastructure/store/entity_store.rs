//! In-memory entity store
//!
//! Authoritative storage for the mock/fallback path. Sessions are keyed by
//! id; each record carries its messages serialized as an opaque JSON blob,
//! mirroring the upstream product's storage shape.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::models::{ChatSession, Message, SessionPatch};
use crate::shared::logging::log_blob_corruption;

/// Session record plus its serialized message blob
#[derive(Debug, Clone)]
struct StoredSession {
    session: ChatSession,
    messages_data: String,
}

/// Process-wide mutable store; explicitly constructed and injected into the
/// gateway, torn down with the process.
pub struct EntityStore {
    sessions: Arc<RwLock<HashMap<String, StoredSession>>>,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// All sessions owned by `user_id`, in storage order.
    pub async fn sessions_for_user(&self, user_id: &str) -> Vec<ChatSession> {
        let sessions = self.sessions.read().await;
        sessions
            .values()
            .filter(|stored| stored.session.user_id == user_id)
            .map(|stored| stored.session.clone())
            .collect()
    }

    pub async fn session(&self, id: &str) -> Option<ChatSession> {
        let sessions = self.sessions.read().await;
        sessions.get(id).map(|stored| stored.session.clone())
    }

    /// Inserts or overwrites a session; the message blob starts empty.
    pub async fn put_session(&self, session: ChatSession) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            session.id.clone(),
            StoredSession {
                session,
                messages_data: "[]".to_string(),
            },
        );
    }

    /// Inserts a session together with a pre-built message history. The
    /// denormalized fields are stored as given, not recomputed; used for
    /// seeding demo data.
    pub async fn put_session_with_messages(&self, session: ChatSession, messages: &[Message]) {
        let blob = serde_json::to_string(messages).unwrap_or_else(|_| "[]".to_string());
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            session.id.clone(),
            StoredSession {
                session,
                messages_data: blob,
            },
        );
    }

    /// Shallow-merges `patch` into the session; no-op when absent.
    pub async fn update_session(&self, id: &str, patch: &SessionPatch) {
        let mut sessions = self.sessions.write().await;
        if let Some(stored) = sessions.get_mut(id) {
            patch.apply_to(&mut stored.session);
        }
    }

    /// Removes the record; idempotent.
    pub async fn delete_session(&self, id: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id);
    }

    pub async fn contains(&self, id: &str) -> bool {
        let sessions = self.sessions.read().await;
        sessions.contains_key(id)
    }

    /// Messages of a session, deserialized from the blob. An absent session
    /// or a corrupt blob yields an empty list; corruption is logged, never
    /// surfaced.
    pub async fn messages(&self, session_id: &str) -> Vec<Message> {
        let sessions = self.sessions.read().await;
        let Some(stored) = sessions.get(session_id) else {
            return Vec::new();
        };
        match serde_json::from_str(&stored.messages_data) {
            Ok(messages) => messages,
            Err(e) => {
                log_blob_corruption(session_id, &e.to_string());
                Vec::new()
            }
        }
    }

    /// Appends a message and recomputes the owning session's denormalized
    /// fields in one write-lock acquisition. No-op when the session is
    /// absent or the blob fails to parse.
    pub async fn append_message(&self, session_id: &str, message: Message) {
        let mut sessions = self.sessions.write().await;
        let Some(stored) = sessions.get_mut(session_id) else {
            return;
        };
        let mut messages: Vec<Message> = match serde_json::from_str(&stored.messages_data) {
            Ok(messages) => messages,
            Err(e) => {
                log_blob_corruption(session_id, &e.to_string());
                return;
            }
        };
        let last_content = message.content.clone();
        let last_timestamp = message.timestamp;
        messages.push(message);
        match serde_json::to_string(&messages) {
            Ok(blob) => {
                stored.session.message_count = messages.len();
                stored.session.last_message = Some(last_content);
                stored.session.timestamp = last_timestamp;
                stored.messages_data = blob;
            }
            Err(e) => log_blob_corruption(session_id, &e.to_string()),
        }
    }

    /// Overwrites a session's blob verbatim. Test hook for corrupt data.
    #[cfg(test)]
    pub async fn set_raw_messages(&self, session_id: &str, blob: &str) {
        let mut sessions = self.sessions.write().await;
        if let Some(stored) = sessions.get_mut(session_id) {
            stored.messages_data = blob.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::SessionStatus;

    fn session(id: &str, user_id: &str) -> ChatSession {
        ChatSession::new(id, format!("Session {id}"), user_id)
    }

    #[tokio::test]
    async fn test_put_and_get_session() {
        let store = EntityStore::new();
        store.put_session(session("chat-1", "1")).await;

        let found = store.session("chat-1").await.unwrap();
        assert_eq!(found.title, "Session chat-1");
        assert_eq!(found.status, SessionStatus::Active);
        assert!(store.session("chat-2").await.is_none());
    }

    #[tokio::test]
    async fn test_append_recomputes_denormalized_fields() {
        let store = EntityStore::new();
        store.put_session(session("chat-1", "1")).await;

        for i in 1..=3 {
            let message = Message::user(format!("msg-{i}"), "chat-1", format!("message {i}"), "1");
            store.append_message("chat-1", message).await;
        }

        let found = store.session("chat-1").await.unwrap();
        assert_eq!(found.message_count, 3);
        assert_eq!(found.last_message.as_deref(), Some("message 3"));
        assert_eq!(store.messages("chat-1").await.len(), 3);
    }

    #[tokio::test]
    async fn test_append_to_absent_session_is_noop() {
        let store = EntityStore::new();
        store
            .append_message("ghost", Message::user("msg-1", "ghost", "hello", "1"))
            .await;
        assert!(store.messages("ghost").await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_blob_reads_as_empty() {
        let store = EntityStore::new();
        store.put_session(session("chat-1", "1")).await;
        store.set_raw_messages("chat-1", "{not json").await;

        assert!(store.messages("chat-1").await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = EntityStore::new();
        store.put_session(session("chat-1", "1")).await;

        store.delete_session("chat-1").await;
        store.delete_session("chat-1").await;
        assert!(!store.contains("chat-1").await);
    }

    #[tokio::test]
    async fn test_update_absent_session_is_noop() {
        let store = EntityStore::new();
        let patch = SessionPatch {
            title: Some("renamed".to_string()),
            ..Default::default()
        };
        store.update_session("ghost", &patch).await;
        assert!(store.session("ghost").await.is_none());
    }
}
