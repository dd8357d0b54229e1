use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reference::Reference;
use super::suggestion::CompanyNameSuggestion;

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    User,
    Bot,
}

/// Sentinel user id for bot-authored messages
pub const AI_USER_ID: &str = "ai";

/// One turn in a chat session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<CompanyNameSuggestion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<Reference>>,
    /// Open key-value map: model name, processing time, language, raw payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Message {
    /// A user-authored message stamped with the current instant.
    pub fn user(
        id: impl Into<String>,
        chat_id: impl Into<String>,
        content: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            chat_id: chat_id.into(),
            kind: MessageType::User,
            content: content.into(),
            timestamp: Utc::now(),
            user_id: user_id.into(),
            suggestions: None,
            references: None,
            metadata: None,
        }
    }

    /// A bot-authored message stamped with the current instant.
    pub fn bot(id: impl Into<String>, chat_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            chat_id: chat_id.into(),
            kind: MessageType::Bot,
            content: content.into(),
            timestamp: Utc::now(),
            user_id: AI_USER_ID.to_string(),
            suggestions: None,
            references: None,
            metadata: None,
        }
    }

    /// True for the client-assigned temporary entries of optimistic sends.
    pub fn is_temporary(&self) -> bool {
        self.id.starts_with("temp-")
    }
}

/// Server-assigned message id for a confirmed write
pub fn next_message_id() -> String {
    format!("msg-{}", uuid::Uuid::new_v4())
}

/// Client-assigned correlation id for an optimistic entry
pub fn next_temp_id() -> String {
    format!("temp-{}", uuid::Uuid::new_v4())
}
