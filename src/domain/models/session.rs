use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Archived,
    Deleted,
}

impl SessionStatus {
    /// Parses the query-string form; anything unknown is treated as active,
    /// matching the original API default.
    pub fn parse_or_active(value: &str) -> Self {
        match value {
            "archived" => SessionStatus::Archived,
            "deleted" => SessionStatus::Deleted,
            _ => SessionStatus::Active,
        }
    }
}

/// A named conversation thread belonging to one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    /// Last-activity marker, bumped on every message append
    pub timestamp: DateTime<Utc>,
    pub message_count: usize,
    /// UI "currently selected" flag, last writer wins
    #[serde(default)]
    pub active: bool,
    pub user_id: String,
    /// Denormalized copy of the most recent message content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    pub status: SessionStatus,
}

impl ChatSession {
    /// A fresh, empty session owned by `user_id`.
    pub fn new(id: impl Into<String>, title: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            timestamp: Utc::now(),
            message_count: 0,
            active: true,
            user_id: user_id.into(),
            last_message: None,
            status: SessionStatus::Active,
        }
    }
}

/// Partial update for a session; unset fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SessionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
}

impl SessionPatch {
    /// Shallow-merges the set fields into `session`.
    pub fn apply_to(&self, session: &mut ChatSession) {
        if let Some(title) = &self.title {
            session.title = title.clone();
        }
        if let Some(active) = self.active {
            session.active = active;
        }
        if let Some(status) = self.status {
            session.status = status;
        }
        if let Some(last_message) = &self.last_message {
            session.last_message = Some(last_message.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.active.is_none()
            && self.status.is_none()
            && self.last_message.is_none()
    }
}
