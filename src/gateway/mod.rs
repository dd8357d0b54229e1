//! Dual-path data access
//!
//! One trait, two interchangeable implementations: `RemoteGateway` talks to
//! the upstream chat service, `MockGateway` serves everything from the
//! in-memory [`EntityStore`](crate::infrastructure::EntityStore).
//! `FallbackGateway` composes the two so that remote failures degrade to
//! local data instead of surfacing, for every operation except response
//! generation, which has no mock stand-in worth returning.

pub mod fallback;
pub mod mock;
pub mod remote;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::models::{
    ChatSession, CompanyNameSuggestion, Message, MessageType, Page, Reference, SessionPatch,
    SessionStatus,
};
use crate::i18n::Language;
use crate::shared::errors::{AppError, Result};

pub use fallback::FallbackGateway;
pub use mock::MockGateway;
pub use remote::RemoteGateway;

/// Paging/filter options for session listings
#[derive(Debug, Clone)]
pub struct ListSessionsOptions {
    pub page: usize,
    pub limit: usize,
    pub status: SessionStatus,
}

impl Default for ListSessionsOptions {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            status: SessionStatus::Active,
        }
    }
}

/// Paging options for message listings
#[derive(Debug, Clone)]
pub struct ListMessagesOptions {
    pub page: usize,
    pub limit: usize,
}

impl Default for ListMessagesOptions {
    fn default() -> Self {
        Self { page: 1, limit: 50 }
    }
}

/// Session creation input
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    pub title: String,
    pub user_id: String,
    /// Caller-chosen id; a fresh one is synthesized when absent
    #[serde(default)]
    pub id: Option<String>,
}

/// Message creation input
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub chat_id: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub content: String,
    pub user_id: String,
    #[serde(default)]
    pub suggestions: Option<Vec<CompanyNameSuggestion>>,
    #[serde(default)]
    pub references: Option<Vec<Reference>>,
    #[serde(default)]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

/// AI generation input
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub prompt: String,
    pub chat_id: String,
    pub user_id: String,
    #[serde(default)]
    pub language: Option<Language>,
}

/// Stable data-access interface, independent of whether the upstream
/// service is reachable.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn list_sessions(
        &self,
        user_id: &str,
        options: ListSessionsOptions,
    ) -> Result<Page<ChatSession>>;

    async fn create_session(&self, request: NewSession) -> Result<ChatSession>;

    async fn get_session(&self, id: &str) -> Result<ChatSession>;

    async fn update_session(&self, id: &str, patch: SessionPatch) -> Result<ChatSession>;

    async fn delete_session(&self, id: &str) -> Result<()>;

    async fn list_messages(
        &self,
        chat_id: &str,
        options: ListMessagesOptions,
    ) -> Result<Page<Message>>;

    async fn send_message(&self, request: NewMessage) -> Result<Message>;

    /// The one operation without a silent fallback: failures always
    /// propagate to the caller.
    async fn generate_response(&self, request: GenerateRequest) -> Result<Message>;
}

pub(crate) fn validate_new_message(request: &NewMessage) -> Result<()> {
    if request.chat_id.is_empty() || request.user_id.is_empty() || request.content.is_empty() {
        return Err(AppError::Validation(
            "chatId, userId and content are required".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_generate(request: &GenerateRequest) -> Result<()> {
    if request.prompt.is_empty() || request.chat_id.is_empty() || request.user_id.is_empty() {
        return Err(AppError::Validation(
            "prompt, chatId and userId are required".to_string(),
        ));
    }
    Ok(())
}
