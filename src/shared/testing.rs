//! Test doubles shared across modules

use async_trait::async_trait;

use crate::domain::models::{ChatSession, Message, Page, SessionPatch};
use crate::gateway::{
    ChatGateway, GenerateRequest, ListMessagesOptions, ListSessionsOptions, NewMessage, NewSession,
};
use crate::shared::errors::{AppError, Result};

/// A gateway whose every operation fails as if the upstream were down.
pub struct FailingGateway;

fn down<T>() -> Result<T> {
    Err(AppError::UpstreamUnavailable("service down".to_string()))
}

#[async_trait]
impl ChatGateway for FailingGateway {
    async fn list_sessions(
        &self,
        _user_id: &str,
        _options: ListSessionsOptions,
    ) -> Result<Page<ChatSession>> {
        down()
    }

    async fn create_session(&self, _request: NewSession) -> Result<ChatSession> {
        down()
    }

    async fn get_session(&self, _id: &str) -> Result<ChatSession> {
        down()
    }

    async fn update_session(&self, _id: &str, _patch: SessionPatch) -> Result<ChatSession> {
        down()
    }

    async fn delete_session(&self, _id: &str) -> Result<()> {
        down()
    }

    async fn list_messages(
        &self,
        _chat_id: &str,
        _options: ListMessagesOptions,
    ) -> Result<Page<Message>> {
        down()
    }

    async fn send_message(&self, _request: NewMessage) -> Result<Message> {
        down()
    }

    async fn generate_response(&self, _request: GenerateRequest) -> Result<Message> {
        down()
    }
}
