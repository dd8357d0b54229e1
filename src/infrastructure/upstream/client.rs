//! HTTP client for the upstream chat service
//!
//! Thin typed wrapper over reqwest. No client-side timeout is configured;
//! failures are observed through the request error alone.

use reqwest::{Client, StatusCode};

use crate::shared::errors::{AppError, Result};

use super::wire::{
    ChatRequest, ChatResponse, CreateSessionRequest, CreateSessionResponse, SessionRecord,
    SessionsListing,
};

pub struct UpstreamClient {
    client: Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn list_sessions(&self) -> Result<SessionsListing> {
        let response = self
            .client
            .get(self.url("/sessions"))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn create_session(&self, session_id: Option<String>) -> Result<CreateSessionResponse> {
        let response = self
            .client
            .post(self.url("/sessions"))
            .json(&CreateSessionRequest { session_id })
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn session(&self, id: &str) -> Result<SessionRecord> {
        let response = self
            .client
            .get(self.url(&format!("/sessions/{id}")))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(id.to_string()));
        }
        let response = response.error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn delete_session(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/sessions/{id}")))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(id.to_string()));
        }
        response.error_for_status()?;
        Ok(())
    }

    pub async fn chat(&self, message: &str, session_id: &str) -> Result<ChatResponse> {
        let response = self
            .client
            .post(self.url("/chat"))
            .json(&ChatRequest {
                message: message.to_string(),
                session_id: session_id.to_string(),
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining_tolerates_slashes() {
        let client = UpstreamClient::new("http://localhost:8000/");
        assert_eq!(client.url("/sessions"), "http://localhost:8000/sessions");
        assert_eq!(client.url("sessions/abc"), "http://localhost:8000/sessions/abc");
    }
}
