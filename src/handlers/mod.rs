//! HTTP surface of the chat hub
//!
//! Axum handlers exposing the data operations consumed by the UI layer.
//! Every response uses the `ApiResponse` envelope.

pub mod ai;
pub mod messages;
pub mod sessions;
pub mod users;

use std::sync::Arc;

use axum::http::StatusCode;
use serde::Serialize;

use crate::gateway::ChatGateway;
use crate::i18n::Language;
use crate::infrastructure::UserDirectory;
use crate::shared::errors::AppError;

pub use ai::{generate_handler, processing_steps_handler};
pub use messages::{list_messages_handler, send_message_handler};
pub use sessions::{
    create_session_handler, delete_session_handler, get_session_handler, list_sessions_handler,
    update_session_handler,
};
pub use users::{current_user_handler, update_user_handler};

/// Shared handler state, injected as an axum Extension
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn ChatGateway>,
    pub users: Arc<UserDirectory>,
    pub language: Language,
}

/// Response envelope shared by every endpoint
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: &str) -> Self {
        Self {
            data: Some(data),
            success: true,
            message: Some(message.to_string()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            data: None,
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// HTTP status for a gateway error
pub(crate) fn status_for(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Validation(_) => StatusCode::BAD_REQUEST,
        AppError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&AppError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&AppError::Validation("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&AppError::UpstreamUnavailable("x".into())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_envelope_shape() {
        let ok: ApiResponse<u32> = ApiResponse::ok(7, "fetched");
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value["data"], 7);
        assert_eq!(value["success"], true);
        assert!(value.get("error").is_none());

        let failed: ApiResponse<u32> = ApiResponse::failure("boom");
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["data"], serde_json::Value::Null);
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "boom");
    }
}
