//! Message handlers

use axum::{
    Extension, Json,
    extract::Query,
    http::StatusCode,
};
use serde::Deserialize;

use crate::domain::models::{Message, Page};
use crate::gateway::{ListMessagesOptions, NewMessage};

use super::{ApiResponse, AppState, status_for};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesQuery {
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// GET /api/messages?chatId=...
pub async fn list_messages_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<MessagesQuery>,
) -> (StatusCode, Json<ApiResponse<Page<Message>>>) {
    let Some(chat_id) = query.chat_id else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::failure("Chat ID is required")),
        );
    };
    let options = ListMessagesOptions {
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(50),
    };

    match state.gateway.list_messages(&chat_id, options).await {
        Ok(page) => (
            StatusCode::OK,
            Json(ApiResponse::ok(page, "Messages retrieved successfully")),
        ),
        Err(e) => {
            tracing::error!(chat_id = %chat_id, "Failed to list messages: {}", e);
            (status_for(&e), Json(ApiResponse::failure(e.to_string())))
        }
    }
}

/// POST /api/messages
pub async fn send_message_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<NewMessage>,
) -> (StatusCode, Json<ApiResponse<Message>>) {
    match state.gateway.send_message(request).await {
        Ok(message) => (
            StatusCode::OK,
            Json(ApiResponse::ok(message, "Message created successfully")),
        ),
        Err(e) => {
            tracing::error!("Failed to create message: {}", e);
            (status_for(&e), Json(ApiResponse::failure(e.to_string())))
        }
    }
}
