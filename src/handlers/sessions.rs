//! Chat session handlers

use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;

use crate::domain::models::{ChatSession, Page, SessionPatch, SessionStatus};
use crate::gateway::{ListSessionsOptions, NewSession};

use super::{ApiResponse, AppState, status_for};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionsQuery {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub status: Option<String>,
}

/// GET /api/chat-sessions
pub async fn list_sessions_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<SessionsQuery>,
) -> (StatusCode, Json<ApiResponse<Page<ChatSession>>>) {
    let user_id = query.user_id.unwrap_or_else(|| "1".to_string());
    let options = ListSessionsOptions {
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(10),
        status: SessionStatus::parse_or_active(query.status.as_deref().unwrap_or("active")),
    };

    match state.gateway.list_sessions(&user_id, options).await {
        Ok(page) => (
            StatusCode::OK,
            Json(ApiResponse::ok(page, "Chat sessions retrieved successfully")),
        ),
        Err(e) => {
            tracing::error!(user_id = %user_id, "Failed to list sessions: {}", e);
            (status_for(&e), Json(ApiResponse::failure(e.to_string())))
        }
    }
}

/// POST /api/chat-sessions
pub async fn create_session_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<NewSession>,
) -> (StatusCode, Json<ApiResponse<ChatSession>>) {
    match state.gateway.create_session(request).await {
        Ok(session) => {
            tracing::info!(session_id = %session.id, "Created chat session");
            (
                StatusCode::OK,
                Json(ApiResponse::ok(session, "Chat session created successfully")),
            )
        }
        Err(e) => {
            tracing::error!("Failed to create session: {}", e);
            (status_for(&e), Json(ApiResponse::failure(e.to_string())))
        }
    }
}

/// GET /api/chat-sessions/{id}
pub async fn get_session_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse<ChatSession>>) {
    match state.gateway.get_session(&id).await {
        Ok(session) => (
            StatusCode::OK,
            Json(ApiResponse::ok(session, "Chat session retrieved successfully")),
        ),
        Err(e) => (status_for(&e), Json(ApiResponse::failure(e.to_string()))),
    }
}

/// PATCH /api/chat-sessions/{id}
pub async fn update_session_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<SessionPatch>,
) -> (StatusCode, Json<ApiResponse<ChatSession>>) {
    match state.gateway.update_session(&id, patch).await {
        Ok(session) => (
            StatusCode::OK,
            Json(ApiResponse::ok(session, "Chat session updated successfully")),
        ),
        Err(e) => {
            tracing::error!(session_id = %id, "Failed to update session: {}", e);
            (status_for(&e), Json(ApiResponse::failure(e.to_string())))
        }
    }
}

/// DELETE /api/chat-sessions/{id}
pub async fn delete_session_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    match state.gateway.delete_session(&id).await {
        Ok(()) => {
            tracing::info!(session_id = %id, "Deleted chat session");
            (
                StatusCode::OK,
                Json(ApiResponse::ok((), "Chat session deleted successfully")),
            )
        }
        Err(e) => {
            tracing::error!(session_id = %id, "Failed to delete session: {}", e);
            (status_for(&e), Json(ApiResponse::failure(e.to_string())))
        }
    }
}
