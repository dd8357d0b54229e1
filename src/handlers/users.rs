//! Current-user handlers

use axum::{Extension, Json, http::StatusCode};

use crate::domain::models::{UserInfo, UserPatch};

use super::{ApiResponse, AppState};

/// GET /api/users/me
pub async fn current_user_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<ApiResponse<UserInfo>>) {
    let user = state.users.current().await;
    (
        StatusCode::OK,
        Json(ApiResponse::ok(user, "User retrieved successfully")),
    )
}

/// PATCH /api/users/me
pub async fn update_user_handler(
    Extension(state): Extension<AppState>,
    Json(patch): Json<UserPatch>,
) -> (StatusCode, Json<ApiResponse<UserInfo>>) {
    let user = state.users.update_current(&patch).await;
    (
        StatusCode::OK,
        Json(ApiResponse::ok(user, "User updated successfully")),
    )
}
