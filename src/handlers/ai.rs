//! AI generation handlers

use axum::{
    Extension, Json,
    extract::Query,
    http::StatusCode,
};
use serde::Deserialize;

use crate::domain::models::Message;
use crate::gateway::GenerateRequest;
use crate::i18n::{Language, ProcessingStep, processing_steps};

use super::{ApiResponse, AppState, status_for};

/// Request body; required fields are validated by the gateway so that an
/// incomplete payload yields the envelope's 400, not a bare rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub chat_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// POST /api/ai/generate
pub async fn generate_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<GenerateBody>,
) -> (StatusCode, Json<ApiResponse<Message>>) {
    let language = body
        .language
        .as_deref()
        .map(Language::parse_or_default)
        .unwrap_or(state.language);

    let request = GenerateRequest {
        prompt: body.prompt,
        chat_id: body.chat_id,
        user_id: body.user_id,
        language: Some(language),
    };

    match state.gateway.generate_response(request).await {
        Ok(message) => (
            StatusCode::OK,
            Json(ApiResponse::ok(message, "AI response generated successfully")),
        ),
        Err(e) => {
            tracing::error!("Failed to generate AI response: {}", e);
            (status_for(&e), Json(ApiResponse::failure(e.to_string())))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StepsQuery {
    #[serde(default)]
    pub language: Option<String>,
}

/// GET /api/processing-steps
pub async fn processing_steps_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<StepsQuery>,
) -> Json<ApiResponse<Vec<ProcessingStep>>> {
    let language = query
        .language
        .as_deref()
        .map(Language::parse_or_default)
        .unwrap_or(state.language);
    let steps = processing_steps(language).to_vec();
    Json(ApiResponse::ok(steps, "Processing steps retrieved successfully"))
}
