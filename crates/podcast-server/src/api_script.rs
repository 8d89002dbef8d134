//! `POST /api/generate-turn`.

use crate::api::{body_rejection, ApiError};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};
use podcast_types::{GenerateTurnRequest, GenerateTurnResponse};
use std::sync::Arc;

/// Asks the script writer for the named persona's next utterance.
pub async fn generate_turn_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<GenerateTurnRequest>, JsonRejection>,
) -> Result<Json<GenerateTurnResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        let (status, message) = body_rejection(&rejection);
        ApiError::Body { status, message }
    })?;

    let writer = state
        .script_writer
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("script writer is not configured".into()))?;

    let persona = request
        .persons
        .iter()
        .find(|p| p.id == request.person_id)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown personId: {}", request.person_id)))?;

    let text = writer
        .next_utterance(persona, &request.history, &request.persons)
        .await
        .map_err(|e| {
            tracing::error!(person_id = %request.person_id, error = %e, "turn generation failed");
            e
        })?;

    Ok(Json(GenerateTurnResponse { text }))
}
