//! `POST /api/generate-podcast`.

use crate::api::{body_rejection, PodcastError, MISSING_FIELDS_MESSAGE};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};
use podcast_types::{GeneratePodcastRequest, GeneratePodcastResponse};
use podcast_voice::VoiceMap;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

pub const SUCCESS_MESSAGE: &str = "Podcast generated successfully";

/// Renders the conversation to one audio file, publishes it, and returns its
/// URL. Nothing is synthesized unless the body carries personas and at least
/// one turn, and every turn has speakable text.
pub async fn generate_podcast_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<GeneratePodcastRequest>, JsonRejection>,
) -> Result<Json<GeneratePodcastResponse>, PodcastError> {
    let Json(request) = payload.map_err(|rejection| {
        let (status, message) = body_rejection(&rejection);
        tracing::debug!(
            status = status.as_u16(),
            error = %message,
            "rejected podcast request body"
        );
        PodcastError::Body { status, message }
    })?;

    let (persons, turns) = match (request.persons, request.turns) {
        (Some(persons), Some(turns)) if !turns.is_empty() => (persons, turns),
        _ => return Err(PodcastError::InvalidRequest(MISSING_FIELDS_MESSAGE.to_string())),
    };

    let request_id = Uuid::new_v4().to_string();
    let started = Instant::now();
    tracing::info!(
        request_id = %request_id,
        personas = persons.len(),
        turns = turns.len(),
        "generating podcast"
    );

    let voices = VoiceMap::from_personas(&persons)?;
    let audio = state.pipeline.synthesize_conversation(&turns, &voices).await?;
    let audio_url = state
        .publisher
        .publish(audio.data, audio.format, &request_id)
        .await?;

    tracing::info!(
        request_id = %request_id,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "podcast generated"
    );

    Ok(Json(GeneratePodcastResponse {
        audio_url,
        message: SUCCESS_MESSAGE.to_string(),
    }))
}
