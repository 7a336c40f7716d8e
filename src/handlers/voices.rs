use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::core::Voice;
use crate::errors::app_error::AppResult;
use crate::state::AppState;

/// The catalog changes rarely; let clients keep it for an hour.
pub const VOICES_CACHE_CONTROL: &str = "public, max-age=3600";

/// Body of `GET /api/voices`
#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub success: bool,
    pub count: usize,
    pub voices: Vec<Voice>,
}

impl From<Vec<Voice>> for VoicesResponse {
    fn from(voices: Vec<Voice>) -> Self {
        Self {
            success: true,
            count: voices.len(),
            voices,
        }
    }
}

/// Handler for `GET /api/voices`
pub async fn list_voices(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let synthesizer = state.require_synthesizer()?;
    let voices = synthesizer.list_voices().await?;

    info!(
        provider = synthesizer.name(),
        voice_count = voices.len(),
        "Successfully fetched voices"
    );

    Ok((
        [(header::CACHE_CONTROL, VOICES_CACHE_CONTROL)],
        Json(VoicesResponse::from(voices)),
    )
        .into_response())
}
