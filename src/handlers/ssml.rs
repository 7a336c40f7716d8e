use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, header},
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::ssml::validate_external;
use crate::errors::app_error::{AppError, AppResult};
use crate::handlers::speak::audio_response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct SsmlBody {
    ssml: Option<serde_json::Value>,
}

/// Pulls the SSML document out of a request body.
///
/// JSON bodies carry it in an `ssml` string field; any other content type is
/// taken as the document itself.
pub fn extract_ssml(headers: &HeaderMap, body: &[u8]) -> AppResult<String> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));

    if is_json {
        let parsed: SsmlBody = serde_json::from_slice(body)
            .map_err(|e| AppError::InvalidParameter(format!("Invalid JSON body: {e}")))?;

        return match parsed.ssml {
            Some(serde_json::Value::String(ssml)) if !ssml.is_empty() => Ok(ssml),
            _ => Err(AppError::InvalidParameter(
                "Missing ssml field in JSON body".to_string(),
            )),
        };
    }

    String::from_utf8(body.to_vec())
        .map_err(|_| AppError::InvalidParameter("Request body must be UTF-8".to_string()))
}

/// Handler for `POST /api/ssml`
///
/// Relays caller-written SSML after a structural check and a size ceiling.
pub async fn ssml_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Response> {
    let ssml = extract_ssml(&headers, &body)?;
    debug!(ssml_length = ssml.chars().count(), "SSML request");

    let ssml = validate_external(&ssml, state.config.max_ssml_length)?;

    let synthesizer = state.require_synthesizer()?;
    info!(provider = synthesizer.name(), "Starting SSML conversion");
    let audio = synthesizer.synthesize(ssml).await?;
    info!(audio_size = audio.data.len(), "SSML conversion successful");

    Ok(audio_response(audio))
}
