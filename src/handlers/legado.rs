//! Import records for the Legado reader app.
//!
//! Legado fetches speech by filling placeholders in a URL template, so the
//! record points back at `/api/text-to-speech` with the reader's speed and
//! text substituted on its side.

use axum::{
    extract::State,
    http::{HeaderMap, Uri, header},
    response::Json,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::core::validation::{validate_bounded_number, validate_required_string};
use crate::errors::app_error::{AppError, AppResult};
use crate::state::AppState;

use super::params::FirstParams;

/// Maps Legado's 5..=20 speed slider onto the prosody rate percentage.
pub const LEGADO_RATE_TEMPLATE: &str = "{{(speakSpeed - 10) * 2}}";
pub const LEGADO_TEXT_TEMPLATE: &str = "{{java.encodeURI(speakText)}}";

/// Query parameters of `GET /api/legado-import`
#[derive(Debug, Default)]
pub struct LegadoImportQuery {
    pub voice: Option<String>,
    pub pitch: Option<String>,
    pub volume: Option<String>,
    pub personality: Option<String>,
    pub protocol: Option<String>,
}

impl LegadoImportQuery {
    pub fn from_uri(uri: &Uri) -> Self {
        let mut params = FirstParams::from_uri(uri);
        Self {
            voice: params.take("voice"),
            pitch: params.take("pitch"),
            volume: params.take("volume"),
            personality: params.take("personality"),
            protocol: params.take("protocol"),
        }
    }
}

/// One speech engine entry in Legado's import format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegadoImport {
    pub name: String,
    pub content_type: String,
    pub id: i64,
    pub login_check_js: String,
    pub login_ui: String,
    pub login_url: String,
    pub url: String,
    /// JSON object encoded as a string, as Legado expects.
    pub header: String,
}

impl LegadoImport {
    /// Builds the record for `query`, served from `host`.
    pub fn build(query: LegadoImportQuery, host: &str, auth_token: Option<&str>) -> AppResult<Self> {
        let voice = validate_required_string(query.voice.as_deref(), "voice")?;
        let pitch = validate_bounded_number(query.pitch.as_deref(), "pitch", 0.0, -100.0, 100.0)?;
        let volume =
            validate_bounded_number(query.volume.as_deref(), "volume", 100.0, 0.0, 100.0)?;

        let protocol = query
            .protocol
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "http".to_string());
        if protocol != "http" && protocol != "https" {
            return Err(AppError::InvalidParameter(
                "Invalid protocol: must be http or https".to_string(),
            ));
        }

        let mut params = url::form_urlencoded::Serializer::new(String::new());
        params
            .append_pair("voice", &voice)
            .append_pair("volume", &volume.to_string())
            .append_pair("pitch", &pitch.to_string());
        if let Some(personality) = query.personality.as_deref().filter(|p| !p.is_empty()) {
            params.append_pair("personality", personality);
        }

        let url = format!(
            "{protocol}://{host}/api/text-to-speech?{}&rate={LEGADO_RATE_TEMPLATE}&text={LEGADO_TEXT_TEMPLATE}",
            params.finish()
        );

        let header = match auth_token {
            Some(token) => json!({ "Authorization": format!("Bearer {token}") }),
            None => json!({}),
        };

        Ok(Self {
            name: voice,
            content_type: "audio/mpeg".to_string(),
            id: chrono::Utc::now().timestamp_millis(),
            login_check_js: String::new(),
            login_ui: String::new(),
            login_url: String::new(),
            url,
            header: header.to_string(),
        })
    }
}

/// Handler for `GET /api/legado-import`
pub async fn legado_import_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
) -> AppResult<Json<LegadoImport>> {
    let query = LegadoImportQuery::from_uri(&uri);
    let fallback_host = format!("localhost:{}", state.config.port);
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(fallback_host.as_str());

    let record = LegadoImport::build(query, host, state.config.auth_token.as_deref())?;
    tracing::debug!(voice = %record.name, "Built Legado import record");

    Ok(Json(record))
}
