use axum::{
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::tts::SynthesizedAudio;
use crate::core::validation::{
    validate_bounded_number, validate_max_length, validate_optional_number,
    validate_required_string,
};
use crate::core::Utterance;
use crate::errors::app_error::{AppError, AppResult};
use crate::state::AppState;

use super::params::FirstParams;

/// Audio is addressed by its full query string, so it never changes.
pub const AUDIO_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Query parameters of `GET /api/text-to-speech`
///
/// Everything arrives as a raw string so validation can report the exact
/// parameter that is wrong. A repeated parameter keeps its first value.
#[derive(Debug, Default)]
pub struct TextToSpeechQuery {
    pub text: Option<String>,
    pub voice: Option<String>,
    pub pitch: Option<String>,
    pub rate: Option<String>,
    pub volume: Option<String>,
    /// Speaking style for `mstts:express-as`
    pub personality: Option<String>,
    pub style_degree: Option<String>,
    pub role: Option<String>,
}

/// Validated text-to-speech request.
#[derive(Debug, Clone, PartialEq)]
pub struct TextToSpeechParams {
    pub text: String,
    pub voice: String,
    pub pitch: f64,
    pub rate: f64,
    pub volume: f64,
    pub personality: Option<String>,
    pub style_degree: Option<f64>,
    pub role: Option<String>,
}

impl TextToSpeechQuery {
    pub fn from_uri(uri: &Uri) -> Self {
        let mut params = FirstParams::from_uri(uri);
        Self {
            text: params.take("text"),
            voice: params.take("voice"),
            pitch: params.take("pitch"),
            rate: params.take("rate"),
            volume: params.take("volume"),
            personality: params.take("personality"),
            style_degree: params.take("styleDegree"),
            role: params.take("role"),
        }
    }

    /// Validates parameters in request order, then the text length.
    pub fn validate(self, max_text_length: usize) -> AppResult<TextToSpeechParams> {
        let text = validate_required_string(self.text.as_deref(), "text")?;
        let voice = validate_required_string(self.voice.as_deref(), "voice")?;
        let pitch = validate_bounded_number(self.pitch.as_deref(), "pitch", 0.0, -100.0, 100.0)?;
        let rate = validate_bounded_number(self.rate.as_deref(), "rate", 0.0, -100.0, 100.0)?;
        let volume =
            validate_bounded_number(self.volume.as_deref(), "volume", 100.0, 0.0, 100.0)?;
        let style_degree =
            validate_optional_number(self.style_degree.as_deref(), "styleDegree", 0.01, 2.0)?;

        validate_max_length(&text, max_text_length).map_err(AppError::InvalidParameter)?;

        Ok(TextToSpeechParams {
            text,
            voice,
            pitch,
            rate,
            volume,
            personality: self.personality.filter(|p| !p.is_empty()),
            style_degree,
            role: self.role.filter(|r| !r.is_empty()),
        })
    }
}

impl TextToSpeechParams {
    pub fn to_ssml(&self) -> String {
        let mut utterance = Utterance::new(self.text.as_str())
            .voice(self.voice.as_str())
            .volume(self.volume)
            .rate(self.rate)
            .pitch(self.pitch);
        if let Some(style) = &self.personality {
            utterance = utterance.style(style.as_str());
        }
        if let Some(degree) = self.style_degree {
            utterance = utterance.style_degree(degree);
        }
        if let Some(role) = &self.role {
            utterance = utterance.role(role.as_str());
        }
        utterance.to_ssml()
    }
}

/// Binary audio response shared by the synthesis endpoints.
pub fn audio_response(audio: SynthesizedAudio) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, audio.content_type.as_str()),
            (header::CACHE_CONTROL, AUDIO_CACHE_CONTROL),
        ],
        audio.data,
    )
        .into_response()
}

/// Handler for `GET /api/text-to-speech`
///
/// Builds a single-voice SSML document from the query and relays the
/// synthesized audio.
pub async fn text_to_speech_handler(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> AppResult<Response> {
    let params = TextToSpeechQuery::from_uri(&uri).validate(state.config.max_text_length)?;

    debug!(
        text_length = params.text.chars().count(),
        voice = %params.voice,
        pitch = params.pitch,
        rate = params.rate,
        volume = params.volume,
        personality = ?params.personality,
        "TTS request parameters"
    );

    let synthesizer = state.require_synthesizer()?;
    let ssml = params.to_ssml();

    info!(voice = %params.voice, provider = synthesizer.name(), "Starting TTS conversion");
    let audio = synthesizer.synthesize(&ssml).await?;
    info!(audio_size = audio.data.len(), "TTS conversion successful");

    Ok(audio_response(audio))
}
