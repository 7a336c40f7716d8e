//! Upstream speech synthesis connector.
//!
//! The gateway never synthesizes audio itself. It hands a finished SSML
//! document to a [`SpeechSynthesizer`] and relays the result. Voice listing
//! is a pass-through lookup against the same upstream.

pub mod azure;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub use azure::{AzureSynthesizer, AzureTTSConfig};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TTSError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Audio generation failed: {0}")]
    AudioGenerationFailed(String),
}

pub type TTSResult<T> = Result<T, TTSError>;

impl From<reqwest::Error> for TTSError {
    fn from(err: reqwest::Error) -> Self {
        TTSError::NetworkError(err.to_string())
    }
}

/// Audio returned by the upstream engine.
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub data: Bytes,
    /// MIME type to send back to the caller, e.g. `audio/mpeg`.
    pub content_type: String,
}

/// One entry of the upstream voice catalog.
///
/// Only the fields the gateway itself looks at are typed; everything else
/// is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Voice {
    pub short_name: String,
    #[serde(default)]
    pub locale: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesizes a complete SSML document.
    async fn synthesize(&self, ssml: &str) -> TTSResult<SynthesizedAudio>;

    /// Lists the voices the upstream engine offers.
    async fn list_voices(&self) -> TTSResult<Vec<Voice>>;

    /// Short provider name for logs.
    fn name(&self) -> &'static str;
}
