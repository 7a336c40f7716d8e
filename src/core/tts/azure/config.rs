use std::time::Duration;

use crate::config::ServerConfig;
use crate::core::tts::{TTSError, TTSResult};

/// Header carrying the subscription key.
pub const AZURE_SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Header selecting the audio container and codec.
pub const AZURE_OUTPUT_FORMAT_HEADER: &str = "X-Microsoft-OutputFormat";

pub const DEFAULT_REGION: &str = "eastus";

/// MP3 keeps the responses playable by browsers and reader apps.
pub const DEFAULT_OUTPUT_FORMAT: &str = "audio-24khz-48kbitrate-mono-mp3";

const SYNTHESIS_PATH: &str = "/cognitiveservices/v1";
const VOICES_PATH: &str = "/cognitiveservices/voices/list";

/// Configuration for the Azure Text-to-Speech REST API.
#[derive(Debug, Clone, PartialEq)]
pub struct AzureTTSConfig {
    pub subscription_key: String,
    /// Azure region of the Speech resource (e.g. "eastus", "westeurope").
    pub region: String,
    /// Overrides the regional base URL, e.g. for a private endpoint.
    pub endpoint: Option<String>,
    /// Value of the `X-Microsoft-OutputFormat` header.
    pub output_format: String,
    pub timeout: Duration,
}

impl Default for AzureTTSConfig {
    fn default() -> Self {
        Self {
            subscription_key: String::new(),
            region: DEFAULT_REGION.to_string(),
            endpoint: None,
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl AzureTTSConfig {
    /// Builds the connector configuration from the server configuration.
    ///
    /// Returns `None` when no subscription key is configured.
    pub fn from_server_config(config: &ServerConfig) -> Option<Self> {
        let subscription_key = config.azure_speech_subscription_key.clone()?;

        Some(Self {
            subscription_key,
            region: config.azure_speech_region.clone(),
            endpoint: config.azure_speech_endpoint.clone(),
            output_format: config.output_format.clone(),
            timeout: Duration::from_secs(config.upstream_timeout_seconds),
        })
    }

    pub fn validate(&self) -> TTSResult<()> {
        if self.subscription_key.trim().is_empty() {
            return Err(TTSError::InvalidConfiguration(
                "Azure subscription key cannot be empty".to_string(),
            ));
        }
        if self.endpoint.is_none() && self.region.trim().is_empty() {
            return Err(TTSError::InvalidConfiguration(
                "Azure region is required when no endpoint is set".to_string(),
            ));
        }
        Ok(())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{}.tts.speech.microsoft.com", self.region),
        }
    }

    /// Format: `https://{region}.tts.speech.microsoft.com/cognitiveservices/v1`
    pub fn synthesis_url(&self) -> String {
        format!("{}{SYNTHESIS_PATH}", self.base_url())
    }

    /// Format: `https://{region}.tts.speech.microsoft.com/cognitiveservices/voices/list`
    pub fn voices_url(&self) -> String {
        format!("{}{VOICES_PATH}", self.base_url())
    }

    pub fn content_type(&self) -> &'static str {
        content_type_for_format(&self.output_format)
    }
}

/// MIME type matching an Azure output format name.
pub fn content_type_for_format(format: &str) -> &'static str {
    let format = format.to_ascii_lowercase();
    if format.ends_with("mp3") {
        "audio/mpeg"
    } else if format.starts_with("ogg") {
        "audio/ogg"
    } else if format.starts_with("webm") {
        "audio/webm"
    } else if format.starts_with("riff") {
        "audio/wav"
    } else {
        "application/octet-stream"
    }
}
