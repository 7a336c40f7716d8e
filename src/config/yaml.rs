use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// Every field is optional so a file can set only what it needs; the rest
/// falls back to environment variables and then defaults.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 3000
///   log_level: "info"
///
/// auth:
///   token: "shared-secret"
///
/// azure:
///   subscription_key: "your-speech-key"
///   region: "eastus"
///   endpoint: "https://eastus.tts.speech.microsoft.com"
///   output_format: "audio-24khz-48kbitrate-mono-mp3"
///   timeout_seconds: 30
///
/// rate_limit:
///   cleanup_seconds: 300
///   tts:
///     window_ms: 60000
///     max_requests: 60
///   voices:
///     window_ms: 60000
///     max_requests: 30
///
/// limits:
///   max_text_length: 10000
///   max_ssml_length: 50000
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub auth: Option<AuthYaml>,
    pub azure: Option<AzureYaml>,
    pub rate_limit: Option<RateLimitYaml>,
    pub limits: Option<LimitsYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

/// Shared secret from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AuthYaml {
    pub token: Option<String>,
}

/// Azure Speech upstream from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AzureYaml {
    pub subscription_key: Option<String>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub output_format: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Rate limiting from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RateLimitYaml {
    pub cleanup_seconds: Option<u64>,
    pub tts: Option<WindowYaml>,
    pub voices: Option<WindowYaml>,
}

/// One sliding-window budget from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct WindowYaml {
    pub window_ms: Option<u64>,
    pub max_requests: Option<u32>,
}

/// Request size limits from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LimitsYaml {
    pub max_text_length: Option<usize>,
    pub max_ssml_length: Option<usize>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The YAML is malformed
    /// - Fields have invalid types
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}
