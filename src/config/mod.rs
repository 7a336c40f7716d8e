//! Configuration module for the gateway
//!
//! Configuration comes from YAML files and environment variables. When both
//! are present YAML values win, then environment variables, then defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//! - `utils`: Utility functions for configuration parsing
//!
//! # Example
//! ```rust,no_run
//! use ssml_gateway::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable fallbacks
//! let config = ServerConfig::from_file(&PathBuf::from("config.yaml"))?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::time::Duration;

mod env;
mod merge;
mod utils;
mod validation;
mod yaml;

pub use validation::validate_config;

/// Sliding-window budget for one class of endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub window_ms: u64,
    pub max_requests: u32,
}

impl RateLimitConfig {
    pub const fn new(window_ms: u64, max_requests: u32) -> Self {
        Self {
            window_ms,
            max_requests,
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,
    pub log_level: String,

    // Shared secret; `None` runs the gateway in open mode.
    pub auth_token: Option<String>,

    // Upstream (Azure Speech) settings
    pub azure_speech_subscription_key: Option<String>,
    pub azure_speech_region: String,
    pub azure_speech_endpoint: Option<String>,
    pub output_format: String,
    pub upstream_timeout_seconds: u64,

    // Traffic shaping
    pub tts_rate_limit: RateLimitConfig,
    pub voices_rate_limit: RateLimitConfig,
    pub rate_limit_cleanup_seconds: u64,

    // Request limits
    pub max_text_length: usize,
    pub max_ssml_length: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            auth_token: None,
            azure_speech_subscription_key: None,
            azure_speech_region: crate::core::tts::azure::DEFAULT_REGION.to_string(),
            azure_speech_endpoint: None,
            output_format: crate::core::tts::azure::DEFAULT_OUTPUT_FORMAT.to_string(),
            upstream_timeout_seconds: 30,
            tts_rate_limit: RateLimitConfig::new(60_000, 60),
            voices_rate_limit: RateLimitConfig::new(60_000, 30),
            rate_limit_cleanup_seconds: 300,
            max_text_length: 10_000,
            max_ssml_length: 50_000,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file with environment variable fallbacks
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables
    /// 3. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        // No .env loading here: the YAML file is the source of truth and only
        // real environment variables fill the gaps.
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;

        validate_config(&config)?;

        Ok(config)
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if a shared secret is configured
    pub fn has_auth_token(&self) -> bool {
        self.auth_token.is_some()
    }

    /// Check if the upstream speech service is configured
    pub fn has_upstream(&self) -> bool {
        self.azure_speech_subscription_key.is_some()
    }

    pub fn rate_limit_cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.rate_limit_cleanup_seconds)
    }
}
