use std::env;

use super::utils::{env_auth_token, non_empty, parse_env_number};
use super::yaml::{WindowYaml, YamlConfig};
use super::{RateLimitConfig, ServerConfig};

/// Merge YAML configuration with environment variables
///
/// Priority order (highest to lowest):
/// 1. YAML configuration values
/// 2. Environment variables
/// 3. Default values
///
/// Environment variables provide the base configuration while YAML overrides
/// specific values per deployment.
///
/// # Arguments
/// * `yaml_config` - Optional YAML configuration to use as overrides
pub fn merge_config(
    yaml_config: Option<YamlConfig>,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let yaml = yaml_config.unwrap_or_default();
    let defaults = ServerConfig::default();

    // Helper macro to get value with priority: YAML > ENV > Default
    macro_rules! get_value {
        ($env_var:expr, $yaml_value:expr, $default:expr) => {
            non_empty($yaml_value)
                .or_else(|| non_empty(env::var($env_var).ok()))
                .unwrap_or_else(|| $default.to_string())
        };
    }

    // Helper macro for optional values: YAML > ENV
    macro_rules! get_optional {
        ($env_var:expr, $yaml_value:expr) => {
            non_empty($yaml_value).or_else(|| non_empty(env::var($env_var).ok()))
        };
    }

    // Helper macro for numeric values: YAML > ENV (must parse) > Default
    macro_rules! get_number {
        ($env_var:expr, $yaml_value:expr, $default:expr) => {
            match $yaml_value {
                Some(value) => value,
                None => parse_env_number($env_var)?.unwrap_or($default),
            }
        };
    }

    let server = yaml.server.unwrap_or_default();
    let auth = yaml.auth.unwrap_or_default();
    let azure = yaml.azure.unwrap_or_default();
    let rate_limit = yaml.rate_limit.unwrap_or_default();
    let limits = yaml.limits.unwrap_or_default();

    // Server configuration
    let host = get_value!("HOST", server.host, defaults.host);
    let port = get_number!("PORT", server.port, defaults.port);
    let log_level = get_value!("LOG_LEVEL", server.log_level, defaults.log_level);

    // Shared secret: YAML, then MS_RA_FORWARDER_TOKEN, then TOKEN
    let auth_token = non_empty(auth.token).or_else(env_auth_token);

    // Azure Speech upstream
    let azure_speech_subscription_key =
        get_optional!("AZURE_SPEECH_SUBSCRIPTION_KEY", azure.subscription_key);
    let azure_speech_region = get_value!(
        "AZURE_SPEECH_REGION",
        azure.region,
        defaults.azure_speech_region
    );
    let azure_speech_endpoint = get_optional!("AZURE_SPEECH_ENDPOINT", azure.endpoint);
    let output_format = get_value!(
        "TTS_OUTPUT_FORMAT",
        azure.output_format,
        defaults.output_format
    );
    let upstream_timeout_seconds = get_number!(
        "UPSTREAM_TIMEOUT_SECONDS",
        azure.timeout_seconds,
        defaults.upstream_timeout_seconds
    );

    // Rate limiting
    let tts_rate_limit = merge_window(rate_limit.tts, "TTS", defaults.tts_rate_limit)?;
    let voices_rate_limit = merge_window(rate_limit.voices, "VOICES", defaults.voices_rate_limit)?;
    let rate_limit_cleanup_seconds = get_number!(
        "RATE_LIMIT_CLEANUP_SECONDS",
        rate_limit.cleanup_seconds,
        defaults.rate_limit_cleanup_seconds
    );

    // Request limits
    let max_text_length = get_number!(
        "MAX_TEXT_LENGTH",
        limits.max_text_length,
        defaults.max_text_length
    );
    let max_ssml_length = get_number!(
        "MAX_SSML_LENGTH",
        limits.max_ssml_length,
        defaults.max_ssml_length
    );

    Ok(ServerConfig {
        host,
        port,
        log_level,
        auth_token,
        azure_speech_subscription_key,
        azure_speech_region,
        azure_speech_endpoint,
        output_format,
        upstream_timeout_seconds,
        tts_rate_limit,
        voices_rate_limit,
        rate_limit_cleanup_seconds,
        max_text_length,
        max_ssml_length,
    })
}

/// Resolve one budget from `{prefix}_RATE_LIMIT_WINDOW_MS` / `{prefix}_RATE_LIMIT_MAX`.
fn merge_window(
    yaml: Option<WindowYaml>,
    prefix: &str,
    default: RateLimitConfig,
) -> Result<RateLimitConfig, Box<dyn std::error::Error>> {
    let yaml = yaml.unwrap_or_default();

    let window_ms = match yaml.window_ms {
        Some(value) => value,
        None => parse_env_number(&format!("{prefix}_RATE_LIMIT_WINDOW_MS"))?
            .unwrap_or(default.window_ms),
    };
    let max_requests = match yaml.max_requests {
        Some(value) => value,
        None => parse_env_number(&format!("{prefix}_RATE_LIMIT_MAX"))?
            .unwrap_or(default.max_requests),
    };

    Ok(RateLimitConfig::new(window_ms, max_requests))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::yaml::{AuthYaml, AzureYaml, RateLimitYaml, ServerYaml};
    use serial_test::serial;

    const VARS: &[&str] = &[
        "HOST",
        "PORT",
        "LOG_LEVEL",
        "TOKEN",
        "MS_RA_FORWARDER_TOKEN",
        "AZURE_SPEECH_SUBSCRIPTION_KEY",
        "AZURE_SPEECH_REGION",
        "AZURE_SPEECH_ENDPOINT",
        "TTS_OUTPUT_FORMAT",
        "UPSTREAM_TIMEOUT_SECONDS",
        "TTS_RATE_LIMIT_WINDOW_MS",
        "TTS_RATE_LIMIT_MAX",
        "VOICES_RATE_LIMIT_WINDOW_MS",
        "VOICES_RATE_LIMIT_MAX",
        "RATE_LIMIT_CLEANUP_SECONDS",
        "MAX_TEXT_LENGTH",
        "MAX_SSML_LENGTH",
    ];

    fn cleanup_env_vars() {
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    #[test]
    #[serial]
    fn test_merge_defaults_only() {
        cleanup_env_vars();

        let config = merge_config(None).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert!(config.auth_token.is_none());
        assert!(config.azure_speech_subscription_key.is_none());
        assert_eq!(config.azure_speech_region, "eastus");
        assert_eq!(config.tts_rate_limit, RateLimitConfig::new(60_000, 60));
        assert_eq!(config.voices_rate_limit, RateLimitConfig::new(60_000, 30));
        assert_eq!(config.max_text_length, 10_000);
        assert_eq!(config.max_ssml_length, 50_000);
    }

    #[test]
    #[serial]
    fn test_merge_env_only() {
        cleanup_env_vars();
        unsafe {
            env::set_var("PORT", "4000");
            env::set_var("TOKEN", "fallback-token");
            env::set_var("AZURE_SPEECH_SUBSCRIPTION_KEY", "env-key");
            env::set_var("TTS_RATE_LIMIT_MAX", "3");
            env::set_var("VOICES_RATE_LIMIT_WINDOW_MS", "500");
            env::set_var("MAX_SSML_LENGTH", "100");
        }

        let config = merge_config(None).unwrap();

        assert_eq!(config.port, 4000);
        assert_eq!(config.auth_token.as_deref(), Some("fallback-token"));
        assert_eq!(config.azure_speech_subscription_key.as_deref(), Some("env-key"));
        assert_eq!(config.tts_rate_limit, RateLimitConfig::new(60_000, 3));
        assert_eq!(config.voices_rate_limit, RateLimitConfig::new(500, 30));
        assert_eq!(config.max_ssml_length, 100);

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_merge_yaml_overrides_env() {
        cleanup_env_vars();
        unsafe {
            env::set_var("HOST", "10.0.0.1");
            env::set_var("MS_RA_FORWARDER_TOKEN", "env-token");
            env::set_var("AZURE_SPEECH_REGION", "eastus2");
            env::set_var("TTS_RATE_LIMIT_MAX", "3");
        }

        let yaml = YamlConfig {
            server: Some(ServerYaml {
                host: Some("127.0.0.1".to_string()),
                ..Default::default()
            }),
            auth: Some(AuthYaml {
                token: Some("yaml-token".to_string()),
            }),
            azure: Some(AzureYaml {
                region: Some("westus".to_string()),
                ..Default::default()
            }),
            rate_limit: Some(RateLimitYaml {
                tts: Some(WindowYaml {
                    window_ms: None,
                    max_requests: Some(9),
                }),
                ..Default::default()
            }),
            limits: None,
        };

        let config = merge_config(Some(yaml)).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.auth_token.as_deref(), Some("yaml-token"));
        assert_eq!(config.azure_speech_region, "westus");
        assert_eq!(config.tts_rate_limit.max_requests, 9);

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_merge_blank_token_is_open_mode() {
        cleanup_env_vars();
        unsafe {
            env::set_var("TOKEN", "   ");
        }

        let yaml = YamlConfig {
            auth: Some(AuthYaml {
                token: Some(String::new()),
            }),
            ..Default::default()
        };

        let config = merge_config(Some(yaml)).unwrap();
        assert!(config.auth_token.is_none());

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_merge_invalid_number() {
        cleanup_env_vars();
        unsafe {
            env::set_var("VOICES_RATE_LIMIT_MAX", "many");
        }

        let err = merge_config(None).unwrap_err();
        assert!(err.to_string().contains("VOICES_RATE_LIMIT_MAX"));

        cleanup_env_vars();
    }
}
