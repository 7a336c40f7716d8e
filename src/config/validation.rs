use super::{RateLimitConfig, ServerConfig};

/// Validate a merged configuration
///
/// Checks that:
/// - every rate-limit window and budget is positive
/// - size limits and timeouts are positive
/// - a custom upstream endpoint is an http(s) URL
pub fn validate_config(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    validate_rate_limit("tts", &config.tts_rate_limit)?;
    validate_rate_limit("voices", &config.voices_rate_limit)?;

    if config.rate_limit_cleanup_seconds == 0 {
        return Err("rate_limit cleanup_seconds must be greater than zero".into());
    }
    if config.upstream_timeout_seconds == 0 {
        return Err("azure timeout_seconds must be greater than zero".into());
    }
    if config.max_text_length == 0 {
        return Err("max_text_length must be greater than zero".into());
    }
    if config.max_ssml_length == 0 {
        return Err("max_ssml_length must be greater than zero".into());
    }

    if let Some(endpoint) = &config.azure_speech_endpoint {
        validate_endpoint(endpoint)?;
    }

    Ok(())
}

fn validate_rate_limit(
    name: &str,
    limit: &RateLimitConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if limit.window_ms == 0 {
        return Err(format!("{name} rate limit window_ms must be greater than zero").into());
    }
    if limit.max_requests == 0 {
        return Err(format!("{name} rate limit max_requests must be greater than zero").into());
    }
    Ok(())
}

fn validate_endpoint(endpoint: &str) -> Result<(), Box<dyn std::error::Error>> {
    let parsed = url::Url::parse(endpoint)
        .map_err(|e| format!("Invalid AZURE_SPEECH_ENDPOINT '{endpoint}': {e}"))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(format!(
            "AZURE_SPEECH_ENDPOINT must use http or https, got '{scheme}'"
        )
        .into()),
    }
}
