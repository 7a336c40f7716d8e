use std::env;
use std::str::FromStr;

/// Treat blank strings as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Read a numeric environment variable
///
/// Unset or blank variables yield `Ok(None)`; anything else must parse.
pub fn parse_env_number<T>(name: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(env::var(name).ok()) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("Invalid {name} environment variable: {e}")),
        None => Ok(None),
    }
}

/// Shared secret lookup: `MS_RA_FORWARDER_TOKEN` first, then `TOKEN`.
pub fn env_auth_token() -> Option<String> {
    non_empty(env::var("MS_RA_FORWARDER_TOKEN").ok()).or_else(|| non_empty(env::var("TOKEN").ok()))
}
