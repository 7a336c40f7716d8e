//! Transport-independent request parameter validation.
//!
//! Handlers pull raw strings out of the query string or body and run them
//! through these helpers. Every failure is a [`ValidationError`] with a
//! message suitable for returning to the caller; the handler decides the
//! status code.

use std::fmt;

use thiserror::Error;

/// A request parameter was missing, malformed or out of range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Missing required parameter: {0}")]
    Missing(String),

    #[error("Invalid {0}: must be a number")]
    NotANumber(String),

    #[error("Invalid {name}: must be between {min} and {max}")]
    OutOfRange { name: String, min: Bound, max: Bound },
}

/// Range bound rendered without a trailing `.0` for whole numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound(pub f64);

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns `value` when it is present and not blank after trimming.
///
/// The returned string is the original, untrimmed value.
pub fn validate_required_string(value: Option<&str>, name: &str) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::Missing(name.to_string())),
    }
}

/// Parses an optional numeric parameter bounded to the closed range `[min, max]`.
///
/// An absent value yields `default` as-is. Blank strings and `NaN` are not
/// numbers. No rounding is applied.
pub fn validate_bounded_number(
    value: Option<&str>,
    name: &str,
    default: f64,
    min: f64,
    max: f64,
) -> Result<f64, ValidationError> {
    let Some(raw) = value else {
        return Ok(default);
    };

    let number = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| !n.is_nan())
        .ok_or_else(|| ValidationError::NotANumber(name.to_string()))?;

    if number < min || number > max {
        return Err(ValidationError::OutOfRange {
            name: name.to_string(),
            min: Bound(min),
            max: Bound(max),
        });
    }

    Ok(number)
}

/// Like [`validate_bounded_number`], but an absent value stays absent.
pub fn validate_optional_number(
    value: Option<&str>,
    name: &str,
    min: f64,
    max: f64,
) -> Result<Option<f64>, ValidationError> {
    value
        .map(|v| validate_bounded_number(Some(v), name, min, min, max))
        .transpose()
}

/// Rejects text longer than `max_chars` characters.
pub fn validate_max_length(value: &str, max_chars: usize) -> Result<(), String> {
    if value.chars().count() > max_chars {
        Err(format!("Text too long (max {max_chars} characters)"))
    } else {
        Ok(())
    }
}
