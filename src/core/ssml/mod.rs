//! SSML construction and validation.
//!
//! Two ways to produce a document:
//!
//! - [`Utterance`] builds the single-voice document used by the
//!   text-to-speech endpoint: one `prosody` element, optionally wrapped in an
//!   `mstts:express-as` style.
//! - [`SsmlBuilder`] is a fluent builder for documents mixing plain text,
//!   prosody, styles, breaks, emphasis, phonemes and say-as hints.
//!
//! Caller-supplied markup is only checked structurally by [`is_ssml`]: the
//! trimmed string must start with `<speak` and end with `</speak>`. It is
//! not parsed, so an accepted document is not guaranteed to be schema-valid.

mod builder;
mod utterance;

pub use builder::{EmphasisLevel, InterpretAs, PhoneticAlphabet, SsmlBuilder, SsmlNode};
pub use utterance::{Utterance, build_utterance};

use std::fmt;

use thiserror::Error;

pub const SYNTHESIS_NAMESPACE: &str = "http://www.w3.org/2001/10/synthesis";
pub const MSTTS_NAMESPACE: &str = "http://www.w3.org/2001/mstts";
pub const EMOTION_NAMESPACE: &str = "http://www.w3.org/2009/10/emotionml";
pub const SSML_VERSION: &str = "1.0";

pub(crate) const EXPRESS_AS: &str = "mstts:express-as";

/// Language tag of documents built by [`Utterance`].
pub const DEFAULT_LANGUAGE: &str = "en-US";
/// Voice used when none is given.
pub const DEFAULT_VOICE: &str = "zh-CN-XiaoxiaoNeural";

/// Caller-supplied markup was rejected before reaching the upstream engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("Invalid SSML format. Must start with <speak> and end with </speak>")]
    NotSsml,

    #[error("SSML too long (max {max} characters)")]
    TooLong { max: usize },
}

/// Returns true if `candidate` looks like a complete `<speak>` document.
///
/// Only the first and last tokens are inspected; this is not a parser.
pub fn is_ssml(candidate: &str) -> bool {
    let trimmed = candidate.trim();
    trimmed.starts_with("<speak") && trimmed.ends_with("</speak>")
}

/// Accepts `ssml` unchanged if it passes [`is_ssml`].
pub fn from_string(ssml: &str) -> Result<&str, MarkupError> {
    if is_ssml(ssml) {
        Ok(ssml)
    } else {
        Err(MarkupError::NotSsml)
    }
}

/// Structural check followed by a length ceiling in characters.
pub fn validate_external(ssml: &str, max_chars: usize) -> Result<&str, MarkupError> {
    let ssml = from_string(ssml)?;
    if ssml.chars().count() > max_chars {
        return Err(MarkupError::TooLong { max: max_chars });
    }
    Ok(ssml)
}

/// Value of a `volume`, `rate` or `pitch` attribute.
///
/// Numbers are rendered as a percentage (`80` becomes `80%`); strings are
/// passed through verbatim so callers can use keywords such as `x-slow` or
/// absolute values such as `+2st`.
#[derive(Debug, Clone, PartialEq)]
pub enum ProsodyValue {
    Percent(f64),
    Raw(String),
}

impl fmt::Display for ProsodyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Adding zero folds -0 into 0.
            ProsodyValue::Percent(value) => write!(f, "{}%", value + 0.0),
            ProsodyValue::Raw(value) => f.write_str(value),
        }
    }
}

impl From<f64> for ProsodyValue {
    fn from(value: f64) -> Self {
        ProsodyValue::Percent(value)
    }
}

impl From<i32> for ProsodyValue {
    fn from(value: i32) -> Self {
        ProsodyValue::Percent(f64::from(value))
    }
}

impl From<&str> for ProsodyValue {
    fn from(value: &str) -> Self {
        ProsodyValue::Raw(value.to_string())
    }
}

impl From<String> for ProsodyValue {
    fn from(value: String) -> Self {
        ProsodyValue::Raw(value)
    }
}

/// Escapes XML special characters in text content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            _ => result.push(c),
        }
    }
    result
}

/// Writes `<name a="v"...>content</name>`, or a self-closing tag when
/// `content` is `None`. Attribute values and content are escaped here.
pub(crate) fn write_element(
    out: &mut String,
    name: &str,
    attributes: &[(&str, String)],
    content: Option<&str>,
) {
    write_tag_head(out, name, attributes);
    match content {
        Some(content) => {
            out.push('>');
            out.push_str(&escape_xml(content));
            write_end(out, name);
        }
        None => out.push_str("/>"),
    }
}

/// Writes an opening tag; the caller appends already-rendered children and
/// closes it with [`write_end`].
pub(crate) fn write_start(out: &mut String, name: &str, attributes: &[(&str, String)]) {
    write_tag_head(out, name, attributes);
    out.push('>');
}

pub(crate) fn write_end(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn write_tag_head(out: &mut String, name: &str, attributes: &[(&str, String)]) {
    out.push('<');
    out.push_str(name);
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_xml(value));
        out.push('"');
    }
}

/// Wraps pre-rendered voice content in the fixed `speak`/`voice` framing.
pub(crate) fn wrap_document(language: &str, voice: &str, voice_content: &str) -> String {
    format!(
        r#"<speak xmlns="{SYNTHESIS_NAMESPACE}" xmlns:mstts="{MSTTS_NAMESPACE}" xmlns:emo="{EMOTION_NAMESPACE}" version="{SSML_VERSION}" xml:lang="{}"><voice name="{}">{voice_content}</voice></speak>"#,
        escape_xml(language),
        escape_xml(voice),
    )
}
