use std::fmt;

use axum::http::{HeaderMap, Uri, header::AUTHORIZATION};

/// Where a route expects its credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// `Authorization: Bearer <token>`
    Header,
    /// `?token=<token>`
    Query,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Header => write!(f, "Authorization header"),
            CredentialSource::Query => write!(f, "token parameter"),
        }
    }
}

/// The credential a request carried, before any comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentedCredential {
    /// Raw `Authorization` header value, prefix not yet checked.
    Header(String),
    /// `Authorization` header with bytes that are not valid UTF-8.
    NonUtf8Header,
    /// Value of the `token` query parameter.
    Query(String),
    Absent(CredentialSource),
}

impl PresentedCredential {
    /// Reads the `Authorization` header. An empty header counts as absent.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match headers.get(AUTHORIZATION) {
            None => PresentedCredential::Absent(CredentialSource::Header),
            Some(value) => match value.to_str() {
                Ok("") => PresentedCredential::Absent(CredentialSource::Header),
                Ok(raw) => PresentedCredential::Header(raw.to_string()),
                Err(_) => PresentedCredential::NonUtf8Header,
            },
        }
    }

    /// Reads the `token` query parameter. An empty value counts as absent.
    pub fn from_query(uri: &Uri) -> Self {
        let token = uri.query().and_then(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "token")
                .map(|(_, value)| value.into_owned())
        });

        match token {
            Some(token) if !token.is_empty() => PresentedCredential::Query(token),
            _ => PresentedCredential::Absent(CredentialSource::Query),
        }
    }
}
