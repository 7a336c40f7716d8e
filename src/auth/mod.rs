//! Shared-secret admission gate.
//!
//! A deployment either runs open (no secret configured) or requires every
//! guarded request to present the one configured secret, as a bearer token
//! or, for reader-app import links, as a `token` query parameter.

pub mod api_secret;
pub mod extractor;

pub use api_secret::secret_matches;
pub use extractor::{CredentialSource, PresentedCredential};

use crate::errors::auth_error::{AuthError, AuthResult};

const BEARER_PREFIX: &str = "Bearer ";

/// Decides whether a presented credential admits the request.
///
/// Checks run in a fixed order: open mode, absence, shape, then value.
pub fn authorize(presented: &PresentedCredential, configured_secret: Option<&str>) -> AuthResult<()> {
    let Some(secret) = configured_secret else {
        return Ok(());
    };

    let token = match presented {
        PresentedCredential::Absent(source) => return Err(AuthError::MissingCredential(*source)),
        PresentedCredential::NonUtf8Header => return Err(AuthError::MalformedCredential),
        PresentedCredential::Header(raw) => raw
            .strip_prefix(BEARER_PREFIX)
            .ok_or(AuthError::MalformedCredential)?,
        PresentedCredential::Query(token) => token.as_str(),
    };

    if secret_matches(token, secret) {
        Ok(())
    } else {
        Err(AuthError::CredentialMismatch)
    }
}
