use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::auth::CredentialSource;

/// Error codes for structured error responses
pub mod error_codes {
    pub const MISSING_CREDENTIAL: &str = "missing_credential";
    pub const MALFORMED_CREDENTIAL: &str = "malformed_credential";
    pub const CREDENTIAL_MISMATCH: &str = "credential_mismatch";
}

/// Admission gate failures. All of them map to 401.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Nothing was presented where the route expects a credential
    #[error("Missing {0}")]
    MissingCredential(CredentialSource),

    /// Authorization header present but not `Bearer <token>`
    #[error("Invalid Authorization format. Expected: Bearer <token>")]
    MalformedCredential,

    /// Well-formed credential that does not match the configured secret
    #[error("Invalid token")]
    CredentialMismatch,
}

impl AuthError {
    /// Get the error code for structured error responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential(_) => error_codes::MISSING_CREDENTIAL,
            AuthError::MalformedCredential => error_codes::MALFORMED_CREDENTIAL,
            AuthError::CredentialMismatch => error_codes::CREDENTIAL_MISMATCH,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    /// Log the error at the appropriate level
    pub fn log(&self) {
        match self {
            // Debug level for callers that simply forgot the credential
            AuthError::MissingCredential(_) => {
                tracing::debug!("{}", self);
            }
            AuthError::MalformedCredential | AuthError::CredentialMismatch => {
                tracing::warn!(code = self.error_code(), "Rejected credential: {}", self);
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();

        // Response format: {"error": "error_code", "message": "human readable message"}
        let body = Json(json!({
            "error": self.error_code(),
            "message": self.to_string()
        }));

        (self.status_code(), body).into_response()
    }
}

// Result type alias for convenience
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AuthError::MissingCredential(CredentialSource::Header).error_code(),
            error_codes::MISSING_CREDENTIAL
        );
        assert_eq!(
            AuthError::MalformedCredential.error_code(),
            error_codes::MALFORMED_CREDENTIAL
        );
        assert_eq!(
            AuthError::CredentialMismatch.error_code(),
            error_codes::CREDENTIAL_MISMATCH
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AuthError::MissingCredential(CredentialSource::Header).to_string(),
            "Missing Authorization header"
        );
        assert_eq!(
            AuthError::MissingCredential(CredentialSource::Query).to_string(),
            "Missing token parameter"
        );
        assert_eq!(
            AuthError::MalformedCredential.to_string(),
            "Invalid Authorization format. Expected: Bearer <token>"
        );
        assert_eq!(AuthError::CredentialMismatch.to_string(), "Invalid token");
    }

    #[test]
    fn test_all_statuses_are_unauthorized() {
        for err in [
            AuthError::MissingCredential(CredentialSource::Query),
            AuthError::MalformedCredential,
            AuthError::CredentialMismatch,
        ] {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_into_response_format() {
        let response = AuthError::CredentialMismatch.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = tokio_test::block_on(async {
            response.into_body().collect().await.unwrap().to_bytes()
        });
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "credential_mismatch");
        assert_eq!(json["message"], "Invalid token");
    }
}
