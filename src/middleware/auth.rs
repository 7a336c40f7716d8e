use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{PresentedCredential, authorize};
use crate::errors::auth_error::AuthError;
use crate::state::AppState;

/// Bearer-token gate for the API routes
///
/// The middleware:
/// 1. Passes everything through when no secret is configured
/// 2. Reads the `Authorization` header without interpreting it
/// 3. Requires `Bearer <token>` with a token equal to the configured secret
/// 4. Returns 401 with a structured body otherwise
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let presented = PresentedCredential::from_headers(request.headers());
    check(&state, &presented, &request)?;
    Ok(next.run(request).await)
}

/// Query-token gate for import links that cannot carry headers
///
/// Same decision as [`auth_middleware`], but the credential is the `token`
/// query parameter.
pub async fn query_token_auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let presented = PresentedCredential::from_query(request.uri());
    check(&state, &presented, &request)?;
    Ok(next.run(request).await)
}

fn check(
    state: &AppState,
    presented: &PresentedCredential,
    request: &Request,
) -> Result<(), AuthError> {
    let Some(secret) = state.config.auth_token.as_deref() else {
        tracing::debug!("Authentication disabled, no token configured");
        return Ok(());
    };

    // Rejections are logged once, by `AuthError::into_response`.
    authorize(presented, Some(secret))?;
    tracing::debug!(
        method = %request.method(),
        path = %request.uri().path(),
        "Authentication successful"
    );
    Ok(())
}
