use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue, header::USER_AGENT},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use super::rate_limit::client_identifier;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Logs every request and its outcome under a fresh request id
///
/// Everything downstream runs inside a `request` span carrying
/// `request_id`, so handler, limiter and upstream logs share the id.
/// Completion is logged at error for 5xx, warn for 4xx and info otherwise.
/// The id is echoed back in `x-request-id`.
pub async fn request_log_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let started = Instant::now();

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let client = client_identifier(request.headers());
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let span = tracing::info_span!("request", request_id = %request_id);

    span.in_scope(|| {
        tracing::info!(
            method = %method,
            path = %path,
            client = %client,
            user_agent = %user_agent,
            "Incoming request"
        );
    });

    let mut response = next.run(request).instrument(span.clone()).await;

    let status = response.status();
    let duration_ms = started.elapsed().as_millis() as u64;

    span.in_scope(|| {
        if status.is_server_error() {
            tracing::error!(method = %method, path = %path, status = status.as_u16(), duration_ms, "Request failed");
        } else if status.is_client_error() {
            tracing::warn!(method = %method, path = %path, status = status.as_u16(), duration_ms, "Request rejected");
        } else {
            tracing::info!(method = %method, path = %path, status = status.as_u16(), duration_ms, "Request completed");
        }
    });

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }

    response
}
