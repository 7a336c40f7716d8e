use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use tokio::time::Instant;

use crate::core::{RateLimitDecision, RateLimiter};
use crate::errors::app_error::AppError;
use crate::state::AppState;

pub const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Identifier used when no proxy header names the caller.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Derives the rate-limit identifier from proxy headers.
///
/// Priority: `cf-connecting-ip`, `x-real-ip`, then the first hop of
/// `x-forwarded-for`.
pub fn client_identifier(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    header("cf-connecting-ip")
        .or_else(|| header("x-real-ip"))
        .or_else(|| {
            header("x-forwarded-for")
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        })
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

/// Writes `X-RateLimit-*` headers describing `decision`.
pub fn apply_rate_limit_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(decision.limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(decision.remaining));

    let until_reset = decision.reset_at.saturating_duration_since(Instant::now());
    let reset = chrono::Duration::from_std(until_reset)
        .ok()
        .and_then(|delta| Utc::now().checked_add_signed(delta))
        .unwrap_or_else(Utc::now);

    if let Ok(value) = HeaderValue::from_str(&reset.to_rfc3339_opts(SecondsFormat::Millis, true)) {
        headers.insert(X_RATELIMIT_RESET, value);
    }
}

async fn enforce(limiter: &RateLimiter, request: Request, next: Next) -> Response {
    let identifier = client_identifier(request.headers());
    let decision = limiter.check(&identifier);

    let mut response = if decision.allowed {
        next.run(request).await
    } else {
        AppError::RateLimited.into_response()
    };

    apply_rate_limit_headers(response.headers_mut(), &decision);
    response
}

/// Admission budget for the synthesis endpoints.
pub async fn tts_rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    enforce(&state.core_state.tts_limiter, request, next).await
}

/// Admission budget for the voice catalog.
pub async fn voices_rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    enforce(&state.core_state.voices_limiter, request, next).await
}
