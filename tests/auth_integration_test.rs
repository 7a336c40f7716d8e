mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderValue, Request, StatusCode},
};
use common::*;
use ssml_gateway::{ServerConfig, config::RateLimitConfig};

const SECRET: &str = "test-secret";

fn secured_config() -> ServerConfig {
    ServerConfig {
        auth_token: Some(SECRET.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_auth_disabled_allows_requests_without_auth_header() {
    let stub = Arc::new(StubSynthesizer::default());
    let app = app_with(ServerConfig::default(), Some(stub.clone()));

    let response = send(&app, get("/api/text-to-speech?text=hi&voice=v")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_auth_disabled_ignores_garbage_header() {
    let app = app_with(
        ServerConfig::default(),
        Some(Arc::new(StubSynthesizer::default())),
    );

    let response = send(&app, get_with_auth("/api/voices", "Basic Zm9vOmJhcg==")).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_authorization_header() {
    let stub = Arc::new(StubSynthesizer::default());
    let app = app_with(secured_config(), Some(stub.clone()));

    let response = send(&app, get("/api/text-to-speech?text=hi&voice=v")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key("x-ratelimit-limit"));
    assert!(response.headers().contains_key("x-ratelimit-reset"));

    let json = body_json(response).await;
    assert_eq!(json["error"], "missing_credential");
    assert_eq!(json["message"], "Missing Authorization header");
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let app = app_with(secured_config(), Some(Arc::new(StubSynthesizer::default())));

    let response = send(&app, get_with_auth("/api/voices", SECRET)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "malformed_credential");
    assert_eq!(
        json["message"],
        "Invalid Authorization format. Expected: Bearer <token>"
    );

    let request = Request::builder()
        .uri("/api/voices")
        .header(
            "authorization",
            HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap(),
        )
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "malformed_credential");
}

#[tokio::test]
async fn test_wrong_token() {
    let app = app_with(secured_config(), Some(Arc::new(StubSynthesizer::default())));

    let response = send(&app, get_with_auth("/api/voices", "Bearer not-the-secret")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "credential_mismatch");
    assert_eq!(json["message"], "Invalid token");
}

#[tokio::test]
async fn test_valid_token() {
    let stub = Arc::new(StubSynthesizer::default());
    let app = app_with(secured_config(), Some(stub.clone()));

    let response = send(
        &app,
        get_with_auth(
            "/api/text-to-speech?text=hi&voice=v",
            &format!("Bearer {SECRET}"),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_health_check_is_public() {
    let app = app_with(secured_config(), None);

    let response = send(&app, get("/")).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rate_limit_runs_before_auth() {
    let config = ServerConfig {
        voices_rate_limit: RateLimitConfig::new(60_000, 1),
        ..secured_config()
    };
    let app = app_with(config, Some(Arc::new(StubSynthesizer::default())));

    // Unauthenticated requests still consume budget.
    let response = send(&app, get("/api/voices")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()["x-ratelimit-remaining"], "0");

    let response = send(&app, get("/api/voices")).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body_json(response).await["error"], "rate_limited");

    // A valid token does not bypass an exhausted budget.
    let response = send(
        &app,
        get_with_auth("/api/voices", &format!("Bearer {SECRET}")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_legado_import_query_token() {
    let app = app_with(secured_config(), None);

    let response = send(&app, get("/api/legado-import?voice=v")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "missing_credential");
    assert_eq!(json["message"], "Missing token parameter");

    let response = send(&app, get("/api/legado-import?voice=v&token=wrong")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "credential_mismatch");

    let response = send(
        &app,
        get(&format!("/api/legado-import?voice=v&token={SECRET}")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["header"], format!(r#"{{"Authorization":"Bearer {SECRET}"}}"#));
}

#[tokio::test]
async fn test_legado_import_ignores_bearer_header() {
    let app = app_with(secured_config(), None);

    let response = send(
        &app,
        get_with_auth("/api/legado-import?voice=v", &format!("Bearer {SECRET}")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
