use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{legado, speak, ssml, voices};
use crate::middleware::{
    auth_middleware, query_token_auth_middleware, tts_rate_limit_middleware,
    voices_rate_limit_middleware,
};
use crate::state::AppState;
use std::sync::Arc;

/// API routes with their admission layers
///
/// Guarded routes run the rate limiter before the credential check, so an
/// over-budget caller gets 429 whatever it presents.
pub fn create_api_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let synthesis_routes = Router::new()
        .route("/api/text-to-speech", get(speak::text_to_speech_handler))
        .route("/api/ssml", post(ssml::ssml_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            tts_rate_limit_middleware,
        ));

    let voice_routes = Router::new()
        .route("/api/voices", get(voices::list_voices))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            voices_rate_limit_middleware,
        ));

    // Import links carry the secret in the query string and are not rate limited
    let import_routes = Router::new()
        .route("/api/legado-import", get(legado::legado_import_handler))
        .route_layer(middleware::from_fn_with_state(
            state,
            query_token_auth_middleware,
        ));

    Router::new()
        .merge(synthesis_routes)
        .merge(voice_routes)
        .merge(import_routes)
        .layer(TraceLayer::new_for_http())
}
