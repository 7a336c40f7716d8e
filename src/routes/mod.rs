pub mod api;

use axum::{Router, middleware, routing::get};
use std::sync::Arc;

use crate::handlers::api::health_check;
use crate::middleware::request_log_middleware;
use crate::state::AppState;

/// Full application: public health check plus the guarded API, with
/// request logging around everything.
pub fn create_app(state: Arc<AppState>) -> Router {
    let public_routes = Router::new().route("/", get(health_check));

    public_routes
        .merge(api::create_api_router(state.clone()))
        .layer(middleware::from_fn(request_log_middleware))
        .with_state(state)
}
