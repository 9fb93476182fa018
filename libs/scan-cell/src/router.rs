use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn scan_routes(state: Arc<AppConfig>) -> Router {
    // Suggestions are static reference content; everything touching a
    // user's scans requires auth.
    let public_routes = Router::new().route(
        "/suggestions/{condition}",
        get(handlers::get_treatment_suggestions),
    );

    let protected_routes = Router::new()
        .route("/classify", post(handlers::classify_scan))
        .route("/", post(handlers::create_scan))
        .route("/", get(handlers::list_my_scans))
        .route("/{scan_id}", get(handlers::get_scan))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
