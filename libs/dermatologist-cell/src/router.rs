use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn dermatologist_routes(state: Arc<AppConfig>) -> Router {
    // Directory browsing is public: anyone can look up providers before
    // signing in; booking lives behind auth in the appointment cell.
    Router::new()
        .route("/", get(handlers::list_dermatologists))
        .route("/search", get(handlers::search_dermatologists))
        .route("/{dermatologist_id}", get(handlers::get_dermatologist))
        .with_state(state)
}
