use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    // Every appointment route requires an authenticated user; a request
    // without a valid token is rejected before any handler runs, so no
    // partial appointment can be created for an anonymous caller.
    Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/", get(handlers::list_my_appointments))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
