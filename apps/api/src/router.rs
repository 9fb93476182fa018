use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use auth_cell::router::auth_routes;
use dermatologist_cell::router::dermatologist_routes;
use notification_cell::router::notification_routes;
use patient_cell::router::profile_routes;
use scan_cell::router::scan_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "AcneScan API is running!" }))
        .nest("/auth", auth_routes(state.clone()))
        .nest("/dermatologists", dermatologist_routes(state.clone()))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/scans", scan_routes(state.clone()))
        .nest("/profile", profile_routes(state.clone()))
        .nest("/notifications", notification_routes(state))
}
