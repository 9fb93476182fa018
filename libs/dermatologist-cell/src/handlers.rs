use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{AvailabilityMode, DermatologistError, DirectoryFilters, SortKey};
use crate::services::directory::DirectoryService;

#[derive(Debug, Deserialize)]
pub struct DirectoryQuery {
    pub location: Option<String>,
    pub availability: Option<AvailabilityMode>,
    pub sort_by: Option<SortKey>,
}

impl DirectoryQuery {
    fn into_filters(self) -> DirectoryFilters {
        DirectoryFilters {
            location: self.location.unwrap_or_default(),
            availability: self.availability.unwrap_or_default(),
            sort_by: self.sort_by.unwrap_or_default(),
        }
    }
}

impl From<DermatologistError> for AppError {
    fn from(err: DermatologistError) -> Self {
        match err {
            DermatologistError::NotFound => AppError::NotFound("Dermatologist not found".to_string()),
            DermatologistError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}

#[axum::debug_handler]
pub async fn list_dermatologists(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let directory_service = DirectoryService::new(&state);

    let dermatologists = directory_service.list_available().await?;

    Ok(Json(json!({
        "dermatologists": dermatologists,
        "total": dermatologists.len()
    })))
}

#[axum::debug_handler]
pub async fn search_dermatologists(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<DirectoryQuery>,
) -> Result<Json<Value>, AppError> {
    let directory_service = DirectoryService::new(&state);
    let filters = query.into_filters();

    let dermatologists = directory_service.search(&filters).await?;

    Ok(Json(json!({
        "dermatologists": dermatologists,
        "total": dermatologists.len(),
        "filters": filters
    })))
}

#[axum::debug_handler]
pub async fn get_dermatologist(
    State(state): State<Arc<AppConfig>>,
    Path(dermatologist_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let directory_service = DirectoryService::new(&state);

    let dermatologist = directory_service
        .get_dermatologist(&dermatologist_id, None)
        .await?;

    Ok(Json(json!(dermatologist)))
}
