use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{ClassifyScanRequest, CreateScanRequest, ScanError};
use crate::services::classify::ClassifierService;
use crate::services::scan::ScanService;
use crate::services::suggestions::suggestions_for;

impl From<ScanError> for AppError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::NotFound => AppError::NotFound(err.to_string()),
            ScanError::UnknownCondition(_) => AppError::NotFound(err.to_string()),
            ScanError::InvalidImage(msg) => AppError::BadRequest(msg),
            ScanError::InferenceError(msg) => AppError::ExternalService(msg),
            ScanError::ValidationError(msg) => AppError::Validation(msg),
            ScanError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}

#[axum::debug_handler]
pub async fn classify_scan(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<ClassifyScanRequest>,
) -> Result<Json<Value>, AppError> {
    let classifier = ClassifierService::new(&state);

    let result = classifier.classify(&request.file_data).await?;

    Ok(Json(json!(result)))
}

#[axum::debug_handler]
pub async fn create_scan(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<CreateScanRequest>,
) -> Result<Json<Value>, AppError> {
    let scan_service = ScanService::new(&state);

    let scan = scan_service.upload_scan(&user, request, auth.token()).await?;

    Ok(Json(json!(scan)))
}

#[axum::debug_handler]
pub async fn list_my_scans(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let scan_service = ScanService::new(&state);

    let scans = scan_service.get_user_scans(&user, auth.token()).await?;

    Ok(Json(json!({
        "scans": scans,
        "total": scans.len()
    })))
}

#[axum::debug_handler]
pub async fn get_scan(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(scan_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let scan_service = ScanService::new(&state);

    let scan = scan_service.get_scan(scan_id, &user, auth.token()).await?;

    Ok(Json(json!(scan)))
}

#[axum::debug_handler]
pub async fn get_treatment_suggestions(
    Path(condition): Path<String>,
) -> Result<Json<Value>, AppError> {
    let suggestions = suggestions_for(&condition)
        .ok_or_else(|| ScanError::UnknownCondition(condition.clone()))?;

    Ok(Json(json!({
        "condition": condition,
        "suggestions": suggestions
    })))
}
