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

use crate::models::{BookAppointmentRequest, BookingError};
use crate::services::booking::AppointmentBookingService;

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::MissingDermatologist => AppError::BadRequest(err.to_string()),
            BookingError::DermatologistNotFound => AppError::NotFound(err.to_string()),
            BookingError::NotFound => AppError::NotFound(err.to_string()),
            BookingError::DateInPast => AppError::Validation(err.to_string()),
            BookingError::ValidationError(msg) => AppError::Validation(msg),
            BookingError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token().to_string();

    // An issued submission must outlive the connection: run it on its own
    // task so a client disconnect cannot abort the persistence call.
    let appointment = tokio::spawn(async move {
        let booking_service = AppointmentBookingService::new(&state);
        booking_service.book_appointment(&user, request, &token).await
    })
    .await
    .map_err(|e| AppError::Internal(format!("Booking task failed: {}", e)))??;

    Ok(Json(json!({
        "appointment": appointment,
        "message": "Appointment booked successfully"
    })))
}

#[axum::debug_handler]
pub async fn list_my_appointments(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let appointments = booking_service
        .list_appointments(&user, auth.token())
        .await?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let appointment = booking_service
        .get_appointment(appointment_id, &user, auth.token())
        .await?;

    Ok(Json(json!(appointment)))
}
