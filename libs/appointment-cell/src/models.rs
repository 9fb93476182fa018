// libs/appointment-cell/src/models.rs
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub dermatologist_id: Uuid,
    /// Scan the user was reviewing when they booked, when one exists.
    pub scan_id: Option<Uuid>,
    pub status: AppointmentStatus,
    pub scheduled_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// One booking submission. Date and time arrive as the two separately
/// collected form fields; `utc_offset_minutes` is the submitting user's
/// local offset (minutes east of UTC) captured at submission time, absent
/// meaning the pair is already UTC. The scan link is passed explicitly
/// rather than read from any ambient session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub dermatologist_id: Option<Uuid>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub reason: String,
    pub scan_id: Option<Uuid>,
    pub utc_offset_minutes: Option<i32>,
}

// ==============================================================================
// CONFIRMATION EMAIL MODELS
// ==============================================================================

/// Everything the confirmation composer needs. Constructed right after the
/// appointment insert and consumed once by a detached send task; it is
/// never persisted, and its failure never touches the appointment.
#[derive(Debug, Clone)]
pub struct EmailJob {
    pub appointment_id: Uuid,
    pub user_id: Uuid,
    pub dermatologist_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub utc_offset_minutes: i32,
    pub reason: Option<String>,
}

/// Row shape of the `users` profile table, as the composer reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipientProfile {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum BookingError {
    #[error("No dermatologist selected")]
    MissingDermatologist,

    #[error("Dermatologist not found")]
    DermatologistNotFound,

    #[error("Appointment not found")]
    NotFound,

    #[error("Appointment date cannot be in the past")]
    DateInPast,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Failed to fetch user information: {0}")]
    UserLookup(String),

    #[error("Failed to fetch dermatologist information: {0}")]
    DermatologistLookup(String),

    #[error("Email service not configured")]
    NotConfigured,

    #[error("Email delivery failed: {0}")]
    Send(String),
}
