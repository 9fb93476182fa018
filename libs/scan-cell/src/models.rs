// libs/scan-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored skin scan with whatever classification the inference service
/// produced for it. Rows live in the `scans` table, images in the
/// `user-scans` storage bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub image_url: String,
    pub acne_type: Option<String>,
    pub causes: Option<Vec<String>>,
    pub confidence: Option<f32>,
    pub analysis_date: DateTime<Utc>,
}

/// Base64 image payload, "data:image/...;base64," prefix optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyScanRequest {
    pub file_data: String,
}

/// What the external inference endpoint answers with. The model itself is
/// an opaque collaborator; this cell only forwards and records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub prediction: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScanRequest {
    pub file_data: String,
    pub acne_type: String,
    pub causes: Vec<String>,
    pub confidence: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    Skincare,
    Lifestyle,
}

#[derive(Debug, Clone, Serialize)]
pub struct TreatmentSuggestion {
    pub title: &'static str,
    pub category: SuggestionCategory,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum ScanError {
    #[error("Scan not found")]
    NotFound,

    #[error("No treatment suggestions for condition: {0}")]
    UnknownCondition(String),

    #[error("Invalid image data: {0}")]
    InvalidImage(String),

    #[error("Inference service error: {0}")]
    InferenceError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
