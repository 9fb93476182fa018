// libs/notification-cell/src/models.rs
use serde::{Deserialize, Serialize};

/// One outbound transactional email. Delivery itself belongs to the Resend
/// API; this cell only hands the message over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailRequest {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailResponse {
    pub success: bool,
    pub message_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Email service not configured")]
    NotConfigured,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Email delivery failed: {0}")]
    SendFailed(String),
}
