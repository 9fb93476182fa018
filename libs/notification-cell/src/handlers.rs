use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{NotificationError, SendEmailRequest};
use crate::services::mailer::MailerService;

impl From<NotificationError> for AppError {
    fn from(err: NotificationError) -> Self {
        match err {
            NotificationError::NotConfigured => {
                AppError::Internal("Email service not configured".to_string())
            }
            NotificationError::MissingField(field) => {
                AppError::BadRequest(format!("Missing required field: {}", field))
            }
            NotificationError::SendFailed(msg) => AppError::ExternalService(msg),
        }
    }
}

#[axum::debug_handler]
pub async fn send_email(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<SendEmailRequest>,
) -> Result<Json<Value>, AppError> {
    debug!("Email send requested for {}", request.to);

    let mailer = MailerService::new(&state)?;
    let response = mailer.send_email(request).await?;

    Ok(Json(json!({
        "success": response.success,
        "messageId": response.message_id
    })))
}
