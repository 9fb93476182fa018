// libs/notification-cell/src/services/mailer.rs
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use shared_config::AppConfig;

use crate::models::{NotificationError, SendEmailRequest, SendEmailResponse};

/// Resend API client for outbound transactional email.
/// Based on: https://resend.com/docs/api-reference/emails/send-email
pub struct MailerService {
    client: Client,
    api_key: String,
    from_address: String,
    base_url: String,
}

impl MailerService {
    pub fn new(config: &AppConfig) -> Result<Self, NotificationError> {
        if !config.is_email_configured() {
            return Err(NotificationError::NotConfigured);
        }

        Ok(Self {
            client: Client::new(),
            api_key: config.resend_api_key.clone(),
            from_address: config.resend_from_address.clone(),
            base_url: config.resend_base_url.clone(),
        })
    }

    /// Submit one email for delivery. Any non-success response is a
    /// recoverable `SendFailed`; callers decide whether that matters.
    pub async fn send_email(
        &self,
        request: SendEmailRequest,
    ) -> Result<SendEmailResponse, NotificationError> {
        if request.to.is_empty() {
            return Err(NotificationError::MissingField("to"));
        }
        if request.subject.is_empty() {
            return Err(NotificationError::MissingField("subject"));
        }
        if request.html.is_empty() {
            return Err(NotificationError::MissingField("html"));
        }

        let url = format!("{}/emails", self.base_url);
        debug!("Submitting email to {} via {}", request.to, url);

        let body = json!({
            "from": self.from_address,
            "to": [request.to],
            "subject": request.subject,
            "html": request.html,
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Resend API error ({}): {}", status, error_text);
            return Err(NotificationError::SendFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        let message_id = data["id"].as_str().unwrap_or_default().to_string();
        info!("Email submitted successfully: {}", message_id);

        Ok(SendEmailResponse {
            success: true,
            message_id,
        })
    }
}
