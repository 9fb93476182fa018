// libs/appointment-cell/src/services/confirmation.rs
//
// Composes and submits the appointment confirmation email. Everything here
// is best-effort from the booking workflow's point of view: the caller
// dispatches a job and never lets a failure out of the send task.
use chrono::{FixedOffset, Offset, Utc};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use dermatologist_cell::models::Dermatologist;
use dermatologist_cell::services::directory::DirectoryService;
use notification_cell::models::{NotificationError, SendEmailRequest, SendEmailResponse};
use notification_cell::services::mailer::MailerService;
use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{EmailJob, EmailError, RecipientProfile};

pub struct ConfirmationEmailService {
    supabase: SupabaseClient,
    directory: DirectoryService,
    config: AppConfig,
}

struct ConfirmationDetails<'a> {
    recipient_name: &'a str,
    dermatologist_name: &'a str,
    specialty: &'a str,
    formatted_date: String,
    formatted_time: String,
    location: &'a str,
    appointment_id: String,
    reason: Option<&'a str>,
}

impl ConfirmationEmailService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            directory: DirectoryService::new(config),
            config: config.clone(),
        }
    }

    /// Resolve both profiles, render the summary, and hand it to the email
    /// boundary. Either lookup failing aborts before anything is sent; a
    /// partial email is never composed.
    pub async fn send_confirmation(
        &self,
        job: EmailJob,
        auth_token: &str,
    ) -> Result<SendEmailResponse, EmailError> {
        debug!("Composing confirmation email for appointment {}", job.appointment_id);

        // The two lookups are independent; issue them concurrently and wait
        // for both before formatting.
        let dermatologist_id = job.dermatologist_id.to_string();
        let (recipient_result, dermatologist_result) = tokio::join!(
            self.fetch_recipient(&job, auth_token),
            self.directory
                .get_dermatologist(&dermatologist_id, Some(auth_token)),
        );

        let recipient = recipient_result?;
        let dermatologist =
            dermatologist_result.map_err(|e| EmailError::DermatologistLookup(e.to_string()))?;

        let request = self.compose(&job, &recipient, &dermatologist);

        let mailer = MailerService::new(&self.config).map_err(|e| match e {
            NotificationError::NotConfigured => EmailError::NotConfigured,
            other => EmailError::Send(other.to_string()),
        })?;

        mailer
            .send_email(request)
            .await
            .map_err(|e| EmailError::Send(e.to_string()))
    }

    async fn fetch_recipient(
        &self,
        job: &EmailJob,
        auth_token: &str,
    ) -> Result<RecipientProfile, EmailError> {
        let path = format!("/rest/v1/users?id=eq.{}", job.user_id);
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(|e| EmailError::UserLookup(e.to_string()))?;

        if result.is_empty() {
            return Err(EmailError::UserLookup("User profile not found".to_string()));
        }

        serde_json::from_value(result[0].clone())
            .map_err(|e| EmailError::UserLookup(format!("Failed to parse user profile: {}", e)))
    }

    fn compose(
        &self,
        job: &EmailJob,
        recipient: &RecipientProfile,
        dermatologist: &Dermatologist,
    ) -> SendEmailRequest {
        // Render the instant as the wall time the user entered it in.
        let offset = FixedOffset::east_opt(job.utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix());
        let local = job.scheduled_at.with_timezone(&offset);

        let details = ConfirmationDetails {
            recipient_name: recipient.name.as_deref().unwrap_or("Valued Patient"),
            dermatologist_name: &dermatologist.name,
            specialty: dermatologist.specialty_label(),
            formatted_date: local.format("%A, %B %-d, %Y").to_string(),
            formatted_time: local.format("%-I:%M %p").to_string(),
            location: dermatologist.location.as_deref().unwrap_or("Telehealth"),
            appointment_id: job.appointment_id.to_string(),
            reason: job.reason.as_deref(),
        };

        SendEmailRequest {
            to: recipient.email.clone(),
            subject: format!("Appointment Confirmation - {}", dermatologist.name),
            html: render_confirmation_body(&details),
        }
    }
}

fn render_confirmation_body(details: &ConfirmationDetails<'_>) -> String {
    let reason_row = details
        .reason
        .map(|reason| format!(r#"<p style="margin: 10px 0;"><strong>Reason:</strong> {}</p>"#, reason))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Appointment Confirmation</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); padding: 30px; text-align: center; border-radius: 10px 10px 0 0;">
    <h1 style="color: white; margin: 0;">Appointment Confirmed!</h1>
  </div>

  <div style="background: #f9f9f9; padding: 30px; border-radius: 0 0 10px 10px;">
    <p style="font-size: 16px;">Dear {recipient_name},</p>

    <p style="font-size: 16px;">Your appointment has been successfully booked. Here are the details:</p>

    <div style="background: white; padding: 20px; border-radius: 8px; margin: 20px 0; border-left: 4px solid #667eea;">
      <h2 style="color: #667eea; margin-top: 0;">Appointment Details</h2>

      <p style="margin: 10px 0;"><strong>Dermatologist:</strong> {dermatologist_name}</p>
      <p style="margin: 10px 0;"><strong>Specialty:</strong> {specialty}</p>
      <p style="margin: 10px 0;"><strong>Date:</strong> {formatted_date}</p>
      <p style="margin: 10px 0;"><strong>Time:</strong> {formatted_time}</p>
      <p style="margin: 10px 0;"><strong>Location:</strong> {location}</p>
      {reason_row}
      <p style="margin: 10px 0;"><strong>Appointment ID:</strong> {appointment_id}</p>
    </div>

    <p style="font-size: 16px;">If you need to reschedule or cancel your appointment, please contact us at least 24 hours in advance.</p>

    <p style="font-size: 16px;">We look forward to seeing you!</p>

    <p style="font-size: 16px;">
      Best regards,<br>
      <strong>The AcneScan Team</strong>
    </p>

    <hr style="border: none; border-top: 1px solid #ddd; margin: 30px 0;">

    <p style="font-size: 12px; color: #666; text-align: center;">
      This is an automated confirmation email. Please do not reply to this message.<br>
      If you have any questions, please contact us through the AcneScan app.
    </p>
  </div>
</body>
</html>
"#,
        recipient_name = details.recipient_name,
        dermatologist_name = details.dermatologist_name,
        specialty = details.specialty,
        formatted_date = details.formatted_date,
        formatted_time = details.formatted_time,
        location = details.location,
        reason_row = reason_row,
        appointment_id = details.appointment_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(reason: Option<&'static str>) -> ConfirmationDetails<'static> {
        ConfirmationDetails {
            recipient_name: "Jordan Lee",
            dermatologist_name: "Dr. Amy Park",
            specialty: "Dermatology",
            formatted_date: "Friday, December 25, 2026".to_string(),
            formatted_time: "10:30 AM".to_string(),
            location: "Boston, MA",
            appointment_id: "6e1c3a1e-0000-0000-0000-000000000001".to_string(),
            reason,
        }
    }

    #[test]
    fn body_includes_all_appointment_details() {
        let body = render_confirmation_body(&details(Some("Persistent breakouts")));

        assert!(body.contains("Dear Jordan Lee,"));
        assert!(body.contains("Dr. Amy Park"));
        assert!(body.contains("Friday, December 25, 2026"));
        assert!(body.contains("10:30 AM"));
        assert!(body.contains("Boston, MA"));
        assert!(body.contains("Persistent breakouts"));
        assert!(body.contains("6e1c3a1e-0000-0000-0000-000000000001"));
    }

    #[test]
    fn reason_row_is_omitted_when_absent() {
        let body = render_confirmation_body(&details(None));

        assert!(!body.contains("<strong>Reason:</strong>"));
    }
}
