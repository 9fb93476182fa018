// libs/appointment-cell/src/services/booking.rs
use chrono::{DateTime, FixedOffset, LocalResult, NaiveDate, NaiveTime, Utc};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

use dermatologist_cell::models::DermatologistError;
use dermatologist_cell::services::directory::DirectoryService;
use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_models::auth::User;

use crate::models::{
    Appointment, AppointmentStatus, BookAppointmentRequest, BookingError, EmailJob,
};
use crate::services::confirmation::ConfirmationEmailService;

pub struct AppointmentBookingService {
    supabase: SupabaseClient,
    directory: DirectoryService,
    config: AppConfig,
}

impl AppointmentBookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            directory: DirectoryService::new(config),
            config: config.clone(),
        }
    }

    /// Book one appointment for the authenticated user. The appointment
    /// insert is the single operation that gates success; the confirmation
    /// email is dispatched after it on a detached task and can never fail
    /// the booking or roll it back.
    pub async fn book_appointment(
        &self,
        user: &User,
        request: BookAppointmentRequest,
        auth_token: &str,
    ) -> Result<Appointment, BookingError> {
        info!(
            "Booking appointment for user {} with dermatologist {:?}",
            user.id, request.dermatologist_id
        );

        // The form cannot be reached without a selection; treat absence as
        // a broken invariant rather than user input.
        let dermatologist_id = request
            .dermatologist_id
            .ok_or(BookingError::MissingDermatologist)?;

        let user_id = Uuid::parse_str(&user.id)
            .map_err(|_| BookingError::ValidationError(format!("Invalid user id: {}", user.id)))?;

        let reason = request.reason.trim().to_string();
        if reason.is_empty() {
            return Err(BookingError::ValidationError(
                "Reason for visit is required".to_string(),
            ));
        }

        let scheduled_at = combine_schedule(request.date, request.time, request.utc_offset_minutes)?;
        if scheduled_at <= Utc::now() {
            return Err(BookingError::DateInPast);
        }

        // Validate the provider before the one gating write.
        self.directory
            .get_dermatologist(&dermatologist_id.to_string(), Some(auth_token))
            .await
            .map_err(|e| match e {
                DermatologistError::NotFound => BookingError::DermatologistNotFound,
                DermatologistError::DatabaseError(msg) => BookingError::DatabaseError(msg),
            })?;

        let appointment = self
            .create_appointment_record(user_id, dermatologist_id, request.scan_id, scheduled_at, auth_token)
            .await?;

        info!("Appointment {} booked successfully", appointment.id);

        // Booked and sent-confirmation are independent outcomes; only the
        // former is load-bearing.
        self.dispatch_confirmation(
            &appointment,
            reason,
            request.utc_offset_minutes.unwrap_or(0),
            auth_token,
        );

        Ok(appointment)
    }

    /// Fetch one appointment, scoped to its owner.
    pub async fn get_appointment(
        &self,
        appointment_id: Uuid,
        user: &User,
        auth_token: &str,
    ) -> Result<Appointment, BookingError> {
        debug!("Fetching appointment: {}", appointment_id);

        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(BookingError::NotFound);
        }

        let appointment: Appointment = serde_json::from_value(result[0].clone())
            .map_err(|e| BookingError::DatabaseError(format!("Failed to parse appointment: {}", e)))?;

        if appointment.user_id.to_string() != user.id {
            return Err(BookingError::NotFound);
        }

        Ok(appointment)
    }

    /// List the authenticated user's appointments, soonest first.
    pub async fn list_appointments(
        &self,
        user: &User,
        auth_token: &str,
    ) -> Result<Vec<Appointment>, BookingError> {
        debug!("Listing appointments for user: {}", user.id);

        let path = format!(
            "/rest/v1/appointments?user_id=eq.{}&order=scheduled_at.asc",
            user.id
        );
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Appointment>, _>>()
            .map_err(|e| BookingError::DatabaseError(format!("Failed to parse appointments: {}", e)))
    }

    async fn create_appointment_record(
        &self,
        user_id: Uuid,
        dermatologist_id: Uuid,
        scan_id: Option<Uuid>,
        scheduled_at: DateTime<Utc>,
        auth_token: &str,
    ) -> Result<Appointment, BookingError> {
        let appointment_data = json!({
            "user_id": user_id,
            "dermatologist_id": dermatologist_id,
            "scan_id": scan_id,
            "status": AppointmentStatus::Pending.to_string(),
            "scheduled_at": scheduled_at.to_rfc3339(),
            "created_at": Utc::now().to_rfc3339()
        });

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/appointments",
                Some(auth_token),
                Some(appointment_data),
                Some(headers),
            )
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(BookingError::DatabaseError(
                "Failed to create appointment".to_string(),
            ));
        }

        serde_json::from_value(result[0].clone()).map_err(|e| {
            BookingError::DatabaseError(format!("Failed to parse created appointment: {}", e))
        })
    }

    /// Spawn the confirmation email as a detached task. Errors end in the
    /// log and nowhere else; the booking response never waits on this.
    fn dispatch_confirmation(
        &self,
        appointment: &Appointment,
        reason: String,
        utc_offset_minutes: i32,
        auth_token: &str,
    ) {
        let job = EmailJob {
            appointment_id: appointment.id,
            user_id: appointment.user_id,
            dermatologist_id: appointment.dermatologist_id,
            scheduled_at: appointment.scheduled_at,
            utc_offset_minutes,
            reason: Some(reason),
        };

        let config = self.config.clone();
        let token = auth_token.to_string();
        let appointment_id = appointment.id;

        tokio::spawn(async move {
            let composer = ConfirmationEmailService::new(&config);
            match composer.send_confirmation(job, &token).await {
                Ok(response) => info!(
                    "Confirmation email sent for appointment {}: {}",
                    appointment_id, response.message_id
                ),
                Err(e) => warn!(
                    "Failed to send confirmation email for appointment {}: {}",
                    appointment_id, e
                ),
            }
        });
    }
}

/// Combine the separately collected date and time into one absolute
/// instant. The pair is interpreted at the submitting user's local offset
/// (minutes east of UTC); no offset means it is already UTC.
pub fn combine_schedule(
    date: NaiveDate,
    time: NaiveTime,
    utc_offset_minutes: Option<i32>,
) -> Result<DateTime<Utc>, BookingError> {
    let offset_minutes = utc_offset_minutes.unwrap_or(0);
    let offset = FixedOffset::east_opt(offset_minutes * 60).ok_or_else(|| {
        BookingError::ValidationError(format!("Invalid UTC offset: {} minutes", offset_minutes))
    })?;

    match date.and_time(time).and_local_timezone(offset) {
        LocalResult::Single(instant) => Ok(instant.with_timezone(&Utc)),
        _ => Err(BookingError::ValidationError(
            "Could not resolve appointment time".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn combine_defaults_to_utc() {
        let date = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();
        let time = NaiveTime::from_hms_opt(10, 30, 0).unwrap();

        let instant = combine_schedule(date, time, None).unwrap();

        assert_eq!(instant.to_rfc3339(), "2026-12-25T10:30:00+00:00");
    }

    #[test]
    fn combine_applies_submitting_offset() {
        let date = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();
        let time = NaiveTime::from_hms_opt(10, 30, 0).unwrap();

        // 10:30 at UTC-5 is 15:30 UTC.
        let instant = combine_schedule(date, time, Some(-300)).unwrap();

        assert_eq!(instant.to_rfc3339(), "2026-12-25T15:30:00+00:00");
    }

    #[test]
    fn combine_rejects_out_of_range_offset() {
        let date = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();
        let time = NaiveTime::from_hms_opt(10, 30, 0).unwrap();

        let result = combine_schedule(date, time, Some(100_000));

        assert_matches!(result, Err(BookingError::ValidationError(_)));
    }
}
