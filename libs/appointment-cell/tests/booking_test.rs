// libs/appointment-cell/tests/booking_test.rs
use std::sync::Arc;

use assert_matches::assert_matches;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::models::{
    AppointmentStatus, BookAppointmentRequest, BookingError, EmailError, EmailJob,
};
use appointment_cell::router::appointment_routes;
use appointment_cell::services::booking::{combine_schedule, AppointmentBookingService};
use appointment_cell::services::confirmation::ConfirmationEmailService;
use shared_config::AppConfig;
use shared_utils::test_utils::{JwtTestUtils, MockSupabaseResponses, TestConfig, TestUser};

fn config_for(mock_server: &MockServer) -> AppConfig {
    // Supabase and the email boundary both point at the same mock server;
    // paths keep them apart.
    TestConfig {
        supabase_url: mock_server.uri(),
        resend_base_url: mock_server.uri(),
        ..TestConfig::default()
    }
    .to_app_config()
}

fn booking_request(dermatologist_id: Option<Uuid>) -> BookAppointmentRequest {
    BookAppointmentRequest {
        dermatologist_id,
        date: NaiveDate::from_ymd_opt(2030, 6, 15).unwrap(),
        time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        reason: "Persistent breakouts on jawline".to_string(),
        scan_id: None,
        utc_offset_minutes: None,
    }
}

async fn mount_dermatologist(mock_server: &MockServer, dermatologist_id: Uuid) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/dermatologists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::dermatologist_response(
                &dermatologist_id.to_string(),
                "Amy Park",
                Some("Boston, MA"),
            )
        ])))
        .mount(mock_server)
        .await;
}

fn appointment_row(user_id: &str, dermatologist_id: Uuid, scheduled_at: &str) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4(),
        "user_id": user_id,
        "dermatologist_id": dermatologist_id,
        "scan_id": null,
        "status": "pending",
        "scheduled_at": scheduled_at,
        "created_at": Utc::now().to_rfc3339()
    })
}

#[tokio::test]
async fn booking_creates_exactly_one_pending_appointment() {
    let mock_server = MockServer::start().await;
    let test_user = TestUser::default();
    let dermatologist_id = Uuid::new_v4();

    mount_dermatologist(&mock_server, dermatologist_id).await;

    let request = booking_request(Some(dermatologist_id));
    let expected_instant =
        combine_schedule(request.date, request.time, request.utc_offset_minutes).unwrap();

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([appointment_row(
            &test_user.id,
            dermatologist_id,
            &expected_instant.to_rfc3339(),
        )])))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Lookups issued by the detached email task.
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::user_profile_response(&test_user.id)
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "msg_1" })))
        .mount(&mock_server)
        .await;

    let service = AppointmentBookingService::new(&config_for(&mock_server));
    let appointment = service
        .book_appointment(&test_user.to_user(), request, "test-token")
        .await
        .expect("booking should succeed");

    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.scheduled_at, expected_instant);
    assert_eq!(appointment.dermatologist_id, dermatologist_id);
}

#[tokio::test]
async fn booking_succeeds_even_when_email_boundary_fails() {
    let mock_server = MockServer::start().await;
    let test_user = TestUser::default();
    let dermatologist_id = Uuid::new_v4();

    mount_dermatologist(&mock_server, dermatologist_id).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([appointment_row(
            &test_user.id,
            dermatologist_id,
            "2030-06-15T14:30:00+00:00",
        )])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::user_profile_response(&test_user.id)
        ])))
        .mount(&mock_server)
        .await;

    // The email boundary rejects everything; the booking must not care.
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "down" })))
        .mount(&mock_server)
        .await;

    let service = AppointmentBookingService::new(&config_for(&mock_server));
    let result = service
        .book_appointment(&test_user.to_user(), booking_request(Some(dermatologist_id)), "test-token")
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn missing_dermatologist_selection_writes_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = AppointmentBookingService::new(&config_for(&mock_server));
    let result = service
        .book_appointment(&TestUser::default().to_user(), booking_request(None), "test-token")
        .await;

    assert_matches!(result, Err(BookingError::MissingDermatologist));
}

#[tokio::test]
async fn past_date_is_rejected_before_any_write() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut request = booking_request(Some(Uuid::new_v4()));
    request.date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

    let service = AppointmentBookingService::new(&config_for(&mock_server));
    let result = service
        .book_appointment(&TestUser::default().to_user(), request, "test-token")
        .await;

    assert_matches!(result, Err(BookingError::DateInPast));
}

#[tokio::test]
async fn empty_reason_is_rejected() {
    let mock_server = MockServer::start().await;

    let mut request = booking_request(Some(Uuid::new_v4()));
    request.reason = "   ".to_string();

    let service = AppointmentBookingService::new(&config_for(&mock_server));
    let result = service
        .book_appointment(&TestUser::default().to_user(), request, "test-token")
        .await;

    assert_matches!(result, Err(BookingError::ValidationError(_)));
}

#[tokio::test]
async fn unauthenticated_booking_is_rejected_at_the_boundary() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = appointment_routes(Arc::new(config_for(&mock_server)));

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&booking_request(Some(Uuid::new_v4()))).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn authenticated_booking_through_router_succeeds() {
    let mock_server = MockServer::start().await;
    let config = config_for(&mock_server);
    let test_user = TestUser::default();
    let dermatologist_id = Uuid::new_v4();
    let token = JwtTestUtils::create_test_token(&test_user, &config.supabase_jwt_secret, Some(24));

    mount_dermatologist(&mock_server, dermatologist_id).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([appointment_row(
            &test_user.id,
            dermatologist_id,
            "2030-06-15T14:30:00+00:00",
        )])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::user_profile_response(&test_user.id)
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "msg_2" })))
        .mount(&mock_server)
        .await;

    let app = appointment_routes(Arc::new(config));

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&booking_request(Some(dermatologist_id))).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json_response: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json_response["appointment"]["status"], "pending");
}

// ==============================================================================
// CONFIRMATION COMPOSER
// ==============================================================================

fn email_job(user_id: &str, dermatologist_id: Uuid) -> EmailJob {
    EmailJob {
        appointment_id: Uuid::new_v4(),
        user_id: Uuid::parse_str(user_id).unwrap(),
        dermatologist_id,
        scheduled_at: "2030-06-15T14:30:00Z".parse().unwrap(),
        utc_offset_minutes: 0,
        reason: Some("Follow-up on scan".to_string()),
    }
}

#[tokio::test]
async fn composer_sends_nothing_when_user_lookup_fails() {
    let mock_server = MockServer::start().await;
    let test_user = TestUser::default();
    let dermatologist_id = Uuid::new_v4();

    mount_dermatologist(&mock_server, dermatologist_id).await;

    // No profile row for this user.
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "msg_x" })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let composer = ConfirmationEmailService::new(&config_for(&mock_server));
    let result = composer
        .send_confirmation(email_job(&test_user.id, dermatologist_id), "test-token")
        .await;

    assert_matches!(result, Err(EmailError::UserLookup(_)));
}

#[tokio::test]
async fn composer_sends_nothing_when_dermatologist_lookup_fails() {
    let mock_server = MockServer::start().await;
    let test_user = TestUser::default();

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::user_profile_response(&test_user.id)
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/dermatologists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "msg_x" })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let composer = ConfirmationEmailService::new(&config_for(&mock_server));
    let result = composer
        .send_confirmation(email_job(&test_user.id, Uuid::new_v4()), "test-token")
        .await;

    assert_matches!(result, Err(EmailError::DermatologistLookup(_)));
}

#[tokio::test]
async fn composer_submits_rendered_summary_to_email_boundary() {
    let mock_server = MockServer::start().await;
    let test_user = TestUser::default();
    let dermatologist_id = Uuid::new_v4();

    mount_dermatologist(&mock_server, dermatologist_id).await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::user_profile_response(&test_user.id)
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "msg_42" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let composer = ConfirmationEmailService::new(&config_for(&mock_server));
    let response = composer
        .send_confirmation(email_job(&test_user.id, dermatologist_id), "test-token")
        .await
        .expect("composer should succeed");

    assert!(response.success);
    assert_eq!(response.message_id, "msg_42");
}
