use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;

pub struct TestConfig {
    pub jwt_secret: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub resend_api_key: String,
    pub resend_base_url: String,
    pub inference_api_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
            resend_api_key: "test-resend-key".to_string(),
            resend_base_url: "http://localhost:8089".to_string(),
            inference_api_url: "http://localhost:5001".to_string(),
        }
    }
}

impl TestConfig {
    /// Test config pointed at a mock server standing in for Supabase.
    pub fn with_supabase_url(url: &str) -> Self {
        Self {
            supabase_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            supabase_jwt_secret: self.jwt_secret.clone(),
            resend_api_key: self.resend_api_key.clone(),
            resend_from_address: "AcneScan <onboarding@resend.dev>".to_string(),
            resend_base_url: self.resend_base_url.clone(),
            inference_api_url: self.inference_api_url.clone(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: "authenticated".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(email: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: "authenticated".to_string(),
        }
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: Some(self.email.clone()),
            role: Some(self.role.clone()),
            metadata: None,
            created_at: Some(Utc::now()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.id,
            "email": user.email,
            "role": user.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn user_profile_response(user_id: &str) -> serde_json::Value {
        json!({
            "id": user_id,
            "name": "Test User",
            "email": "test@example.com",
            "profile_pic": null,
            "created_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn dermatologist_response(id: &str, name: &str, location: Option<&str>) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "specialty": "Dermatology",
            "email": "derm@example.com",
            "phone": "555-0100",
            "bio": "Board-certified dermatologist",
            "location": location,
            "available": true
        })
    }

    pub fn appointment_response(user_id: &str, dermatologist_id: &str) -> serde_json::Value {
        json!({
            "id": Uuid::new_v4(),
            "user_id": user_id,
            "dermatologist_id": dermatologist_id,
            "scan_id": null,
            "status": "pending",
            "scheduled_at": "2026-12-25T10:00:00Z",
            "created_at": "2026-01-01T00:00:00Z"
        })
    }

    pub fn scan_response(user_id: &str) -> serde_json::Value {
        json!({
            "id": Uuid::new_v4(),
            "user_id": user_id,
            "image_url": "http://localhost:54321/storage/v1/object/public/user-scans/test.jpg",
            "acne_type": "Papules_Moderate",
            "causes": ["Hormonal changes", "Excess sebum"],
            "confidence": 0.91,
            "analysis_date": "2026-01-01T00:00:00Z"
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::default();
        let app_config = config.to_app_config();

        assert_eq!(app_config.supabase_url, "http://localhost:54321");
        assert_eq!(app_config.supabase_anon_key, "test-anon-key");
        assert!(!app_config.supabase_jwt_secret.is_empty());
        assert!(app_config.is_email_configured());
    }

    #[test]
    fn test_user_creation() {
        let user = TestUser::new("skin@example.com");
        assert_eq!(user.email, "skin@example.com");

        let user_model = user.to_user();
        assert_eq!(user_model.email, Some(user.email.clone()));
        assert_eq!(user_model.id, user.id);
    }

    #[test]
    fn test_jwt_token_creation() {
        let user = TestUser::default();
        let token = JwtTestUtils::create_test_token(&user, "test-secret", Some(1));

        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_token_round_trip() {
        let test_user = TestUser::default();
        let secret = "round-trip-secret";
        let token = JwtTestUtils::create_test_token(&test_user, secret, Some(1));

        let user = crate::jwt::validate_token(&token, secret).expect("token should validate");
        assert_eq!(user.id, test_user.id);
        assert_eq!(user.email, Some(test_user.email));
    }

    #[test]
    fn test_expired_token_rejected() {
        let test_user = TestUser::default();
        let secret = "expiry-secret";
        let token = JwtTestUtils::create_expired_token(&test_user, secret);

        assert!(crate::jwt::validate_token(&token, secret).is_err());
    }

    #[test]
    fn test_wrong_signature_rejected() {
        let test_user = TestUser::default();
        let token = JwtTestUtils::create_invalid_signature_token(&test_user);

        assert!(crate::jwt::validate_token(&token, "right-secret").is_err());
    }
}
