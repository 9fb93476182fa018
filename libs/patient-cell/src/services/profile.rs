// libs/patient-cell/src/services/profile.rs
use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_models::auth::User;

use crate::models::{ProfileError, UpdateProfileRequest, UserProfile};

pub struct ProfileService {
    supabase: SupabaseClient,
}

impl ProfileService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn get_profile(
        &self,
        user_id: &str,
        auth_token: &str,
    ) -> Result<UserProfile, ProfileError> {
        debug!("Fetching user profile: {}", user_id);

        let path = format!("/rest/v1/users?id=eq.{}", user_id);
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(|e| ProfileError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(ProfileError::NotFound);
        }

        serde_json::from_value(result[0].clone())
            .map_err(|e| ProfileError::DatabaseError(format!("Failed to parse profile: {}", e)))
    }

    /// Fetch the profile row for an authenticated user, creating it from
    /// the JWT identity when signup never wrote one. Signup itself belongs
    /// to the managed auth provider; this only backfills the app-side row.
    pub async fn ensure_profile(
        &self,
        user: &User,
        auth_token: &str,
    ) -> Result<UserProfile, ProfileError> {
        match self.get_profile(&user.id, auth_token).await {
            Ok(profile) => Ok(profile),
            Err(ProfileError::NotFound) => self.create_profile(user, auth_token).await,
            Err(e) => Err(e),
        }
    }

    pub async fn update_profile(
        &self,
        user_id: &str,
        request: UpdateProfileRequest,
        auth_token: &str,
    ) -> Result<UserProfile, ProfileError> {
        debug!("Updating user profile: {}", user_id);

        let mut update_data = serde_json::Map::new();
        if let Some(name) = request.name {
            update_data.insert("name".to_string(), json!(name));
        }
        if let Some(profile_pic) = request.profile_pic {
            update_data.insert("profile_pic".to_string(), json!(profile_pic));
        }

        if update_data.is_empty() {
            return Err(ProfileError::ValidationError(
                "No profile fields to update".to_string(),
            ));
        }

        let path = format!("/rest/v1/users?id=eq.{}", user_id);
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(auth_token),
                Some(Value::Object(update_data)),
                Some(headers),
            )
            .await
            .map_err(|e| ProfileError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(ProfileError::NotFound);
        }

        serde_json::from_value(result[0].clone())
            .map_err(|e| ProfileError::DatabaseError(format!("Failed to parse profile: {}", e)))
    }

    async fn create_profile(
        &self,
        user: &User,
        auth_token: &str,
    ) -> Result<UserProfile, ProfileError> {
        debug!("Creating missing profile row for user: {}", user.id);

        let profile_data = json!({
            "id": user.id,
            "email": user.email.clone().unwrap_or_default(),
            "name": user.display_name(),
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
                "/rest/v1/users",
                Some(auth_token),
                Some(profile_data),
                Some(headers),
            )
            .await
            .map_err(|e| ProfileError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(ProfileError::DatabaseError(
                "Failed to create user profile".to_string(),
            ));
        }

        serde_json::from_value(result[0].clone())
            .map_err(|e| ProfileError::DatabaseError(format!("Failed to parse profile: {}", e)))
    }
}
