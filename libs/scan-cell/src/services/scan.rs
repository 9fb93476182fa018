// libs/scan-cell/src/services/scan.rs
use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use patient_cell::services::profile::ProfileService;
use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_models::auth::User;

use crate::models::{CreateScanRequest, Scan, ScanError};
use crate::services::classify::decode_image_payload;

const SCAN_BUCKET: &str = "user-scans";

pub struct ScanService {
    supabase: SupabaseClient,
    profile_service: ProfileService,
}

impl ScanService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            profile_service: ProfileService::new(config),
        }
    }

    /// Store a classified scan: image into the storage bucket, then one
    /// `scans` row pointing at its public URL. The profile row is
    /// backfilled first so the scan insert never dangles.
    pub async fn upload_scan(
        &self,
        user: &User,
        request: CreateScanRequest,
        auth_token: &str,
    ) -> Result<Scan, ScanError> {
        debug!("Uploading scan for user: {}", user.id);

        if request.acne_type.is_empty() {
            return Err(ScanError::ValidationError(
                "Classification result is required".to_string(),
            ));
        }

        self.profile_service
            .ensure_profile(user, auth_token)
            .await
            .map_err(|e| ScanError::DatabaseError(e.to_string()))?;

        let (bytes, content_type) = decode_image_payload(&request.file_data)?;

        let file_ext = if content_type == "image/png" { "png" } else { "jpg" };
        let object_path = format!("{}/{}.{}", user.id, Uuid::new_v4(), file_ext);

        self.supabase
            .upload_object(SCAN_BUCKET, &object_path, bytes, content_type, auth_token)
            .await
            .map_err(|e| ScanError::DatabaseError(e.to_string()))?;

        let image_url = self.supabase.get_public_url(SCAN_BUCKET, &object_path);

        let scan_data = json!({
            "user_id": user.id,
            "image_url": image_url,
            "acne_type": request.acne_type,
            "causes": request.causes,
            "confidence": request.confidence,
            "analysis_date": Utc::now().to_rfc3339()
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
                "/rest/v1/scans",
                Some(auth_token),
                Some(scan_data),
                Some(headers),
            )
            .await
            .map_err(|e| ScanError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(ScanError::DatabaseError(
                "Failed to create scan record".to_string(),
            ));
        }

        let scan: Scan = serde_json::from_value(result[0].clone())
            .map_err(|e| ScanError::DatabaseError(format!("Failed to parse scan: {}", e)))?;

        info!("Scan {} stored for user {}", scan.id, user.id);
        Ok(scan)
    }

    /// List the user's scans, newest analysis first.
    pub async fn get_user_scans(
        &self,
        user: &User,
        auth_token: &str,
    ) -> Result<Vec<Scan>, ScanError> {
        debug!("Listing scans for user: {}", user.id);

        let path = format!(
            "/rest/v1/scans?user_id=eq.{}&order=analysis_date.desc",
            user.id
        );
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(|e| ScanError::DatabaseError(e.to_string()))?;

        result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Scan>, _>>()
            .map_err(|e| ScanError::DatabaseError(format!("Failed to parse scans: {}", e)))
    }

    /// Fetch one scan, scoped to its owner.
    pub async fn get_scan(
        &self,
        scan_id: Uuid,
        user: &User,
        auth_token: &str,
    ) -> Result<Scan, ScanError> {
        debug!("Fetching scan: {}", scan_id);

        let path = format!("/rest/v1/scans?id=eq.{}", scan_id);
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(|e| ScanError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(ScanError::NotFound);
        }

        let scan: Scan = serde_json::from_value(result[0].clone())
            .map_err(|e| ScanError::DatabaseError(format!("Failed to parse scan: {}", e)))?;

        if scan.user_id.to_string() != user.id {
            return Err(ScanError::NotFound);
        }

        Ok(scan)
    }
}
