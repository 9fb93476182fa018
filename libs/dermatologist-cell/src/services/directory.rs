// libs/dermatologist-cell/src/services/directory.rs
use anyhow::Result;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Dermatologist, DermatologistError, DirectoryFilters};
use crate::services::filter::apply_filters;

pub struct DirectoryService {
    supabase: SupabaseClient,
}

impl DirectoryService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Fetch the full snapshot of bookable dermatologists, name-ascending.
    /// The directory is public; reads go through the anon key alone.
    pub async fn list_available(&self) -> Result<Vec<Dermatologist>, DermatologistError> {
        debug!("Fetching dermatologist directory");

        let path = "/rest/v1/dermatologists?available=eq.true&order=name.asc";
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, path, None, None)
            .await
            .map_err(|e| DermatologistError::DatabaseError(e.to_string()))?;

        let dermatologists: Vec<Dermatologist> = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Dermatologist>, _>>()
            .map_err(|e| {
                DermatologistError::DatabaseError(format!("Failed to parse directory: {}", e))
            })?;

        debug!("Directory snapshot holds {} entries", dermatologists.len());
        Ok(dermatologists)
    }

    /// Fetch one dermatologist by id.
    pub async fn get_dermatologist(
        &self,
        dermatologist_id: &str,
        auth_token: Option<&str>,
    ) -> Result<Dermatologist, DermatologistError> {
        debug!("Fetching dermatologist: {}", dermatologist_id);

        let path = format!("/rest/v1/dermatologists?id=eq.{}", dermatologist_id);
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, auth_token, None)
            .await
            .map_err(|e| DermatologistError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(DermatologistError::NotFound);
        }

        serde_json::from_value(result[0].clone()).map_err(|e| {
            DermatologistError::DatabaseError(format!("Failed to parse dermatologist: {}", e))
        })
    }

    /// Fetch the directory and derive the filtered, sorted view over it.
    pub async fn search(
        &self,
        filters: &DirectoryFilters,
    ) -> Result<Vec<Dermatologist>, DermatologistError> {
        let snapshot = self.list_available().await?;
        Ok(apply_filters(&snapshot, filters))
    }
}
