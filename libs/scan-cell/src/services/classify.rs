// libs/scan-cell/src/services/classify.rs
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::{multipart, Client};
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::models::{ClassificationResult, ScanError};

/// Client for the externally hosted classification endpoint. The model is
/// an opaque collaborator; nothing here inspects the image beyond decoding
/// the upload payload.
pub struct ClassifierService {
    client: Client,
    base_url: String,
}

/// Split a possible "data:image/jpeg;base64,..." payload into raw bytes
/// plus a content type.
pub fn decode_image_payload(file_data: &str) -> Result<(Vec<u8>, &'static str), ScanError> {
    let parts: Vec<&str> = file_data.split(',').collect();
    let base64_data = if parts.len() > 1 { parts[1] } else { file_data };

    let bytes = BASE64
        .decode(base64_data)
        .map_err(|e| ScanError::InvalidImage(e.to_string()))?;

    if bytes.is_empty() {
        return Err(ScanError::InvalidImage("Empty image payload".to_string()));
    }

    let content_type = if file_data.contains("image/png") {
        "image/png"
    } else {
        "image/jpeg"
    };

    Ok((bytes, content_type))
}

impl ClassifierService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.inference_api_url.clone(),
        }
    }

    /// Forward one image to the inference endpoint and hand back its
    /// prediction untouched.
    pub async fn classify(&self, file_data: &str) -> Result<ClassificationResult, ScanError> {
        let (bytes, content_type) = decode_image_payload(file_data)?;

        let url = format!("{}/api/predict", self.base_url);
        debug!("Submitting {} bytes for classification to {}", bytes.len(), url);

        let part = multipart::Part::bytes(bytes)
            .file_name("scan.jpg")
            .mime_str(content_type)
            .map_err(|e| ScanError::InvalidImage(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ScanError::InferenceError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Inference API error ({}): {}", status, error_text);
            return Err(ScanError::InferenceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .json::<ClassificationResult>()
            .await
            .map_err(|e| ScanError::InferenceError(format!("Invalid inference response: {}", e)))
    }
}
