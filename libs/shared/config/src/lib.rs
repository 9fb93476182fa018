use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_jwt_secret: String,
    pub resend_api_key: String,
    pub resend_from_address: String,
    pub resend_base_url: String,
    pub inference_api_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            supabase_jwt_secret: env::var("SUPABASE_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            resend_api_key: env::var("RESEND_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("RESEND_API_KEY not set, confirmation emails disabled");
                    String::new()
                }),
            resend_from_address: env::var("RESEND_FROM_ADDRESS")
                .unwrap_or_else(|_| "AcneScan <onboarding@resend.dev>".to_string()),
            resend_base_url: env::var("RESEND_BASE_URL")
                .unwrap_or_else(|_| "https://api.resend.com".to_string()),
            inference_api_url: env::var("INFERENCE_API_URL")
                .unwrap_or_else(|_| {
                    warn!("INFERENCE_API_URL not set, using default");
                    "http://localhost:5001".to_string()
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_anon_key.is_empty()
            && !self.supabase_jwt_secret.is_empty()
    }

    pub fn is_email_configured(&self) -> bool {
        !self.resend_api_key.is_empty()
    }
}
