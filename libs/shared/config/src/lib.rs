use std::env;
use tracing::warn;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:9933/api";
pub const DEFAULT_MEDIA_BASE_URL: &str = "http://localhost:9944/api";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub media_base_url: String,
    pub jwt_secret: String,
    pub request_timeout_secs: u64,
    pub session_file: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_base_url: env::var("CLINIC_API_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_API_BASE_URL not set, using default");
                    DEFAULT_API_BASE_URL.to_string()
                }),
            media_base_url: env::var("CLINIC_MEDIA_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_MEDIA_BASE_URL not set, using default");
                    DEFAULT_MEDIA_BASE_URL.to_string()
                }),
            jwt_secret: env::var("CLINIC_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            request_timeout_secs: env::var("CLINIC_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            session_file: env::var("CLINIC_SESSION_FILE").ok(),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty() && !self.jwt_secret.is_empty()
    }
}
