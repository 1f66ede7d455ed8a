use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub firebase_project_id: String,
    pub firebase_api_key: String,
    pub identity_base_url: String,
    pub firestore_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            firebase_project_id: env::var("FIREBASE_PROJECT_ID")
                .unwrap_or_else(|_| {
                    warn!("FIREBASE_PROJECT_ID not set, using empty value");
                    String::new()
                }),
            firebase_api_key: env::var("FIREBASE_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("FIREBASE_API_KEY not set, using empty value");
                    String::new()
                }),
            identity_base_url: env::var("IDENTITY_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("IDENTITY_BASE_URL not set, using default");
                    "https://identitytoolkit.googleapis.com".to_string()
                }),
            firestore_base_url: env::var("FIRESTORE_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("FIRESTORE_BASE_URL not set, using default");
                    "https://firestore.googleapis.com".to_string()
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.firebase_project_id.is_empty()
            && !self.firebase_api_key.is_empty()
    }
}
