use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::error::AppError;

/// Raw session returned by the identity provider's account endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSession {
    #[serde(rename = "localId")]
    pub local_id: String,
    pub email: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "idToken")]
    pub id_token: String,
}

/// Client for the hosted identity provider. Failures carry the provider's
/// own error code (`EMAIL_EXISTS`, `INVALID_LOGIN_CREDENTIALS`, ...) in
/// `AppError::Auth`; nothing is retried locally.
pub struct IdentityClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.identity_base_url.clone(),
            api_key: config.firebase_api_key.clone(),
        }
    }

    async fn post_account(&self, action: &str, body: Value) -> Result<Value, AppError> {
        let url = format!("{}/v1/accounts:{}", self.base_url, action);
        debug!("Making request to {}", url);

        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Identity provider error ({}): {}", status, error_text);

            return Err(AppError::Auth {
                code: extract_error_code(&error_text)
                    .unwrap_or_else(|| status.as_u16().to_string()),
                message: error_text,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderSession, AppError> {
        let body = json!({
            "email": email,
            "password": password,
            "returnSecureToken": true
        });

        let value = self.post_account("signUp", body).await?;
        serde_json::from_value(value).map_err(|e| AppError::Decode(e.to_string()))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, AppError> {
        let body = json!({
            "email": email,
            "password": password,
            "returnSecureToken": true
        });

        let value = self.post_account("signInWithPassword", body).await?;
        serde_json::from_value(value).map_err(|e| AppError::Decode(e.to_string()))
    }

    pub async fn update_display_name(
        &self,
        id_token: &str,
        display_name: &str,
    ) -> Result<(), AppError> {
        let body = json!({
            "idToken": id_token,
            "displayName": display_name,
            "returnSecureToken": false
        });

        self.post_account("update", body).await?;
        Ok(())
    }
}

// Error payloads look like {"error": {"message": "WEAK_PASSWORD : Password
// should be at least 6 characters"}}; only the leading code token matters.
fn extract_error_code(body: &str) -> Option<String> {
    let payload: Value = serde_json::from_str(body).ok()?;
    let message = payload.get("error")?.get("message")?.as_str()?;
    message.split_whitespace().next().map(str::to_string)
}
