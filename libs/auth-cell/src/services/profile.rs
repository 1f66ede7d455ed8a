use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::firestore::FirestoreClient;
use shared_database::value::{string_value, timestamp_value};
use shared_models::auth::{Identity, Profile};
use shared_models::error::AppError;

use crate::models::SignUpProfile;

/// Read access to application profiles, injectable so the session store
/// can be tested without a live document store.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn profile(&self, user_id: &str, auth_token: &str) -> Result<Option<Profile>, AppError>;
}

/// Accessor for the `users` collection.
pub struct ProfileService {
    store: FirestoreClient,
}

impl ProfileService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: FirestoreClient::new(config),
        }
    }

    /// Write the profile record for a freshly created identity. The
    /// document id is the identity id; role always starts as patient.
    pub async fn create(
        &self,
        identity: &Identity,
        fields: &SignUpProfile,
    ) -> Result<(), AppError> {
        debug!("Creating profile for user {}", identity.id);

        let doc = json!({
            "name": string_value(&fields.name),
            "email": string_value(identity.email.as_deref().unwrap_or_default()),
            "phone": string_value(&fields.phone),
            "dob": string_value(&fields.dob),
            "gender": string_value(&fields.gender),
            "role": string_value("patient"),
            "createdAt": timestamp_value(Utc::now()),
        });

        self.store
            .add_with_id("users", &identity.id, doc, Some(&identity.id_token))
            .await?;

        Ok(())
    }

    pub async fn fetch(
        &self,
        user_id: &str,
        auth_token: &str,
    ) -> Result<Option<Profile>, AppError> {
        debug!("Fetching profile for user {}", user_id);

        match self.store.get("users", user_id, Some(auth_token)).await? {
            Some(doc) => {
                let profile: Profile =
                    serde_json::from_value(doc).map_err(|e| AppError::Decode(e.to_string()))?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ProfileSource for ProfileService {
    async fn profile(&self, user_id: &str, auth_token: &str) -> Result<Option<Profile>, AppError> {
        self.fetch(user_id, auth_token).await
    }
}
