use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::identity::IdentityClient;
use shared_models::auth::Identity;
use shared_models::error::AppError;

use crate::models::SignUpProfile;
use crate::services::events::IdentityObservers;
use crate::services::profile::ProfileService;

/// Pass-through to the identity provider plus the one compound write
/// (profile record after identity creation). Holds no session state of its
/// own; every failure propagates to the caller with the provider's error
/// code intact, and nothing is retried.
pub struct AuthGateway {
    identity: IdentityClient,
    profiles: ProfileService,
    observers: IdentityObservers,
}

impl AuthGateway {
    pub fn new(config: &AppConfig, observers: IdentityObservers) -> Self {
        Self {
            identity: IdentityClient::new(config),
            profiles: ProfileService::new(config),
            observers,
        }
    }

    pub fn observers(&self) -> &IdentityObservers {
        &self.observers
    }

    /// Create the identity, set its display name, then write the profile
    /// record. Not transactional: identity creation already signs the
    /// caller in and notifies observers, so a later failure leaves an
    /// identity without a profile and still returns the error.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        fields: &SignUpProfile,
    ) -> Result<Identity, AppError> {
        debug!("Signing up {}", email);

        let session = self.identity.sign_up(email, password).await?;
        let identity = Identity {
            id: session.local_id,
            email: session.email,
            display_name: Some(fields.name.clone()),
            id_token: session.id_token,
        };
        self.observers.notify(Some(identity.clone()));

        self.identity
            .update_display_name(&identity.id_token, &fields.name)
            .await?;
        self.profiles.create(&identity, fields).await?;

        info!("Registered user {}", identity.id);
        Ok(identity)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        debug!("Signing in {}", email);

        let session = self.identity.sign_in(email, password).await?;
        let identity = Identity {
            id: session.local_id,
            email: session.email,
            display_name: session.display_name,
            id_token: session.id_token,
        };
        self.observers.notify(Some(identity.clone()));

        info!("User {} signed in", identity.id);
        Ok(identity)
    }

    /// End the session. Password sessions keep no server-side state at the
    /// provider, so this is a local teardown plus an observer broadcast.
    pub async fn sign_out(&self) -> Result<(), AppError> {
        debug!("Signing out");
        self.observers.notify(None);
        Ok(())
    }
}
