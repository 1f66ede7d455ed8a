use std::env;
use std::sync::Arc;

use dotenv::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth_cell::services::events::IdentityObservers;
use auth_cell::services::gateway::AuthGateway;
use auth_cell::services::profile::ProfileService;
use auth_cell::services::session::SessionStore;
use patient_cell::services::records::PatientRecords;
use screens_cell::models::PickOutcome;
use screens_cell::services::medical_history::{FilePicker, MedicalHistoryScreen};
use shared_config::AppConfig;
use shared_models::error::AppError;

/// Headless hosts have no document picker.
struct NoopPicker;

#[async_trait::async_trait]
impl FilePicker for NoopPicker {
    async fn pick_documents(&self) -> Result<PickOutcome, AppError> {
        Ok(PickOutcome::Cancelled)
    }
}

#[tokio::main]
async fn main() {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting clinic management client");

    // Load configuration
    let config = AppConfig::from_env();

    // Wire the stack: observer hub, gateways, session store
    let observers = IdentityObservers::new();
    let gateway = Arc::new(AuthGateway::new(&config, observers.clone()));
    let profiles = Arc::new(ProfileService::new(&config));
    let mut session = SessionStore::new(&observers, profiles);
    let records = Arc::new(PatientRecords::new(&config));

    // With credentials in the environment, run the sign-in -> history ->
    // sign-out flow once; otherwise just report readiness.
    match (env::var("APP_EMAIL"), env::var("APP_PASSWORD")) {
        (Ok(email), Ok(password)) => {
            match gateway.sign_in(&email, &password).await {
                Ok(identity) => {
                    let mut changes = session.subscribe();
                    while session.loading() {
                        if changes.changed().await.is_err() {
                            break;
                        }
                    }
                    info!("Session ready, role: {:?}", session.role());

                    let mut screen = MedicalHistoryScreen::new(records, Arc::new(NoopPicker));
                    match screen.load(&identity).await {
                        Some(notice) => warn!("{}", notice.message),
                        None => info!(
                            "Loaded {} appointments, {} diagnoses, {} treatments",
                            screen.data.appointments.len(),
                            screen.data.diagnoses.len(),
                            screen.data.treatments.len()
                        ),
                    }

                    if let Err(err) = gateway.sign_out().await {
                        error!("Sign-out failed: {}", err);
                    }
                }
                Err(err) => error!("Sign-in failed: {}", err),
            }
        }
        _ => info!("APP_EMAIL/APP_PASSWORD not set, nothing to run"),
    }

    session.close();
}
