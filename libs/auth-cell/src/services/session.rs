use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::warn;

use shared_models::auth::{Identity, Role};

use crate::services::events::{IdentityObservers, IdentitySubscription};
use crate::services::profile::ProfileSource;

#[derive(Debug, Clone)]
pub struct SessionState {
    pub identity: Option<Identity>,
    pub role: Option<Role>,
    pub loading: bool,
}

struct Shared {
    state: Mutex<SessionState>,
    changes: watch::Sender<u64>,
}

impl Shared {
    fn update(&self, apply: impl FnOnce(&mut SessionState)) {
        {
            let mut state = self.state.lock().unwrap();
            apply(&mut state);
        }
        self.changes.send_modify(|version| *version += 1);
    }
}

/// Owns the current identity and derived role. Subscribes to identity
/// changes on construction and resolves the role from the profile record
/// on a background task; `loading` stays true until the first notification
/// has been fully applied. There is no single-writer invariant: the screen
/// layer may also call the setters directly.
pub struct SessionStore {
    shared: Arc<Shared>,
    changes: watch::Receiver<u64>,
    subscription: Option<IdentitySubscription>,
    worker: Option<JoinHandle<()>>,
}

impl SessionStore {
    /// Spawns the apply loop; must be called on a tokio runtime.
    pub fn new(observers: &IdentityObservers, profiles: Arc<dyn ProfileSource>) -> Self {
        let (changes_tx, changes_rx) = watch::channel(0u64);
        let shared = Arc::new(Shared {
            state: Mutex::new(SessionState {
                identity: None,
                role: None,
                loading: true,
            }),
            changes: changes_tx,
        });

        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Option<Identity>>();
        let subscription = observers.subscribe(move |identity| {
            let _ = event_tx.send(identity);
        });

        let worker_shared = Arc::clone(&shared);
        let worker = tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                Self::apply(&worker_shared, profiles.as_ref(), event).await;
            }
        });

        Self {
            shared,
            changes: changes_rx,
            subscription: Some(subscription),
            worker: Some(worker),
        }
    }

    async fn apply(shared: &Shared, profiles: &dyn ProfileSource, event: Option<Identity>) {
        match event {
            Some(identity) => {
                let user_id = identity.id.clone();
                let token = identity.id_token.clone();
                shared.update(|state| state.identity = Some(identity));

                // Lookup failures never surface to callers; the session
                // degrades to the default role.
                let role = match profiles.profile(&user_id, &token).await {
                    Ok(Some(profile)) => profile.role.unwrap_or(Role::Patient),
                    Ok(None) => Role::Patient,
                    Err(err) => {
                        warn!("Failed to load profile for {}: {}", user_id, err);
                        Role::Patient
                    }
                };
                shared.update(|state| state.role = Some(role));
            }
            None => {
                shared.update(|state| {
                    state.identity = None;
                    state.role = None;
                });
            }
        }

        shared.update(|state| state.loading = false);
    }

    pub fn snapshot(&self) -> SessionState {
        self.shared.state.lock().unwrap().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.snapshot().identity
    }

    pub fn role(&self) -> Option<Role> {
        self.snapshot().role
    }

    pub fn loading(&self) -> bool {
        self.snapshot().loading
    }

    pub fn set_identity(&self, identity: Option<Identity>) {
        self.shared.update(|state| state.identity = identity);
    }

    pub fn set_role(&self, role: Option<Role>) {
        self.shared.update(|state| state.role = role);
    }

    /// Change signal for the screen layer; the value bumps on every
    /// publish, `borrow` + `snapshot` gets the state behind it.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.clone()
    }

    /// Unsubscribes from identity changes (exactly once) and stops the
    /// apply loop. Also runs on drop.
    pub fn close(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }
}

impl Drop for SessionStore {
    fn drop(&mut self) {
        self.close();
    }
}
