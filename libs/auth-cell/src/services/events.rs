use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use shared_models::auth::Identity;

type Callback = Arc<dyn Fn(Option<Identity>) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    callbacks: HashMap<u64, Callback>,
}

/// Observer hub for identity changes. The gateway broadcasts
/// `Some(identity)` after sign-up/sign-in and `None` after sign-out;
/// subscribers receive every notification until their subscription is
/// dropped.
#[derive(Clone, Default)]
pub struct IdentityObservers {
    registry: Arc<Mutex<Registry>>,
}

impl IdentityObservers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &self,
        callback: impl Fn(Option<Identity>) + Send + Sync + 'static,
    ) -> IdentitySubscription {
        let mut registry = self.registry.lock().unwrap();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.callbacks.insert(id, Arc::new(callback));

        IdentitySubscription {
            registry: Arc::clone(&self.registry),
            id,
        }
    }

    pub fn notify(&self, identity: Option<Identity>) {
        // Callbacks run outside the lock so they may subscribe/unsubscribe.
        let callbacks: Vec<Callback> = {
            let registry = self.registry.lock().unwrap();
            registry.callbacks.values().cloned().collect()
        };

        for callback in callbacks {
            callback(identity.clone());
        }
    }

    pub fn observer_count(&self) -> usize {
        self.registry.lock().unwrap().callbacks.len()
    }
}

/// Handle returned by [`IdentityObservers::subscribe`]. Dropping it (or
/// calling [`unsubscribe`](Self::unsubscribe)) removes the callback; the
/// move makes a second unsubscribe unrepresentable.
pub struct IdentitySubscription {
    registry: Arc<Mutex<Registry>>,
    id: u64,
}

impl IdentitySubscription {
    pub fn unsubscribe(self) {}
}

impl Drop for IdentitySubscription {
    fn drop(&mut self) {
        self.registry.lock().unwrap().callbacks.remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn identity(id: &str) -> Identity {
        Identity {
            id: id.to_string(),
            email: Some(format!("{id}@example.com")),
            display_name: None,
            id_token: "token".to_string(),
        }
    }

    #[test]
    fn notifies_every_subscriber() {
        let observers = IdentityObservers::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen_a = Arc::clone(&seen);
        let _sub_a = observers.subscribe(move |_| {
            seen_a.fetch_add(1, Ordering::SeqCst);
        });
        let seen_b = Arc::clone(&seen);
        let _sub_b = observers.subscribe(move |_| {
            seen_b.fetch_add(1, Ordering::SeqCst);
        });

        observers.notify(Some(identity("u1")));
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let observers = IdentityObservers::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen_cb = Arc::clone(&seen);
        let sub = observers.subscribe(move |_| {
            seen_cb.fetch_add(1, Ordering::SeqCst);
        });

        observers.notify(None);
        sub.unsubscribe();
        observers.notify(None);

        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(observers.observer_count(), 0);
    }
}
