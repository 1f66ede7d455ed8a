pub mod events;
pub mod gateway;
pub mod profile;
pub mod session;

pub use events::{IdentityObservers, IdentitySubscription};
pub use gateway::AuthGateway;
pub use profile::{ProfileService, ProfileSource};
pub use session::{SessionState, SessionStore};
