use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated user record as returned by the identity provider.
/// The app never mutates it; `id_token` is the bearer credential for
/// document-store calls made on this user's behalf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub id_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Patient => write!(f, "patient"),
            Role::Doctor => write!(f, "doctor"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Application-level user record stored in the `users` collection,
/// keyed by the identity id (one-to-one).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Date of birth as entered at registration, DD-MM-YYYY.
    pub dob: String,
    pub gender: String,
    /// Absent on records written before roles existed; treated as patient.
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
