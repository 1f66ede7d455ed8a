use serde::{Deserialize, Serialize};

/// Profile fields collected by the registration form, written to the
/// `users` collection alongside the new identity. Email rides on the
/// identity itself; role is always "patient" at sign-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpProfile {
    pub name: String,
    pub phone: String,
    /// DD-MM-YYYY, as validated by the registration form.
    pub dob: String,
    pub gender: String,
}
