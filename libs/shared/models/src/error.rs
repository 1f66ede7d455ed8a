use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Rejected by the identity provider. `code` is the provider's own
    /// error code, passed through unchanged for the screens to map.
    #[error("Authentication error [{code}]: {message}")]
    Auth { code: String, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Document store error: {0}")]
    Store(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Provider error code, if this is a provider rejection.
    pub fn auth_code(&self) -> Option<&str> {
        match self {
            AppError::Auth { code, .. } => Some(code),
            _ => None,
        }
    }
}
