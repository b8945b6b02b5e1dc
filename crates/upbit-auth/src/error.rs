//! Error types for authentication operations

/// Errors that can occur while preparing credentials or signing a request
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Token could not be produced (claim serialization or MAC setup)
    #[error("Signing error: {0}")]
    Signing(String),

    /// Parameters could not be form-encoded
    #[error("Encode error: {0}")]
    Encode(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Token is not a three-segment JWT with a JSON payload
    #[error("Malformed token: {0}")]
    MalformedToken(String),
}

impl From<serde_urlencoded::ser::Error> for AuthError {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Self::Encode(err.to_string())
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
