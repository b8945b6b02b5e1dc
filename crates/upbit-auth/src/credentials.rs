//! API credentials for Upbit's exchange endpoints
//!
//! # Security
//!
//! The secret key is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`
//!
//! The secret only ever keys the token MAC. It is never sent to the server.

use secrecy::{ExposeSecret, SecretString};

use crate::error::{AuthError, AuthResult};

/// Environment variable holding the access key
pub const ACCESS_KEY_ENV: &str = "UPBIT_ACCESS_KEY";
/// Environment variable holding the secret key
pub const SECRET_KEY_ENV: &str = "UPBIT_SECRET_KEY";

/// Access/secret key pair
///
/// Empty keys are accepted: a client built with them can still call the
/// public quotation endpoints, and signing still produces a well-formed token.
pub struct Credentials {
    /// Access key (public, sent inside every token)
    access_key: String,
    /// Secret key (zeroized on drop)
    secret_key: SecretString,
}

impl Credentials {
    /// Create credentials from an access key and a secret key
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: SecretString::from(secret_key.into()),
        }
    }

    /// Credentials with empty keys, for public-only usage
    pub fn empty() -> Self {
        Self::new("", "")
    }

    /// Create credentials from environment variables
    ///
    /// Reads `UPBIT_ACCESS_KEY` and `UPBIT_SECRET_KEY` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let access_key = std::env::var(ACCESS_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(ACCESS_KEY_ENV.to_string()))?;
        let secret_key = std::env::var(SECRET_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(SECRET_KEY_ENV.to_string()))?;

        Ok(Self::new(access_key, secret_key))
    }

    /// Get the access key
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Returns true if an access key is configured
    pub fn is_configured(&self) -> bool {
        !self.access_key.is_empty()
    }

    pub(crate) fn secret_bytes(&self) -> &[u8] {
        self.secret_key.expose_secret().as_bytes()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::empty()
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            access_key: self.access_key.clone(),
            secret_key: SecretString::from(self.secret_key.expose_secret().to_owned()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.access_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("access_key", &format!("{}...", prefix))
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("access-key-123456", "super-secret-value");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("super-secret-value"));
        assert!(!debug.contains("access-key-123456"));
        assert!(debug.contains("access-k..."));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_empty_credentials() {
        let creds = Credentials::empty();
        assert_eq!(creds.access_key(), "");
        assert!(!creds.is_configured());
        assert!(creds.secret_bytes().is_empty());
        assert!(format!("{:?}", creds).contains("[REDACTED]"));
    }

    #[test]
    fn test_clone_keeps_secret() {
        let creds = Credentials::new("ak", "sk");
        let cloned = creds.clone();
        assert_eq!(cloned.access_key(), "ak");
        assert_eq!(cloned.secret_bytes(), b"sk");
    }
}
