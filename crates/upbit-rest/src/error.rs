//! Error types for REST API operations

use serde::Deserialize;
use upbit_auth::AuthError;
use upbit_types::error_codes::{RecoveryStrategy, UpbitErrorCode};

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Request timed out
    ///
    /// The exchange may or may not have processed the request.
    #[error("Request timed out")]
    Timeout,

    /// Error status whose body is not an Upbit error envelope
    #[error("Unexpected response (HTTP {status}): {body}")]
    UnexpectedResponse { status: u16, body: String },

    /// Success body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Base URL and path did not form a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// API returned an error envelope
    #[error("API error {code} (HTTP {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Parsed error name
        code: UpbitErrorCode,
        /// Original error message from API
        message: String,
    },

    /// Token signing failed; nothing was sent
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    name: String,
    #[serde(default)]
    message: String,
}

impl RestError {
    /// Build an error from a status >= 400 and its raw body
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(envelope) => Self::Api {
                status,
                code: UpbitErrorCode::from_name(&envelope.error.name),
                message: envelope.error.message,
            },
            Err(_) => Self::UnexpectedResponse {
                status,
                body: String::from_utf8_lossy(body).into_owned(),
            },
        }
    }

    /// Returns true if the exchange answered with an error envelope
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Returns true if the failure happened below the API layer
    ///
    /// Includes success bodies that could not be decoded.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Timeout | Self::UnexpectedResponse { .. } | Self::Decode(_)
        )
    }

    /// Error name exactly as the exchange sent it
    pub fn api_error_name(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }

    /// HTTP status, when a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::UnexpectedResponse { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get the recovery strategy for this error
    ///
    /// A hint only. The client never retries on its own.
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            Self::Api { code, .. } => code.recovery_strategy(),
            Self::UnexpectedResponse { status: 429, .. } => RecoveryStrategy::rate_limit_backoff(),
            Self::UnexpectedResponse { status, .. } if *status >= 500 => {
                RecoveryStrategy::service_retry()
            }
            Self::Timeout | Self::Http(_) => RecoveryStrategy::Retry {
                max_attempts: 3,
                delay_ms: 1000,
            },
            Self::UnexpectedResponse { .. } | Self::Decode(_) | Self::InvalidUrl(_) => {
                RecoveryStrategy::Manual
            }
            Self::Auth(_) | Self::InvalidParameter(_) => RecoveryStrategy::Fatal,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        self.recovery_strategy().allows_retry()
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::Api { code, status, .. } => code.is_rate_limit() || *status == 429,
            Self::UnexpectedResponse { status, .. } => *status == 429,
            _ => false,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
