//! Upbit API error names with recovery hints
//!
//! The exchange reports failures as `{"error": {"name": ..., "message": ...}}`.
//! Known names map to a [`UpbitErrorCode`] variant; anything else is kept
//! verbatim in [`UpbitErrorCode::Other`] so new names never break parsing.
//!
//! Recovery strategies are hints for the caller. Nothing in this workspace
//! retries on its own.

use std::time::Duration;

/// Recovery strategy for handling API errors
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecoveryStrategy {
    /// Exponential backoff before retry
    Backoff {
        initial_ms: u64,
        max_ms: u64,
        multiplier: u32,
    },
    /// Fixed delay retry
    Retry { delay_ms: u64, max_attempts: u32 },
    /// Credentials or token rejected - fix the key pair or the clock
    Reauthenticate,
    /// Cannot recover programmatically
    Fatal,
    /// Requires user intervention (e.g., add funds)
    UserAction { message: &'static str },
    /// The request itself is wrong; drop it
    Skip,
    /// Manual investigation needed
    #[default]
    Manual,
}

impl RecoveryStrategy {
    /// Default exponential backoff for rate limits
    pub fn rate_limit_backoff() -> Self {
        Self::Backoff {
            initial_ms: 1000,
            max_ms: 60000,
            multiplier: 2,
        }
    }

    /// Default retry for transient server errors
    pub fn service_retry() -> Self {
        Self::Retry {
            delay_ms: 5000,
            max_attempts: 3,
        }
    }

    /// Get the initial delay duration
    pub fn initial_delay(&self) -> Option<Duration> {
        match self {
            Self::Backoff { initial_ms, .. } => Some(Duration::from_millis(*initial_ms)),
            Self::Retry { delay_ms, .. } => Some(Duration::from_millis(*delay_ms)),
            _ => None,
        }
    }

    /// Check if this strategy allows retry
    pub fn allows_retry(&self) -> bool {
        matches!(self, Self::Backoff { .. } | Self::Retry { .. })
    }
}

/// Error names returned by the Upbit API
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpbitErrorCode {
    // === Authentication ===
    /// unauthorized
    Unauthorized,
    /// jwt_verification_fail
    JwtVerificationFailed,
    /// expired_access_key
    ExpiredAccessKey,
    /// nonce_used
    NonceUsed,
    /// no_authorization_ip
    NoAuthorizationIp,
    /// out_of_scope
    OutOfScope,

    // === Request validation ===
    /// invalid_parameter
    InvalidParameter,
    /// invalid_query
    InvalidQuery,
    /// invalid_volume
    InvalidVolume,
    /// invalid_price
    InvalidPrice,
    /// invalid_market
    InvalidMarket,

    // === Rate limiting ===
    /// too_many_requests
    TooManyRequests,

    // === Orders ===
    /// order_not_found
    OrderNotFound,
    /// insufficient_funds
    InsufficientFunds,
    /// under_min_total_bid
    UnderMinTotalBid,
    /// under_min_total_ask
    UnderMinTotalAsk,
    /// widgetmaker_only_order
    WidgetMakerOnlyOrder,
    /// market_order_disabled
    MarketOrderDisabled,
    /// order_cancelled
    OrderCancelled,
    /// order_executed
    OrderExecuted,

    // === Server ===
    /// server_error
    ServerError,
    /// internal_server_error
    InternalServerError,
    /// unknown
    Unknown,

    /// Any name this crate does not know yet, kept verbatim
    Other(String),
}

impl UpbitErrorCode {
    /// Map an error name from the API to a code
    pub fn from_name(name: &str) -> Self {
        match name {
            "unauthorized" => Self::Unauthorized,
            "jwt_verification_fail" => Self::JwtVerificationFailed,
            "expired_access_key" => Self::ExpiredAccessKey,
            "nonce_used" => Self::NonceUsed,
            "no_authorization_ip" => Self::NoAuthorizationIp,
            "out_of_scope" => Self::OutOfScope,
            "invalid_parameter" => Self::InvalidParameter,
            "invalid_query" => Self::InvalidQuery,
            "invalid_volume" => Self::InvalidVolume,
            "invalid_price" => Self::InvalidPrice,
            "invalid_market" => Self::InvalidMarket,
            "too_many_requests" => Self::TooManyRequests,
            "order_not_found" => Self::OrderNotFound,
            "insufficient_funds" => Self::InsufficientFunds,
            "under_min_total_bid" => Self::UnderMinTotalBid,
            "under_min_total_ask" => Self::UnderMinTotalAsk,
            "widgetmaker_only_order" => Self::WidgetMakerOnlyOrder,
            "market_order_disabled" => Self::MarketOrderDisabled,
            "order_cancelled" => Self::OrderCancelled,
            "order_executed" => Self::OrderExecuted,
            "server_error" => Self::ServerError,
            "internal_server_error" => Self::InternalServerError,
            "unknown" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }

    /// The error name exactly as the API sent it
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::JwtVerificationFailed => "jwt_verification_fail",
            Self::ExpiredAccessKey => "expired_access_key",
            Self::NonceUsed => "nonce_used",
            Self::NoAuthorizationIp => "no_authorization_ip",
            Self::OutOfScope => "out_of_scope",
            Self::InvalidParameter => "invalid_parameter",
            Self::InvalidQuery => "invalid_query",
            Self::InvalidVolume => "invalid_volume",
            Self::InvalidPrice => "invalid_price",
            Self::InvalidMarket => "invalid_market",
            Self::TooManyRequests => "too_many_requests",
            Self::OrderNotFound => "order_not_found",
            Self::InsufficientFunds => "insufficient_funds",
            Self::UnderMinTotalBid => "under_min_total_bid",
            Self::UnderMinTotalAsk => "under_min_total_ask",
            Self::WidgetMakerOnlyOrder => "widgetmaker_only_order",
            Self::MarketOrderDisabled => "market_order_disabled",
            Self::OrderCancelled => "order_cancelled",
            Self::OrderExecuted => "order_executed",
            Self::ServerError => "server_error",
            Self::InternalServerError => "internal_server_error",
            Self::Unknown => "unknown",
            Self::Other(name) => name.as_str(),
        }
    }

    /// Returns true if this name is one of the documented ones
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Get the recovery strategy for this error code
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            Self::TooManyRequests => RecoveryStrategy::rate_limit_backoff(),

            // A fresh token carries a fresh nonce
            Self::NonceUsed => RecoveryStrategy::Retry {
                delay_ms: 0,
                max_attempts: 1,
            },

            Self::Unauthorized | Self::JwtVerificationFailed => RecoveryStrategy::Reauthenticate,
            Self::ExpiredAccessKey => RecoveryStrategy::UserAction {
                message: "Access key expired - issue a new key pair",
            },
            Self::NoAuthorizationIp => RecoveryStrategy::UserAction {
                message: "Request IP is not registered for this access key",
            },
            Self::OutOfScope => RecoveryStrategy::Fatal,

            Self::ServerError | Self::InternalServerError => RecoveryStrategy::service_retry(),

            Self::InsufficientFunds => RecoveryStrategy::UserAction {
                message: "Insufficient funds - deposit more or reduce order size",
            },
            Self::UnderMinTotalBid | Self::UnderMinTotalAsk => RecoveryStrategy::UserAction {
                message: "Order total below market minimum - increase quantity",
            },
            Self::MarketOrderDisabled => RecoveryStrategy::UserAction {
                message: "Market orders are disabled for this market - use a limit order",
            },

            Self::InvalidParameter
            | Self::InvalidQuery
            | Self::InvalidVolume
            | Self::InvalidPrice
            | Self::InvalidMarket
            | Self::WidgetMakerOnlyOrder => RecoveryStrategy::Skip,
            Self::OrderNotFound | Self::OrderCancelled | Self::OrderExecuted => {
                RecoveryStrategy::Skip
            }

            Self::Unknown | Self::Other(_) => RecoveryStrategy::Manual,
        }
    }

    /// Get a human-readable description of this error
    pub fn description(&self) -> &'static str {
        match self {
            Self::Unauthorized => "Request is not authorized",
            Self::JwtVerificationFailed => "JWT signature could not be verified",
            Self::ExpiredAccessKey => "Access key has expired",
            Self::NonceUsed => "Nonce was already used",
            Self::NoAuthorizationIp => "IP address is not allowed for this key",
            Self::OutOfScope => "Access key lacks permission for this endpoint",
            Self::InvalidParameter => "Invalid request parameter",
            Self::InvalidQuery => "Query does not match the signed query hash",
            Self::InvalidVolume => "Invalid order volume",
            Self::InvalidPrice => "Invalid order price",
            Self::InvalidMarket => "Unknown market",
            Self::TooManyRequests => "Too many requests",
            Self::OrderNotFound => "Order not found",
            Self::InsufficientFunds => "Insufficient funds",
            Self::UnderMinTotalBid => "Bid total below market minimum",
            Self::UnderMinTotalAsk => "Ask total below market minimum",
            Self::WidgetMakerOnlyOrder => "Order type reserved for widget makers",
            Self::MarketOrderDisabled => "Market orders are disabled",
            Self::OrderCancelled => "Order was already cancelled",
            Self::OrderExecuted => "Order was already executed",
            Self::ServerError => "Server error",
            Self::InternalServerError => "Internal server error",
            Self::Unknown => "Unknown error",
            Self::Other(_) => "Unrecognized error name",
        }
    }

    /// Check if this is an authentication-related error
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized
                | Self::JwtVerificationFailed
                | Self::ExpiredAccessKey
                | Self::NonceUsed
                | Self::NoAuthorizationIp
                | Self::OutOfScope
        )
    }

    /// Check if this is a rate limit error
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::TooManyRequests)
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        self.recovery_strategy().allows_retry()
    }
}

impl From<&str> for UpbitErrorCode {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl std::fmt::Display for UpbitErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
