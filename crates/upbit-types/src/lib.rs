//! Shared types for the Upbit REST API
//!
//! This crate holds the wire-level vocabulary used across the workspace.
//! It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`OrderSide`], [`OrderType`], [`OrderState`], [`TimeInForce`] - Order enums
//! - [`CandleUnit`] - Minute candle granularity
//! - [`PriceChange`], [`TradeSide`], [`OrderBy`] - Quotation and list enums
//! - [`UpbitErrorCode`], [`RecoveryStrategy`] - API error names with recovery hints

pub mod enums;
pub mod error;
pub mod error_codes;

// Re-export commonly used types
pub use enums::*;
pub use error::*;
pub use error_codes::*;
