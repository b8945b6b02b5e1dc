//! REST API client for the Upbit cryptocurrency exchange
//!
//! This crate provides a typed client for Upbit's REST API, covering both
//! the public quotation endpoints and the authenticated exchange endpoints.
//!
//! # Features
//!
//! - **Market Data**: Markets, tickers, order books, trades, candles
//! - **Account**: Balances, wallet status, API keys
//! - **Trading**: Order chance, place, query and cancel orders
//! - **Funding**: Withdrawals, deposits, deposit addresses
//!
//! # Authentication
//!
//! Private endpoints carry a per-request HS256 JWT. When a request has
//! parameters, the token binds a SHA-512 hash of the exact query string or
//! form body that is sent.
//!
//! # Example
//!
//! ```no_run
//! use upbit_rest::{CandleRequest, Credentials, UpbitRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = UpbitRestClient::new()?;
//!     let candles = client
//!         .market()
//!         .get_day_candles(&CandleRequest::new("KRW-BTC").count(30))
//!         .await?;
//!     println!("First close: {:?}", candles.first().map(|c| c.trade_price));
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = UpbitRestClient::with_credentials(creds)?;
//!     let accounts = auth_client.get_accounts().await?;
//!     println!("Accounts: {:?}", accounts);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Candle Ordering
//!
//! The exchange returns candles newest first. All candle methods reverse
//! them so the returned list is oldest first. Other lists are returned in
//! server order.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod executor;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, UpbitRestClient, DEFAULT_BASE_URL};
pub use error::{RestError, RestResult};
pub use executor::{Method, RequestDescriptor, RequestExecutor};
pub use upbit_auth::{Credentials, QueryParams};

// Re-export endpoint-specific types
pub use endpoints::{
    CandleRequest, ClosedOrdersRequest, GetOrdersRequest, OrderId, PlaceOrderRequest,
    TradesRequest, TransferListRequest, WithdrawCoinRequest,
};
pub use types::{
    // Market data
    Candle, Market, MarketCaution, MarketEvent, Orderbook, OrderbookUnit, Ticker, Trade,
    // Account
    Account, ApiKey, WalletStatus,
    // Trading
    Order, OrderChance, OrderChanceMarket, OrderDetail, OrderTrade, MarketConstraint,
    // Funding
    Deposit, DepositAddress, GeneratedAddress, MemberLevel, Transfer, Withdraw, WithdrawChance,
    WithdrawCurrency, WithdrawLimit,
};
pub use upbit_types::{
    CandleUnit, OrderBy, OrderSide, OrderState, OrderType, PriceChange, RecoveryStrategy,
    TimeInForce, TradeSide, UpbitErrorCode,
};
