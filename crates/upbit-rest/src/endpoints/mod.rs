//! API endpoint implementations

pub mod market;
pub mod account;
pub mod trading;
pub mod funding;

pub use market::{CandleRequest, MarketEndpoints, TradesRequest};
pub use account::AccountEndpoints;
pub use trading::{
    ClosedOrdersRequest, GetOrdersRequest, OrderId, PlaceOrderRequest, TradingEndpoints,
};
pub use funding::{FundingEndpoints, TransferListRequest, WithdrawCoinRequest};
