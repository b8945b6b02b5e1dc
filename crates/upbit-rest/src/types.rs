//! Types for Upbit REST API requests and responses
//!
//! Numeric fields use [`Decimal`]. Quotation endpoints send JSON numbers and
//! exchange endpoints send decimal strings; both deserialize the same way.
//! Fields the exchange may omit or send as `null` are `Option`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use upbit_types::{OrderSide, OrderState, OrderType, PriceChange, TimeInForce, TradeSide};

// ============================================================================
// Market Data Types
// ============================================================================

/// Tradable market (`/market/all`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Market code, e.g. `KRW-BTC`
    pub market: String,
    pub korean_name: String,
    pub english_name: String,
    /// `NONE` or `CAUTION`; only with `is_details=true`
    #[serde(default)]
    pub market_warning: Option<String>,
    #[serde(default)]
    pub market_event: Option<MarketEvent>,
}

impl Market {
    /// Quote currency, e.g. `KRW` for `KRW-BTC`
    pub fn quote_currency(&self) -> &str {
        self.market.split('-').next().unwrap_or_default()
    }

    /// Base currency, e.g. `BTC` for `KRW-BTC`
    pub fn base_currency(&self) -> &str {
        self.market.split_once('-').map(|(_, b)| b).unwrap_or_default()
    }
}

/// Market warning flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketEvent {
    #[serde(default)]
    pub warning: bool,
    #[serde(default)]
    pub caution: Option<MarketCaution>,
}

/// Individual caution reasons
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct MarketCaution {
    pub price_fluctuations: bool,
    pub trading_volume_soaring: bool,
    pub deposit_amount_soaring: bool,
    pub global_price_differences: bool,
    pub concentration_of_small_accounts: bool,
}

impl MarketCaution {
    pub fn any(&self) -> bool {
        self.price_fluctuations
            || self.trading_volume_soaring
            || self.deposit_amount_soaring
            || self.global_price_differences
            || self.concentration_of_small_accounts
    }
}

/// Current price snapshot (`/ticker`, `/ticker/all`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub market: String,
    /// `yyyyMMdd` (UTC)
    pub trade_date: String,
    /// `HHmmss` (UTC)
    pub trade_time: String,
    pub trade_date_kst: String,
    pub trade_time_kst: String,
    pub trade_timestamp: i64,
    pub opening_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    pub trade_price: Decimal,
    pub prev_closing_price: Decimal,
    pub change: PriceChange,
    pub change_price: Decimal,
    pub change_rate: Decimal,
    pub signed_change_price: Decimal,
    pub signed_change_rate: Decimal,
    pub trade_volume: Decimal,
    pub acc_trade_price: Decimal,
    pub acc_trade_price_24h: Decimal,
    pub acc_trade_volume: Decimal,
    pub acc_trade_volume_24h: Decimal,
    pub highest_52_week_price: Decimal,
    pub highest_52_week_date: String,
    pub lowest_52_week_price: Decimal,
    pub lowest_52_week_date: String,
    pub timestamp: i64,
}

/// Order book snapshot (`/orderbook`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orderbook {
    pub market: String,
    pub timestamp: i64,
    pub total_ask_size: Decimal,
    pub total_bid_size: Decimal,
    /// Best price first
    pub orderbook_units: Vec<OrderbookUnit>,
    /// Price grouping unit, `0` when ungrouped
    #[serde(default)]
    pub level: Option<Decimal>,
}

impl Orderbook {
    /// Best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.orderbook_units.first().map(|u| u.ask_price)
    }

    /// Best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.orderbook_units.first().map(|u| u.bid_price)
    }

    /// Spread between best ask and best bid
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_ask(), self.best_bid()) {
            (Some(ask), Some(bid)) => Some(ask - bid),
            _ => None,
        }
    }
}

/// One ask/bid pair at the same depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderbookUnit {
    pub ask_price: Decimal,
    pub bid_price: Decimal,
    pub ask_size: Decimal,
    pub bid_size: Decimal,
}

/// Public trade (`/trades/ticks`), newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub market: String,
    pub trade_date_utc: String,
    pub trade_time_utc: String,
    pub timestamp: i64,
    pub trade_price: Decimal,
    pub trade_volume: Decimal,
    pub prev_closing_price: Decimal,
    pub change_price: Decimal,
    pub ask_bid: TradeSide,
    /// Unique per trade; pass as `cursor` to page backwards
    pub sequential_id: i64,
}

/// OHLCV candle
///
/// Minute candles carry `unit`; week and month candles carry
/// `first_day_of_period`; day candles carry the change fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub market: String,
    /// `yyyy-MM-ddTHH:mm:ss` (UTC)
    pub candle_date_time_utc: String,
    pub candle_date_time_kst: String,
    pub opening_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    pub trade_price: Decimal,
    /// Timestamp of the last trade in the candle
    pub timestamp: i64,
    pub candle_acc_trade_price: Decimal,
    pub candle_acc_trade_volume: Decimal,
    #[serde(default)]
    pub unit: Option<u32>,
    #[serde(default)]
    pub first_day_of_period: Option<String>,
    #[serde(default)]
    pub prev_closing_price: Option<Decimal>,
    #[serde(default)]
    pub change_price: Option<Decimal>,
    #[serde(default)]
    pub change_rate: Option<Decimal>,
    /// Close converted to `converting_price_unit`
    #[serde(default)]
    pub converted_trade_price: Option<Decimal>,
}

// ============================================================================
// Account Types
// ============================================================================

/// Balance of one currency (`/accounts`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub currency: String,
    /// Available balance
    pub balance: Decimal,
    /// Balance locked in open orders or withdrawals
    pub locked: Decimal,
    pub avg_buy_price: Decimal,
    pub avg_buy_price_modified: bool,
    pub unit_currency: String,
}

impl Account {
    /// Available plus locked
    pub fn total(&self) -> Decimal {
        self.balance + self.locked
    }
}

/// Deposit/withdraw service state of one network (`/status/wallet`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletStatus {
    pub currency: String,
    /// `working`, `withdraw_only`, `deposit_only`, `paused` or `unsupported`
    pub wallet_state: String,
    #[serde(default)]
    pub block_state: Option<String>,
    #[serde(default)]
    pub block_height: Option<i64>,
    #[serde(default)]
    pub block_updated_at: Option<String>,
    #[serde(default)]
    pub block_elapsed_minutes: Option<i64>,
    #[serde(default)]
    pub net_type: Option<String>,
    #[serde(default)]
    pub network_name: Option<String>,
}

/// API key and its expiry (`/api_keys`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    pub access_key: String,
    pub expire_at: String,
}

// ============================================================================
// Trading Types
// ============================================================================

/// Order as returned by list, place and cancel calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub uuid: String,
    pub side: OrderSide,
    pub ord_type: OrderType,
    #[serde(default)]
    pub price: Option<Decimal>,
    pub state: OrderState,
    pub market: String,
    pub created_at: String,
    #[serde(default)]
    pub volume: Option<Decimal>,
    #[serde(default)]
    pub remaining_volume: Option<Decimal>,
    pub reserved_fee: Decimal,
    pub remaining_fee: Decimal,
    pub paid_fee: Decimal,
    pub locked: Decimal,
    pub executed_volume: Decimal,
    pub trades_count: u32,
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
    #[serde(default)]
    pub identifier: Option<String>,
}

impl Order {
    /// Check if order is fully executed or cancelled
    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }
}

/// Single order with its fills (`/order`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    #[serde(default)]
    pub trades: Vec<OrderTrade>,
}

/// Fill belonging to an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTrade {
    pub market: String,
    pub uuid: String,
    pub price: Decimal,
    pub volume: Decimal,
    /// price * volume
    pub funds: Decimal,
    pub side: OrderSide,
    pub created_at: String,
    #[serde(default)]
    pub trend: Option<String>,
}

/// Fees, constraints and balances for ordering on a market (`/orders/chance`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderChance {
    pub bid_fee: Decimal,
    pub ask_fee: Decimal,
    #[serde(default)]
    pub maker_bid_fee: Option<Decimal>,
    #[serde(default)]
    pub maker_ask_fee: Option<Decimal>,
    #[serde(default)]
    pub market: Option<OrderChanceMarket>,
    #[serde(default)]
    pub bid_account: Option<Account>,
    #[serde(default)]
    pub ask_account: Option<Account>,
}

/// Market section of an order chance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderChanceMarket {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub order_types: Vec<String>,
    #[serde(default)]
    pub ask_types: Vec<String>,
    #[serde(default)]
    pub bid_types: Vec<String>,
    #[serde(default)]
    pub order_sides: Vec<String>,
    #[serde(default)]
    pub bid: Option<MarketConstraint>,
    #[serde(default)]
    pub ask: Option<MarketConstraint>,
    #[serde(default)]
    pub max_total: Option<Decimal>,
    pub state: String,
}

/// Per-side ordering constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConstraint {
    pub currency: String,
    #[serde(default)]
    pub price_unit: Option<Decimal>,
    pub min_total: Decimal,
}

// ============================================================================
// Funding Types
// ============================================================================

/// Withdrawal or deposit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    /// `withdraw` or `deposit`
    #[serde(rename = "type")]
    pub kind: String,
    pub uuid: String,
    pub currency: String,
    #[serde(default)]
    pub net_type: Option<String>,
    #[serde(default)]
    pub txid: Option<String>,
    pub state: String,
    pub created_at: String,
    #[serde(default)]
    pub done_at: Option<String>,
    pub amount: Decimal,
    pub fee: Decimal,
    /// `default` or `internal`
    #[serde(default)]
    pub transaction_type: Option<String>,
}

/// Withdrawal record (`/withdraws`, `/withdraw`, `/withdraws/{coin,krw}`)
pub type Withdraw = Transfer;

/// Deposit record (`/deposits`, `/deposit`)
pub type Deposit = Transfer;

/// Withdrawal constraints for a currency (`/withdraws/chance`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawChance {
    #[serde(default)]
    pub member_level: Option<MemberLevel>,
    #[serde(default)]
    pub currency: Option<WithdrawCurrency>,
    #[serde(default)]
    pub account: Option<Account>,
    #[serde(default)]
    pub withdraw_limit: Option<WithdrawLimit>,
}

/// Account verification and security level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberLevel {
    pub security_level: u32,
    pub fee_level: u32,
    pub email_verified: bool,
    pub identity_auth_verified: bool,
    pub bank_account_verified: bool,
    pub kakao_pay_auth_verified: bool,
    pub locked: bool,
    pub wallet_locked: bool,
}

/// Currency section of a withdraw chance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawCurrency {
    pub code: String,
    pub withdraw_fee: Decimal,
    pub is_coin: bool,
    pub wallet_state: String,
    #[serde(default)]
    pub wallet_support: Vec<String>,
}

/// Withdrawal limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawLimit {
    pub currency: String,
    #[serde(default)]
    pub minimum: Option<Decimal>,
    #[serde(default)]
    pub onetime: Option<Decimal>,
    #[serde(default)]
    pub daily: Option<Decimal>,
    #[serde(default)]
    pub remaining_daily: Option<Decimal>,
    #[serde(default)]
    pub remaining_daily_krw: Option<Decimal>,
    /// Decimal places allowed in the amount
    #[serde(default)]
    pub fixed: Option<u32>,
    #[serde(default)]
    pub can_withdraw: bool,
}

/// Deposit address for one currency and network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositAddress {
    pub currency: String,
    #[serde(default)]
    pub net_type: Option<String>,
    /// `None` while the address is still being generated
    #[serde(default)]
    pub deposit_address: Option<String>,
    /// Destination tag or memo, for currencies that use one
    #[serde(default)]
    pub secondary_address: Option<String>,
}

/// Result of `/deposits/generate_coin_address`
///
/// The first request for a currency only starts generation; the address is
/// returned once it exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneratedAddress {
    Pending { success: bool, message: String },
    Ready(DepositAddress),
}

impl GeneratedAddress {
    /// The address, if generation has finished
    pub fn address(&self) -> Option<&DepositAddress> {
        match self {
            Self::Ready(address) => Some(address),
            Self::Pending { .. } => None,
        }
    }
}
