//! Order side, order type, order state and the other closed wire enumerations
//!
//! Every enum keeps an explicit mapping to the literal the exchange sends and
//! expects, so `as_str`, `Display`, `FromStr` and serde all agree.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ParseEnumError;

/// Implements `Display` and `FromStr` on top of an enum's `as_str` and `ALL`.
macro_rules! wire_str {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = ParseEnumError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Self::ALL
                        .iter()
                        .copied()
                        .find(|v| v.as_str() == s)
                        .ok_or_else(|| ParseEnumError::new(stringify!($ty), s))
                }
            }
        )+
    };
}

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy
    Bid,
    /// Sell
    Ask,
}

impl OrderSide {
    pub const ALL: [Self; 2] = [Self::Bid, Self::Ask];

    /// Returns the side as used in API requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bid => "bid",
            Self::Ask => "ask",
        }
    }

    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Bid => Self::Ask,
            Self::Ask => Self::Bid,
        }
    }
}

/// Order type
///
/// Upbit distinguishes market buys (`price`, spend a fixed quote amount) from
/// market sells (`market`, sell a fixed base volume).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Limit order
    Limit,
    /// Market buy by total price
    Price,
    /// Market sell by volume
    Market,
    /// Best-price order (requires a time in force)
    Best,
}

impl OrderType {
    pub const ALL: [Self; 4] = [Self::Limit, Self::Price, Self::Market, Self::Best];

    /// Returns the order type as used in API requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "limit",
            Self::Price => "price",
            Self::Market => "market",
            Self::Best => "best",
        }
    }

    /// Returns true if this type can be placed on `side`
    ///
    /// `price` orders only buy and `market` orders only sell.
    pub fn supports_side(&self, side: OrderSide) -> bool {
        match self {
            Self::Limit | Self::Best => true,
            Self::Price => side == OrderSide::Bid,
            Self::Market => side == OrderSide::Ask,
        }
    }

    /// Returns true if an order of this type on `side` needs a `price`
    ///
    /// For `price` and best bids, `price` is the quote amount to spend.
    pub fn requires_price(&self, side: OrderSide) -> bool {
        match self {
            Self::Limit | Self::Price => true,
            Self::Market => false,
            Self::Best => side == OrderSide::Bid,
        }
    }

    /// Returns true if an order of this type on `side` needs a `volume`
    pub fn requires_volume(&self, side: OrderSide) -> bool {
        match self {
            Self::Limit | Self::Market => true,
            Self::Price => false,
            Self::Best => side == OrderSide::Ask,
        }
    }
}

/// Order lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    /// Open, waiting to be filled
    Wait,
    /// Reserved (stop) order, not yet triggered
    Watch,
    /// Fully filled
    Done,
    /// Cancelled
    Cancel,
}

impl OrderState {
    pub const ALL: [Self; 4] = [Self::Wait, Self::Watch, Self::Done, Self::Cancel];

    /// Returns the state as used in API requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wait => "wait",
            Self::Watch => "watch",
            Self::Done => "done",
            Self::Cancel => "cancel",
        }
    }

    /// Returns true if the order can no longer change
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Done | Self::Cancel)
    }
}

/// Time in force for limit and best orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeInForce {
    /// Immediate or cancel
    Ioc,
    /// Fill or kill
    Fok,
}

impl TimeInForce {
    pub const ALL: [Self; 2] = [Self::Ioc, Self::Fok];

    /// Returns the time in force as used in API requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ioc => "ioc",
            Self::Fok => "fok",
        }
    }
}

/// Sort order for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    /// Oldest first
    Asc,
    /// Newest first
    #[default]
    Desc,
}

impl OrderBy {
    pub const ALL: [Self; 2] = [Self::Asc, Self::Desc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Price change direction relative to the previous close
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriceChange {
    /// Price went up
    Rise,
    /// Unchanged
    Even,
    /// Price went down
    Fall,
}

impl PriceChange {
    pub const ALL: [Self; 3] = [Self::Rise, Self::Even, Self::Fall];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rise => "RISE",
            Self::Even => "EVEN",
            Self::Fall => "FALL",
        }
    }
}

/// Aggressor side of a public trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    /// Seller was the taker
    Ask,
    /// Buyer was the taker
    Bid,
}

impl TradeSide {
    pub const ALL: [Self; 2] = [Self::Ask, Self::Bid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ask => "ASK",
            Self::Bid => "BID",
        }
    }
}

wire_str!(OrderSide, OrderType, OrderState, TimeInForce, OrderBy, PriceChange, TradeSide);

/// Minute candle unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CandleUnit {
    #[default]
    M1 = 1,
    M3 = 3,
    M5 = 5,
    M10 = 10,
    M15 = 15,
    M30 = 30,
    M60 = 60,
    M240 = 240,
}

impl CandleUnit {
    pub const ALL: [Self; 8] = [
        Self::M1,
        Self::M3,
        Self::M5,
        Self::M10,
        Self::M15,
        Self::M30,
        Self::M60,
        Self::M240,
    ];

    /// Returns the unit in minutes
    pub fn as_u32(&self) -> u32 {
        *self as u32
    }

    /// Look up a unit by its length in minutes
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|u| u.as_u32() == minutes)
    }
}

impl std::fmt::Display for CandleUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}
