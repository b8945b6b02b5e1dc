//! Trading endpoints for order management
//!
//! These endpoints require authentication.

use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};
use upbit_auth::QueryParams;
use upbit_types::{OrderBy, OrderSide, OrderState, OrderType, TimeInForce};

use crate::error::{RestError, RestResult};
use crate::executor::RequestExecutor;
use crate::types::{Order, OrderChance, OrderDetail};

/// How to address a single order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderId {
    /// Exchange-assigned UUID
    Uuid(String),
    /// Caller-assigned identifier given at placement
    Identifier(String),
}

impl OrderId {
    pub fn uuid(uuid: impl Into<String>) -> Self {
        Self::Uuid(uuid.into())
    }

    pub fn identifier(identifier: impl Into<String>) -> Self {
        Self::Identifier(identifier.into())
    }

    fn to_params(&self) -> QueryParams {
        match self {
            Self::Uuid(uuid) => QueryParams::new().with("uuid", uuid),
            Self::Identifier(id) => QueryParams::new().with("identifier", id),
        }
    }
}

/// New order parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceOrderRequest {
    pub market: String,
    pub side: OrderSide,
    pub ord_type: OrderType,
    /// Base quantity (limit, market sell, best sell)
    pub volume: Option<Decimal>,
    /// Limit price, or quote amount to spend for market/best buys
    pub price: Option<Decimal>,
    /// Caller-assigned identifier, unique per account
    pub identifier: Option<String>,
    pub time_in_force: Option<TimeInForce>,
}

impl PlaceOrderRequest {
    fn base(market: impl Into<String>, side: OrderSide, ord_type: OrderType) -> Self {
        Self {
            market: market.into(),
            side,
            ord_type,
            volume: None,
            price: None,
            identifier: None,
            time_in_force: None,
        }
    }

    /// Create a limit order
    pub fn limit(market: impl Into<String>, side: OrderSide, volume: Decimal, price: Decimal) -> Self {
        Self {
            volume: Some(volume),
            price: Some(price),
            ..Self::base(market, side, OrderType::Limit)
        }
    }

    /// Market buy spending `total` of the quote currency
    pub fn market_buy(market: impl Into<String>, total: Decimal) -> Self {
        Self {
            price: Some(total),
            ..Self::base(market, OrderSide::Bid, OrderType::Price)
        }
    }

    /// Market sell of `volume` base currency
    pub fn market_sell(market: impl Into<String>, volume: Decimal) -> Self {
        Self {
            volume: Some(volume),
            ..Self::base(market, OrderSide::Ask, OrderType::Market)
        }
    }

    /// Best-price buy spending `total`
    pub fn best_buy(market: impl Into<String>, total: Decimal, time_in_force: TimeInForce) -> Self {
        Self {
            price: Some(total),
            time_in_force: Some(time_in_force),
            ..Self::base(market, OrderSide::Bid, OrderType::Best)
        }
    }

    /// Best-price sell of `volume`
    pub fn best_sell(market: impl Into<String>, volume: Decimal, time_in_force: TimeInForce) -> Self {
        Self {
            volume: Some(volume),
            time_in_force: Some(time_in_force),
            ..Self::base(market, OrderSide::Ask, OrderType::Best)
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = Some(time_in_force);
        self
    }

    /// Check the price/volume combination for the order type
    pub fn validate(&self) -> RestResult<()> {
        if self.market.is_empty() {
            return Err(invalid("market is required"));
        }

        if !self.ord_type.supports_side(self.side) {
            return Err(RestError::InvalidParameter(format!(
                "{} orders cannot be placed on the {} side",
                self.ord_type, self.side
            )));
        }
        if self.ord_type == OrderType::Best && self.time_in_force.is_none() {
            return Err(invalid("best orders require a time in force"));
        }

        let needs_price = self.ord_type.requires_price(self.side);
        let needs_volume = self.ord_type.requires_volume(self.side);
        check_amount("price", self.price, needs_price)?;
        check_amount("volume", self.volume, needs_volume)?;
        Ok(())
    }

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .set("market", &self.market)
            .set("side", self.side)
            .set("ord_type", self.ord_type)
            .set_opt("volume", self.volume)
            .set_opt("price", self.price)
            .set_opt("identifier", self.identifier.as_deref())
            .set_opt("time_in_force", self.time_in_force);
        params
    }
}

fn invalid(message: &str) -> RestError {
    RestError::InvalidParameter(message.to_string())
}

fn check_amount(name: &str, value: Option<Decimal>, required: bool) -> RestResult<()> {
    match (value, required) {
        (Some(v), true) if v <= Decimal::ZERO => Err(RestError::InvalidParameter(format!(
            "{} must be positive, got {}",
            name, v
        ))),
        (None, true) => Err(RestError::InvalidParameter(format!("{} is required", name))),
        (Some(_), false) => Err(RestError::InvalidParameter(format!(
            "{} is not allowed for this order type",
            name
        ))),
        _ => Ok(()),
    }
}

/// Filters for `/orders`
#[derive(Debug, Clone, Default)]
pub struct GetOrdersRequest {
    pub market: Option<String>,
    pub uuids: Vec<String>,
    pub identifiers: Vec<String>,
    pub state: Option<OrderState>,
    pub states: Vec<OrderState>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub order_by: Option<OrderBy>,
}

impl GetOrdersRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    pub fn uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuids.push(uuid.into());
        self
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifiers.push(identifier.into());
        self
    }

    pub fn state(mut self, state: OrderState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn states(mut self, states: impl IntoIterator<Item = OrderState>) -> Self {
        self.states.extend(states);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .set_opt("market", self.market.as_deref())
            .add_all("uuids[]", &self.uuids)
            .add_all("identifiers[]", &self.identifiers)
            .set_opt("state", self.state)
            .add_all("states[]", &self.states)
            .set_opt("page", self.page)
            .set_opt("limit", self.limit)
            .set_opt("order_by", self.order_by);
        params
    }
}

/// Filters for `/orders/closed`
#[derive(Debug, Clone, Default)]
pub struct ClosedOrdersRequest {
    pub market: Option<String>,
    /// `done` and/or `cancel`
    pub states: Vec<OrderState>,
    /// ISO 8601
    pub start_time: Option<String>,
    /// ISO 8601
    pub end_time: Option<String>,
    pub limit: Option<u32>,
    pub order_by: Option<OrderBy>,
}

impl ClosedOrdersRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    pub fn states(mut self, states: impl IntoIterator<Item = OrderState>) -> Self {
        self.states.extend(states);
        self
    }

    pub fn start_time(mut self, start_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    pub fn end_time(mut self, end_time: impl Into<String>) -> Self {
        self.end_time = Some(end_time.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .set_opt("market", self.market.as_deref())
            .add_all("states[]", &self.states)
            .set_opt("start_time", self.start_time.as_deref())
            .set_opt("end_time", self.end_time.as_deref())
            .set_opt("limit", self.limit)
            .set_opt("order_by", self.order_by);
        params
    }
}

/// Trading endpoints for order management
pub struct TradingEndpoints<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    /// Get fees, limits and balances for ordering on `market`
    #[instrument(skip(self))]
    pub async fn get_order_chance(&self, market: &str) -> RestResult<OrderChance> {
        debug!("Fetching order chance");
        let params = QueryParams::new().with("market", market);
        self.executor.get("/orders/chance", params, true).await
    }

    /// Get a single order with its fills
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: &OrderId) -> RestResult<OrderDetail> {
        debug!("Fetching order");
        self.executor.get("/order", id.to_params(), true).await
    }

    /// List orders matching `request`
    #[instrument(skip(self, request))]
    pub async fn get_orders(&self, request: &GetOrdersRequest) -> RestResult<Vec<Order>> {
        debug!(market = ?request.market, "Fetching orders");
        self.executor.get("/orders", request.to_params(), true).await
    }

    /// List done and cancelled orders
    #[instrument(skip(self, request))]
    pub async fn get_closed_orders(&self, request: &ClosedOrdersRequest) -> RestResult<Vec<Order>> {
        debug!(market = ?request.market, "Fetching closed orders");
        self.executor
            .get("/orders/closed", request.to_params(), true)
            .await
    }

    /// Place a new order
    ///
    /// The request is validated before anything is sent.
    #[instrument(skip(self, order), fields(market = %order.market, side = %order.side, ord_type = %order.ord_type))]
    pub async fn place_order(&self, order: &PlaceOrderRequest) -> RestResult<Order> {
        order.validate()?;

        debug!(
            volume = ?order.volume,
            price = ?order.price,
            "Placing order"
        );

        let result: RestResult<Order> = self.executor.post("/orders", order.to_params(), true).await;

        match &result {
            Ok(placed) => debug!(uuid = %placed.uuid, "Order placed"),
            Err(e) => warn!("Order placement failed: {}", e),
        }

        result
    }

    /// Cancel an order
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: &OrderId) -> RestResult<Order> {
        debug!("Cancelling order");
        self.executor.delete("/order", id.to_params(), true).await
    }
}
