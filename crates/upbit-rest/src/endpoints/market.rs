//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use rust_decimal::Decimal;
use tracing::{debug, instrument};
use upbit_auth::QueryParams;
use upbit_types::CandleUnit;

use crate::error::{RestError, RestResult};
use crate::executor::RequestExecutor;
use crate::types::{Candle, Market, Orderbook, Ticker, Trade};

/// Parameters for `/trades/ticks`
#[derive(Debug, Clone, Default)]
pub struct TradesRequest {
    pub market: String,
    /// Last trade time, `HHmmss` or `HH:mm:ss` (UTC)
    pub to: Option<String>,
    pub count: Option<u32>,
    /// `sequential_id` to page from
    pub cursor: Option<String>,
    /// 1 to 7 days back
    pub days_ago: Option<u32>,
}

impl TradesRequest {
    pub fn new(market: impl Into<String>) -> Self {
        Self {
            market: market.into(),
            ..Default::default()
        }
    }

    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn days_ago(mut self, days_ago: u32) -> Self {
        self.days_ago = Some(days_ago);
        self
    }

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .set("market", &self.market)
            .set_opt("to", self.to.as_deref())
            .set_opt("count", self.count)
            .set_opt("cursor", self.cursor.as_deref())
            .set_opt("days_ago", self.days_ago);
        params
    }
}

/// Parameters shared by the candle endpoints
#[derive(Debug, Clone, Default)]
pub struct CandleRequest {
    pub market: String,
    /// Last candle time (exclusive), ISO 8601
    pub to: Option<String>,
    /// Up to 200
    pub count: Option<u32>,
    /// Day candles only: quote currency to convert the close into
    pub converting_price_unit: Option<String>,
}

impl CandleRequest {
    pub fn new(market: impl Into<String>) -> Self {
        Self {
            market: market.into(),
            ..Default::default()
        }
    }

    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn converting_price_unit(mut self, unit: impl Into<String>) -> Self {
        self.converting_price_unit = Some(unit.into());
        self
    }

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .set("market", &self.market)
            .set_opt("to", self.to.as_deref())
            .set_opt("count", self.count);
        params
    }
}

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    /// List all markets
    ///
    /// # Arguments
    /// * `is_details` - Include warning and caution flags
    #[instrument(skip(self))]
    pub async fn get_markets(&self, is_details: bool) -> RestResult<Vec<Market>> {
        let mut params = QueryParams::new();
        if is_details {
            params.set("is_details", true);
        }

        debug!("Fetching market list");
        self.executor.get("/market/all", params, false).await
    }

    /// Get tickers for the given markets
    ///
    /// # Arguments
    /// * `markets` - Market codes (e.g., ["KRW-BTC", "KRW-ETH"])
    #[instrument(skip(self))]
    pub async fn get_ticker(&self, markets: &[&str]) -> RestResult<Vec<Ticker>> {
        let params = QueryParams::new().with("markets", join_markets(markets)?);

        debug!("Fetching tickers for {} markets", markets.len());
        self.executor.get("/ticker", params, false).await
    }

    /// Get tickers for every market quoted in the given currencies
    ///
    /// An empty slice returns every market.
    #[instrument(skip(self))]
    pub async fn get_all_tickers(&self, quote_currencies: &[&str]) -> RestResult<Vec<Ticker>> {
        let mut params = QueryParams::new();
        if !quote_currencies.is_empty() {
            params.set("quote_currencies", quote_currencies.join(","));
        }

        debug!("Fetching all tickers");
        self.executor.get("/ticker/all", params, false).await
    }

    /// Get order books for the given markets
    ///
    /// # Arguments
    /// * `markets` - Market codes
    /// * `level` - Price grouping unit (KRW markets only)
    #[instrument(skip(self))]
    pub async fn get_orderbook(
        &self,
        markets: &[&str],
        level: Option<Decimal>,
    ) -> RestResult<Vec<Orderbook>> {
        let mut params = QueryParams::new();
        params
            .set("markets", join_markets(markets)?)
            .set_opt("level", level);

        debug!("Fetching orderbooks for {} markets", markets.len());
        self.executor.get("/orderbook", params, false).await
    }

    /// Get recent trades, newest first
    #[instrument(skip(self), fields(market = %request.market))]
    pub async fn get_trades(&self, request: &TradesRequest) -> RestResult<Vec<Trade>> {
        debug!("Fetching recent trades");
        self.executor
            .get("/trades/ticks", request.to_params(), false)
            .await
    }

    /// Get minute candles, oldest first
    #[instrument(skip(self), fields(market = %request.market))]
    pub async fn get_minute_candles(
        &self,
        unit: CandleUnit,
        request: &CandleRequest,
    ) -> RestResult<Vec<Candle>> {
        let path = format!("/candles/minutes/{}", unit.as_u32());
        self.candles(&path, request.to_params()).await
    }

    /// Get day candles, oldest first
    #[instrument(skip(self), fields(market = %request.market))]
    pub async fn get_day_candles(&self, request: &CandleRequest) -> RestResult<Vec<Candle>> {
        let mut params = request.to_params();
        params.set_opt(
            "converting_price_unit",
            request.converting_price_unit.as_deref(),
        );
        self.candles("/candles/days", params).await
    }

    /// Get week candles, oldest first
    #[instrument(skip(self), fields(market = %request.market))]
    pub async fn get_week_candles(&self, request: &CandleRequest) -> RestResult<Vec<Candle>> {
        self.candles("/candles/weeks", request.to_params()).await
    }

    /// Get month candles, oldest first
    #[instrument(skip(self), fields(market = %request.market))]
    pub async fn get_month_candles(&self, request: &CandleRequest) -> RestResult<Vec<Candle>> {
        self.candles("/candles/months", request.to_params()).await
    }

    /// The exchange sends candles newest first; callers get them oldest first.
    async fn candles(&self, path: &str, params: QueryParams) -> RestResult<Vec<Candle>> {
        debug!("Fetching candles from {}", path);
        let mut candles: Vec<Candle> = self.executor.get(path, params, false).await?;
        candles.reverse();
        Ok(candles)
    }
}

fn join_markets(markets: &[&str]) -> RestResult<String> {
    if markets.is_empty() {
        return Err(RestError::InvalidParameter(
            "at least one market is required".to_string(),
        ));
    }
    Ok(markets.join(","))
}
