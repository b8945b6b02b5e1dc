//! Funding endpoints for deposits and withdrawals
//!
//! These endpoints require authentication.

use rust_decimal::Decimal;
use tracing::{debug, info, instrument};
use upbit_auth::QueryParams;
use upbit_types::OrderBy;

use crate::error::{RestError, RestResult};
use crate::executor::RequestExecutor;
use crate::types::{Deposit, DepositAddress, GeneratedAddress, Withdraw, WithdrawChance};

/// Filters for listing withdrawals or deposits
///
/// `uuids` and `txids` are sent comma-separated.
#[derive(Debug, Clone, Default)]
pub struct TransferListRequest {
    pub currency: Option<String>,
    pub state: Option<String>,
    pub uuids: Vec<String>,
    pub txids: Vec<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
    pub order_by: Option<OrderBy>,
}

impl TransferListRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuids.push(uuid.into());
        self
    }

    pub fn txid(mut self, txid: impl Into<String>) -> Self {
        self.txids.push(txid.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .set_opt("currency", self.currency.as_deref())
            .set_opt("state", self.state.as_deref())
            .set_opt("uuids", csv(&self.uuids))
            .set_opt("txids", csv(&self.txids))
            .set_opt("limit", self.limit)
            .set_opt("page", self.page)
            .set_opt("order_by", self.order_by);
        params
    }
}

fn csv(values: &[String]) -> Option<String> {
    (!values.is_empty()).then(|| values.join(","))
}

/// Coin withdrawal parameters
#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawCoinRequest {
    pub currency: String,
    pub net_type: String,
    pub amount: Decimal,
    /// Must be registered as an allowed withdrawal address
    pub address: String,
    /// Destination tag or memo
    pub secondary_address: Option<String>,
    /// `default` or `internal`
    pub transaction_type: Option<String>,
}

impl WithdrawCoinRequest {
    pub fn new(
        currency: impl Into<String>,
        net_type: impl Into<String>,
        amount: Decimal,
        address: impl Into<String>,
    ) -> Self {
        Self {
            currency: currency.into(),
            net_type: net_type.into(),
            amount,
            address: address.into(),
            secondary_address: None,
            transaction_type: None,
        }
    }

    pub fn with_secondary_address(mut self, secondary_address: impl Into<String>) -> Self {
        self.secondary_address = Some(secondary_address.into());
        self
    }

    pub fn with_transaction_type(mut self, transaction_type: impl Into<String>) -> Self {
        self.transaction_type = Some(transaction_type.into());
        self
    }

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .set("currency", &self.currency)
            .set("net_type", &self.net_type)
            .set("amount", self.amount)
            .set("address", &self.address)
            .set_opt("secondary_address", self.secondary_address.as_deref())
            .set_opt("transaction_type", self.transaction_type.as_deref());
        params
    }
}

/// Funding endpoints for deposits and withdrawals
pub struct FundingEndpoints<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> FundingEndpoints<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    // ========================================================================
    // Withdrawals
    // ========================================================================

    /// List withdrawals
    #[instrument(skip(self, request))]
    pub async fn get_withdraws(&self, request: &TransferListRequest) -> RestResult<Vec<Withdraw>> {
        debug!(currency = ?request.currency, "Fetching withdrawals");
        self.executor
            .get("/withdraws", request.to_params(), true)
            .await
    }

    /// Get a single withdrawal
    #[instrument(skip(self))]
    pub async fn get_withdraw(&self, uuid: &str) -> RestResult<Withdraw> {
        debug!("Fetching withdrawal");
        let params = QueryParams::new().with("uuid", uuid);
        self.executor.get("/withdraw", params, true).await
    }

    /// Get withdrawal fees and limits for a currency
    #[instrument(skip(self))]
    pub async fn get_withdraw_chance(
        &self,
        currency: &str,
        net_type: Option<&str>,
    ) -> RestResult<WithdrawChance> {
        debug!("Fetching withdraw chance");
        let mut params = QueryParams::new();
        params.set("currency", currency).set_opt("net_type", net_type);
        self.executor.get("/withdraws/chance", params, true).await
    }

    /// Withdraw a coin to a registered address
    #[instrument(skip(self, request), fields(currency = %request.currency, net_type = %request.net_type))]
    pub async fn withdraw_coin(&self, request: &WithdrawCoinRequest) -> RestResult<Withdraw> {
        if request.amount <= Decimal::ZERO {
            return Err(RestError::InvalidParameter(format!(
                "amount must be positive, got {}",
                request.amount
            )));
        }

        info!(amount = %request.amount, "Requesting coin withdrawal");
        self.executor
            .post("/withdraws/coin", request.to_params(), true)
            .await
    }

    /// Withdraw KRW to the registered bank account
    ///
    /// # Arguments
    /// * `amount` - KRW amount
    /// * `two_factor_type` - `kakao` or `naver`, when required
    #[instrument(skip(self))]
    pub async fn withdraw_krw(
        &self,
        amount: Decimal,
        two_factor_type: Option<&str>,
    ) -> RestResult<Withdraw> {
        if amount <= Decimal::ZERO {
            return Err(RestError::InvalidParameter(format!(
                "amount must be positive, got {}",
                amount
            )));
        }

        info!("Requesting KRW withdrawal");
        let mut params = QueryParams::new();
        params
            .set("amount", amount)
            .set_opt("two_factor_type", two_factor_type);
        self.executor.post("/withdraws/krw", params, true).await
    }

    // ========================================================================
    // Deposits
    // ========================================================================

    /// List deposits
    #[instrument(skip(self, request))]
    pub async fn get_deposits(&self, request: &TransferListRequest) -> RestResult<Vec<Deposit>> {
        debug!(currency = ?request.currency, "Fetching deposits");
        self.executor
            .get("/deposits", request.to_params(), true)
            .await
    }

    /// Get a single deposit
    #[instrument(skip(self))]
    pub async fn get_deposit(&self, uuid: &str) -> RestResult<Deposit> {
        debug!("Fetching deposit");
        let params = QueryParams::new().with("uuid", uuid);
        self.executor.get("/deposit", params, true).await
    }

    /// Request a deposit address
    ///
    /// Generation is asynchronous: the first call usually returns
    /// [`GeneratedAddress::Pending`] and a later call returns the address.
    #[instrument(skip(self))]
    pub async fn generate_deposit_address(
        &self,
        currency: &str,
        net_type: &str,
    ) -> RestResult<GeneratedAddress> {
        debug!("Generating deposit address");
        let params = QueryParams::new()
            .with("currency", currency)
            .with("net_type", net_type);
        self.executor
            .post("/deposits/generate_coin_address", params, true)
            .await
    }

    /// List every deposit address
    #[instrument(skip(self))]
    pub async fn get_deposit_addresses(&self) -> RestResult<Vec<DepositAddress>> {
        debug!("Fetching deposit addresses");
        self.executor
            .get("/deposits/coin_addresses", QueryParams::new(), true)
            .await
    }

    /// Get the deposit address for a currency and network
    #[instrument(skip(self))]
    pub async fn get_deposit_address(
        &self,
        currency: &str,
        net_type: &str,
    ) -> RestResult<DepositAddress> {
        debug!("Fetching deposit address");
        let params = QueryParams::new()
            .with("currency", currency)
            .with("net_type", net_type);
        self.executor
            .get("/deposits/coin_address", params, true)
            .await
    }
}
