//! Account endpoints
//!
//! These endpoints require authentication.

use tracing::{debug, instrument};
use upbit_auth::QueryParams;

use crate::error::RestResult;
use crate::executor::RequestExecutor;
use crate::types::{Account, ApiKey, WalletStatus};

/// Account endpoints
pub struct AccountEndpoints<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    /// Get balances for every currency held
    #[instrument(skip(self))]
    pub async fn get_accounts(&self) -> RestResult<Vec<Account>> {
        debug!("Fetching account balances");
        self.executor.get("/accounts", QueryParams::new(), true).await
    }

    /// Get deposit/withdraw service state per currency and network
    #[instrument(skip(self))]
    pub async fn get_wallet_status(&self) -> RestResult<Vec<WalletStatus>> {
        debug!("Fetching wallet status");
        self.executor
            .get("/status/wallet", QueryParams::new(), true)
            .await
    }

    /// List API keys with their expiry
    #[instrument(skip(self))]
    pub async fn get_api_keys(&self) -> RestResult<Vec<ApiKey>> {
        debug!("Fetching API keys");
        self.executor.get("/api_keys", QueryParams::new(), true).await
    }
}
