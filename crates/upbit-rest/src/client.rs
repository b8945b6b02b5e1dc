//! Main REST client implementation

use reqwest::Client;
use std::time::Duration;
use tracing::info;
use upbit_auth::Credentials;

use crate::endpoints::{
    AccountEndpoints, FundingEndpoints, MarketEndpoints, OrderId, PlaceOrderRequest,
    TradingEndpoints,
};
use crate::error::RestResult;
use crate::executor::RequestExecutor;
use crate::types::{Account, Order, Ticker};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.upbit.com/v1";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Upbit REST API client
///
/// Public quotation endpoints work without credentials. Exchange endpoints
/// sign each request with the configured key pair.
///
/// # Example
///
/// ```no_run
/// use upbit_rest::{Credentials, UpbitRestClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = UpbitRestClient::new()?;
///     let tickers = client.get_ticker(&["KRW-BTC"]).await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = UpbitRestClient::with_credentials(creds)?;
///     let accounts = auth_client.get_accounts().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct UpbitRestClient {
    executor: RequestExecutor,
}

impl UpbitRestClient {
    /// Create a new client without credentials
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let (http_client, timeout) = match config.http_client {
            Some(client) => (client, config.timeout),
            None => {
                let timeout = config.timeout.unwrap_or(DEFAULT_TIMEOUT);
                let client = Client::builder()
                    .timeout(timeout)
                    .user_agent(
                        config
                            .user_agent
                            .unwrap_or_else(|| format!("upbit-rest/{}", env!("CARGO_PKG_VERSION"))),
                    )
                    .build()?;
                (client, Some(timeout))
            }
        };

        info!(base_url = %config.base_url, "Created Upbit REST client");

        Ok(Self {
            executor: RequestExecutor::new(
                http_client,
                config.base_url,
                timeout,
                config.credentials,
            ),
        })
    }

    /// Check if the client has an access key configured
    pub fn has_credentials(&self) -> bool {
        self.executor.credentials().is_configured()
    }

    pub fn base_url(&self) -> &str {
        self.executor.base_url()
    }

    /// The underlying executor, for endpoints without a typed wrapper
    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(&self.executor)
    }

    /// Get tickers for the given markets
    pub async fn get_ticker(&self, markets: &[&str]) -> RestResult<Vec<Ticker>> {
        self.market().get_ticker(markets).await
    }

    // ========================================================================
    // Private Endpoints
    // ========================================================================

    /// Get account endpoints
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(&self.executor)
    }

    /// Get account balances
    pub async fn get_accounts(&self) -> RestResult<Vec<Account>> {
        self.account().get_accounts().await
    }

    /// Get trading endpoints
    pub fn trading(&self) -> TradingEndpoints<'_> {
        TradingEndpoints::new(&self.executor)
    }

    /// Place a new order
    pub async fn place_order(&self, order: &PlaceOrderRequest) -> RestResult<Order> {
        self.trading().place_order(order).await
    }

    /// Cancel an order
    pub async fn cancel_order(&self, id: &OrderId) -> RestResult<Order> {
        self.trading().cancel_order(id).await
    }

    /// Get funding endpoints
    pub fn funding(&self) -> FundingEndpoints<'_> {
        FundingEndpoints::new(&self.executor)
    }
}

impl std::fmt::Debug for UpbitRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpbitRestClient")
            .field("base_url", &self.base_url())
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL
    pub base_url: String,
    /// Per-request timeout, 30 seconds when unset on an internally built client
    pub timeout: Option<Duration>,
    /// Custom user agent (ignored with a caller-supplied client)
    pub user_agent: Option<String>,
    /// Caller-supplied HTTP client
    pub http_client: Option<Client>,
    /// API credentials, empty for public-only use
    pub credentials: Credentials,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: None,
            http_client: None,
            credentials: Credentials::empty(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    ///
    /// Also overrides the timeout of a client given to [`with_http_client`](Self::with_http_client).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use an existing HTTP client
    ///
    /// The client's own user agent is used. Its timeout stays in effect
    /// unless [`with_timeout`](Self::with_timeout) is also called.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }
}
