//! Common test utilities and fixtures for integration tests
//!
//! Fixtures follow the shapes returned by the live Upbit API.

#![allow(dead_code)]

use sha2::{Digest, Sha512};
use std::time::Duration;
use upbit_auth::Claims;
use upbit_rest::{ClientConfig, Credentials, UpbitRestClient};
use wiremock::MockServer;

pub const ACCESS_KEY: &str = "test-access-key";
pub const SECRET_KEY: &str = "test-secret-key";

/// Sample `/market/all` response
pub const MARKETS_RESPONSE: &str = r#"[
    {"market": "KRW-BTC", "korean_name": "비트코인", "english_name": "Bitcoin"}
]"#;

/// Sample error envelope
pub const INVALID_PARAMETER_ERROR: &str = r#"{
    "error": {"name": "invalid_parameter", "message": "Invalid market"}
}"#;

/// Sample `/accounts` response
pub const ACCOUNTS_RESPONSE: &str = r#"[
    {
        "currency": "KRW",
        "balance": "1000000.0",
        "locked": "0.0",
        "avg_buy_price": "0",
        "avg_buy_price_modified": false,
        "unit_currency": "KRW"
    },
    {
        "currency": "BTC",
        "balance": "0.5",
        "locked": "0.1",
        "avg_buy_price": "95000000",
        "avg_buy_price_modified": false,
        "unit_currency": "KRW"
    }
]"#;

/// Order as returned by place and cancel
pub fn order_json(uuid: &str, state: &str) -> serde_json::Value {
    serde_json::json!({
        "uuid": uuid,
        "side": "bid",
        "ord_type": "limit",
        "price": "95000000",
        "state": state,
        "market": "KRW-BTC",
        "created_at": "2024-01-01T00:00:00+09:00",
        "volume": "0.01",
        "remaining_volume": "0.01",
        "reserved_fee": "475",
        "remaining_fee": "475",
        "paid_fee": "0",
        "locked": "950475",
        "executed_volume": "0",
        "trades_count": 0
    })
}

/// Day candle for `date` (yyyy-MM-dd) closing at `close`
pub fn day_candle_json(date: &str, close: u64) -> serde_json::Value {
    serde_json::json!({
        "market": "KRW-BTC",
        "candle_date_time_utc": format!("{}T00:00:00", date),
        "candle_date_time_kst": format!("{}T09:00:00", date),
        "opening_price": close - 1000,
        "high_price": close + 500,
        "low_price": close - 1500,
        "trade_price": close,
        "timestamp": 1_700_000_000_000u64,
        "candle_acc_trade_price": 1_234_567.89,
        "candle_acc_trade_volume": 12.5,
        "prev_closing_price": close - 1000,
        "change_price": 1000,
        "change_rate": 0.001
    })
}

/// Public-only client pointed at `server`
pub fn public_client(server: &MockServer) -> UpbitRestClient {
    UpbitRestClient::with_config(ClientConfig::new().with_base_url(server.uri()))
        .expect("client should build")
}

/// Authenticated client pointed at `server`
pub fn private_client(server: &MockServer) -> UpbitRestClient {
    private_client_with_timeout(server, Duration::from_secs(5))
}

pub fn private_client_with_timeout(server: &MockServer, timeout: Duration) -> UpbitRestClient {
    let config = ClientConfig::new()
        .with_base_url(server.uri())
        .with_timeout(timeout)
        .with_credentials(Credentials::new(ACCESS_KEY, SECRET_KEY));
    UpbitRestClient::with_config(config).expect("client should build")
}

/// Decode the claims of the bearer token on a recorded request
pub fn bearer_claims(request: &wiremock::Request) -> Claims {
    let header = request
        .headers
        .get("authorization")
        .expect("authorization header")
        .to_str()
        .expect("ascii header");
    let token = header.strip_prefix("Bearer ").expect("bearer scheme");
    Claims::decode_unverified(token).expect("decodable token")
}

pub fn sha512_hex(input: &[u8]) -> String {
    hex::encode(Sha512::digest(input))
}
