//! Example: classifying failures
//!
//! Triggers an API error, a caller-side validation error and a transport
//! error, and shows the recovery hint attached to each.
//!
//! Run with: cargo run -p upbit-rest --example error_handling

use std::time::Duration;
use upbit_rest::{ClientConfig, RestError, UpbitRestClient};

fn describe(label: &str, err: &RestError) {
    println!("{}:", label);
    println!("  error:     {}", err);
    println!("  api error: {:?}", err.api_error_name());
    println!("  transport: {}", err.is_transport_error());
    println!("  hint:      {:?}", err.recovery_strategy());
    println!();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = UpbitRestClient::new()?;

    // Unknown market: the exchange answers with an error envelope
    if let Err(e) = client.get_ticker(&["KRW-NOT-A-COIN"]).await {
        describe("Unknown market", &e);
    }

    // Empty market list never leaves the process
    if let Err(e) = client.get_ticker(&[]).await {
        describe("Empty market list", &e);
    }

    // Private endpoint without credentials
    if let Err(e) = client.get_accounts().await {
        describe("Missing credentials", &e);
    }

    // Unroutable address with a short timeout
    let unreachable = UpbitRestClient::with_config(
        ClientConfig::new()
            .with_base_url("http://10.255.255.1/v1")
            .with_timeout(Duration::from_millis(200)),
    )?;
    if let Err(e) = unreachable.market().get_markets(false).await {
        describe("Unreachable host", &e);
    }

    Ok(())
}
