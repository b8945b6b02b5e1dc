//! Example: account overview
//!
//! Lists balances, open orders and recent withdrawals.
//!
//! Run with: cargo run -p upbit-rest --example account_overview
//!
//! NOTE: Set UPBIT_ACCESS_KEY and UPBIT_SECRET_KEY environment variables.

use upbit_rest::{
    Credentials, GetOrdersRequest, OrderBy, OrderState, TransferListRequest, UpbitRestClient,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            println!("{}", e);
            println!("Set UPBIT_ACCESS_KEY and UPBIT_SECRET_KEY to run this example.");
            return Ok(());
        }
    };

    let client = UpbitRestClient::with_credentials(credentials)?;

    println!("--- Balances ---");
    for account in client.get_accounts().await? {
        println!(
            "  {:<6} available {:>20}  locked {:>20}",
            account.currency, account.balance, account.locked
        );
    }
    println!();

    println!("--- API Keys ---");
    for key in client.account().get_api_keys().await? {
        println!("  {} expires {}", key.access_key, key.expire_at);
    }
    println!();

    println!("--- Open Orders ---");
    let request = GetOrdersRequest::new()
        .states([OrderState::Wait, OrderState::Watch])
        .order_by(OrderBy::Desc)
        .limit(20);
    let orders = client.trading().get_orders(&request).await?;
    if orders.is_empty() {
        println!("  (none)");
    }
    for order in &orders {
        println!(
            "  {} {} {} {:?} @ {:?}",
            order.uuid, order.market, order.side, order.remaining_volume, order.price
        );
    }
    println!();

    println!("--- Recent Withdrawals ---");
    let withdraws = client
        .funding()
        .get_withdraws(&TransferListRequest::new().limit(5))
        .await?;
    for withdraw in &withdraws {
        println!(
            "  {} {} {} [{}]",
            withdraw.created_at, withdraw.currency, withdraw.amount, withdraw.state
        );
    }

    Ok(())
}
