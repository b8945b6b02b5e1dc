//! Example: public market data
//!
//! Fetches markets, tickers, an order book, recent trades and candles.
//! No credentials needed.
//!
//! Run with: cargo run -p upbit-rest --example market_data

use upbit_rest::{CandleRequest, CandleUnit, TradesRequest, UpbitRestClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Upbit Market Data Example ===\n");

    let client = UpbitRestClient::new()?;
    let market = client.market();

    let markets = market.get_markets(false).await?;
    let krw = markets.iter().filter(|m| m.quote_currency() == "KRW").count();
    println!("Markets: {} total, {} quoted in KRW\n", markets.len(), krw);

    println!("--- Tickers ---");
    for ticker in client.get_ticker(&["KRW-BTC", "KRW-ETH"]).await? {
        println!(
            "  {:<10} {:>16} ({} {:.2}%)",
            ticker.market,
            ticker.trade_price,
            ticker.change,
            ticker.signed_change_rate * rust_decimal::Decimal::ONE_HUNDRED
        );
    }
    println!();

    println!("--- Order Book (KRW-BTC) ---");
    if let Some(book) = market.get_orderbook(&["KRW-BTC"], None).await?.first() {
        for unit in book.orderbook_units.iter().take(5) {
            println!(
                "  bid {:>14} x {:<12} | ask {:>14} x {}",
                unit.bid_price, unit.bid_size, unit.ask_price, unit.ask_size
            );
        }
        if let Some(spread) = book.spread() {
            println!("  spread: {}", spread);
        }
    }
    println!();

    println!("--- Recent Trades (KRW-BTC) ---");
    let trades = market
        .get_trades(&TradesRequest::new("KRW-BTC").count(5))
        .await?;
    for trade in &trades {
        println!(
            "  {} {:?} {} @ {}",
            trade.trade_time_utc, trade.ask_bid, trade.trade_volume, trade.trade_price
        );
    }
    println!();

    println!("--- 15m Candles (KRW-BTC), oldest first ---");
    let candles = market
        .get_minute_candles(CandleUnit::M15, &CandleRequest::new("KRW-BTC").count(8))
        .await?;
    for candle in &candles {
        println!(
            "  {}  O {}  H {}  L {}  C {}",
            candle.candle_date_time_kst,
            candle.opening_price,
            candle.high_price,
            candle.low_price,
            candle.trade_price
        );
    }

    Ok(())
}
