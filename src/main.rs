use anyhow::Context;
use payeer_trade::{AccountInfo, ExchangeConfig, MarketDataSource, PayeerBuilder};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Reads PAYEER_API_ID / PAYEER_SECRET_KEY, optionally from .env
    let config = ExchangeConfig::from_env_file("PAYEER")
        .context("Set PAYEER_API_ID and PAYEER_SECRET_KEY to run this example")?;

    let payeer = PayeerBuilder::new().with_config(config).build()?;

    let server_time = payeer.server_time().await?;
    println!("Server time: {}", server_time);

    match payeer.ticker(Some("BTC_USDT")).await {
        Ok(pairs) => println!("Ticker: {}", pairs),
        Err(e) => println!("Error fetching ticker: {}", e),
    }

    match payeer.account().await {
        Ok(balances) => println!("Balances: {}", balances),
        Err(e) => {
            println!("Error fetching balances: {}", e);
            if let Some(detail) = payeer.last_error() {
                println!("Last API error: {}", detail);
            }
        }
    }

    // Example order (commented out for safety)
    /*
    use payeer_trade::OrderPlacer;
    use rust_decimal_macros::dec;
    let order = payeer
        .limit_order("TRX_USD", "buy", dec!(10), dec!(0.08))
        .await?;
    println!("Order created: {:?}", order);
    */

    Ok(())
}
