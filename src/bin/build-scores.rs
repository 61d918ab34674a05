//! Score builder batch job
//!
//! Fetches market data once, computes the sentiment scores and appends them to
//! the signal logs. Meant to be run by an external scheduler; exits non-zero
//! on any failure.

use sentiscore::config::{get_environment, Config};
use sentiscore::core::runtime::ScoreRuntime;
use sentiscore::logging;
use sentiscore::services::coingecko::CoinGeckoMarketDataProvider;
use std::sync::Arc;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    logging::init_logging();

    info!(environment = %get_environment(), "Starting score build");
    info!(
        base_url = %config.market.base_url,
        vs_currency = %config.market.vs_currency,
        stables = ?config.market.stable_ids,
        w_etf = config.weights.etf,
        w_stables = config.weights.stables,
        w_stress = config.weights.stress,
        "Configuration loaded"
    );

    let provider = CoinGeckoMarketDataProvider::new(config.market.clone(), config.retry);
    let runtime = ScoreRuntime::new(config, Arc::new(provider));

    let report = runtime.run().await?;
    println!("{}", report.summary());
    Ok(())
}
