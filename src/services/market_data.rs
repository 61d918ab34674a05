//! Market data provider interface used by the score runtime.

use async_trait::async_trait;

use crate::core::http::FetchError;
use crate::models::market::{MarketSnapshot, StableAggregate};

#[async_trait]
pub trait MarketDataProvider {
    /// Daily price and volume history of the reference asset.
    async fn get_market_snapshot(&self) -> Result<MarketSnapshot, FetchError>;

    /// Summed market cap and 24h cap change of the stablecoin basket.
    async fn get_stable_aggregate(&self) -> Result<StableAggregate, FetchError>;
}

/// Serves fixed data. Used for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketDataProvider {
    pub market: MarketSnapshot,
    pub stables: StableAggregate,
}

impl StaticMarketDataProvider {
    pub fn new(market: MarketSnapshot, stables: StableAggregate) -> Self {
        Self { market, stables }
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketDataProvider {
    async fn get_market_snapshot(&self) -> Result<MarketSnapshot, FetchError> {
        Ok(self.market.clone())
    }

    async fn get_stable_aggregate(&self) -> Result<StableAggregate, FetchError> {
        Ok(self.stables)
    }
}
