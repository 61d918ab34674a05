//! CoinGecko market data provider implementation

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::{MarketConfig, RetryPolicy, REFERENCE_ASSET, STABLES_VS_CURRENCY};
use crate::core::http::{FetchError, HttpFetcher};
use crate::models::market::{MarketSnapshot, StableAggregate};
use crate::services::market_data::MarketDataProvider;

pub struct CoinGeckoMarketDataProvider {
    fetcher: HttpFetcher,
    config: MarketConfig,
}

impl CoinGeckoMarketDataProvider {
    pub fn new(config: MarketConfig, policy: RetryPolicy) -> Self {
        Self::with_fetcher(HttpFetcher::new(policy), config)
    }

    pub fn with_fetcher(fetcher: HttpFetcher, config: MarketConfig) -> Self {
        Self { fetcher, config }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoMarketDataProvider {
    async fn get_market_snapshot(&self) -> Result<MarketSnapshot, FetchError> {
        let url = self.endpoint(&format!("coins/{}/market_chart", REFERENCE_ASSET));
        let params = [
            ("vs_currency", self.config.vs_currency.clone()),
            ("days", self.config.window_days.to_string()),
            ("interval", "daily".to_string()),
        ];

        let payload = self.fetcher.get_json(&url, &params).await?;
        let snapshot = MarketSnapshot::from_market_chart(&payload);

        info!(
            asset = REFERENCE_ASSET,
            prices = snapshot.prices.len(),
            volumes = snapshot.volumes.len(),
            "CoinGecko: fetched market chart"
        );
        Ok(snapshot)
    }

    async fn get_stable_aggregate(&self) -> Result<StableAggregate, FetchError> {
        let url = self.endpoint("coins/markets");
        let params = [
            ("vs_currency", STABLES_VS_CURRENCY.to_string()),
            ("ids", self.config.stable_ids.join(",")),
            ("price_change_percentage", "24h".to_string()),
        ];

        let payload = self.fetcher.get_json(&url, &params).await?;
        let rows = payload.as_array().map(Vec::len).unwrap_or(0);
        if rows < self.config.stable_ids.len() {
            debug!(
                requested = self.config.stable_ids.len(),
                returned = rows,
                "CoinGecko: fewer stablecoin rows than requested"
            );
        }
        let aggregate = StableAggregate::from_markets(&payload);

        info!(
            total_cap = aggregate.total_cap,
            total_delta = aggregate.total_delta,
            "CoinGecko: fetched stablecoin markets"
        );
        Ok(aggregate)
    }
}
