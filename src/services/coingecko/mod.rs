pub mod provider;

pub use provider::CoinGeckoMarketDataProvider;
