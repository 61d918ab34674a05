//! External market data sources.

pub mod coingecko;
pub mod market_data;
