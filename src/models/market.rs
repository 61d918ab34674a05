//! Market data fetched once per run. Never persisted as-is.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One `[timestamp_ms, value]` pair of a market-chart series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp_ms: i64,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(timestamp_ms: i64, value: f64) -> Self {
        Self {
            timestamp_ms,
            value,
        }
    }
}

/// Daily price and volume history of the reference asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub prices: Vec<SeriesPoint>,
    pub volumes: Vec<SeriesPoint>,
}

impl MarketSnapshot {
    /// Build from plain close and volume values with synthetic daily timestamps.
    pub fn from_values(closes: &[f64], volumes: &[f64]) -> Self {
        const DAY_MS: i64 = 86_400_000;
        let series = |values: &[f64]| {
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| SeriesPoint::new(i as i64 * DAY_MS, v))
                .collect()
        };
        Self {
            prices: series(closes),
            volumes: series(volumes),
        }
    }

    /// Parse a `market_chart` payload.
    ///
    /// Missing series come back empty and malformed points are skipped, so a
    /// broken payload surfaces later as insufficient data.
    pub fn from_market_chart(payload: &Value) -> Self {
        Self {
            prices: parse_series(payload.get("prices")),
            volumes: parse_series(payload.get("total_volumes")),
        }
    }

    pub fn closes(&self) -> Vec<f64> {
        self.prices.iter().map(|p| p.value).collect()
    }

    pub fn volume_values(&self) -> Vec<f64> {
        self.volumes.iter().map(|p| p.value).collect()
    }
}

fn parse_series(series: Option<&Value>) -> Vec<SeriesPoint> {
    let Some(points) = series.and_then(Value::as_array) else {
        return Vec::new();
    };
    points
        .iter()
        .filter_map(|point| {
            let pair = point.as_array()?;
            let timestamp = pair.first()?.as_f64()?;
            let value = pair.get(1)?.as_f64()?;
            Some(SeriesPoint::new(timestamp as i64, value))
        })
        .collect()
}

/// Summed market cap and 24h market-cap change of the stablecoin basket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StableAggregate {
    pub total_cap: f64,
    pub total_delta: f64,
}

impl StableAggregate {
    pub fn new(total_cap: f64, total_delta: f64) -> Self {
        Self {
            total_cap,
            total_delta,
        }
    }

    /// Sum a `coins/markets` payload. Absent or non-numeric fields count as zero.
    pub fn from_markets(payload: &Value) -> Self {
        let rows = payload.as_array().map(Vec::as_slice).unwrap_or_default();
        rows.iter().fold(Self::default(), |acc, row| Self {
            total_cap: acc.total_cap + numeric_field(row, "market_cap"),
            total_delta: acc.total_delta + numeric_field(row, "market_cap_change_24h"),
        })
    }
}

fn numeric_field(row: &Value, key: &str) -> f64 {
    row.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}
