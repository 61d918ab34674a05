//! Environment-sourced configuration for the score builder.
//!
//! Everything is optional: unset or unparseable variables fall back to the
//! defaults below. The resulting [`Config`] is passed explicitly to the
//! runtime and the score engine.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const REFERENCE_ASSET: &str = "bitcoin";
pub const STABLES_VS_CURRENCY: &str = "usd";
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Relative weights of the three component scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub etf: f64,
    pub stables: f64,
    pub stress: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            etf: 0.6,
            stables: 0.3,
            stress: 0.1,
        }
    }
}

/// Labels written into every record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordLabels {
    pub pair: String,
    pub action: String,
    pub note: String,
}

impl Default for RecordLabels {
    fn default() -> Self {
        Self {
            pair: "BTC/CHF".to_string(),
            action: "hold".to_string(),
            note: "coingecko-auto".to_string(),
        }
    }
}

/// Bounded fixed-delay retry policy for the fetch layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub delay: Duration,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
            timeout: Duration::from_secs(20),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketConfig {
    pub base_url: String,
    pub vs_currency: String,
    pub window_days: u32,
    pub stable_ids: Vec<String>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            vs_currency: "usd".to_string(),
            window_days: DEFAULT_WINDOW_DAYS,
            stable_ids: vec![
                "tether".to_string(),
                "usd-coin".to_string(),
                "dai".to_string(),
            ],
        }
    }
}

/// Output locations. Relative paths resolve against the working directory.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    pub cumulative_log: PathBuf,
    pub reports_dir: PathBuf,
    pub latest_snapshot: PathBuf,
}

impl StorageConfig {
    /// All three stores rooted under `root`.
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            cumulative_log: root.join("signals.csv"),
            reports_dir: root.join("reports"),
            latest_snapshot: root.join("latest.json"),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cumulative_log: PathBuf::from("signals.csv"),
            reports_dir: PathBuf::from("reports"),
            latest_snapshot: PathBuf::from("latest.json"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub weights: ScoreWeights,
    pub labels: RecordLabels,
    pub market: MarketConfig,
    pub retry: RetryPolicy,
    pub storage: StorageConfig,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let weights_default = ScoreWeights::default();
        let weights = ScoreWeights {
            etf: env_or("W_ETF", weights_default.etf),
            stables: env_or("W_STABLES", weights_default.stables),
            stress: env_or("W_STRESS", weights_default.stress),
        };

        let labels_default = RecordLabels::default();
        let labels = RecordLabels {
            pair: env::var("PAIR").unwrap_or(labels_default.pair),
            action: env::var("ACTION").unwrap_or(labels_default.action),
            note: env::var("NOTE").unwrap_or(labels_default.note),
        };

        let market_default = MarketConfig::default();
        let stable_ids = env::var("STABLE_IDS")
            .ok()
            .map(|raw| parse_id_list(&raw))
            .filter(|ids| !ids.is_empty())
            .unwrap_or(market_default.stable_ids);
        let market = MarketConfig {
            base_url: env::var("COINGECKO_BASE_URL").unwrap_or(market_default.base_url),
            vs_currency: env::var("VS_CURRENCY").unwrap_or(market_default.vs_currency),
            window_days: market_default.window_days,
            stable_ids,
        };

        let retry_default = RetryPolicy::default();
        let retry = RetryPolicy {
            max_attempts: env_or("HTTP_MAX_ATTEMPTS", retry_default.max_attempts).max(1),
            delay: Duration::from_secs(env_or(
                "HTTP_RETRY_DELAY_SECS",
                retry_default.delay.as_secs(),
            )),
            timeout: Duration::from_secs(env_or(
                "HTTP_TIMEOUT_SECS",
                retry_default.timeout.as_secs(),
            )),
        };

        Self {
            weights,
            labels,
            market,
            retry,
            storage: StorageConfig::default(),
        }
    }
}

/// Deployment environment name, `sandbox` unless `APP_ENV` says otherwise.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Split a comma-separated id list, dropping blanks.
pub fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}
