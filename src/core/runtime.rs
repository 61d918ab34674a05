//! Single-run orchestration: fetch, score, persist, report.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info};

use crate::config::Config;
use crate::core::http::FetchError;
use crate::db::{self, LogAppend, StorageError};
use crate::indicators::IndicatorError;
use crate::models::signal::{ScoreSet, SignalRecord};
use crate::services::market_data::MarketDataProvider;
use crate::signals::engine::{ScoreBreakdown, ScoreEngine};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("scoring failed: {0}")]
    Indicator(#[from] IndicatorError),
    #[error("storage failed: {0}")]
    Storage(#[from] StorageError),
}

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub timestamp: DateTime<Utc>,
    pub record: SignalRecord,
    pub breakdown: ScoreBreakdown,
    pub cumulative: LogAppend,
    pub monthly: LogAppend,
    pub snapshot_path: PathBuf,
}

impl RunReport {
    /// Rounded scores as stored.
    pub fn scores(&self) -> &ScoreSet {
        &self.record.scores
    }

    /// One-line operator summary.
    pub fn summary(&self) -> String {
        format!(
            "OK {} [{}] monthly={}{}",
            self.record.formatted_timestamp(),
            self.record.to_csv_row().join(","),
            self.monthly.path.display(),
            if self.monthly.appended { "" } else { " (duplicate, skipped)" }
        )
    }
}

/// Runs the score pipeline once against a market data provider.
pub struct ScoreRuntime {
    config: Config,
    provider: Arc<dyn MarketDataProvider + Send + Sync>,
}

impl ScoreRuntime {
    pub fn new(config: Config, provider: Arc<dyn MarketDataProvider + Send + Sync>) -> Self {
        Self { config, provider }
    }

    /// Fetch both payloads (sequentially) and compute the scores. Touches no files.
    pub async fn compute_scores(&self) -> Result<ScoreBreakdown, PipelineError> {
        let market = self.provider.get_market_snapshot().await?;
        let stables = self.provider.get_stable_aggregate().await?;
        let breakdown = ScoreEngine::evaluate(&market, &stables, &self.config.weights)?;
        Ok(breakdown)
    }

    pub async fn run(&self) -> Result<RunReport, PipelineError> {
        self.run_at(Utc::now()).await
    }

    /// Run with an explicit clock. Files written before a failing step stay
    /// as written; re-running is the recovery path.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<RunReport, PipelineError> {
        let result = self.execute(now).await;
        if let Err(ref e) = result {
            error!(error = %e, "ScoreRuntime: run aborted");
        }
        result
    }

    async fn execute(&self, now: DateTime<Utc>) -> Result<RunReport, PipelineError> {
        let breakdown = self.compute_scores().await?;
        let record = SignalRecord::from_scores(now, &self.config.labels, breakdown.scores);

        info!(
            score_etf = record.scores.etf,
            score_stables = record.scores.stables,
            score_stress = record.scores.stress,
            score_weighted = record.scores.weighted,
            "ScoreRuntime: scores computed"
        );

        let storage = &self.config.storage;
        let cumulative = db::append_to_cumulative_log(&storage.cumulative_log, &record)?;
        let monthly = db::append_to_monthly_log(&storage.reports_dir, &record)?;
        db::write_latest_snapshot(&storage.latest_snapshot, record.timestamp, &record.scores)?;

        Ok(RunReport {
            timestamp: record.timestamp,
            record,
            breakdown,
            cumulative,
            monthly,
            snapshot_path: storage.latest_snapshot.clone(),
        })
    }
}
