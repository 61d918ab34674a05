//! The three output stores: cumulative log, monthly log, latest snapshot.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::records::{ensure_parent_dir, rewrite, sanitize_and_load, tmp_path};
use crate::db::StorageError;
use crate::models::signal::{ScoreSet, SignalRecord};

/// Outcome of appending one record to a log file.
#[derive(Debug, Clone, PartialEq)]
pub struct LogAppend {
    pub path: PathBuf,
    /// Rows in the file after the rewrite.
    pub rows: usize,
    /// False when the monthly log already held the record's dedup key.
    pub appended: bool,
    /// Malformed rows dropped during the load.
    pub rejected: usize,
}

/// Contents of the latest-snapshot file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestSnapshot {
    pub utc: String,
    pub scores: ScoreSet,
}

/// Load, append unconditionally, rewrite.
pub fn append_to_cumulative_log(path: &Path, record: &SignalRecord) -> Result<LogAppend, StorageError> {
    let mut log = sanitize_and_load(path)?;
    log.rows.push(record.clone());
    rewrite(path, &log.rows)?;

    info!(
        path = %path.display(),
        rows = log.rows.len(),
        "Ledger: appended to cumulative log"
    );
    Ok(LogAppend {
        path: path.to_path_buf(),
        rows: log.rows.len(),
        appended: true,
        rejected: log.rejected.len(),
    })
}

/// `<reports_dir>/YYYY-MM.csv` for the UTC month of `timestamp`.
pub fn monthly_log_path(reports_dir: &Path, timestamp: DateTime<Utc>) -> PathBuf {
    reports_dir.join(format!("{}.csv", timestamp.format("%Y-%m")))
}

/// Append to the record's monthly log unless its (timestamp, pair, action)
/// key is already present. The file is rewritten either way, which also
/// drops any malformed rows it held.
pub fn append_to_monthly_log(reports_dir: &Path, record: &SignalRecord) -> Result<LogAppend, StorageError> {
    let path = monthly_log_path(reports_dir, record.timestamp);
    let mut log = sanitize_and_load(&path)?;

    let appended = {
        let existing: HashSet<_> = log.rows.iter().map(SignalRecord::dedup_key).collect();
        !existing.contains(&record.dedup_key())
    };
    if appended {
        log.rows.push(record.clone());
    }
    rewrite(&path, &log.rows)?;

    info!(
        path = %path.display(),
        rows = log.rows.len(),
        appended = appended,
        "Ledger: monthly log updated"
    );
    Ok(LogAppend {
        path,
        rows: log.rows.len(),
        appended,
        rejected: log.rejected.len(),
    })
}

/// Overwrite the snapshot file with `scores` stamped at `utc`.
pub fn write_latest_snapshot(path: &Path, utc: DateTime<Utc>, scores: &ScoreSet) -> Result<LatestSnapshot, StorageError> {
    let snapshot = LatestSnapshot {
        utc: utc.to_rfc3339_opts(SecondsFormat::Secs, true),
        scores: *scores,
    };
    let body = serde_json::to_string_pretty(&snapshot).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    ensure_parent_dir(path)?;
    let tmp = tmp_path(path);
    fs::write(&tmp, body).map_err(|e| StorageError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StorageError::io(path, e))?;

    info!(path = %path.display(), "Ledger: latest snapshot written");
    Ok(snapshot)
}

/// Read back a snapshot written by [`write_latest_snapshot`].
pub fn read_latest_snapshot(path: &Path) -> Result<LatestSnapshot, StorageError> {
    let body = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
    serde_json::from_str(&body).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })
}
