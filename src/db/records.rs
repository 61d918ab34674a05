//! CSV persistence of signal records: sanitizing loader and full rewrite.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Writer};
use tracing::{debug, warn};

use crate::db::StorageError;
use crate::models::signal::{RowRejection, SignalRecord, CSV_HEADER};

/// A line dropped while loading.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// 1-based line number in the file.
    pub line: u64,
    pub reason: RowRejection,
}

/// Result of [`sanitize_and_load`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedLog {
    pub rows: Vec<SignalRecord>,
    pub rejected: Vec<RejectedRow>,
}

/// Read a signal log, keeping only well-formed rows.
///
/// The first line is treated as the header and skipped. A missing file loads
/// as an empty log.
pub fn sanitize_and_load(path: &Path) -> Result<LoadedLog, StorageError> {
    if !path.exists() {
        debug!(path = %path.display(), "Records: no existing file");
        return Ok(LoadedLog::default());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| StorageError::csv(path, e))?;

    let mut log = LoadedLog::default();
    for result in reader.records() {
        match result {
            Ok(record) => {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                match SignalRecord::from_csv_row(&record) {
                    Ok(row) => log.rows.push(row),
                    Err(reason) => log.rejected.push(RejectedRow { line, reason }),
                }
            }
            Err(e) if e.is_io_error() => return Err(StorageError::csv(path, e)),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                log.rejected.push(RejectedRow {
                    line,
                    reason: RowRejection::Unreadable(e.to_string()),
                });
            }
        }
    }

    if !log.rejected.is_empty() {
        let lines: Vec<u64> = log.rejected.iter().map(|r| r.line).collect();
        warn!(
            path = %path.display(),
            rejected = log.rejected.len(),
            lines = ?lines,
            "Records: dropped malformed rows"
        );
    }

    Ok(log)
}

/// Replace the file with the header followed by `rows`.
///
/// Content goes to a sibling `.tmp` file first and is renamed over the
/// target, so an interrupted write leaves the previous file intact.
pub fn rewrite(path: &Path, rows: &[SignalRecord]) -> Result<(), StorageError> {
    ensure_parent_dir(path)?;
    let tmp = tmp_path(path);

    {
        let mut writer = Writer::from_path(&tmp).map_err(|e| StorageError::csv(&tmp, e))?;
        writer
            .write_record(CSV_HEADER)
            .map_err(|e| StorageError::csv(&tmp, e))?;
        for row in rows {
            writer
                .write_record(row.to_csv_row())
                .map_err(|e| StorageError::csv(&tmp, e))?;
        }
        writer.flush().map_err(|e| StorageError::io(&tmp, e))?;
    }

    fs::rename(&tmp, path).map_err(|e| StorageError::io(path, e))?;
    debug!(path = %path.display(), rows = rows.len(), "Records: file rewritten");
    Ok(())
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), StorageError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))
        }
        _ => Ok(()),
    }
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
