//! Score set and the persisted signal record.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::math::round_to;
use crate::config::RecordLabels;

/// Timestamp layout written by this crate.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
/// Older layout still accepted on load.
pub const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const SCORE_DECIMALS: i32 = 6;

pub const CSV_HEADER: [&str; 10] = [
    "timestamp",
    "pair",
    "action",
    "leverage",
    "confidence",
    "note",
    "Score_ETF",
    "Score_Stables",
    "Score_Stress",
    "Score_Gewichtet",
];

/// The four sentiment scores, each in [0,1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    #[serde(rename = "Score_ETF")]
    pub etf: f64,
    #[serde(rename = "Score_Stables")]
    pub stables: f64,
    #[serde(rename = "Score_Stress")]
    pub stress: f64,
    #[serde(rename = "Score_Weighted")]
    pub weighted: f64,
}

impl ScoreSet {
    /// Copy with every score rounded for storage and display.
    pub fn rounded(&self) -> Self {
        Self {
            etf: round_to(self.etf, SCORE_DECIMALS),
            stables: round_to(self.stables, SCORE_DECIMALS),
            stress: round_to(self.stress, SCORE_DECIMALS),
            weighted: round_to(self.weighted, SCORE_DECIMALS),
        }
    }
}

/// Why a persisted row was dropped on load.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowRejection {
    #[error("expected 10 fields, found {found}")]
    FieldCount { found: usize },
    #[error("unrecognized timestamp '{0}'")]
    Timestamp(String),
    #[error("leverage '{0}' is not an integer")]
    Leverage(String),
    #[error("{column} value '{value}' is not a number")]
    Number { column: &'static str, value: String },
    #[error("unreadable row: {0}")]
    Unreadable(String),
}

/// One line of the cumulative or monthly log.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalRecord {
    pub timestamp: DateTime<Utc>,
    pub pair: String,
    pub action: String,
    pub leverage: i64,
    pub confidence: f64,
    pub note: String,
    pub scores: ScoreSet,
}

impl SignalRecord {
    /// Record for a freshly computed score set. Leverage is always 0 and the
    /// timestamp is truncated to whole seconds.
    pub fn from_scores(timestamp: DateTime<Utc>, labels: &RecordLabels, scores: ScoreSet) -> Self {
        let scores = scores.rounded();
        Self {
            timestamp: timestamp.with_nanosecond(0).unwrap_or(timestamp),
            pair: labels.pair.clone(),
            action: labels.action.clone(),
            leverage: 0,
            confidence: scores.weighted,
            note: labels.note.clone(),
            scores,
        }
    }

    /// Identity used for monthly deduplication.
    pub fn dedup_key(&self) -> (DateTime<Utc>, &str, &str) {
        (self.timestamp, self.pair.as_str(), self.action.as_str())
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn to_csv_row(&self) -> [String; 10] {
        [
            self.formatted_timestamp(),
            self.pair.clone(),
            self.action.clone(),
            self.leverage.to_string(),
            format_score(self.confidence),
            self.note.clone(),
            format_score(self.scores.etf),
            format_score(self.scores.stables),
            format_score(self.scores.stress),
            format_score(self.scores.weighted),
        ]
    }

    /// Validate and parse a row read from disk.
    pub fn from_csv_row(row: &StringRecord) -> Result<Self, RowRejection> {
        if row.len() != CSV_HEADER.len() {
            return Err(RowRejection::FieldCount { found: row.len() });
        }
        let field = |i: usize| row.get(i).unwrap_or_default();

        let timestamp = parse_timestamp(field(0))
            .ok_or_else(|| RowRejection::Timestamp(field(0).to_string()))?;
        let leverage = field(3)
            .trim()
            .parse::<i64>()
            .map_err(|_| RowRejection::Leverage(field(3).to_string()))?;
        let number = |i: usize| {
            field(i)
                .trim()
                .parse::<f64>()
                .map_err(|_| RowRejection::Number {
                    column: CSV_HEADER[i],
                    value: field(i).to_string(),
                })
        };

        Ok(Self {
            timestamp,
            pair: field(1).to_string(),
            action: field(2).to_string(),
            leverage,
            confidence: number(4)?,
            note: field(5).to_string(),
            scores: ScoreSet {
                etf: number(6)?,
                stables: number(7)?,
                stress: number(8)?,
                weighted: number(9)?,
            },
        })
    }
}

/// Accepts both the current and the legacy timestamp layout, read as UTC.
///
/// Fields must be zero-padded with no surrounding whitespace or sign.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    [
        (TIMESTAMP_FORMAT, "####-##-##T##:##:##Z"),
        (LEGACY_TIMESTAMP_FORMAT, "####-##-## ##:##:##"),
    ]
    .iter()
    .filter(|(_, shape)| matches_shape(raw, shape))
    .find_map(|(format, _)| NaiveDateTime::parse_from_str(raw, format).ok())
    .map(|naive| naive.and_utc())
}

/// `#` in `shape` stands for one ASCII digit, anything else must match as-is.
fn matches_shape(raw: &str, shape: &str) -> bool {
    raw.len() == shape.len()
        && raw.bytes().zip(shape.bytes()).all(|(c, s)| match s {
            b'#' => c.is_ascii_digit(),
            _ => c == s,
        })
}

pub fn format_score(value: f64) -> String {
    format!("{:.6}", value)
}
