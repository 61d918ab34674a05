//! Flat-file storage of signal records and the latest snapshot.

pub mod error;
pub mod ledger;
pub mod records;

pub use error::StorageError;
pub use ledger::*;
pub use records::{rewrite, sanitize_and_load, LoadedLog, RejectedRow};
