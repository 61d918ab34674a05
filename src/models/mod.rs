//! Shared data models spanning the pipeline layers.

pub mod indicators;
pub mod market;
pub mod signal;

pub use indicators::{ImpulseIndicator, RealizedVolatilityIndicator, StablesFlowIndicator};
pub use market::{MarketSnapshot, SeriesPoint, StableAggregate};
pub use signal::{RowRejection, ScoreSet, SignalRecord};
