//! Volatility indicators

pub mod realized;

pub use realized::*;
