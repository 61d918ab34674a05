//! Liquidity indicators

pub mod stables;

pub use stables::*;
