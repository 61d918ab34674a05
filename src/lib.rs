//! Market sentiment score builder.
//!
//! Fetches reference-asset and stablecoin market data, derives four [0,1]
//! sentiment scores and appends them to flat-file logs.

pub mod common;
pub mod config;
pub mod core;
pub mod db;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;
