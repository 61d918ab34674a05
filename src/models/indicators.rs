use serde::{Deserialize, Serialize};

/// Momentum plus volume impulse of the reference asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpulseIndicator {
    /// Relative change between the two overlapping 14-day SMAs.
    pub momentum: f64,
    /// Z-score of the latest volume against the trailing window.
    pub volume_z: f64,
    pub value: f64,
    pub window: u32,
}

/// Realized volatility of simple daily returns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RealizedVolatilityIndicator {
    pub value: f64,
    pub window: u32,
}

/// 24h relative change of the stablecoin basket's market cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StablesFlowIndicator {
    pub relative_change: f64,
}
