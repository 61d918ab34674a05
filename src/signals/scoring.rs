//! Score normalization into the [0,1] range

use crate::common::math::clamp01;

/// Bounds mapped onto [0,1] for each component score.
pub const IMPULSE_BOUNDS: (f64, f64) = (-0.03, 0.03);
pub const STABLES_BOUNDS: (f64, f64) = (-0.01, 0.01);
pub const STRESS_BOUNDS: (f64, f64) = (0.005, 0.03);

/// Linear rescale of `value` from [lo, hi] onto [0,1], clamped at both ends.
///
/// Degenerate bounds (`hi <= lo`) always give 0.
pub fn normalize(value: f64, lo: f64, hi: f64) -> f64 {
    if hi <= lo {
        return 0.0;
    }
    clamp01((value - lo) / (hi - lo))
}

/// Momentum/volume impulse to Score_ETF
pub fn score_impulse(impulse: f64) -> f64 {
    normalize(impulse, IMPULSE_BOUNDS.0, IMPULSE_BOUNDS.1)
}

/// Stablecoin cap change to Score_Stables.
/// Sign is inverted: a shrinking basket reads as rising risk appetite.
pub fn score_stables(relative_change: f64) -> f64 {
    normalize(-relative_change, STABLES_BOUNDS.0, STABLES_BOUNDS.1)
}

/// Realized volatility to Score_Stress
pub fn score_stress(volatility: f64) -> f64 {
    normalize(volatility, STRESS_BOUNDS.0, STRESS_BOUNDS.1)
}
