//! Realized volatility of daily returns (the stress proxy)

use crate::common::math;
use crate::models::indicators::RealizedVolatilityIndicator;

pub const VOLATILITY_WINDOW: usize = 14;

/// Population std-dev of the last `window` simple returns.
///
/// Returns are taken over the whole close series first; fewer than two
/// returns in the window give zero volatility.
pub fn calculate_realized_volatility(closes: &[f64], window: usize) -> RealizedVolatilityIndicator {
    let returns = math::simple_returns(closes);
    let recent = math::tail(&returns, window);

    let value = if recent.len() < 2 {
        0.0
    } else {
        math::population_std_dev(recent).unwrap_or_default().abs()
    };

    RealizedVolatilityIndicator {
        value,
        window: window as u32,
    }
}

pub fn calculate_realized_volatility_default(closes: &[f64]) -> RealizedVolatilityIndicator {
    calculate_realized_volatility(closes, VOLATILITY_WINDOW)
}
