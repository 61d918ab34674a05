//! Momentum + volume impulse (the ETF-flow proxy)

use crate::common::math;
use crate::indicators::IndicatorError;
use crate::models::indicators::ImpulseIndicator;

/// Length of each moving average and of the volume window.
pub const IMPULSE_WINDOW: usize = 14;
/// Two overlapping 14-point windows need 15 closes.
pub const MIN_POINTS: usize = IMPULSE_WINDOW + 1;

/// Relative change from the SMA ending one day ago to the SMA ending today.
///
/// `sma_prev` covers closes[-15..=-2], `sma_now` covers closes[-14..].
pub fn calculate_momentum(closes: &[f64]) -> Result<f64, IndicatorError> {
    require("closes", closes, MIN_POINTS)?;

    let n = closes.len();
    let prev = &closes[n - MIN_POINTS..n - 1];
    let now = &closes[n - IMPULSE_WINDOW..];

    let sma_prev = math::mean(prev).unwrap_or_default();
    let sma_now = math::mean(now).unwrap_or_default();
    Ok(math::floored_ratio(sma_now - sma_prev, sma_prev))
}

/// Z-score of the latest volume against the last 14 volumes.
///
/// A flat window has no spread, so its deviation is replaced by 1.0.
pub fn calculate_volume_zscore(volumes: &[f64]) -> Result<f64, IndicatorError> {
    require("volumes", volumes, MIN_POINTS)?;

    let window = math::tail(volumes, IMPULSE_WINDOW);
    let mean = math::mean(window).unwrap_or_default();
    let std = match math::population_std_dev(window) {
        Some(std) if std != 0.0 => std,
        _ => 1.0,
    };
    let latest = volumes.last().copied().unwrap_or_default();
    Ok((latest - mean) / std)
}

/// impulse = 0.5 * momentum + 0.5 * (z / 2)
pub fn calculate_impulse(closes: &[f64], volumes: &[f64]) -> Result<ImpulseIndicator, IndicatorError> {
    let momentum = calculate_momentum(closes)?;
    let volume_z = calculate_volume_zscore(volumes)?;

    Ok(ImpulseIndicator {
        momentum,
        volume_z,
        value: 0.5 * momentum + 0.5 * (volume_z / 2.0),
        window: IMPULSE_WINDOW as u32,
    })
}

fn require(series: &'static str, values: &[f64], required: usize) -> Result<(), IndicatorError> {
    if values.len() < required {
        return Err(IndicatorError::InsufficientData {
            series,
            required,
            actual: values.len(),
        });
    }
    Ok(())
}
