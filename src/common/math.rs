//! Small statistics helpers shared by the indicators.

/// Floor applied to denominators that could reach zero.
pub const EPSILON: f64 = 1e-9;

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation, `None` for an empty slice.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// The last `n` elements, or the whole slice when shorter.
pub fn tail(values: &[f64], n: usize) -> &[f64] {
    &values[values.len().saturating_sub(n)..]
}

/// `numerator / max(denominator, EPSILON)`
pub fn floored_ratio(numerator: f64, denominator: f64) -> f64 {
    numerator / denominator.max(EPSILON)
}

/// Simple period-over-period returns.
pub fn simple_returns(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .map(|pair| floored_ratio(pair[1] - pair[0], pair[0]))
        .collect()
}

pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Round half away from zero to `digits` decimals.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}
