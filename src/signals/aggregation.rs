//! Weighted combination of the component scores

use crate::common::math::clamp01;
use crate::config::ScoreWeights;

pub struct Aggregator;

impl Aggregator {
    /// clamp01(w_etf * etf + w_stables * stables + w_stress * stress)
    ///
    /// Weights are taken as configured; they need not sum to 1. A NaN sum
    /// (NaN weight, or an infinite weight times a zero score) saturates to 1.
    pub fn weighted_score(etf: f64, stables: f64, stress: f64, weights: &ScoreWeights) -> f64 {
        let sum = weights.etf * etf + weights.stables * stables + weights.stress * stress;
        if sum.is_nan() {
            return 1.0;
        }
        clamp01(sum)
    }
}
