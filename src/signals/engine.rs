//! Score engine: market data in, four sentiment scores out.

use tracing::debug;

use crate::config::ScoreWeights;
use crate::indicators::liquidity::calculate_stables_flow;
use crate::indicators::momentum::calculate_impulse;
use crate::indicators::volatility::calculate_realized_volatility_default;
use crate::indicators::IndicatorError;
use crate::models::indicators::{ImpulseIndicator, RealizedVolatilityIndicator, StablesFlowIndicator};
use crate::models::market::{MarketSnapshot, StableAggregate};
use crate::models::signal::ScoreSet;
use crate::signals::aggregation::Aggregator;
use crate::signals::scoring;

/// Scores together with the intermediate indicator values behind them.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub impulse: ImpulseIndicator,
    pub stables_flow: StablesFlowIndicator,
    pub volatility: RealizedVolatilityIndicator,
    /// Full precision; round with [`ScoreSet::rounded`] before storing.
    pub scores: ScoreSet,
}

pub struct ScoreEngine;

impl ScoreEngine {
    pub fn evaluate(
        market: &MarketSnapshot,
        stables: &StableAggregate,
        weights: &ScoreWeights,
    ) -> Result<ScoreBreakdown, IndicatorError> {
        let closes = market.closes();
        let volumes = market.volume_values();

        let impulse = calculate_impulse(&closes, &volumes)?;
        let stables_flow = calculate_stables_flow(stables);
        let volatility = calculate_realized_volatility_default(&closes);

        let etf = scoring::score_impulse(impulse.value);
        let stables_score = scoring::score_stables(stables_flow.relative_change);
        let stress = scoring::score_stress(volatility.value);
        let weighted = Aggregator::weighted_score(etf, stables_score, stress, weights);

        debug!(
            momentum = impulse.momentum,
            volume_z = impulse.volume_z,
            impulse = impulse.value,
            stables_rel = stables_flow.relative_change,
            volatility = volatility.value,
            "ScoreEngine: indicators computed"
        );

        Ok(ScoreBreakdown {
            impulse,
            stables_flow,
            volatility,
            scores: ScoreSet {
                etf,
                stables: stables_score,
                stress,
                weighted,
            },
        })
    }
}
