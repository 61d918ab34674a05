//! Stablecoin dominance change (the risk-appetite proxy)

use crate::common::math;
use crate::models::indicators::StablesFlowIndicator;
use crate::models::market::StableAggregate;

/// rel = total_delta / total_cap, zero for an empty or negative cap.
pub fn calculate_stables_flow(aggregate: &StableAggregate) -> StablesFlowIndicator {
    let relative_change = if aggregate.total_cap <= 0.0 {
        0.0
    } else {
        math::floored_ratio(aggregate.total_delta, aggregate.total_cap)
    };
    StablesFlowIndicator { relative_change }
}
