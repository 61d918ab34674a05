use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("insufficient data: {series} has {actual} points, need at least {required}")]
    InsufficientData {
        series: &'static str,
        required: usize,
        actual: usize,
    },
}
