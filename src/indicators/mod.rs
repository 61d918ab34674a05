pub mod error;

pub mod liquidity;
pub mod momentum;
pub mod volatility;

pub use error::IndicatorError;
