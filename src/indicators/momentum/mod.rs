//! Momentum indicators

pub mod impulse;

pub use impulse::*;
