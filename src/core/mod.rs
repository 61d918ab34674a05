//! Core application primitives (fetch layer, run orchestration)

pub mod http;
pub mod runtime;

pub use http::*;
pub use runtime::*;
