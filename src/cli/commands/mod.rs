//! CLI command implementations.

pub mod analyze;
pub mod backtest;
pub mod validate;
