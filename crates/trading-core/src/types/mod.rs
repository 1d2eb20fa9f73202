//! Core data types for the backtesting engine.

mod equity;
mod observation;
mod trade;

pub use equity::{equity_values, simple_returns, EquityPoint};
pub use observation::{Observation, SIGNAL_FLAT, SIGNAL_LONG};
pub use trade::{Trade, TradeAction};
