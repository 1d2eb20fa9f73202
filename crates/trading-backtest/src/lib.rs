//! Backtesting engine.
//!
//! Replays a long/flat signal series against a single instrument
//! ([`Simulator`]) and derives performance statistics from the resulting
//! equity curve ([`PerformanceStats`]).

mod config;
mod engine;
mod execution;
mod report;
mod simulator;
pub mod statistics;

pub use config::BacktestConfig;
pub use engine::{run_backtest, BacktestEngine};
pub use execution::ExecutionModel;
pub use report::BacktestReport;
pub use simulator::{Ledger, Simulator};
pub use statistics::PerformanceStats;
