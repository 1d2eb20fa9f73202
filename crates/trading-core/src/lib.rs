//! Core types and traits for the backtesting engine.
//!
//! This crate provides the shared building blocks:
//! - Signal observations read from the signal file
//! - Trades and equity points produced by a simulation
//! - The `SignalSource` trait implemented by loaders
//! - Error types

pub mod types;
pub mod traits;
pub mod error;

pub use error::{BacktestError, BacktestResult, DataError};
pub use types::*;
pub use traits::*;
