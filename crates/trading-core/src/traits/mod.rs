//! Core traits for the backtesting engine.

mod signal_source;

pub use signal_source::SignalSource;
