//! Signal sources for the backtesting engine.

mod csv_source;
mod memory;

pub use csv_source::{CsvSignalSource, LoadedSignals};
pub use memory::MemorySignalSource;
