//! In-memory signal source.

use trading_core::error::DataError;
use trading_core::traits::SignalSource;
use trading_core::types::Observation;

/// Signal source backed by already-materialized observations, for callers
/// that produce signals without going through a file.
#[derive(Debug, Clone)]
pub struct MemorySignalSource {
    name: String,
    observations: Vec<Observation>,
}

impl MemorySignalSource {
    pub fn new(name: impl Into<String>, observations: Vec<Observation>) -> Self {
        Self {
            name: name.into(),
            observations,
        }
    }
}

impl SignalSource for MemorySignalSource {
    fn load(&self) -> Result<Vec<Observation>, DataError> {
        if self.observations.is_empty() {
            return Err(DataError::NoDataAvailable {
                source_name: self.name.clone(),
                skipped: 0,
            });
        }
        Ok(self.observations.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
