//! Signal observations.

use serde::{Deserialize, Serialize};

/// Signal value requesting a long position.
pub const SIGNAL_LONG: i32 = 1;

/// Signal value requesting a flat position.
pub const SIGNAL_FLAT: i32 = 0;

/// A single row of the signal file: when, at what price, and which position
/// the signal generator wants to hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Opaque timestamp token, kept exactly as read
    pub timestamp: String,
    /// Observed market price
    pub price: f64,
    /// Desired position (1 = long, 0 = flat). Other values are kept as-is.
    pub signal: i32,
}

impl Observation {
    /// Create a new observation.
    pub fn new(timestamp: impl Into<String>, price: f64, signal: i32) -> Self {
        Self {
            timestamp: timestamp.into(),
            price,
            signal,
        }
    }

    /// Whether the signal asks to be long.
    #[inline]
    pub fn wants_long(&self) -> bool {
        self.signal == SIGNAL_LONG
    }

    /// Whether the signal asks to be flat.
    #[inline]
    pub fn wants_flat(&self) -> bool {
        self.signal == SIGNAL_FLAT
    }
}
