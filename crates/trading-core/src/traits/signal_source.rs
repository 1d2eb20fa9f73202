//! Signal source trait definitions.

use crate::error::DataError;
use crate::types::Observation;

/// Anything that can produce an ordered sequence of observations.
///
/// Implementations must preserve input order; the engine never re-sorts.
pub trait SignalSource {
    /// Load every valid observation.
    ///
    /// # Returns
    /// The observations in source order, or an error when the source cannot
    /// be read or yields no usable rows.
    fn load(&self) -> Result<Vec<Observation>, DataError>;

    /// Human-readable name of the source, used in logs and errors.
    fn name(&self) -> &str;
}
