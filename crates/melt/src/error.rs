//! Error types for the firn-melt crate.

use firn_meteo::ForcingVariable;

use crate::result::MeltOutput;

/// Error type for all fallible operations in the firn-melt crate.
#[derive(Debug, thiserror::Error)]
pub enum MeltError {
    /// Returned when a parameter is outside its domain.
    #[error("melt parameter {name} = {value} is invalid: {reason}")]
    Configuration {
        /// Name of the offending parameter.
        name: &'static str,
        /// The invalid value.
        value: f64,
        /// Description of the violated constraint.
        reason: &'static str,
    },

    /// Returned when a required forcing value is missing (NaN or infinite)
    /// at a step. Substituting zero would silently corrupt the mass
    /// balance, so the run aborts instead.
    #[error("data gap at step {index}: {variable} is not finite")]
    DataGap {
        /// Index of the offending step.
        index: usize,
        /// Which variable the gap was found in.
        variable: ForcingVariable,
        /// Output up to (excluding) the offending step. `Some` when the
        /// gap aborted a full run, `None` from single-step APIs.
        partial: Option<Box<MeltOutput>>,
    },
}
