//! Error types for the firn-calibrate crate.

use firn_hbv::HbvError;

/// Error type for all fallible operations in the firn-calibrate crate.
#[derive(Debug, thiserror::Error)]
pub enum CalibrateError {
    /// Returned when the observed series has zero variance, which leaves
    /// the Nash-Sutcliffe denominator zero and the score undefined.
    #[error("objective undefined: observed series has zero variance")]
    UndefinedObjective,

    /// Returned when observed and simulated series differ in length.
    #[error("length mismatch: observed has {observed} elements, simulated has {simulated}")]
    LengthMismatch {
        /// Length of the observed series.
        observed: usize,
        /// Length of the simulated series.
        simulated: usize,
    },

    /// Returned when input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when input contains NaN or infinity.
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when a sampling bound refers to an unknown parameter.
    #[error("unknown parameter: {name}")]
    UnknownParameter {
        /// The unrecognised parameter name.
        name: String,
    },

    /// Returned when a sampling bound is malformed.
    #[error("invalid bounds for {name}: [{min}, {max}]")]
    InvalidBounds {
        /// Name of the parameter.
        name: &'static str,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// A trial's model run failed.
    #[error(transparent)]
    Model(#[from] HbvError),
}
