//! Error types for the firn-hbv crate.

use std::fmt;

use crate::result::HbvOutput;

/// Names a per-step model input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputVariable {
    /// Air temperature.
    Temperature,
    /// Precipitation.
    Precipitation,
    /// Potential evapotranspiration.
    Pet,
    /// Externally supplied snowmelt.
    ExternalMelt,
}

impl fmt::Display for InputVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputVariable::Temperature => "temperature",
            InputVariable::Precipitation => "precipitation",
            InputVariable::Pet => "pet",
            InputVariable::ExternalMelt => "external melt",
        };
        f.write_str(name)
    }
}

/// Error type for all fallible operations in the firn-hbv crate.
#[derive(Debug, thiserror::Error)]
pub enum HbvError {
    /// Returned when a parameter is outside its domain. Detected at
    /// construction or run start, never mid-run.
    #[error("hbv parameter {name} = {value} is invalid: {reason}")]
    Configuration {
        /// Name of the offending parameter.
        name: &'static str,
        /// The invalid value.
        value: f64,
        /// Description of the violated constraint.
        reason: &'static str,
    },

    /// Returned when an external melt series does not match the forcing
    /// series in length.
    #[error("length mismatch: series has {series} steps, external melt has {melt}")]
    LengthMismatch {
        /// Length of the forcing series.
        series: usize,
        /// Length of the external melt slice.
        melt: usize,
    },

    /// Returned when a required input is missing (NaN or infinite) at a
    /// step. The run aborts at that step; output before it is preserved.
    #[error("data gap at step {index}: {variable} is not finite")]
    DataGap {
        /// Index of the offending step.
        index: usize,
        /// Which input the gap was found in.
        variable: InputVariable,
        /// Output up to (excluding) the offending step. `Some` when the
        /// gap aborted a full run, `None` from single-step APIs.
        partial: Option<Box<HbvOutput>>,
    },
}
