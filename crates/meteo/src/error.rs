//! Error types for the firn-meteo crate.

/// Error type for all fallible operations in the firn-meteo crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MeteoError {
    /// Returned when the forcing vectors differ in length.
    #[error("length mismatch: timestamps has {timestamps} elements, {variable} has {got}")]
    LengthMismatch {
        /// Length of the timestamp vector.
        timestamps: usize,
        /// Name of the offending variable.
        variable: &'static str,
        /// Length of the offending vector.
        got: usize,
    },

    /// Returned when there are too few samples to define a step size.
    #[error("insufficient data: got {n} samples, need at least {min}")]
    InsufficientData {
        /// Number of samples provided.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when timestamps are not strictly increasing.
    #[error("timestamps not strictly increasing at index {index}")]
    NonMonotonicTimestamps {
        /// Index of the first timestamp that does not increase.
        index: usize,
    },

    /// Returned when the spacing between timestamps is not uniform.
    #[error("irregular step at index {index}: expected {expected_s} s, got {got_s} s")]
    IrregularStep {
        /// Index of the sample with the deviating step.
        index: usize,
        /// Step size implied by the first two timestamps, in seconds.
        expected_s: i64,
        /// Step size actually found, in seconds.
        got_s: i64,
    },

    /// Returned when precipitation or PET is negative.
    #[error("{variable} is negative at index {index}: {value}")]
    NegativeValue {
        /// Name of the offending variable.
        variable: &'static str,
        /// Index of the offending sample.
        index: usize,
        /// The negative value.
        value: f64,
    },

    /// Returned when a window selection contains no samples.
    #[error("window [{start}, {end}] contains no samples")]
    EmptyWindow {
        /// Requested window start.
        start: chrono::NaiveDateTime,
        /// Requested window end.
        end: chrono::NaiveDateTime,
    },
}
