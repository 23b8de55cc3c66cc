//! A single forcing record.

use std::fmt;

use chrono::NaiveDateTime;

/// One meteorological record: temperature, precipitation, and potential
/// evapotranspiration at a timestamp.
///
/// Units: degC, mm per step, mm per step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeteoSample {
    /// Timestamp of the record.
    pub timestamp: NaiveDateTime,
    /// Air temperature in degC.
    pub temperature: f64,
    /// Precipitation sum over the step in mm.
    pub precipitation: f64,
    /// Potential evapotranspiration over the step in mm.
    pub pet: f64,
}

/// Names one of the three forcing variables.
///
/// Model crates use this to report which variable a data gap was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForcingVariable {
    /// Air temperature.
    Temperature,
    /// Precipitation.
    Precipitation,
    /// Potential evapotranspiration.
    Pet,
}

impl fmt::Display for ForcingVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ForcingVariable::Temperature => "temperature",
            ForcingVariable::Precipitation => "precipitation",
            ForcingVariable::Pet => "pet",
        };
        f.write_str(name)
    }
}
