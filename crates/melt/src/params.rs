//! Degree-day melt parameters.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::MeltError;

/// Degree-day melt parameters, constant across a run.
///
/// Use the builder methods to customise values.
///
/// # Example
///
/// ```
/// use firn_melt::MeltParams;
///
/// let params = MeltParams::new()
///     .with_threshold_temp(1.0);
///
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeltParams {
    melt_factor_snow: f64,
    melt_factor_ice: f64,
    threshold_temp: f64,
}

impl MeltParams {
    /// Creates parameters with defaults.
    ///
    /// Defaults: `melt_factor_snow = 2.8`, `melt_factor_ice = 5.6`
    /// (mm w.e. per degC per day), `threshold_temp = 0.0` degC.
    pub fn new() -> Self {
        Self {
            melt_factor_snow: 2.8,
            melt_factor_ice: 5.6,
            threshold_temp: 0.0,
        }
    }

    /// Sets the melt factor applied over snow cover.
    pub fn with_melt_factor_snow(mut self, factor: f64) -> Self {
        self.melt_factor_snow = factor;
        self
    }

    /// Sets the melt factor applied over bare ice.
    pub fn with_melt_factor_ice(mut self, factor: f64) -> Self {
        self.melt_factor_ice = factor;
        self
    }

    /// Sets the melt threshold temperature in degC.
    pub fn with_threshold_temp(mut self, temp: f64) -> Self {
        self.threshold_temp = temp;
        self
    }

    /// Returns the melt factor applied over snow cover.
    pub fn melt_factor_snow(&self) -> f64 {
        self.melt_factor_snow
    }

    /// Returns the melt factor applied over bare ice.
    pub fn melt_factor_ice(&self) -> f64 {
        self.melt_factor_ice
    }

    /// Returns the melt threshold temperature in degC.
    pub fn threshold_temp(&self) -> f64 {
        self.threshold_temp
    }

    /// Validates this parameter set.
    ///
    /// Melt factors must be finite and non-negative, the threshold finite.
    /// `melt_factor_ice < melt_factor_snow` is a modelling convention
    /// violation, not an error: it is accepted with a warning and left to
    /// calibration bounds to rule out.
    pub fn validate(&self) -> Result<(), MeltError> {
        for (name, value) in [
            ("melt_factor_snow", self.melt_factor_snow),
            ("melt_factor_ice", self.melt_factor_ice),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MeltError::Configuration {
                    name,
                    value,
                    reason: "must be finite and non-negative",
                });
            }
        }
        if !self.threshold_temp.is_finite() {
            return Err(MeltError::Configuration {
                name: "threshold_temp",
                value: self.threshold_temp,
                reason: "must be finite",
            });
        }

        if self.melt_factor_ice < self.melt_factor_snow {
            warn!(
                melt_factor_ice = self.melt_factor_ice,
                melt_factor_snow = self.melt_factor_snow,
                "melt_factor_ice below melt_factor_snow; ice normally melts faster than snow"
            );
        }

        Ok(())
    }
}

impl Default for MeltParams {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = MeltParams::new();
        assert_eq!(p.melt_factor_snow(), 2.8);
        assert_eq!(p.melt_factor_ice(), 5.6);
        assert_eq!(p.threshold_temp(), 0.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn builder_chaining() {
        let p = MeltParams::new()
            .with_melt_factor_snow(3.0)
            .with_melt_factor_ice(7.0)
            .with_threshold_temp(-0.5);
        assert_eq!(p.melt_factor_snow(), 3.0);
        assert_eq!(p.melt_factor_ice(), 7.0);
        assert_eq!(p.threshold_temp(), -0.5);
    }

    #[test]
    fn validate_negative_factor() {
        let p = MeltParams::new().with_melt_factor_snow(-0.1);
        assert!(matches!(
            p.validate(),
            Err(MeltError::Configuration {
                name: "melt_factor_snow",
                ..
            })
        ));
    }

    #[test]
    fn validate_nan_factor() {
        let p = MeltParams::new().with_melt_factor_ice(f64::NAN);
        assert!(p.validate().is_err());
    }

    #[test]
    fn validate_nan_threshold() {
        let p = MeltParams::new().with_threshold_temp(f64::NAN);
        assert!(matches!(
            p.validate(),
            Err(MeltError::Configuration {
                name: "threshold_temp",
                ..
            })
        ));
    }

    #[test]
    fn ice_below_snow_is_accepted() {
        // Warned about, not rejected.
        let p = MeltParams::new()
            .with_melt_factor_snow(5.0)
            .with_melt_factor_ice(2.0);
        assert!(p.validate().is_ok());
    }
}
