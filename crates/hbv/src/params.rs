//! HBV model parameters.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_ROUTING_BASE, N_PARAMS};
use crate::error::HbvError;

/// HBV parameters, constant across a run. Calibration searches this
/// vector.
///
/// Use the builder methods to customise values; [`HbvParams::validate`]
/// rejects out-of-domain combinations before any stepping happens.
///
/// # Example
///
/// ```
/// use firn_hbv::HbvParams;
///
/// let params = HbvParams::new()
///     .with_beta(2.0)
///     .with_percolation_rate(1.5);
///
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HbvParams {
    snow_threshold_temp: f64,
    degree_day_factor: f64,
    snowfall_correction: f64,
    refreeze_factor: f64,
    water_holding_capacity: f64,
    field_capacity: f64,
    et_reduction_threshold: f64,
    beta: f64,
    percolation_rate: f64,
    surface_coefficient: f64,
    upper_coefficient: f64,
    lower_coefficient: f64,
    max_upper_storage: f64,
    routing_base: f64,
}

impl HbvParams {
    /// Creates parameters with defaults.
    ///
    /// Defaults: `snow_threshold_temp = 0.0`, `degree_day_factor = 5.0`,
    /// `snowfall_correction = 0.7`, `refreeze_factor = 0.05`,
    /// `water_holding_capacity = 0.1`, `field_capacity = 250.0`,
    /// `et_reduction_threshold = 0.7`, `beta = 1.0`,
    /// `percolation_rate = 1.7`, `surface_coefficient = 0.055`,
    /// `upper_coefficient = 0.055`, `lower_coefficient = 0.04`,
    /// `max_upper_storage = 120.0`, `routing_base = 3.0`.
    pub fn new() -> Self {
        Self {
            snow_threshold_temp: 0.0,
            degree_day_factor: 5.0,
            snowfall_correction: 0.7,
            refreeze_factor: 0.05,
            water_holding_capacity: 0.1,
            field_capacity: 250.0,
            et_reduction_threshold: 0.7,
            beta: 1.0,
            percolation_rate: 1.7,
            surface_coefficient: 0.055,
            upper_coefficient: 0.055,
            lower_coefficient: 0.04,
            max_upper_storage: 120.0,
            routing_base: 3.0,
        }
    }

    /// Sets the rain/snow partition temperature in degC.
    pub fn with_snow_threshold_temp(mut self, value: f64) -> Self {
        self.snow_threshold_temp = value;
        self
    }

    /// Sets the internal degree-day melt factor in mm per degC per step.
    pub fn with_degree_day_factor(mut self, value: f64) -> Self {
        self.degree_day_factor = value;
        self
    }

    /// Sets the snowfall correction factor (gauge undercatch).
    pub fn with_snowfall_correction(mut self, value: f64) -> Self {
        self.snowfall_correction = value;
        self
    }

    /// Sets the refreezing factor for liquid water in the snowpack.
    pub fn with_refreeze_factor(mut self, value: f64) -> Self {
        self.refreeze_factor = value;
        self
    }

    /// Sets the liquid water holding capacity of the snowpack, as a
    /// fraction of the frozen pack.
    pub fn with_water_holding_capacity(mut self, value: f64) -> Self {
        self.water_holding_capacity = value;
        self
    }

    /// Sets the soil field capacity in mm.
    pub fn with_field_capacity(mut self, value: f64) -> Self {
        self.field_capacity = value;
        self
    }

    /// Sets the soil-moisture fraction of field capacity above which ET
    /// proceeds at the potential rate.
    pub fn with_et_reduction_threshold(mut self, value: f64) -> Self {
        self.et_reduction_threshold = value;
        self
    }

    /// Sets the soil shape exponent of the recharge rule.
    pub fn with_beta(mut self, value: f64) -> Self {
        self.beta = value;
        self
    }

    /// Sets the maximum percolation rate to the lower reservoir in mm per
    /// step.
    pub fn with_percolation_rate(mut self, value: f64) -> Self {
        self.percolation_rate = value;
        self
    }

    /// Sets the threshold surface-flow coefficient of the upper reservoir.
    pub fn with_surface_coefficient(mut self, value: f64) -> Self {
        self.surface_coefficient = value;
        self
    }

    /// Sets the linear outflow coefficient of the upper reservoir.
    pub fn with_upper_coefficient(mut self, value: f64) -> Self {
        self.upper_coefficient = value;
        self
    }

    /// Sets the linear outflow coefficient of the lower reservoir.
    pub fn with_lower_coefficient(mut self, value: f64) -> Self {
        self.lower_coefficient = value;
        self
    }

    /// Sets the upper-reservoir threshold above which surface flow
    /// activates, in mm.
    pub fn with_max_upper_storage(mut self, value: f64) -> Self {
        self.max_upper_storage = value;
        self
    }

    /// Sets the triangular routing base in steps.
    pub fn with_routing_base(mut self, value: f64) -> Self {
        self.routing_base = value;
        self
    }

    // --- Accessors ---

    /// Returns the rain/snow partition temperature in degC.
    pub fn snow_threshold_temp(&self) -> f64 {
        self.snow_threshold_temp
    }

    /// Returns the internal degree-day melt factor.
    pub fn degree_day_factor(&self) -> f64 {
        self.degree_day_factor
    }

    /// Returns the snowfall correction factor.
    pub fn snowfall_correction(&self) -> f64 {
        self.snowfall_correction
    }

    /// Returns the refreezing factor.
    pub fn refreeze_factor(&self) -> f64 {
        self.refreeze_factor
    }

    /// Returns the snowpack liquid water holding capacity.
    pub fn water_holding_capacity(&self) -> f64 {
        self.water_holding_capacity
    }

    /// Returns the soil field capacity in mm.
    pub fn field_capacity(&self) -> f64 {
        self.field_capacity
    }

    /// Returns the ET reduction threshold fraction.
    pub fn et_reduction_threshold(&self) -> f64 {
        self.et_reduction_threshold
    }

    /// Returns the soil shape exponent.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Returns the maximum percolation rate in mm per step.
    pub fn percolation_rate(&self) -> f64 {
        self.percolation_rate
    }

    /// Returns the threshold surface-flow coefficient.
    pub fn surface_coefficient(&self) -> f64 {
        self.surface_coefficient
    }

    /// Returns the upper-reservoir outflow coefficient.
    pub fn upper_coefficient(&self) -> f64 {
        self.upper_coefficient
    }

    /// Returns the lower-reservoir outflow coefficient.
    pub fn lower_coefficient(&self) -> f64 {
        self.lower_coefficient
    }

    /// Returns the surface-flow activation threshold in mm.
    pub fn max_upper_storage(&self) -> f64 {
        self.max_upper_storage
    }

    /// Returns the triangular routing base in steps.
    pub fn routing_base(&self) -> f64 {
        self.routing_base
    }

    /// Validates this parameter set against its hard domain.
    ///
    /// These are the constraints the state machine needs to stay
    /// well-defined; calibration bounds
    /// ([`crate::constants::PARAM_BOUNDS`]) are narrower.
    pub fn validate(&self) -> Result<(), HbvError> {
        let checks: [(&'static str, f64, bool, &'static str); N_PARAMS] = [
            (
                "snow_threshold_temp",
                self.snow_threshold_temp,
                self.snow_threshold_temp.is_finite(),
                "must be finite",
            ),
            (
                "degree_day_factor",
                self.degree_day_factor,
                self.degree_day_factor.is_finite() && self.degree_day_factor >= 0.0,
                "must be finite and non-negative",
            ),
            (
                "snowfall_correction",
                self.snowfall_correction,
                self.snowfall_correction.is_finite() && self.snowfall_correction > 0.0,
                "must be finite and positive",
            ),
            (
                "refreeze_factor",
                self.refreeze_factor,
                self.refreeze_factor.is_finite() && self.refreeze_factor >= 0.0,
                "must be finite and non-negative",
            ),
            (
                "water_holding_capacity",
                self.water_holding_capacity,
                self.water_holding_capacity.is_finite() && self.water_holding_capacity >= 0.0,
                "must be finite and non-negative",
            ),
            (
                "field_capacity",
                self.field_capacity,
                self.field_capacity.is_finite() && self.field_capacity > 0.0,
                "must be finite and positive",
            ),
            (
                "et_reduction_threshold",
                self.et_reduction_threshold,
                self.et_reduction_threshold.is_finite()
                    && self.et_reduction_threshold > 0.0
                    && self.et_reduction_threshold <= 1.0,
                "must be in (0, 1]",
            ),
            (
                "beta",
                self.beta,
                self.beta.is_finite() && self.beta > 0.0,
                "must be finite and positive",
            ),
            (
                "percolation_rate",
                self.percolation_rate,
                self.percolation_rate.is_finite() && self.percolation_rate >= 0.0,
                "must be finite and non-negative",
            ),
            (
                "surface_coefficient",
                self.surface_coefficient,
                self.surface_coefficient.is_finite()
                    && (0.0..=1.0).contains(&self.surface_coefficient),
                "must be in [0, 1]",
            ),
            (
                "upper_coefficient",
                self.upper_coefficient,
                self.upper_coefficient.is_finite() && (0.0..=1.0).contains(&self.upper_coefficient),
                "must be in [0, 1]",
            ),
            (
                "lower_coefficient",
                self.lower_coefficient,
                self.lower_coefficient.is_finite() && (0.0..=1.0).contains(&self.lower_coefficient),
                "must be in [0, 1]",
            ),
            (
                "max_upper_storage",
                self.max_upper_storage,
                self.max_upper_storage.is_finite() && self.max_upper_storage >= 0.0,
                "must be finite and non-negative",
            ),
            (
                "routing_base",
                self.routing_base,
                self.routing_base.is_finite()
                    && (1.0..=MAX_ROUTING_BASE).contains(&self.routing_base),
                "must be in [1, 7]",
            ),
        ];

        for (name, value, ok, reason) in checks {
            if !ok {
                return Err(HbvError::Configuration {
                    name,
                    value,
                    reason,
                });
            }
        }
        Ok(())
    }

    /// Builds parameters from a vector in [`crate::constants::PARAM_NAMES`]
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`HbvError::Configuration`] for a wrong-length slice or an
    /// out-of-domain value.
    pub fn from_array(values: &[f64]) -> Result<Self, HbvError> {
        if values.len() != N_PARAMS {
            return Err(HbvError::Configuration {
                name: "parameter vector",
                value: values.len() as f64,
                reason: "must have 14 elements",
            });
        }
        let params = Self {
            snow_threshold_temp: values[0],
            degree_day_factor: values[1],
            snowfall_correction: values[2],
            refreeze_factor: values[3],
            water_holding_capacity: values[4],
            field_capacity: values[5],
            et_reduction_threshold: values[6],
            beta: values[7],
            percolation_rate: values[8],
            surface_coefficient: values[9],
            upper_coefficient: values[10],
            lower_coefficient: values[11],
            max_upper_storage: values[12],
            routing_base: values[13],
        };
        params.validate()?;
        Ok(params)
    }

    /// Returns the parameters as a vector in
    /// [`crate::constants::PARAM_NAMES`] order.
    pub fn to_array(&self) -> [f64; N_PARAMS] {
        [
            self.snow_threshold_temp,
            self.degree_day_factor,
            self.snowfall_correction,
            self.refreeze_factor,
            self.water_holding_capacity,
            self.field_capacity,
            self.et_reduction_threshold,
            self.beta,
            self.percolation_rate,
            self.surface_coefficient,
            self.upper_coefficient,
            self.lower_coefficient,
            self.max_upper_storage,
            self.routing_base,
        ]
    }
}

impl Default for HbvParams {
    fn default() -> Self {
        Self::new()
    }
}
