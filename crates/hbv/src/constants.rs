//! Parameter metadata and model-wide constants.

/// Number of calibratable parameters.
pub const N_PARAMS: usize = 14;

/// Parameter names, in vector order.
pub const PARAM_NAMES: [&str; N_PARAMS] = [
    "snow_threshold_temp",
    "degree_day_factor",
    "snowfall_correction",
    "refreeze_factor",
    "water_holding_capacity",
    "field_capacity",
    "et_reduction_threshold",
    "beta",
    "percolation_rate",
    "surface_coefficient",
    "upper_coefficient",
    "lower_coefficient",
    "max_upper_storage",
    "routing_base",
];

/// Calibration bounds `(min, max)` per parameter, in vector order.
///
/// These are sampling bounds for calibration, narrower than the hard
/// domain checks in [`crate::HbvParams::validate`].
pub const PARAM_BOUNDS: [(f64, f64); N_PARAMS] = [
    (-2.5, 2.5),   // snow_threshold_temp
    (0.5, 10.0),   // degree_day_factor
    (0.4, 1.4),    // snowfall_correction
    (0.0, 0.2),    // refreeze_factor
    (0.0, 0.2),    // water_holding_capacity
    (50.0, 700.0), // field_capacity
    (0.3, 1.0),    // et_reduction_threshold
    (1.0, 6.0),    // beta
    (0.0, 6.0),    // percolation_rate
    (0.01, 0.99),  // surface_coefficient
    (0.01, 0.5),   // upper_coefficient
    (0.001, 0.2),  // lower_coefficient
    (0.0, 500.0),  // max_upper_storage
    (1.0, 7.0),    // routing_base
];

/// Largest supported triangular routing base.
pub const MAX_ROUTING_BASE: f64 = 7.0;

/// Routing buffer length; covers `MAX_ROUTING_BASE` plus the shift slot.
pub const ROUTING_BUFFER_LEN: usize = 8;
