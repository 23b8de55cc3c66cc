//! Snow and soil process functions.
//!
//! Pure per-step pieces of the state machine, kept free of state structs
//! so each stage is testable in isolation. All amounts in mm per step.

/// Partitions precipitation into liquid and solid by the threshold
/// temperature. Solid precipitation is scaled by the snowfall correction
/// factor. Returns `(rain, snowfall)`.
pub fn partition_precipitation(
    precipitation: f64,
    temperature: f64,
    threshold: f64,
    correction: f64,
) -> (f64, f64) {
    if temperature > threshold {
        (precipitation, 0.0)
    } else {
        (0.0, correction * precipitation)
    }
}

/// Degree-day snowmelt, limited by the available snowpack.
pub fn snowmelt(temperature: f64, threshold: f64, factor: f64, snowpack: f64) -> f64 {
    if temperature <= threshold {
        return 0.0;
    }
    (factor * (temperature - threshold)).min(snowpack)
}

/// Refreezing of liquid water in the snowpack below the threshold,
/// limited by the available liquid.
pub fn refreeze(
    temperature: f64,
    threshold: f64,
    factor: f64,
    refreeze_factor: f64,
    liquid: f64,
) -> f64 {
    if temperature >= threshold {
        return 0.0;
    }
    (refreeze_factor * factor * (threshold - temperature)).min(liquid)
}

/// Drains liquid water exceeding the holding capacity of the snowpack.
///
/// The pack retains up to `holding_capacity * snowpack` mm of liquid;
/// the rest leaves as outflow. Returns `(retained, outflow)`.
pub fn snow_outflow(liquid: f64, snowpack: f64, holding_capacity: f64) -> (f64, f64) {
    let retainable = holding_capacity * snowpack;
    if liquid > retainable {
        (retainable, liquid - retainable)
    } else {
        (liquid, 0.0)
    }
}

/// Groundwater recharge from soil input.
///
/// The saturation-excess rule: the recharge fraction per unit input is
/// `(soil_moisture / field_capacity) ^ beta`.
pub fn recharge(soil_input: f64, soil_moisture: f64, field_capacity: f64, beta: f64) -> f64 {
    if soil_input <= 0.0 {
        return 0.0;
    }
    let saturation = (soil_moisture / field_capacity).clamp(0.0, 1.0);
    soil_input * saturation.powf(beta)
}

/// Actual evapotranspiration drawn from soil moisture.
///
/// Proceeds at the potential rate above `threshold_fraction *
/// field_capacity`, reduced linearly with soil moisture below it, and
/// never exceeds the available moisture.
pub fn actual_et(
    pet: f64,
    soil_moisture: f64,
    field_capacity: f64,
    threshold_fraction: f64,
) -> f64 {
    let threshold = threshold_fraction * field_capacity;
    let demand = if soil_moisture >= threshold {
        pet
    } else {
        pet * soil_moisture / threshold
    };
    demand.min(soil_moisture.max(0.0))
}
