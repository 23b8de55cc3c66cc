//! The per-step state transform.

use tracing::debug;

use crate::params::HbvParams;
use crate::processes;
use crate::routing;
use crate::state::{ClampEvent, HbvState, StorageKind};

/// Inputs to a single step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInput {
    /// Air temperature in degC.
    pub temperature: f64,
    /// Precipitation in mm per step.
    pub precipitation: f64,
    /// Potential evapotranspiration in mm per step.
    pub pet: f64,
    /// Snowmelt supplied by an external melt model, in mm per step.
    /// `None` uses the internal degree-day term. External melt may exceed
    /// the snowpack (the glacier supplies the excess); the snowpack is
    /// floored at zero and the clamp recorded.
    pub external_melt: Option<f64>,
}

/// Fluxes and post-step storages of a single step. All amounts in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepFluxes {
    /// Liquid precipitation.
    pub rain: f64,
    /// Solid precipitation after the snowfall correction.
    pub snowfall: f64,
    /// Snowmelt applied this step.
    pub snowmelt: f64,
    /// Liquid water refrozen into the pack.
    pub refreeze: f64,
    /// Liquid input reaching the soil (rain + snowpack outflow).
    pub soil_input: f64,
    /// Recharge passed to the upper reservoir.
    pub recharge: f64,
    /// Actual evapotranspiration.
    pub actual_et: f64,
    /// Percolation from the upper to the lower reservoir.
    pub percolation: f64,
    /// Threshold-activated surface flow from the upper reservoir.
    pub surface_flow: f64,
    /// Linear interflow from the upper reservoir.
    pub interflow: f64,
    /// Baseflow from the lower reservoir.
    pub baseflow: f64,
    /// Routed discharge leaving the catchment this step.
    pub discharge: f64,
    /// Snowpack after the step.
    pub snowpack: f64,
    /// Snowpack liquid water after the step.
    pub snow_liquid: f64,
    /// Soil moisture after the step.
    pub soil_moisture: f64,
    /// Upper reservoir after the step.
    pub upper_storage: f64,
    /// Lower reservoir after the step.
    pub lower_storage: f64,
}

/// Clips a raw storage update at zero, recording the deficit.
fn clamp(
    raw: f64,
    storage: StorageKind,
    step_index: usize,
    events: &mut Vec<ClampEvent>,
) -> f64 {
    if raw < 0.0 {
        debug!(step = step_index, storage = %storage, deficit = -raw, "storage clamped to zero");
        events.push(ClampEvent {
            step: step_index,
            storage,
            deficit: -raw,
        });
        0.0
    } else {
        raw
    }
}

/// Executes one step of the state machine.
///
/// The update order is fixed (snow, soil, evapotranspiration,
/// percolation, routing) and later stages read the earlier stages'
/// results within the same step. The transform is deterministic; the only
/// side effect is appending to `events` when a storage is clamped.
pub fn step(
    state: &HbvState,
    params: &HbvParams,
    input: &StepInput,
    weights: &[f64],
    step_index: usize,
    events: &mut Vec<ClampEvent>,
) -> (HbvState, StepFluxes) {
    // 1. Snow routine.
    let (rain, snowfall) = processes::partition_precipitation(
        input.precipitation,
        input.temperature,
        params.snow_threshold_temp(),
        params.snowfall_correction(),
    );
    let snowmelt = match input.external_melt {
        Some(melt) => melt,
        None => processes::snowmelt(
            input.temperature,
            params.snow_threshold_temp(),
            params.degree_day_factor(),
            state.snowpack,
        ),
    };
    let refreeze = processes::refreeze(
        input.temperature,
        params.snow_threshold_temp(),
        params.degree_day_factor(),
        params.refreeze_factor(),
        state.snow_liquid,
    );

    let snowpack = clamp(
        state.snowpack + snowfall - snowmelt + refreeze,
        StorageKind::Snowpack,
        step_index,
        events,
    );
    let liquid_raw = clamp(
        state.snow_liquid + snowmelt - refreeze,
        StorageKind::SnowLiquid,
        step_index,
        events,
    );
    let (snow_liquid, snow_out) =
        processes::snow_outflow(liquid_raw, snowpack, params.water_holding_capacity());

    let soil_input = rain + snow_out;

    // 2. Soil routine.
    let recharge = processes::recharge(
        soil_input,
        state.soil_moisture,
        params.field_capacity(),
        params.beta(),
    );
    let infiltrated = state.soil_moisture + (soil_input - recharge);

    // Wet soil plus a large input can overshoot field capacity even after
    // the recharge split; the surplus joins the recharge rather than
    // vanishing.
    let surplus = (infiltrated - params.field_capacity()).max(0.0);
    let recharge = recharge + surplus;
    let infiltrated = infiltrated - surplus;

    // 3. Evapotranspiration, drawn from the post-infiltration moisture.
    let actual_et = processes::actual_et(
        input.pet,
        infiltrated,
        params.field_capacity(),
        params.et_reduction_threshold(),
    );
    let soil_moisture = clamp(
        infiltrated - actual_et,
        StorageKind::SoilMoisture,
        step_index,
        events,
    );

    // 4. Groundwater response. Outflows are taken from the storage as it
    // stood at the start of the step.
    let (surface_flow, interflow) = routing::upper_outflows(
        state.upper_storage,
        params.surface_coefficient(),
        params.upper_coefficient(),
        params.max_upper_storage(),
    );
    let percolation = routing::percolation(state.upper_storage, params.percolation_rate());
    let upper_storage = clamp(
        state.upper_storage + recharge - surface_flow - interflow - percolation,
        StorageKind::UpperStorage,
        step_index,
        events,
    );

    let baseflow = routing::baseflow(state.lower_storage, params.lower_coefficient());
    let lower_storage = clamp(
        state.lower_storage + percolation - baseflow,
        StorageKind::LowerStorage,
        step_index,
        events,
    );

    // 5. Routing.
    let outflow = surface_flow + interflow + baseflow;
    let (routing_buffer, discharge) = routing::route(outflow, &state.routing, weights);

    let next = HbvState {
        snowpack,
        snow_liquid,
        soil_moisture,
        upper_storage,
        lower_storage,
        routing: routing_buffer,
    };
    let fluxes = StepFluxes {
        rain,
        snowfall,
        snowmelt,
        refreeze,
        soil_input,
        recharge,
        actual_et,
        percolation,
        surface_flow,
        interflow,
        baseflow,
        discharge,
        snowpack,
        snow_liquid,
        soil_moisture,
        upper_storage,
        lower_storage,
    };
    (next, fluxes)
}
