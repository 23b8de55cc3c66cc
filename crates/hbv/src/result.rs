//! Column-wise run output.

use chrono::NaiveDateTime;

use crate::state::{ClampEvent, HbvState};
use crate::step::StepFluxes;

/// Simulation output: one record per input step, aligned with the forcing
/// series, stored column-wise.
#[derive(Debug, Clone, PartialEq)]
pub struct HbvOutput {
    /// Timestamp per step.
    pub timestamps: Vec<NaiveDateTime>,
    /// Liquid precipitation per step.
    pub rain: Vec<f64>,
    /// Corrected solid precipitation per step.
    pub snowfall: Vec<f64>,
    /// Snowmelt applied per step.
    pub snowmelt: Vec<f64>,
    /// Liquid input reaching the soil per step.
    pub soil_input: Vec<f64>,
    /// Groundwater recharge per step.
    pub recharge: Vec<f64>,
    /// Actual evapotranspiration per step.
    pub actual_et: Vec<f64>,
    /// Percolation to the lower reservoir per step.
    pub percolation: Vec<f64>,
    /// Threshold surface flow per step.
    pub surface_flow: Vec<f64>,
    /// Upper-reservoir interflow per step.
    pub interflow: Vec<f64>,
    /// Lower-reservoir baseflow per step.
    pub baseflow: Vec<f64>,
    /// Routed discharge per step.
    pub discharge: Vec<f64>,
    /// Snowpack after each step.
    pub snowpack: Vec<f64>,
    /// Snowpack liquid water after each step.
    pub snow_liquid: Vec<f64>,
    /// Soil moisture after each step.
    pub soil_moisture: Vec<f64>,
    /// Upper reservoir after each step.
    pub upper_storage: Vec<f64>,
    /// Lower reservoir after each step.
    pub lower_storage: Vec<f64>,
    /// Non-fatal storage clamps recorded during the run.
    pub clamp_events: Vec<ClampEvent>,
    /// State the run started from.
    pub initial_state: HbvState,
    /// State after the last completed step.
    pub final_state: HbvState,
}

impl HbvOutput {
    /// Creates an empty output with pre-allocated capacity.
    pub fn with_capacity(capacity: usize, initial_state: HbvState) -> Self {
        Self {
            timestamps: Vec::with_capacity(capacity),
            rain: Vec::with_capacity(capacity),
            snowfall: Vec::with_capacity(capacity),
            snowmelt: Vec::with_capacity(capacity),
            soil_input: Vec::with_capacity(capacity),
            recharge: Vec::with_capacity(capacity),
            actual_et: Vec::with_capacity(capacity),
            percolation: Vec::with_capacity(capacity),
            surface_flow: Vec::with_capacity(capacity),
            interflow: Vec::with_capacity(capacity),
            baseflow: Vec::with_capacity(capacity),
            discharge: Vec::with_capacity(capacity),
            snowpack: Vec::with_capacity(capacity),
            snow_liquid: Vec::with_capacity(capacity),
            soil_moisture: Vec::with_capacity(capacity),
            upper_storage: Vec::with_capacity(capacity),
            lower_storage: Vec::with_capacity(capacity),
            clamp_events: Vec::new(),
            initial_state,
            final_state: initial_state,
        }
    }

    /// Appends one step record.
    pub fn push(&mut self, timestamp: NaiveDateTime, fluxes: &StepFluxes) {
        self.timestamps.push(timestamp);
        self.rain.push(fluxes.rain);
        self.snowfall.push(fluxes.snowfall);
        self.snowmelt.push(fluxes.snowmelt);
        self.soil_input.push(fluxes.soil_input);
        self.recharge.push(fluxes.recharge);
        self.actual_et.push(fluxes.actual_et);
        self.percolation.push(fluxes.percolation);
        self.surface_flow.push(fluxes.surface_flow);
        self.interflow.push(fluxes.interflow);
        self.baseflow.push(fluxes.baseflow);
        self.discharge.push(fluxes.discharge);
        self.snowpack.push(fluxes.snowpack);
        self.snow_liquid.push(fluxes.snow_liquid);
        self.soil_moisture.push(fluxes.soil_moisture);
        self.upper_storage.push(fluxes.upper_storage);
        self.lower_storage.push(fluxes.lower_storage);
    }

    /// Returns the number of completed steps.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Returns `true` if no steps completed.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}
