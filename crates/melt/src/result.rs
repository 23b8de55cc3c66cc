//! Per-step and per-run melt model outputs.

use chrono::NaiveDateTime;

use crate::state::{MeltState, Surface};

/// Output of a single melt-model step. All water amounts in mm w.e.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeltStep {
    /// Timestamp of the step.
    pub timestamp: NaiveDateTime,
    /// Positive degree days: temperature excess above the threshold.
    pub pdd: f64,
    /// Solid precipitation added to the snow cover.
    pub snowfall: f64,
    /// Liquid precipitation passing straight to runoff.
    pub rain: f64,
    /// Melt produced this step. Always non-negative.
    pub melt: f64,
    /// Glacier runoff contribution: melt plus rain.
    pub runoff: f64,
    /// Snow depth after the step.
    pub snow_depth: f64,
    /// Surface classification the melt factor was chosen by.
    pub surface: Surface,
}

/// Column-wise melt output over a run, aligned with the input series.
#[derive(Debug, Clone, PartialEq)]
pub struct MeltOutput {
    /// Timestamp per step.
    pub timestamps: Vec<NaiveDateTime>,
    /// Positive degree days per step.
    pub pdd: Vec<f64>,
    /// Snowfall per step.
    pub snowfall: Vec<f64>,
    /// Rain per step.
    pub rain: Vec<f64>,
    /// Melt per step.
    pub melt: Vec<f64>,
    /// Glacier runoff per step.
    pub runoff: Vec<f64>,
    /// Snow depth after each step.
    pub snow_depth: Vec<f64>,
    /// Surface classification per step.
    pub surface: Vec<Surface>,
    /// State after the last completed step.
    pub final_state: MeltState,
}

impl MeltOutput {
    /// Creates an empty output with pre-allocated capacity.
    pub fn with_capacity(capacity: usize, initial_state: MeltState) -> Self {
        Self {
            timestamps: Vec::with_capacity(capacity),
            pdd: Vec::with_capacity(capacity),
            snowfall: Vec::with_capacity(capacity),
            rain: Vec::with_capacity(capacity),
            melt: Vec::with_capacity(capacity),
            runoff: Vec::with_capacity(capacity),
            snow_depth: Vec::with_capacity(capacity),
            surface: Vec::with_capacity(capacity),
            final_state: initial_state,
        }
    }

    /// Appends one step record.
    pub fn push(&mut self, step: &MeltStep) {
        self.timestamps.push(step.timestamp);
        self.pdd.push(step.pdd);
        self.snowfall.push(step.snowfall);
        self.rain.push(step.rain);
        self.melt.push(step.melt);
        self.runoff.push(step.runoff);
        self.snow_depth.push(step.snow_depth);
        self.surface.push(step.surface);
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
