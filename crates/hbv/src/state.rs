//! Model state and clamp events.

use std::fmt;

use crate::constants::ROUTING_BUFFER_LEN;

/// Names one of the model storages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Frozen snowpack.
    Snowpack,
    /// Liquid water held in the snowpack.
    SnowLiquid,
    /// Soil moisture.
    SoilMoisture,
    /// Upper groundwater reservoir.
    UpperStorage,
    /// Lower groundwater reservoir.
    LowerStorage,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageKind::Snowpack => "snowpack",
            StorageKind::SnowLiquid => "snow_liquid",
            StorageKind::SoilMoisture => "soil_moisture",
            StorageKind::UpperStorage => "upper_storage",
            StorageKind::LowerStorage => "lower_storage",
        };
        f.write_str(name)
    }
}

/// A non-fatal record of a storage clipped at zero.
///
/// Clamping is expected at parameter extremes (outflow coefficients
/// overdrawing a reservoir within one step, or external melt exceeding the
/// snowpack) and does not stop the run. A clamp marks the point where the
/// per-step mass balance was bent by the configured parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampEvent {
    /// Step index the clamp happened at.
    pub step: usize,
    /// Which storage was clipped.
    pub storage: StorageKind,
    /// How far below zero the raw update went, in mm. Always positive.
    pub deficit: f64,
}

/// The mutable simulation state: five storages and the routing buffer.
///
/// Owned exclusively by the running simulation; the final state is
/// exported for chained runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HbvState {
    /// Frozen snowpack in mm w.e.
    pub snowpack: f64,
    /// Liquid water held in the snowpack in mm.
    pub snow_liquid: f64,
    /// Soil moisture in mm, within `[0, field_capacity]`.
    pub soil_moisture: f64,
    /// Upper groundwater reservoir in mm.
    pub upper_storage: f64,
    /// Lower groundwater reservoir in mm.
    pub lower_storage: f64,
    /// Groundwater outflow in flight through the triangular routing.
    pub(crate) routing: [f64; ROUTING_BUFFER_LEN],
}

impl HbvState {
    /// All-zero state, the usual warm-up start.
    pub fn new() -> Self {
        Self {
            snowpack: 0.0,
            snow_liquid: 0.0,
            soil_moisture: 0.0,
            upper_storage: 0.0,
            lower_storage: 0.0,
            routing: [0.0; ROUTING_BUFFER_LEN],
        }
    }

    /// Sets the initial snowpack in mm w.e.
    pub fn with_snowpack(mut self, value: f64) -> Self {
        self.snowpack = value;
        self
    }

    /// Sets the initial soil moisture in mm.
    pub fn with_soil_moisture(mut self, value: f64) -> Self {
        self.soil_moisture = value;
        self
    }

    /// Sets the initial upper reservoir storage in mm.
    pub fn with_upper_storage(mut self, value: f64) -> Self {
        self.upper_storage = value;
        self
    }

    /// Sets the initial lower reservoir storage in mm.
    pub fn with_lower_storage(mut self, value: f64) -> Self {
        self.lower_storage = value;
        self
    }

    /// Water currently in flight through the routing buffer, in mm.
    ///
    /// Included when closing the water balance of a run.
    pub fn routing_storage(&self) -> f64 {
        self.routing.iter().sum()
    }

    /// Sum of all storages including routed water, in mm.
    pub fn total_storage(&self) -> f64 {
        self.snowpack
            + self.snow_liquid
            + self.soil_moisture
            + self.upper_storage
            + self.lower_storage
            + self.routing_storage()
    }
}

impl Default for HbvState {
    fn default() -> Self {
        Self::new()
    }
}
