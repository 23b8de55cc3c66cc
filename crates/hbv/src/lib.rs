//! HBV bucket-model state machine for catchment runoff.
//!
//! Four continuous storages (snowpack, soil moisture, and two groundwater
//! reservoirs) are evolved by a fixed-order update per time step:
//!
//! ```text
//!  snow ──▶ soil ──▶ evapotranspiration ──▶ percolation ──▶ routing
//! ```
//!
//! The per-step update is a pure function `(State, Input, Params) ->
//! (State, Fluxes)`; a run is the serial fold of that function over a
//! [`firn_meteo::MeteoSeries`]. Storages never go negative: where a
//! parameter combination would overdraw one, the storage is clamped at
//! zero and a [`ClampEvent`] is recorded instead of failing.
//!
//! Snowmelt can be supplied externally (from the degree-day glacier model)
//! or computed internally from the degree-day factor.
//!
//! # Quick start
//!
//! ```rust
//! use firn_hbv::HbvParams;
//!
//! let params = HbvParams::new()
//!     .with_field_capacity(250.0)
//!     .with_beta(2.0);
//!
//! assert!(params.validate().is_ok());
//! ```

pub mod constants;
pub mod error;
pub mod params;
pub mod processes;
pub mod result;
pub mod routing;
pub mod run;
pub mod state;
pub mod step;

pub use error::{HbvError, InputVariable};
pub use params::HbvParams;
pub use result::HbvOutput;
pub use run::run;
pub use state::{ClampEvent, HbvState, StorageKind};
pub use step::{StepFluxes, StepInput, step};
