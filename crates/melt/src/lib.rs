//! Positive-degree-day glacier melt model.
//!
//! Temperature above a threshold drives melt at a rate that depends on the
//! exposed surface: bare ice melts faster than snow cover. The model keeps
//! one piece of running state, the snow depth on the glacier (fed by
//! snowfall, drained by ablation), and classifies the surface from it
//! explicitly each step.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │   pdd         │────▶│   classify     │────▶│     melt         │
//!  │  (T - T0)+    │     │  (snow | ice)  │     │  (pdd * factor)  │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use firn_melt::{MeltModel, MeltParams, MeltState};
//!
//! let params = MeltParams::new()
//!     .with_melt_factor_snow(2.8)
//!     .with_melt_factor_ice(5.6);
//!
//! let model = MeltModel::new(params).unwrap();
//! let state = MeltState::bare_ice();
//! # let _ = (model, state);
//! ```

pub mod error;
pub mod params;
pub mod result;
pub mod simulate;
pub mod state;

pub use error::MeltError;
pub use params::MeltParams;
pub use result::{MeltOutput, MeltStep};
pub use simulate::{MeltModel, MeltSeries};
pub use state::{MeltState, Surface};
