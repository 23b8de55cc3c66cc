//! Calibration objectives and parameter search for the firn models.
//!
//! The objective layer scores a simulated discharge series against
//! observations with the Nash-Sutcliffe efficiency (and companions); the
//! trial layer runs the HBV state machine for one parameter vector over a
//! calibration window and scores the result. Trials are pure functions of
//! `(params, data)` with no shared mutable state, so a host application
//! can evaluate them in parallel and only collect results.
//!
//! The search strategy is pluggable; [`random_search`] is the bundled
//! reference strategy: seeded uniform sampling within per-parameter
//! bounds, results ranked best-first.
//!
//! # Quick start
//!
//! ```rust
//! use firn_calibrate::nash_sutcliffe;
//!
//! let observed = [1.0, 2.0, 3.0];
//! let ns = nash_sutcliffe(&observed, &observed).unwrap();
//! assert_eq!(ns, 1.0);
//! ```

pub mod error;
pub mod objective;
pub mod search;
pub mod trial;

pub use error::CalibrateError;
pub use objective::{
    ObjectiveMetric, log_nash_sutcliffe, nash_sutcliffe, percent_bias, rmse,
};
pub use search::{ParamSpace, random_search};
pub use trial::{CalibrationData, TrialResult, evaluate_trial};
