//! Meteorological forcing series for the firn model chain.
//!
//! This crate provides [`MeteoSeries`], the validated, immutable container
//! every firn model consumes: temperature, precipitation, and potential
//! evapotranspiration at a fixed time step, indexed by timestamp.
//!
//! Validation happens once, at construction. Timestamps must be strictly
//! increasing with a uniform step; precipitation and PET must be
//! non-negative where finite. NaN values are accepted: they mark gaps in
//! the record, and the models detect them per step rather than this crate
//! rejecting them at ingest.
//!
//! # Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use firn_meteo::MeteoSeries;
//!
//! let t0 = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let timestamps: Vec<_> = (0..3).map(|d| t0 + chrono::Duration::days(d)).collect();
//!
//! let series = MeteoSeries::new(
//!     timestamps,
//!     vec![-4.0, 1.5, 3.0],  // temperature, degC
//!     vec![2.0, 0.0, 5.5],   // precipitation, mm/step
//!     vec![0.1, 0.3, 0.4],   // PET, mm/step
//! )
//! .unwrap();
//!
//! assert_eq!(series.len(), 3);
//! assert_eq!(series.step(), chrono::Duration::days(1));
//! ```

pub mod error;
pub mod lapse;
pub mod sample;
pub mod series;

pub use error::MeteoError;
pub use lapse::LapseRates;
pub use sample::{ForcingVariable, MeteoSample};
pub use series::MeteoSeries;
