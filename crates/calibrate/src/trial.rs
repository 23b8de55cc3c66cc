//! Stateless calibration trials.

use firn_hbv::{HbvParams, HbvState, run};
use firn_meteo::MeteoSeries;
use serde::Serialize;

use crate::error::CalibrateError;
use crate::objective::ObjectiveMetric;

/// The fixed inputs of a calibration: forcing window, observed discharge,
/// optional external glacier melt, optional warm-up state.
///
/// Validated once; every trial borrows it read-only, so trials stay
/// independent and trivially parallelisable.
#[derive(Debug, Clone, Copy)]
pub struct CalibrationData<'a> {
    series: &'a MeteoSeries,
    observed: &'a [f64],
    external_melt: Option<&'a [f64]>,
    initial_state: Option<HbvState>,
}

impl<'a> CalibrationData<'a> {
    /// Creates calibration data after checking alignment.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrateError::LengthMismatch`] if the observed series
    /// does not match the forcing window, and
    /// [`CalibrateError::EmptyData`] if it is empty.
    pub fn new(series: &'a MeteoSeries, observed: &'a [f64]) -> Result<Self, CalibrateError> {
        if observed.is_empty() {
            return Err(CalibrateError::EmptyData);
        }
        if observed.len() != series.len() {
            return Err(CalibrateError::LengthMismatch {
                observed: observed.len(),
                simulated: series.len(),
            });
        }
        Ok(Self {
            series,
            observed,
            external_melt: None,
            initial_state: None,
        })
    }

    /// Supplies glacier melt to the model instead of its internal
    /// degree-day term.
    pub fn with_external_melt(mut self, melt: &'a [f64]) -> Self {
        self.external_melt = Some(melt);
        self
    }

    /// Starts every trial from this state instead of the zero warm-up
    /// state.
    pub fn with_initial_state(mut self, state: HbvState) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Returns the forcing window.
    pub fn series(&self) -> &MeteoSeries {
        self.series
    }

    /// Returns the observed discharge.
    pub fn observed(&self) -> &[f64] {
        self.observed
    }
}

/// One scored parameter vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrialResult {
    /// The parameter vector the trial ran with.
    pub params: HbvParams,
    /// The objective score; higher is better.
    pub score: f64,
}

/// Runs the state machine with `params` over the calibration window and
/// scores the simulated discharge against the observations.
///
/// Pure in `(params, data)`: no state survives the call, and concurrent
/// evaluations never interfere.
///
/// # Errors
///
/// Propagates model errors ([`CalibrateError::Model`]) and objective
/// errors, notably [`CalibrateError::UndefinedObjective`] for a
/// zero-variance observed series.
pub fn evaluate_trial(
    params: &HbvParams,
    data: &CalibrationData<'_>,
    metric: ObjectiveMetric,
) -> Result<TrialResult, CalibrateError> {
    let output = run(params, data.series, data.initial_state, data.external_melt)?;
    let score = metric.score(data.observed, &output.discharge)?;
    Ok(TrialResult {
        params: *params,
        score,
    })
}
