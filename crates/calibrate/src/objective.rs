//! Goodness-of-fit metrics for calibration.
//!
//! All metrics take observed and simulated slices of equal length and
//! return a scalar score. Inputs are validated; a zero-variance observed
//! series makes the efficiency scores undefined and is an error, never a
//! silent sentinel value.

use serde::{Deserialize, Serialize};

use crate::error::CalibrateError;

/// Offset added before the log transform so zero flows stay defined.
const LOG_OFFSET: f64 = 0.01;

fn check_pair(observed: &[f64], simulated: &[f64]) -> Result<(), CalibrateError> {
    if observed.len() != simulated.len() {
        return Err(CalibrateError::LengthMismatch {
            observed: observed.len(),
            simulated: simulated.len(),
        });
    }
    if observed.is_empty() {
        return Err(CalibrateError::EmptyData);
    }
    if observed
        .iter()
        .chain(simulated)
        .any(|v| !v.is_finite())
    {
        return Err(CalibrateError::NonFiniteData);
    }
    Ok(())
}

/// Nash-Sutcliffe efficiency: `1 - sum((sim - obs)^2) / sum((obs -
/// mean(obs))^2)`.
///
/// Range `(-inf, 1]`; 1 is a perfect fit, 0 means the observed mean
/// predicts as well as the model, below 0 worse than the mean.
///
/// # Errors
///
/// Returns [`CalibrateError::UndefinedObjective`] when all observed values
/// are identical (zero variance), plus the usual input validation errors.
pub fn nash_sutcliffe(observed: &[f64], simulated: &[f64]) -> Result<f64, CalibrateError> {
    check_pair(observed, simulated)?;

    let n = observed.len() as f64;
    let mean_obs = observed.iter().sum::<f64>() / n;
    let numerator: f64 = observed
        .iter()
        .zip(simulated)
        .map(|(o, s)| (o - s) * (o - s))
        .sum();
    let denominator: f64 = observed.iter().map(|o| (o - mean_obs) * (o - mean_obs)).sum();

    if denominator == 0.0 {
        return Err(CalibrateError::UndefinedObjective);
    }
    Ok(1.0 - numerator / denominator)
}

/// Nash-Sutcliffe efficiency of log-transformed flows, emphasising low
/// flows. Uses `ln(x + 0.01)` to keep zero flows defined.
pub fn log_nash_sutcliffe(observed: &[f64], simulated: &[f64]) -> Result<f64, CalibrateError> {
    check_pair(observed, simulated)?;
    let log_obs: Vec<f64> = observed.iter().map(|o| (o + LOG_OFFSET).ln()).collect();
    let log_sim: Vec<f64> = simulated.iter().map(|s| (s + LOG_OFFSET).ln()).collect();
    nash_sutcliffe(&log_obs, &log_sim)
}

/// Root mean square error. Range `[0, inf)`, 0 is a perfect fit.
pub fn rmse(observed: &[f64], simulated: &[f64]) -> Result<f64, CalibrateError> {
    check_pair(observed, simulated)?;
    let n = observed.len() as f64;
    let mse: f64 = observed
        .iter()
        .zip(simulated)
        .map(|(o, s)| (o - s) * (o - s))
        .sum::<f64>()
        / n;
    Ok(mse.sqrt())
}

/// Percent bias: `100 * sum(sim - obs) / sum(obs)`. Optimal 0, positive
/// values mark overestimation.
///
/// # Errors
///
/// Returns [`CalibrateError::UndefinedObjective`] when the observed sum is
/// zero.
pub fn percent_bias(observed: &[f64], simulated: &[f64]) -> Result<f64, CalibrateError> {
    check_pair(observed, simulated)?;
    let sum_obs: f64 = observed.iter().sum();
    if sum_obs == 0.0 {
        return Err(CalibrateError::UndefinedObjective);
    }
    let diff: f64 = simulated.iter().zip(observed).map(|(s, o)| s - o).sum();
    Ok(100.0 * diff / sum_obs)
}

/// The higher-is-better score a trial is ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveMetric {
    /// Nash-Sutcliffe efficiency.
    NashSutcliffe,
    /// Nash-Sutcliffe efficiency of log-transformed flows.
    LogNashSutcliffe,
}

impl ObjectiveMetric {
    /// Scores `simulated` against `observed` with this metric.
    pub fn score(&self, observed: &[f64], simulated: &[f64]) -> Result<f64, CalibrateError> {
        match self {
            ObjectiveMetric::NashSutcliffe => nash_sutcliffe(observed, simulated),
            ObjectiveMetric::LogNashSutcliffe => log_nash_sutcliffe(observed, simulated),
        }
    }
}
