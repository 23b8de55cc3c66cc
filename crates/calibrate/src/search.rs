//! Reference search strategy: seeded uniform random sampling.

use firn_hbv::HbvParams;
use firn_hbv::constants::{N_PARAMS, PARAM_BOUNDS, PARAM_NAMES};
use rand::Rng;
use tracing::{debug, info};

use crate::error::CalibrateError;
use crate::objective::ObjectiveMetric;
use crate::trial::{CalibrationData, TrialResult, evaluate_trial};

/// Per-parameter sampling bounds for the search.
///
/// Defaults to [`PARAM_BOUNDS`]; individual parameters can be narrowed or
/// pinned by name.
///
/// # Example
///
/// ```
/// use firn_calibrate::ParamSpace;
///
/// let space = ParamSpace::new()
///     .with_bounds("beta", 1.0, 3.0)
///     .unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpace {
    bounds: [(f64, f64); N_PARAMS],
}

impl ParamSpace {
    /// Creates a space covering the default calibration bounds.
    pub fn new() -> Self {
        Self {
            bounds: PARAM_BOUNDS,
        }
    }

    /// Narrows (or pins, with `min == max`) the bounds of one parameter.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrateError::UnknownParameter`] for an unrecognised
    /// name and [`CalibrateError::InvalidBounds`] for a non-finite or
    /// inverted range.
    pub fn with_bounds(mut self, name: &str, min: f64, max: f64) -> Result<Self, CalibrateError> {
        let index = PARAM_NAMES
            .iter()
            .position(|&n| n == name)
            .ok_or_else(|| CalibrateError::UnknownParameter {
                name: name.to_string(),
            })?;
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(CalibrateError::InvalidBounds {
                name: PARAM_NAMES[index],
                min,
                max,
            });
        }
        self.bounds[index] = (min, max);
        Ok(self)
    }

    /// Returns the bounds in parameter-vector order.
    pub fn bounds(&self) -> &[(f64, f64); N_PARAMS] {
        &self.bounds
    }

    /// Draws one parameter vector uniformly from the space.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrateError::Model`] if the bounds admit a vector
    /// outside the model's hard domain.
    pub fn sample(&self, rng: &mut impl Rng) -> Result<HbvParams, CalibrateError> {
        let values: Vec<f64> = self
            .bounds
            .iter()
            .map(|&(min, max)| {
                if min == max {
                    min
                } else {
                    rng.random_range(min..=max)
                }
            })
            .collect();
        Ok(HbvParams::from_array(&values)?)
    }
}

impl Default for ParamSpace {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluates `n_trials` uniformly sampled parameter vectors over the
/// calibration window and returns the results ranked best-first.
///
/// Each trial is independent; the shared RNG only decides the sampling
/// order, so a fixed seed reproduces the whole search.
///
/// # Errors
///
/// Propagates the first trial failure. [`CalibrateError::UndefinedObjective`]
/// aborts the search immediately: the observed series is shared, so no
/// later trial could score either.
pub fn random_search(
    data: &CalibrationData<'_>,
    space: &ParamSpace,
    n_trials: usize,
    metric: ObjectiveMetric,
    rng: &mut impl Rng,
) -> Result<Vec<TrialResult>, CalibrateError> {
    let mut results = Vec::with_capacity(n_trials);

    for trial in 0..n_trials {
        let params = space.sample(rng)?;
        let result = evaluate_trial(&params, data, metric)?;
        debug!(trial, score = result.score, "trial evaluated");
        results.push(result);
    }

    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    if let Some(best) = results.first() {
        info!(
            n_trials,
            best_score = best.score,
            "random search complete"
        );
    }
    Ok(results)
}
