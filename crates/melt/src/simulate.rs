//! Melt model stepping and simulation.

use firn_meteo::{ForcingVariable, MeteoSample, MeteoSeries};
use tracing::debug;

use crate::error::MeltError;
use crate::params::MeltParams;
use crate::result::{MeltOutput, MeltStep};
use crate::state::{MeltState, Surface};

/// Positive-degree-day melt model.
///
/// Validated at construction; stepping cannot fail on parameters
/// afterwards, only on data gaps.
#[derive(Debug, Clone)]
pub struct MeltModel {
    params: MeltParams,
}

impl MeltModel {
    /// Creates a model from validated parameters.
    ///
    /// # Errors
    ///
    /// Returns [`MeltError::Configuration`] if the parameters are outside
    /// their domain.
    pub fn new(params: MeltParams) -> Result<Self, MeltError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Returns the model parameters.
    pub fn params(&self) -> &MeltParams {
        &self.params
    }

    /// Executes one step.
    ///
    /// Order within the step: snowfall accumulates (temperature at or
    /// below the threshold), the surface is reclassified from the updated
    /// depth, melt is taken at the factor of that surface, and ablation
    /// draws the depth down, floored at zero.
    ///
    /// # Errors
    ///
    /// Returns [`MeltError::DataGap`] if temperature or precipitation is
    /// not finite. PET is not consumed by this model and is not checked.
    pub fn step(
        &self,
        index: usize,
        sample: &MeteoSample,
        state: MeltState,
    ) -> Result<(MeltState, MeltStep), MeltError> {
        let temp = sample.temperature;
        if !temp.is_finite() {
            return Err(MeltError::DataGap {
                index,
                variable: ForcingVariable::Temperature,
                partial: None,
            });
        }
        let precip = sample.precipitation;
        if !precip.is_finite() {
            return Err(MeltError::DataGap {
                index,
                variable: ForcingVariable::Precipitation,
                partial: None,
            });
        }

        let threshold = self.params.threshold_temp();
        let (snowfall, rain) = if temp <= threshold {
            (precip, 0.0)
        } else {
            (0.0, precip)
        };

        let depth_with_snowfall = state.snow_depth() + snowfall;
        let surface = MeltState::classify(depth_with_snowfall);

        let pdd = (temp - threshold).max(0.0);
        let factor = match surface {
            Surface::Snow => self.params.melt_factor_snow(),
            Surface::Ice => self.params.melt_factor_ice(),
        };
        let melt = pdd * factor;

        // Ablation exceeding the snow cover continues into the ice below;
        // the depth only tracks the snow portion.
        let snow_depth = (depth_with_snowfall - melt).max(0.0);

        let next = MeltState::with_snow_depth(snow_depth);
        let step = MeltStep {
            timestamp: sample.timestamp,
            pdd,
            snowfall,
            rain,
            melt,
            runoff: melt + rain,
            snow_depth,
            surface,
        };
        Ok((next, step))
    }

    /// Returns a lazy iterator of per-step melt over `series`.
    ///
    /// The iterator is finite (one item per sample) and restartable: each
    /// call creates an independent pass starting from `initial`. After
    /// yielding an error it fuses and yields nothing further.
    pub fn simulate<'a>(&'a self, series: &'a MeteoSeries, initial: MeltState) -> MeltSeries<'a> {
        MeltSeries {
            model: self,
            series,
            state: initial,
            index: 0,
            failed: false,
        }
    }

    /// Runs the model over the whole series, collecting column-wise output.
    ///
    /// # Errors
    ///
    /// Returns [`MeltError::DataGap`] at the first non-finite forcing
    /// value; the error carries the output of all steps before the gap.
    pub fn run(&self, series: &MeteoSeries, initial: MeltState) -> Result<MeltOutput, MeltError> {
        let mut out = MeltOutput::with_capacity(series.len(), initial);
        let mut state = initial;

        for index in 0..series.len() {
            let sample = series.get(index).expect("index in range");
            match self.step(index, &sample, state) {
                Ok((next, step)) => {
                    out.push(&step);
                    state = next;
                }
                Err(MeltError::DataGap {
                    index, variable, ..
                }) => {
                    out.final_state = state;
                    return Err(MeltError::DataGap {
                        index,
                        variable,
                        partial: Some(Box::new(out)),
                    });
                }
                Err(other) => return Err(other),
            }
        }

        out.final_state = state;
        debug!(
            steps = out.len(),
            total_melt = out.melt.iter().sum::<f64>(),
            "melt run complete"
        );
        Ok(out)
    }
}

/// Lazy per-step melt sequence over a borrowed forcing series.
///
/// Yields `Result<MeltStep, MeltError>`; see [`MeltModel::simulate`].
#[derive(Debug)]
pub struct MeltSeries<'a> {
    model: &'a MeltModel,
    series: &'a MeteoSeries,
    state: MeltState,
    index: usize,
    failed: bool,
}

impl MeltSeries<'_> {
    /// Returns the state the next step would start from.
    pub fn state(&self) -> MeltState {
        self.state
    }
}

impl Iterator for MeltSeries<'_> {
    type Item = Result<MeltStep, MeltError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.index >= self.series.len() {
            return None;
        }
        let sample = self.series.get(self.index).expect("index in range");
        match self.model.step(self.index, &sample, self.state) {
            Ok((next, step)) => {
                self.state = next;
                self.index += 1;
                Some(Ok(step))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.series.len() - self.index;
        (0, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn make_series(temperature: Vec<f64>, precipitation: Vec<f64>) -> MeteoSeries {
        let n = temperature.len();
        let t0 = NaiveDate::from_ymd_opt(2010, 7, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let ts: Vec<NaiveDateTime> = (0..n).map(|d| t0 + Duration::days(d as i64)).collect();
        MeteoSeries::new(ts, temperature, precipitation, vec![0.0; n]).unwrap()
    }

    fn model() -> MeltModel {
        MeltModel::new(MeltParams::new()).unwrap()
    }

    #[test]
    fn no_melt_at_or_below_threshold() {
        let m = model();
        let series = make_series(vec![0.0, -3.0], vec![0.0, 0.0]);
        let out = m.run(&series, MeltState::bare_ice()).unwrap();
        assert_eq!(out.melt, vec![0.0, 0.0]);
        assert_eq!(out.pdd, vec![0.0, 0.0]);
    }

    #[test]
    fn ice_melts_at_ice_factor() {
        let m = model();
        let series = make_series(vec![3.0], vec![0.0]);
        let out = m.run(&series, MeltState::bare_ice()).unwrap();
        // pdd = 3, factor = 5.6
        assert_relative_eq!(out.melt[0], 16.8, epsilon = 1e-12);
        assert_eq!(out.surface[0], Surface::Ice);
    }

    #[test]
    fn snow_cover_selects_snow_factor() {
        let m = model();
        let series = make_series(vec![2.0], vec![0.0]);
        let out = m.run(&series, MeltState::with_snow_depth(50.0)).unwrap();
        // pdd = 2, factor = 2.8
        assert_relative_eq!(out.melt[0], 5.6, epsilon = 1e-12);
        assert_eq!(out.surface[0], Surface::Snow);
        assert_relative_eq!(out.snow_depth[0], 44.4, epsilon = 1e-12);
    }

    #[test]
    fn snowfall_accumulates_then_ablates_to_ice() {
        let m = model();
        // Day 0: cold, 10 mm snowfall. Day 1: warm enough to remove the
        // cover (pdd 4 * 2.8 = 11.2 > 10). Day 2: bare ice again.
        let series = make_series(vec![-2.0, 4.0, 4.0], vec![10.0, 0.0, 0.0]);
        let out = m.run(&series, MeltState::bare_ice()).unwrap();

        assert_eq!(out.melt[0], 0.0);
        assert_eq!(out.snow_depth[0], 10.0);
        assert_eq!(out.surface[0], Surface::Snow);

        assert_eq!(out.surface[1], Surface::Snow);
        assert_eq!(out.snow_depth[1], 0.0);

        assert_eq!(out.surface[2], Surface::Ice);
        assert_relative_eq!(out.melt[2], 22.4, epsilon = 1e-12);
        assert_eq!(out.final_state.surface(), Surface::Ice);
    }

    #[test]
    fn rain_passes_to_runoff() {
        let m = model();
        let series = make_series(vec![5.0], vec![7.0]);
        let out = m.run(&series, MeltState::bare_ice()).unwrap();
        assert_eq!(out.snowfall[0], 0.0);
        assert_eq!(out.rain[0], 7.0);
        assert_relative_eq!(out.runoff[0], out.melt[0] + 7.0, epsilon = 1e-12);
    }

    #[test]
    fn data_gap_aborts_with_partial() {
        let m = model();
        let series = make_series(vec![2.0, f64::NAN, 2.0], vec![0.0, 0.0, 0.0]);
        let err = m.run(&series, MeltState::bare_ice()).unwrap_err();
        match err {
            MeltError::DataGap {
                index,
                variable,
                partial,
            } => {
                assert_eq!(index, 1);
                assert_eq!(variable, ForcingVariable::Temperature);
                let partial = partial.expect("run preserves partial output");
                assert_eq!(partial.len(), 1);
            }
            other => panic!("expected DataGap, got {other:?}"),
        }
    }

    #[test]
    fn iterator_is_lazy_and_fused_after_gap() {
        let m = model();
        let series = make_series(vec![2.0, f64::NAN, 2.0], vec![0.0, 0.0, 0.0]);
        let mut iter = m.simulate(&series, MeltState::bare_ice());

        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().unwrap().is_err());
        assert!(iter.next().is_none());
    }

    #[test]
    fn iterator_restarts_from_initial() {
        let m = model();
        let series = make_series(vec![1.0, 2.0, 3.0], vec![0.0; 3]);
        let first: Vec<f64> = m
            .simulate(&series, MeltState::bare_ice())
            .map(|r| r.unwrap().melt)
            .collect();
        let second: Vec<f64> = m
            .simulate(&series, MeltState::bare_ice())
            .map(|r| r.unwrap().melt)
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn iterator_matches_run() {
        let m = model();
        let series = make_series(vec![-1.0, 2.0, 0.5, 6.0], vec![3.0, 0.0, 1.0, 0.0]);
        let collected: Vec<MeltStep> = m
            .simulate(&series, MeltState::bare_ice())
            .map(|r| r.unwrap())
            .collect();
        let out = m.run(&series, MeltState::bare_ice()).unwrap();
        assert_eq!(collected.len(), out.len());
        for (i, step) in collected.iter().enumerate() {
            assert_eq!(step.melt, out.melt[i]);
            assert_eq!(step.runoff, out.runoff[i]);
        }
    }
}
