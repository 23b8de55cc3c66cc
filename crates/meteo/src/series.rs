//! Validated forcing time series.

use chrono::{Duration, NaiveDateTime};

use crate::error::MeteoError;
use crate::sample::MeteoSample;

/// Immutable, validated meteorological time series at a fixed step.
///
/// Construction checks that all vectors have the same length, that
/// timestamps are strictly increasing with a uniform step, and that
/// precipitation and PET are non-negative where finite. NaN values pass
/// validation; they represent gaps and are surfaced by the models as
/// `DataGap` errors at the offending step.
#[derive(Debug, Clone, PartialEq)]
pub struct MeteoSeries {
    timestamps: Vec<NaiveDateTime>,
    temperature: Vec<f64>,
    precipitation: Vec<f64>,
    pet: Vec<f64>,
    step: Duration,
}

impl MeteoSeries {
    /// Creates a new `MeteoSeries` after validating inputs.
    ///
    /// # Errors
    ///
    /// Returns [`MeteoError::LengthMismatch`] if the vectors differ in
    /// length, [`MeteoError::InsufficientData`] for fewer than 2 samples,
    /// [`MeteoError::NonMonotonicTimestamps`] / [`MeteoError::IrregularStep`]
    /// for a malformed time axis, and [`MeteoError::NegativeValue`] for
    /// negative precipitation or PET.
    pub fn new(
        timestamps: Vec<NaiveDateTime>,
        temperature: Vec<f64>,
        precipitation: Vec<f64>,
        pet: Vec<f64>,
    ) -> Result<Self, MeteoError> {
        let n = timestamps.len();
        for (variable, len) in [
            ("temperature", temperature.len()),
            ("precipitation", precipitation.len()),
            ("pet", pet.len()),
        ] {
            if len != n {
                return Err(MeteoError::LengthMismatch {
                    timestamps: n,
                    variable,
                    got: len,
                });
            }
        }

        if n < 2 {
            return Err(MeteoError::InsufficientData { n, min: 2 });
        }

        let step = timestamps[1] - timestamps[0];
        for i in 1..n {
            let dt = timestamps[i] - timestamps[i - 1];
            if dt <= Duration::zero() {
                return Err(MeteoError::NonMonotonicTimestamps { index: i });
            }
            if dt != step {
                return Err(MeteoError::IrregularStep {
                    index: i,
                    expected_s: step.num_seconds(),
                    got_s: dt.num_seconds(),
                });
            }
        }

        for (variable, values) in [("precipitation", &precipitation), ("pet", &pet)] {
            for (i, &v) in values.iter().enumerate() {
                if v.is_finite() && v < 0.0 {
                    return Err(MeteoError::NegativeValue {
                        variable,
                        index: i,
                        value: v,
                    });
                }
            }
        }

        Ok(Self {
            timestamps,
            temperature,
            precipitation,
            pet,
            step,
        })
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Returns `true` if the series contains no samples.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Returns the fixed step size between samples.
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Returns the timestamp sequence.
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Returns the temperature series in degC.
    pub fn temperature(&self) -> &[f64] {
        &self.temperature
    }

    /// Returns the precipitation series in mm per step.
    pub fn precipitation(&self) -> &[f64] {
        &self.precipitation
    }

    /// Returns the PET series in mm per step.
    pub fn pet(&self) -> &[f64] {
        &self.pet
    }

    /// Returns the sample at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<MeteoSample> {
        if index >= self.len() {
            return None;
        }
        Some(MeteoSample {
            timestamp: self.timestamps[index],
            temperature: self.temperature[index],
            precipitation: self.precipitation[index],
            pet: self.pet[index],
        })
    }

    /// Iterates over the samples in order.
    pub fn iter(&self) -> impl Iterator<Item = MeteoSample> + '_ {
        (0..self.len()).map(|i| self.get(i).expect("index in range"))
    }

    /// Selects the sub-series with timestamps in `[start, end]` (inclusive).
    ///
    /// Used to cut calibration and simulation periods out of a longer
    /// record. The step size is inherited, so a one-sample window is valid.
    ///
    /// # Errors
    ///
    /// Returns [`MeteoError::EmptyWindow`] if no sample falls inside the
    /// window.
    pub fn window(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<MeteoSeries, MeteoError> {
        let lo = self.timestamps.partition_point(|&t| t < start);
        let hi = self.timestamps.partition_point(|&t| t <= end);
        if lo >= hi {
            return Err(MeteoError::EmptyWindow { start, end });
        }
        // Subsetting a validated series preserves every invariant except the
        // two-sample minimum, which only exists to define the step; the step
        // is carried over instead of re-derived.
        Ok(Self {
            timestamps: self.timestamps[lo..hi].to_vec(),
            temperature: self.temperature[lo..hi].to_vec(),
            precipitation: self.precipitation[lo..hi].to_vec(),
            pet: self.pet[lo..hi].to_vec(),
            step: self.step,
        })
    }

    /// Crate-internal constructor for series derived from an already
    /// validated one.
    pub(crate) fn from_parts(
        timestamps: Vec<NaiveDateTime>,
        temperature: Vec<f64>,
        precipitation: Vec<f64>,
        pet: Vec<f64>,
        step: Duration,
    ) -> Self {
        Self {
            timestamps,
            temperature,
            precipitation,
            pet,
            step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_timestamps(n: usize) -> Vec<NaiveDateTime> {
        let t0 = NaiveDate::from_ymd_opt(2010, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (0..n).map(|d| t0 + Duration::days(d as i64)).collect()
    }

    fn make_series(n: usize) -> MeteoSeries {
        MeteoSeries::new(
            make_timestamps(n),
            vec![1.0; n],
            vec![2.0; n],
            vec![0.5; n],
        )
        .unwrap()
    }

    #[test]
    fn new_valid_series() {
        let s = make_series(5);
        assert_eq!(s.len(), 5);
        assert!(!s.is_empty());
        assert_eq!(s.step(), Duration::days(1));
    }

    #[test]
    fn new_length_mismatch() {
        let result = MeteoSeries::new(make_timestamps(3), vec![1.0; 3], vec![2.0; 2], vec![0.5; 3]);
        assert!(matches!(
            result,
            Err(MeteoError::LengthMismatch {
                timestamps: 3,
                variable: "precipitation",
                got: 2,
            })
        ));
    }

    #[test]
    fn new_too_few_samples() {
        let result = MeteoSeries::new(make_timestamps(1), vec![1.0], vec![2.0], vec![0.5]);
        assert!(matches!(
            result,
            Err(MeteoError::InsufficientData { n: 1, min: 2 })
        ));
    }

    #[test]
    fn new_duplicate_timestamp() {
        let mut ts = make_timestamps(3);
        ts[2] = ts[1];
        let result = MeteoSeries::new(ts, vec![1.0; 3], vec![2.0; 3], vec![0.5; 3]);
        assert!(matches!(
            result,
            Err(MeteoError::NonMonotonicTimestamps { index: 2 })
        ));
    }

    #[test]
    fn new_irregular_step() {
        let mut ts = make_timestamps(4);
        ts[3] += Duration::hours(6);
        let result = MeteoSeries::new(ts, vec![1.0; 4], vec![2.0; 4], vec![0.5; 4]);
        assert!(matches!(
            result,
            Err(MeteoError::IrregularStep { index: 3, .. })
        ));
    }

    #[test]
    fn new_negative_precipitation() {
        let result = MeteoSeries::new(
            make_timestamps(3),
            vec![1.0; 3],
            vec![2.0, -0.1, 2.0],
            vec![0.5; 3],
        );
        assert!(matches!(
            result,
            Err(MeteoError::NegativeValue {
                variable: "precipitation",
                index: 1,
                ..
            })
        ));
    }

    #[test]
    fn new_nan_is_accepted() {
        let series = MeteoSeries::new(
            make_timestamps(3),
            vec![1.0, f64::NAN, 3.0],
            vec![2.0, f64::NAN, 2.0],
            vec![0.5; 3],
        )
        .unwrap();
        assert!(series.temperature()[1].is_nan());
    }

    #[test]
    fn hourly_step_detected() {
        let t0 = NaiveDate::from_ymd_opt(2010, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let ts: Vec<_> = (0..4).map(|h| t0 + Duration::hours(h)).collect();
        let s = MeteoSeries::new(ts, vec![0.0; 4], vec![0.0; 4], vec![0.0; 4]).unwrap();
        assert_eq!(s.step(), Duration::hours(1));
    }

    #[test]
    fn get_and_iter() {
        let s = make_series(3);
        let sample = s.get(1).unwrap();
        assert_eq!(sample.temperature, 1.0);
        assert_eq!(sample.precipitation, 2.0);
        assert!(s.get(3).is_none());
        assert_eq!(s.iter().count(), 3);
    }

    #[test]
    fn window_inclusive_bounds() {
        let s = make_series(10);
        let ts = s.timestamps();
        let sub = s.window(ts[2], ts[5]).unwrap();
        assert_eq!(sub.len(), 4);
        assert_eq!(sub.timestamps()[0], ts[2]);
        assert_eq!(sub.step(), s.step());
    }

    #[test]
    fn window_single_sample() {
        let s = make_series(5);
        let ts = s.timestamps();
        let sub = s.window(ts[3], ts[3]).unwrap();
        assert_eq!(sub.len(), 1);
        assert_eq!(sub.step(), Duration::days(1));
    }

    #[test]
    fn window_outside_range() {
        let s = make_series(5);
        let start = s.timestamps()[4] + Duration::days(1);
        let end = start + Duration::days(3);
        assert!(matches!(
            s.window(start, end),
            Err(MeteoError::EmptyWindow { .. })
        ));
    }
}
