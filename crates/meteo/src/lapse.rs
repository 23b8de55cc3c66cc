//! Lapse-rate rescaling of forcing to a different elevation.
//!
//! Station records are usually taken below the glacier tongue. Before the
//! melt model sees them, temperature and precipitation are shifted to the
//! glacier elevation with constant lapse rates, additively:
//! `T' = T + dh * gamma_T` and `P' = max(0, P + dh * gamma_P)`.

use crate::series::MeteoSeries;

/// Constant lapse rates per metre of elevation difference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LapseRates {
    /// Temperature lapse rate in K/m. Typically around -0.006.
    pub temperature_per_m: f64,
    /// Precipitation gradient in mm/m. Often 0.
    pub precipitation_per_m: f64,
}

impl LapseRates {
    /// Creates lapse rates from per-metre gradients.
    pub fn new(temperature_per_m: f64, precipitation_per_m: f64) -> Self {
        Self {
            temperature_per_m,
            precipitation_per_m,
        }
    }
}

impl MeteoSeries {
    /// Returns a copy of the series rescaled to an elevation
    /// `height_difference_m` metres above the station.
    ///
    /// Temperature and precipitation are shifted additively by the lapse
    /// rates; precipitation is floored at zero; PET is left unchanged.
    /// Gaps (NaN) stay NaN.
    pub fn rescaled(&self, height_difference_m: f64, rates: &LapseRates) -> MeteoSeries {
        let dt = height_difference_m * rates.temperature_per_m;
        let dp = height_difference_m * rates.precipitation_per_m;

        let temperature = self.temperature().iter().map(|&t| t + dt).collect();
        let precipitation = self
            .precipitation()
            .iter()
            .map(|&p| (p + dp).max(0.0))
            .collect();

        MeteoSeries::from_parts(
            self.timestamps().to_vec(),
            temperature,
            precipitation,
            self.pet().to_vec(),
            self.step(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};

    fn make_series() -> MeteoSeries {
        let t0 = NaiveDate::from_ymd_opt(2010, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let ts: Vec<_> = (0..3).map(|d| t0 + Duration::days(d)).collect();
        MeteoSeries::new(ts, vec![2.0, 0.0, -1.0], vec![5.0, 0.0, 0.2], vec![0.3; 3]).unwrap()
    }

    #[test]
    fn temperature_shifted_by_lapse() {
        // 21 m higher at -0.006 K/m, as in the reference setup.
        let rates = LapseRates::new(-0.006, 0.0);
        let scaled = make_series().rescaled(21.0, &rates);
        assert_relative_eq!(scaled.temperature()[0], 2.0 - 0.126, epsilon = 1e-12);
        assert_relative_eq!(scaled.temperature()[2], -1.0 - 0.126, epsilon = 1e-12);
    }

    #[test]
    fn precipitation_floored_at_zero() {
        let rates = LapseRates::new(0.0, -0.05);
        let scaled = make_series().rescaled(21.0, &rates);
        // 0.2 - 1.05 would be negative; floored instead.
        assert_eq!(scaled.precipitation()[2], 0.0);
        assert_relative_eq!(scaled.precipitation()[0], 5.0 - 1.05, epsilon = 1e-12);
    }

    #[test]
    fn pet_and_timestamps_unchanged() {
        let series = make_series();
        let rates = LapseRates::new(-0.006, 0.001);
        let scaled = series.rescaled(100.0, &rates);
        assert_eq!(scaled.pet(), series.pet());
        assert_eq!(scaled.timestamps(), series.timestamps());
        assert_eq!(scaled.step(), series.step());
    }

    #[test]
    fn zero_height_difference_is_identity() {
        let series = make_series();
        let rates = LapseRates::new(-0.006, 0.01);
        let scaled = series.rescaled(0.0, &rates);
        assert_eq!(scaled, series);
    }
}
