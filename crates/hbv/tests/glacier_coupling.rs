//! Coupling the degree-day glacier model into the catchment model.
//!
//! Mirrors the intended workflow: downscale the station forcing to the
//! glacier elevation, run the melt model there, and feed its melt into the
//! catchment state machine as the external snowmelt term.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use firn_hbv::{HbvParams, run};
use firn_melt::{MeltModel, MeltParams, MeltState};
use firn_meteo::{LapseRates, MeteoSeries};

fn station_series() -> MeteoSeries {
    let n = 180;
    let t0 = NaiveDate::from_ymd_opt(2015, 4, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let ts: Vec<NaiveDateTime> = (0..n).map(|d| t0 + Duration::days(d as i64)).collect();
    // Spring-to-autumn warming and cooling.
    let temperature: Vec<f64> = (0..n)
        .map(|d| -2.0 + 14.0 * (std::f64::consts::PI * d as f64 / n as f64).sin())
        .collect();
    let precipitation: Vec<f64> = (0..n).map(|d| if d % 5 == 0 { 10.0 } else { 0.0 }).collect();
    let pet: Vec<f64> = temperature.iter().map(|t| (t * 0.15).max(0.0)).collect();
    MeteoSeries::new(ts, temperature, precipitation, pet).unwrap()
}

#[test]
fn glacier_melt_feeds_catchment_discharge() {
    let station = station_series();

    // Glacier sits 450 m above the station.
    let glacier = station.rescaled(450.0, &LapseRates::new(-0.006, 0.0));
    let melt_model = MeltModel::new(MeltParams::new()).unwrap();
    let melt_out = melt_model
        .run(&glacier, MeltState::with_snow_depth(100.0))
        .unwrap();

    let params = HbvParams::new().with_snowfall_correction(1.0);
    let coupled = run(&params, &station, None, Some(&melt_out.melt)).unwrap();
    let uncoupled = run(&params, &station, None, None).unwrap();

    assert_eq!(coupled.len(), station.len());

    // The glacier only adds water.
    let coupled_total: f64 = coupled.discharge.iter().sum();
    let uncoupled_total: f64 = uncoupled.discharge.iter().sum();
    assert!(coupled_total > uncoupled_total);

    // Melt season discharge responds where the glacier melts.
    let peak_melt_step = (0..melt_out.len())
        .max_by(|&a, &b| melt_out.melt[a].total_cmp(&melt_out.melt[b]))
        .unwrap();
    assert!(melt_out.melt[peak_melt_step] > 0.0);
    assert!(coupled.discharge[peak_melt_step] > uncoupled.discharge[peak_melt_step]);
}

#[test]
fn colder_glacier_produces_less_melt() {
    let station = station_series();
    let model = MeltModel::new(MeltParams::new()).unwrap();

    let low = station.rescaled(200.0, &LapseRates::new(-0.006, 0.0));
    let high = station.rescaled(800.0, &LapseRates::new(-0.006, 0.0));

    let melt_low: f64 = model
        .run(&low, MeltState::bare_ice())
        .unwrap()
        .melt
        .iter()
        .sum();
    let melt_high: f64 = model
        .run(&high, MeltState::bare_ice())
        .unwrap()
        .melt
        .iter()
        .sum();

    assert!(melt_low > melt_high);
}
