//! Whole-series simulation.

use firn_meteo::MeteoSeries;
use tracing::debug;

use crate::error::{HbvError, InputVariable};
use crate::params::HbvParams;
use crate::result::HbvOutput;
use crate::routing;
use crate::state::HbvState;
use crate::step::{StepInput, step};

/// Runs the state machine over a forcing series.
///
/// The simulation is an inherently serial fold: step `t + 1` depends on
/// the full state after step `t`. `initial` defaults to the all-zero
/// warm-up state. `external_melt`, when given, replaces the internal
/// degree-day term with the glacier model's melt series and must match the
/// forcing series in length.
///
/// # Errors
///
/// Returns [`HbvError::Configuration`] for out-of-domain parameters
/// (before any stepping), [`HbvError::LengthMismatch`] for a wrong-length
/// melt slice, and [`HbvError::DataGap`] when an input is not finite at
/// some step, with the output of all prior steps preserved in the error.
pub fn run(
    params: &HbvParams,
    series: &MeteoSeries,
    initial: Option<HbvState>,
    external_melt: Option<&[f64]>,
) -> Result<HbvOutput, HbvError> {
    params.validate()?;
    if let Some(melt) = external_melt {
        if melt.len() != series.len() {
            return Err(HbvError::LengthMismatch {
                series: series.len(),
                melt: melt.len(),
            });
        }
    }

    let weights = routing::triangular_weights(params.routing_base());
    let mut state = initial.unwrap_or_default();
    let mut out = HbvOutput::with_capacity(series.len(), state);
    let mut events = Vec::new();

    let timestamps = series.timestamps();
    let temperature = series.temperature();
    let precipitation = series.precipitation();
    let pet = series.pet();

    for index in 0..series.len() {
        let gap = |variable| {
            let mut partial = out.clone();
            partial.final_state = state;
            partial.clamp_events = events.clone();
            HbvError::DataGap {
                index,
                variable,
                partial: Some(Box::new(partial)),
            }
        };
        if !temperature[index].is_finite() {
            return Err(gap(InputVariable::Temperature));
        }
        if !precipitation[index].is_finite() {
            return Err(gap(InputVariable::Precipitation));
        }
        if !pet[index].is_finite() {
            return Err(gap(InputVariable::Pet));
        }
        let melt = match external_melt {
            Some(melt) => {
                if !melt[index].is_finite() {
                    return Err(gap(InputVariable::ExternalMelt));
                }
                Some(melt[index])
            }
            None => None,
        };

        let input = StepInput {
            temperature: temperature[index],
            precipitation: precipitation[index],
            pet: pet[index],
            external_melt: melt,
        };
        let (next, fluxes) = step(&state, params, &input, &weights, index, &mut events);
        out.push(timestamps[index], &fluxes);
        state = next;
    }

    out.final_state = state;
    out.clamp_events = events;
    debug!(
        steps = out.len(),
        clamps = out.clamp_events.len(),
        "hbv run complete"
    );
    Ok(out)
}
