//! Conversion of accumulated fields into instantaneous rates.
//!
//! Accumulated variables (total precipitation, top-of-atmosphere net thermal
//! radiation, ...) are zero at the run start and grow with every output step.
//! The rate for a step is the accumulation since the previous step divided by
//! the time between them; the first step is measured against the run start.

use briefing_common::{RunId, TimeUnit};

use crate::error::{ForecastError, Result};
use crate::types::{Accumulation, ForecastField};

/// Turn a cumulative field into per-`unit` rates.
///
/// ```text
/// rate[0] = cum[0] / (t[0] - run)
/// rate[i] = (cum[i] - cum[i-1]) / (t[i] - t[i-1])
/// ```
///
/// Valid times must already be on the field's native output steps and
/// strictly increasing after `run`; nothing is resampled.
pub fn to_instantaneous(field: &ForecastField, run: RunId, unit: TimeUnit) -> Result<ForecastField> {
    if field.is_empty() {
        return Err(ForecastError::EmptyField(field.name.clone()));
    }
    if field.accumulation != Accumulation::Cumulative {
        return Err(ForecastError::NotCumulative(field.name.clone()));
    }

    let mut previous_time = run.init_time();
    let mut previous_values: Option<&[f32]> = None;
    let mut rates = Vec::with_capacity(field.num_times());

    for (&time, values) in field.times.iter().zip(&field.values) {
        if time <= previous_time {
            return Err(ForecastError::invalid_time_axis(
                &field.name,
                format!("valid time {time} does not follow {previous_time}"),
            ));
        }

        let dt = unit.count(time - previous_time);
        let row = match previous_values {
            None => values.iter().map(|&v| (f64::from(v) / dt) as f32).collect(),
            Some(prev) => values
                .iter()
                .zip(prev)
                .map(|(&v, &p)| ((f64::from(v) - f64::from(p)) / dt) as f32)
                .collect(),
        };
        rates.push(row);

        previous_time = time;
        previous_values = Some(values.as_slice());
    }

    Ok(ForecastField {
        name: field.name.clone(),
        run: field.run,
        times: field.times.clone(),
        values: rates,
        cells: field.cells.clone(),
        units: field.units.as_ref().map(|u| format!("{u}/{}", unit.symbol())),
        accumulation: Accumulation::Instantaneous,
    })
}
