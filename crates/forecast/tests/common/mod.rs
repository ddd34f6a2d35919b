//! Synthetic catalog shared by the forecast integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use briefing_common::RunId;
use forecast::{Accumulation, CellCoords, Dataset, ForecastField, MemorySource, Product};
use test_utils::{bbox, cumulative_rows, lat_lon_grid, parse_utc, valid_times};

/// Output step of the synthetic runs.
pub const STEP_HOURS: i64 = 6;

/// Output steps per run, covering the longest lead from any recent run.
pub const STEPS: usize = 25;

/// Accumulated precipitation added per step in the first cell.
pub const TP_PER_STEP: f32 = 6.0;

pub fn run(day: u32, hour: u32) -> RunId {
    RunId::new(
        NaiveDate::from_ymd_opt(2024, 8, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap(),
    )
}

pub fn briefing() -> DateTime<Utc> {
    parse_utc(test_utils::time::BRIEFING_TIME)
}

pub fn late_now() -> DateTime<Utc> {
    parse_utc(test_utils::time::LATE_CURRENT_TIME)
}

pub fn early_now() -> DateTime<Utc> {
    parse_utc(test_utils::time::EARLY_CURRENT_TIME)
}

pub fn cells() -> Arc<CellCoords> {
    Arc::new(CellCoords::from_pairs(lat_lon_grid(bbox::WATER_VAPOUR, 4, 8)))
}

/// One run of `product` with an instantaneous `tcwv` field (from the run
/// start) and an accumulated `tp` field (from the first step after it).
///
/// `tcwv` at step `i` in cell `c` is `40 + i + c`. `tp` grows by
/// `TP_PER_STEP * (c + 1)` every step.
pub fn dataset(product: Product, run: RunId) -> Dataset {
    let cells = cells();
    let start = run.init_time();

    let tcwv_steps = valid_times(start, STEPS, STEP_HOURS)
        .into_iter()
        .enumerate()
        .map(|(i, t)| {
            let row: Vec<f32> = (0..cells.len()).map(|c| 40.0 + i as f32 + c as f32).collect();
            (t, row)
        });
    let tcwv = ForecastField::from_steps("tcwv", run, cells.clone(), Accumulation::Instantaneous, tcwv_steps)
        .unwrap()
        .with_units("kg m**-2");

    let tp_times = valid_times(start + Duration::hours(STEP_HOURS), STEPS, STEP_HOURS);
    let tp_rows = cumulative_rows(&[TP_PER_STEP; STEPS], cells.len());
    let tp = ForecastField::from_steps(
        "tp",
        run,
        cells,
        Accumulation::Cumulative,
        tp_times.into_iter().zip(tp_rows),
    )
    .unwrap()
    .with_units("m");

    Dataset::new(product, run).with_field(tcwv).with_field(tp)
}

/// Catalog holding both products for every given run.
pub fn catalog(runs: &[RunId]) -> MemorySource {
    runs.iter().fold(MemorySource::new(), |source, &r| {
        source
            .with_dataset(dataset(Product::Operational, r))
            .with_dataset(dataset(Product::Ensemble, r))
    })
}
