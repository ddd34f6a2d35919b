//! Test data generators for synthetic forecast grids and satellite tracks.
//!
//! Generators return plain tuples and vectors so every crate in the
//! workspace can wrap them in its own types.

use chrono::{Duration, NaiveDateTime};

/// Cell centres of a regular grid covering `bbox`.
///
/// `bbox` is `(min_lon, min_lat, max_lon, max_lat)`. Cells are returned as
/// `(lat, lon)` pairs, latitude-major, each at the centre of its box.
///
/// # Example
///
/// ```
/// use test_utils::lat_lon_grid;
///
/// let cells = lat_lon_grid((-70.0, -10.0, 10.0, 30.0), 4, 8);
/// assert_eq!(cells.len(), 32);
/// assert_eq!(cells[0], (-5.0, -65.0));
/// ```
pub fn lat_lon_grid(bbox: (f64, f64, f64, f64), n_lat: usize, n_lon: usize) -> Vec<(f64, f64)> {
    let (min_lon, min_lat, max_lon, max_lat) = bbox;
    let dlat = (max_lat - min_lat) / n_lat.max(1) as f64;
    let dlon = (max_lon - min_lon) / n_lon.max(1) as f64;

    let mut cells = Vec::with_capacity(n_lat * n_lon);
    for row in 0..n_lat {
        for col in 0..n_lon {
            cells.push((
                min_lat + (row as f64 + 0.5) * dlat,
                min_lon + (col as f64 + 0.5) * dlon,
            ));
        }
    }
    cells
}

/// Running total of `increments`, the way an accumulated field is stored.
///
/// ```
/// use test_utils::cumulative_series;
///
/// assert_eq!(cumulative_series(&[10.0, 15.0, 20.0]), vec![10.0, 25.0, 45.0]);
/// ```
pub fn cumulative_series(increments: &[f32]) -> Vec<f32> {
    increments
        .iter()
        .scan(0.0_f32, |total, &inc| {
            *total += inc;
            Some(*total)
        })
        .collect()
}

/// Accumulated rows for `cells` cells where every cell gains `increments[t]`
/// scaled by `(cell + 1)` at step `t`.
///
/// Makes per-cell rates easy to check: cell `c` at step `t` has rate
/// `increments[t] * (c + 1)` per step.
pub fn cumulative_rows(increments: &[f32], cells: usize) -> Vec<Vec<f32>> {
    let totals = cumulative_series(increments);
    totals
        .iter()
        .map(|&total| (0..cells).map(|c| total * (c + 1) as f32).collect())
        .collect()
}

/// `count` valid times starting at `start`, `step_hours` apart.
pub fn valid_times(start: NaiveDateTime, count: usize, step_hours: i64) -> Vec<NaiveDateTime> {
    (0..count)
        .map(|i| start + Duration::hours(step_hours * i as i64))
        .collect()
}

/// A single pass as `(time, lat, lon)` samples, one every `cadence_secs`.
///
/// Longitude drifts slightly westward with time, as for a sun-synchronous
/// orbit crossing the tropical Atlantic.
pub fn track_pass(
    start: NaiveDateTime,
    cadence_secs: i64,
    lats: &[f64],
) -> Vec<(NaiveDateTime, f64, f64)> {
    lats.iter()
        .enumerate()
        .map(|(i, &lat)| {
            let time = start + Duration::seconds(cadence_secs * i as i64);
            let lon = -30.0 - 0.05 * i as f64;
            (time, lat, lon)
        })
        .collect()
}

/// A day's track made of passes separated by `gap_secs`.
///
/// Pass `k` has `pass_lengths[k]` samples, `cadence_secs` apart, and
/// alternates between ascending (even `k`) and descending (odd `k`).
pub fn track_with_gaps(
    start: NaiveDateTime,
    cadence_secs: i64,
    pass_lengths: &[usize],
    gap_secs: i64,
) -> Vec<(NaiveDateTime, f64, f64)> {
    let mut samples = Vec::new();
    let mut time = start;

    for (k, &len) in pass_lengths.iter().enumerate() {
        let lats: Vec<f64> = (0..len)
            .map(|i| {
                let step = i as f64 * 0.5;
                if k % 2 == 0 {
                    -10.0 + step
                } else {
                    30.0 - step
                }
            })
            .collect();
        let pass = track_pass(time, cadence_secs, &lats);
        if let Some((last, _, _)) = pass.last() {
            time = *last + Duration::seconds(gap_secs);
        }
        samples.extend(pass);
    }
    samples
}
