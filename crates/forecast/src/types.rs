//! Core types for forecast fields and datasets.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use briefing_common::{BoundingBox, RunId};

use crate::error::{ForecastError, Result};

/// Forecast product published alongside every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Product {
    /// Deterministic high-resolution run ("oper").
    #[default]
    #[serde(rename = "oper")]
    Operational,
    /// Companion ensemble ("enfo").
    #[serde(rename = "enfo")]
    Ensemble,
}

impl Product {
    pub fn code(&self) -> &'static str {
        match self {
            Product::Operational => "oper",
            Product::Ensemble => "enfo",
        }
    }
}

impl FromStr for Product {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "oper" | "operational" => Ok(Product::Operational),
            "enfo" | "ensemble" => Ok(Product::Ensemble),
            other => Err(ForecastError::config(format!("unknown product '{other}'"))),
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Whether a field holds totals since run start or point-in-time values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accumulation {
    /// Accumulated since the run started (e.g. `tp`, `ttr`).
    Cumulative,
    Instantaneous,
}

/// Centre coordinates of every grid cell, in cell order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CellCoords {
    lat: Vec<f64>,
    lon: Vec<f64>,
}

impl CellCoords {
    /// Build from parallel latitude/longitude vectors.
    pub fn new(lat: Vec<f64>, lon: Vec<f64>) -> Result<Self> {
        if lat.len() != lon.len() {
            return Err(ForecastError::invalid_shape(
                "cells",
                format!("{} latitudes but {} longitudes", lat.len(), lon.len()),
            ));
        }
        Ok(Self { lat, lon })
    }

    /// Build from `(lat, lon)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (lat, lon) = pairs.into_iter().unzip();
        Self { lat, lon }
    }

    pub fn len(&self) -> usize {
        self.lat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lat.is_empty()
    }

    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// Indices of the cells whose centre lies inside `bbox`.
    pub fn indices_within(&self, bbox: &BoundingBox) -> Vec<usize> {
        self.lat
            .iter()
            .zip(&self.lon)
            .enumerate()
            .filter(|(_, (lat, lon))| bbox.contains(**lon, **lat))
            .map(|(i, _)| i)
            .collect()
    }
}

/// A named, time-indexed, cell-indexed forecast variable of one run.
///
/// Built through [`ForecastField::from_steps`], which guarantees one value
/// per cell in every step. The fields cannot be set from outside the crate:
///
/// ```compile_fail
/// fn truncate(field: &mut forecast::ForecastField) {
///     field.values[0].clear();
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastField {
    pub(crate) name: String,
    pub(crate) run: RunId,
    /// Valid times (naive UTC), one per entry in `values`.
    pub(crate) times: Vec<NaiveDateTime>,
    /// `values[t][cell]`.
    pub(crate) values: Vec<Vec<f32>>,
    pub(crate) cells: Arc<CellCoords>,
    pub(crate) units: Option<String>,
    pub(crate) accumulation: Accumulation,
}

impl ForecastField {
    /// Build a field from `(valid_time, values)` steps.
    ///
    /// Every step must carry exactly one value per cell.
    pub fn from_steps(
        name: impl Into<String>,
        run: RunId,
        cells: Arc<CellCoords>,
        accumulation: Accumulation,
        steps: impl IntoIterator<Item = (NaiveDateTime, Vec<f32>)>,
    ) -> Result<Self> {
        let name = name.into();
        let (times, values): (Vec<_>, Vec<_>) = steps.into_iter().unzip();

        if let Some((t, row)) = times
            .iter()
            .zip(&values)
            .find(|(_, row)| row.len() != cells.len())
        {
            return Err(ForecastError::invalid_shape(
                &name,
                format!("step {t} has {} values for {} cells", row.len(), cells.len()),
            ));
        }

        Ok(Self {
            name,
            run,
            times,
            values,
            cells,
            units: None,
            accumulation,
        })
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run(&self) -> RunId {
        self.run
    }

    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    /// Values of step `t`, one per cell.
    pub fn step(&self, t: usize) -> Option<&[f32]> {
        self.values.get(t).map(Vec::as_slice)
    }

    pub fn cells(&self) -> &CellCoords {
        &self.cells
    }

    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    pub fn accumulation(&self) -> Accumulation {
        self.accumulation
    }

    pub fn num_times(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn is_cumulative(&self) -> bool {
        self.accumulation == Accumulation::Cumulative
    }

    pub fn time_index(&self, valid_time: NaiveDateTime) -> Option<usize> {
        self.times.iter().position(|&t| t == valid_time)
    }

    /// The values valid at exactly `valid_time`, if that step exists.
    pub fn slice_at(&self, valid_time: NaiveDateTime) -> Option<ForecastSlice> {
        let index = self.time_index(valid_time)?;
        Some(ForecastSlice {
            name: self.name.clone(),
            run: self.run,
            valid_time,
            values: self.values[index].clone(),
            cells: self.cells.as_ref().clone(),
            units: self.units.clone(),
        })
    }
}

/// One valid time of a forecast field.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSlice {
    pub name: String,
    pub run: RunId,
    pub valid_time: NaiveDateTime,
    pub values: Vec<f32>,
    pub cells: CellCoords,
    pub units: Option<String>,
}

impl ForecastSlice {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(lat, lon, value)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, f32)> + '_ {
        self.cells
            .lat()
            .iter()
            .zip(self.cells.lon())
            .zip(&self.values)
            .map(|((&lat, &lon), &v)| (lat, lon, v))
    }

    /// Keep only the cells inside `bbox`.
    pub fn within(self, bbox: &BoundingBox) -> Self {
        let (pairs, values): (Vec<_>, Vec<_>) = self
            .iter()
            .filter(|&(lat, lon, _)| bbox.contains(lon, lat))
            .map(|(lat, lon, v)| ((lat, lon), v))
            .unzip();
        Self {
            values,
            cells: CellCoords::from_pairs(pairs),
            ..self
        }
    }

    /// Largest finite value, if any.
    pub fn max(&self) -> Option<f32> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f32::max)
    }

    /// Mean over the finite values, if any.
    pub fn mean(&self) -> Option<f64> {
        let finite: Vec<f64> = self
            .values
            .iter()
            .filter(|v| v.is_finite())
            .map(|&v| f64::from(v))
            .collect();
        if finite.is_empty() {
            None
        } else {
            Some(finite.iter().sum::<f64>() / finite.len() as f64)
        }
    }
}

/// Every field published for one product and run.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub product: Product,
    pub run: RunId,
    fields: BTreeMap<String, ForecastField>,
}

impl Dataset {
    pub fn new(product: Product, run: RunId) -> Self {
        Self {
            product,
            run,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, field: ForecastField) -> Self {
        self.insert(field);
        self
    }

    pub fn insert(&mut self, field: ForecastField) {
        self.fields.insert(field.name.clone(), field);
    }

    pub fn field(&self, variable: &str) -> Option<&ForecastField> {
        self.fields.get(variable)
    }

    /// Variable names, sorted.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
