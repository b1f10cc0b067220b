//! Aggregator Module
//! Value counts for categorical fields and field x personality cross-tabulations.

use crate::data::schema::{FieldKind, ALL_FIELDS, BAR_FIELDS, PERSONALITY, PERSONALITY_ORDER, PIE_FIELDS};
use crate::data::{is_float, is_integer};
use polars::prelude::*;
use rayon::prelude::*;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Column '{0}' is not numeric")]
    NotNumeric(String),
}

/// Count of rows per categorical value, sorted ascending by label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountTable {
    pub field: String,
    counts: BTreeMap<String, usize>,
}

impl CountTable {
    #[cfg(test)]
    pub fn get(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// (label, count) pairs in ascending label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(label, &count)| (label.as_str(), count))
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// An ordinal axis value stored as exact tenths, so ordering is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrdinalKey(i64);

impl OrdinalKey {
    pub fn from_value(v: f64) -> Self {
        Self((v * 10.0).round() as i64)
    }

    pub fn value(self) -> f64 {
        self.0 as f64 / 10.0
    }
}

/// Row counts keyed by (ordinal value, personality label).
///
/// Every row holds one count per label; combinations absent from the data
/// are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossTab {
    pub field: String,
    /// Source column held integers: tick labels print without decimals.
    integral: bool,
    /// Labels seen in the data, ascending.
    labels: Vec<String>,
    rows: BTreeMap<OrdinalKey, Vec<usize>>,
}

impl CrossTab {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Count for one cell. `None` only when the value never occurs.
    pub fn count(&self, value: f64, label: &str) -> Option<usize> {
        let row = self.rows.get(&OrdinalKey::from_value(value))?;
        Some(
            self.labels
                .iter()
                .position(|l| l == label)
                .map(|i| row[i])
                .unwrap_or(0),
        )
    }

    /// Stacking order: Introvert, Extrovert, then any other labels ascending.
    pub fn display_labels(&self) -> Vec<String> {
        let mut ordered: Vec<String> = PERSONALITY_ORDER.iter().map(|s| s.to_string()).collect();
        ordered.extend(
            self.labels
                .iter()
                .filter(|l| !PERSONALITY_ORDER.contains(&l.as_str()))
                .cloned(),
        );
        ordered
    }

    /// Counts for one label, one entry per key in key order.
    pub fn series(&self, label: &str) -> Vec<usize> {
        match self.labels.iter().position(|l| l == label) {
            Some(i) => self.rows.values().map(|row| row[i]).collect(),
            None => vec![0; self.rows.len()],
        }
    }

    /// Axis tick text for each key, `3` for integer fields and `3.0` otherwise.
    pub fn tick_labels(&self) -> Vec<String> {
        self.rows
            .keys()
            .map(|key| {
                if self.integral {
                    format!("{}", key.value().round() as i64)
                } else {
                    format!("{:.1}", key.value())
                }
            })
            .collect()
    }

    /// Height of the tallest stacked bar.
    pub fn max_stack(&self) -> usize {
        self.rows
            .values()
            .map(|row| row.iter().sum::<usize>())
            .max()
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.rows.values().flatten().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Everything the dashboard renderer draws.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub row_count: usize,
    /// One table per pie panel, in panel order.
    pub pies: Vec<CountTable>,
    /// One table per stacked-bar panel, in panel order.
    pub bars: Vec<CrossTab>,
}

/// Handles count and cross-tab computations with multi-threading support.
pub struct Aggregator;

impl Aggregator {
    /// Verify every survey field is present and numeric fields are numeric.
    pub fn check_schema(df: &DataFrame) -> Result<(), AggregateError> {
        for field in ALL_FIELDS {
            let column = df
                .column(field.name)
                .map_err(|_| AggregateError::MissingColumn(field.name.to_string()))?;
            if field.kind == FieldKind::Numeric
                && !is_float(column.dtype())
                && !is_integer(column.dtype())
            {
                return Err(AggregateError::NotNumeric(field.name.to_string()));
            }
        }
        Ok(())
    }

    /// Count rows per value of a categorical column.
    pub fn count(df: &DataFrame, field: &str) -> Result<CountTable, AggregateError> {
        let column = df
            .column(field)
            .map_err(|_| AggregateError::MissingColumn(field.to_string()))?;
        let as_str = column.cast(&DataType::String)?;
        let values = as_str.str()?;

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for value in values.into_iter().flatten() {
            *counts.entry(value.to_string()).or_default() += 1;
        }

        debug!("Counts for {}: {:?}", field, counts);
        Ok(CountTable {
            field: field.to_string(),
            counts,
        })
    }

    /// Group rows by (numeric `field`, categorical `by`) and count each cell.
    pub fn cross_tab(df: &DataFrame, field: &str, by: &str) -> Result<CrossTab, AggregateError> {
        let column = df
            .column(field)
            .map_err(|_| AggregateError::MissingColumn(field.to_string()))?;
        let integral = is_integer(column.dtype());
        if !integral && !is_float(column.dtype()) {
            return Err(AggregateError::NotNumeric(field.to_string()));
        }
        let by_column = df
            .column(by)
            .map_err(|_| AggregateError::MissingColumn(by.to_string()))?;

        let values = column.cast(&DataType::Float64)?;
        let values = values.f64()?;
        let by_str = by_column.cast(&DataType::String)?;
        let groups = by_str.str()?;

        let mut cells: BTreeMap<OrdinalKey, BTreeMap<String, usize>> = BTreeMap::new();
        let mut skipped = 0usize;
        for (value, group) in values.into_iter().zip(groups.into_iter()) {
            match (value, group) {
                (Some(v), Some(g)) if !v.is_nan() => {
                    *cells
                        .entry(OrdinalKey::from_value(v))
                        .or_default()
                        .entry(g.to_string())
                        .or_default() += 1;
                }
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!("{}: skipped {} rows with missing values", field, skipped);
        }

        let mut labels: Vec<String> = cells
            .values()
            .flat_map(|cell| cell.keys().cloned())
            .collect();
        labels.sort();
        labels.dedup();

        let rows = cells
            .into_iter()
            .map(|(key, cell)| {
                let row = labels
                    .iter()
                    .map(|label| cell.get(label).copied().unwrap_or(0))
                    .collect();
                (key, row)
            })
            .collect();

        Ok(CrossTab {
            field: field.to_string(),
            integral,
            labels,
            rows,
        })
    }

    /// Build all dashboard tables from a cleaned DataFrame.
    ///
    /// The five cross-tabs are independent and computed in parallel.
    pub fn build_dashboard(df: &DataFrame) -> Result<DashboardData, AggregateError> {
        Self::check_schema(df)?;

        let pies = PIE_FIELDS
            .iter()
            .map(|field| Self::count(df, field.name))
            .collect::<Result<Vec<_>, _>>()?;

        let personality = &pies[PIE_FIELDS.len() - 1];
        for (label, count) in personality.iter() {
            if !PERSONALITY_ORDER.contains(&label) {
                warn!("Unexpected {} label '{}' ({} rows)", PERSONALITY.name, label, count);
            }
        }

        let bars = BAR_FIELDS
            .par_iter()
            .map(|field| Self::cross_tab(df, field.name, PERSONALITY.name))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Aggregated {} rows into {} count tables and {} cross-tabs",
            df.height(),
            pies.len(),
            bars.len()
        );

        Ok(DashboardData {
            row_count: df.height(),
            pies,
            bars,
        })
    }
}
