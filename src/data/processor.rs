//! Data Processor Module
//! Cleans the raw survey table: duplicates, missing values, column names, rounding.

use crate::data::schema::{normalize_column_name, FRIENDS_CIRCLE_SIZE};
use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Round half-to-even at one decimal place.
pub fn round_tenths(v: f64) -> f64 {
    (v * 10.0).round_ties_even() / 10.0
}

pub(crate) fn is_float(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

pub(crate) fn is_integer(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Handles data cleaning operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Run the full cleaning pipeline.
    ///
    /// Steps, in order: drop exact duplicates (first kept), drop rows with any
    /// missing field, normalize column names, round numeric columns to one
    /// decimal, round `friends_circle_size` to a whole number. Rows that only
    /// became identical through rounding are then collapsed, so the output
    /// has no duplicates and cleaning it again is a no-op.
    pub fn clean(df: DataFrame) -> Result<DataFrame, ProcessorError> {
        let raw_rows = df.height();

        let df = Self::drop_duplicates(df)?;
        let deduped_rows = df.height();
        debug!("Removed {} duplicate rows", raw_rows - deduped_rows);

        let df = Self::drop_missing(df)?;
        debug!(
            "Removed {} rows with missing fields",
            deduped_rows - df.height()
        );

        let df = Self::normalize_column_names(&df)?;
        let df = Self::round_numeric_columns(&df)?;
        let df = Self::round_friends_circle(&df)?;

        let rounded_rows = df.height();
        let df = Self::drop_duplicates(df)?;
        if rounded_rows != df.height() {
            debug!(
                "Removed {} rows duplicated by rounding",
                rounded_rows - df.height()
            );
        }

        info!("Cleaned data: {} of {} rows kept", df.height(), raw_rows);
        Ok(df)
    }

    /// Remove exact-duplicate rows, keeping the first occurrence in order.
    pub fn drop_duplicates(df: DataFrame) -> Result<DataFrame, ProcessorError> {
        let df = df
            .lazy()
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()?;
        Ok(df)
    }

    /// Remove every row that has a missing value in any column.
    pub fn drop_missing(df: DataFrame) -> Result<DataFrame, ProcessorError> {
        let df = df.lazy().drop_nulls(None).collect()?;
        Ok(df)
    }

    /// Rewrite column names to lowercase, underscore-separated form.
    pub fn normalize_column_names(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let columns: Vec<Column> = df
            .get_columns()
            .iter()
            .map(|column| {
                let mut column = column.clone();
                let name = normalize_column_name(column.name());
                column.rename(name.into());
                column
            })
            .collect();

        Ok(DataFrame::new(columns)?)
    }

    /// Round every floating-point column to one decimal place.
    ///
    /// Integer columns are already exact and pass through unchanged.
    pub fn round_numeric_columns(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let mut columns: Vec<Column> = Vec::with_capacity(df.width());

        for column in df.get_columns() {
            if is_float(column.dtype()) {
                let name = column.name().clone();
                let values = column.cast(&DataType::Float64)?;
                let rounded = values.f64()?.apply_values(round_tenths);
                columns.push(Column::from(rounded.into_series().with_name(name)));
            } else {
                columns.push(column.clone());
            }
        }

        Ok(DataFrame::new(columns)?)
    }

    /// Round `friends_circle_size` to a whole number stored as Int64.
    ///
    /// Tolerates the column being absent or non-numeric.
    pub fn round_friends_circle(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let Ok(column) = df.column(FRIENDS_CIRCLE_SIZE.name) else {
            return Ok(df.clone());
        };

        let whole = if is_float(column.dtype()) {
            let name = column.name().clone();
            let values = column.cast(&DataType::Float64)?;
            let rounded = values.f64()?.apply_values(f64::round_ties_even);
            Column::from(rounded.into_series().with_name(name)).cast(&DataType::Int64)?
        } else if is_integer(column.dtype()) {
            column.cast(&DataType::Int64)?
        } else {
            return Ok(df.clone());
        };

        let mut df = df.clone();
        df.with_column(whole)?;
        Ok(df)
    }
}
