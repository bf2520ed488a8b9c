//! Data Processor Module
//! Restricts the raw table to climate-driven disasters and fills missing
//! impact values.

use crate::data::model::{
    ClimateSubset, Dataset, DisasterRecord, CLIMATE_DISASTER_TYPES, DISASTER_TYPE_COL,
    REQUIRED_COLUMNS, TOTAL_AFFECTED_COL, TOTAL_DAMAGES_COL, TOTAL_DEATHS_COL, YEAR_COL,
};
use polars::prelude::*;
use statrs::statistics::Statistics;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Builds the [`ClimateSubset`] from a loaded [`Dataset`].
pub struct DataProcessor;

impl DataProcessor {
    /// Keep only rows whose disaster type is one of the tracked climate
    /// categories. Row order is preserved.
    pub fn restrict_types(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let is_climate = CLIMATE_DISASTER_TYPES
            .iter()
            .fold(lit(false), |acc, name| {
                acc.or(col(DISASTER_TYPE_COL).cast(DataType::String).eq(lit(*name)))
            });

        let filtered = df.clone().lazy().filter(is_climate).collect()?;
        Ok(filtered)
    }

    /// Restrict to the climate categories and clean the impact columns:
    /// deaths and affected default to 0, damages default to the mean of the
    /// observed damages within the restricted rows.
    pub fn restrict_and_clean(dataset: &Dataset) -> Result<ClimateSubset, ProcessorError> {
        let df = Self::restrict_types(&dataset.df)?;

        let years = Self::year_values(&df, YEAR_COL)?;
        let types = Self::string_values(&df, DISASTER_TYPE_COL)?;
        let deaths = Self::float_values(&df, TOTAL_DEATHS_COL)?;
        let affected = Self::float_values(&df, TOTAL_AFFECTED_COL)?;
        let damages = Self::fill_with_mean(&Self::float_values(&df, TOTAL_DAMAGES_COL)?);

        let extra_columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .filter(|name| !REQUIRED_COLUMNS.contains(&name.as_str()))
            .collect();
        let extra_values = extra_columns
            .iter()
            .map(|name| Self::display_values(&df, name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = Vec::with_capacity(df.height());
        let mut dropped = 0usize;

        for i in 0..df.height() {
            let Some(year) = years[i] else {
                dropped += 1;
                continue;
            };
            let mut record = DisasterRecord::new(
                year,
                types[i].as_deref().unwrap_or_default(),
                deaths[i].unwrap_or(0.0),
                affected[i].unwrap_or(0.0),
                damages[i],
            );
            record.attributes = extra_values.iter().map(|col| col[i].clone()).collect();
            records.push(record);
        }

        if dropped > 0 {
            log::warn!("Dropped {dropped} rows with a missing or non-integer year");
        }
        log::info!(
            "Climate subset: {} of {} rows kept",
            records.len(),
            dataset.row_count()
        );

        Ok(ClimateSubset::new(records, extra_columns))
    }

    /// Replace missing values with the mean of the observed ones.
    /// With nothing observed the mean is undefined and 0 is used instead.
    pub fn fill_with_mean(values: &[Option<f64>]) -> Vec<f64> {
        let observed: Vec<f64> = values.iter().flatten().copied().collect();
        let fill = if observed.is_empty() {
            if !values.is_empty() {
                log::warn!("No observed damages in climate subset, filling with 0");
            }
            0.0
        } else {
            observed.mean()
        };

        values.iter().map(|v| v.unwrap_or(fill)).collect()
    }

    /// Numeric column as `Option<f64>`; NaN counts as missing.
    fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, ProcessorError> {
        let column = df.column(name)?.cast(&DataType::Float64)?;
        let values = column
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        Ok(values)
    }

    /// Whole-number years only; fractional or out-of-range values are missing.
    fn year_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i32>>, ProcessorError> {
        let years = Self::float_values(df, name)?
            .into_iter()
            .map(|v| {
                v.filter(|y| y.fract() == 0.0 && (i32::MIN as f64..=i32::MAX as f64).contains(y))
                    .map(|y| y as i32)
            })
            .collect();
        Ok(years)
    }

    fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, ProcessorError> {
        let column = df.column(name)?.cast(&DataType::String)?;
        let values = column
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect();
        Ok(values)
    }

    /// Any column rendered as text for the table view; nulls become "".
    fn display_values(df: &DataFrame, name: &str) -> Result<Vec<String>, ProcessorError> {
        Ok(Self::string_values(df, name)?
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect())
    }
}
