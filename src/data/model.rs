//! Data Model Module
//! Core record types shared by the loader, processor and filter.

use polars::prelude::DataFrame;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Source column holding the disaster category.
pub const DISASTER_TYPE_COL: &str = "Disaster Type";
/// Source column holding the event year.
pub const YEAR_COL: &str = "Year";
pub const TOTAL_DEATHS_COL: &str = "Total Deaths";
pub const TOTAL_AFFECTED_COL: &str = "Total Affected";
pub const TOTAL_DAMAGES_COL: &str = "Total Damages ('000 US$)";

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    DISASTER_TYPE_COL,
    YEAR_COL,
    TOTAL_DEATHS_COL,
    TOTAL_AFFECTED_COL,
    TOTAL_DAMAGES_COL,
];

/// Climate-driven categories tracked by the dashboard (exact, case-sensitive).
pub const CLIMATE_DISASTER_TYPES: [&str; 4] = ["Flood", "Storm", "Wildfire", "Extreme temperature"];

/// The raw table as parsed from disk.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// File the table was read from.
    pub source: PathBuf,
    pub df: DataFrame,
}

impl Dataset {
    pub fn row_count(&self) -> usize {
        self.df.height()
    }
}

/// One cleaned disaster event.
#[derive(Debug, Clone, PartialEq)]
pub struct DisasterRecord {
    pub year: i32,
    pub disaster_type: String,
    pub total_deaths: f64,
    pub total_affected: f64,
    /// Thousands of US dollars.
    pub total_damages: f64,
    /// Remaining source columns rendered as text, aligned with
    /// [`ClimateSubset::extra_columns`].
    pub attributes: Vec<String>,
}

impl DisasterRecord {
    pub fn new(
        year: i32,
        disaster_type: &str,
        total_deaths: f64,
        total_affected: f64,
        total_damages: f64,
    ) -> Self {
        Self {
            year,
            disaster_type: disaster_type.to_string(),
            total_deaths,
            total_affected,
            total_damages,
            attributes: Vec::new(),
        }
    }
}

/// Dataset rows restricted to the climate categories, with every impact
/// measure filled in. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct ClimateSubset {
    records: Vec<DisasterRecord>,
    extra_columns: Vec<String>,
}

impl ClimateSubset {
    pub fn new(records: Vec<DisasterRecord>, extra_columns: Vec<String>) -> Self {
        Self {
            records,
            extra_columns,
        }
    }

    pub fn records(&self) -> &[DisasterRecord] {
        &self.records
    }

    /// Names of the pass-through columns carried in `DisasterRecord::attributes`.
    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Smallest and largest year present.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let years = self.years();
        Some((*years.first()?, *years.last()?))
    }

    /// Distinct disaster types, alphabetical.
    pub fn disaster_types(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.disaster_type.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Inclusive year bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub low: i32,
    pub high: i32,
}

impl YearRange {
    pub fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.low <= year && year <= self.high
    }
}

/// User selection driving every recomputation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub year_range: YearRange,
    pub selected_types: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn new<I, S>(year_range: YearRange, selected_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            year_range,
            selected_types: selected_types.into_iter().map(Into::into).collect(),
        }
    }

    /// Everything selected: full year span and every type present.
    pub fn full(subset: &ClimateSubset) -> Self {
        let (low, high) = subset.year_bounds().unwrap_or((0, 0));
        Self::new(YearRange::new(low, high), subset.disaster_types())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_subset() -> ClimateSubset {
        ClimateSubset::new(
            vec![
                DisasterRecord::new(2003, "Storm", 1.0, 0.0, 5.0),
                DisasterRecord::new(1999, "Flood", 2.0, 0.0, 5.0),
                DisasterRecord::new(2003, "Flood", 3.0, 0.0, 5.0),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn years_and_types_are_distinct_and_sorted() {
        let subset = sample_subset();
        assert_eq!(subset.years(), vec![1999, 2003]);
        assert_eq!(subset.disaster_types(), vec!["Flood", "Storm"]);
        assert_eq!(subset.year_bounds(), Some((1999, 2003)));
    }

    #[test]
    fn full_criteria_cover_everything() {
        let criteria = FilterCriteria::full(&sample_subset());
        assert_eq!(criteria.year_range, YearRange::new(1999, 2003));
        assert_eq!(criteria.selected_types.len(), 2);
    }

    #[test]
    fn empty_subset_has_no_bounds() {
        assert_eq!(ClimateSubset::default().year_bounds(), None);
    }
}
