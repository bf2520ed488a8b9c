//! Statistics Calculator Module
//! Scalar summaries and Pearson correlation over a filtered view.

use crate::data::FilteredView;
use statrs::statistics::Statistics;

/// Headline numbers for the metrics row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    pub event_count: usize,
    pub total_deaths: f64,
    pub total_affected: f64,
    /// Thousands of US dollars.
    pub total_damages: f64,
}

pub struct MetricsAggregator;

impl MetricsAggregator {
    /// Row count and impact sums; all zero for an empty view.
    pub fn summarize(view: &FilteredView) -> Metrics {
        view.iter().fold(Metrics::default(), |mut acc, record| {
            acc.event_count += 1;
            acc.total_deaths += record.total_deaths;
            acc.total_affected += record.total_affected;
            acc.total_damages += record.total_damages;
            acc
        })
    }
}

/// Sample Pearson correlation of two equally long series.
///
/// Returns NaN with fewer than two points or when either series has zero
/// variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() || xs.len() < 2 {
        return f64::NAN;
    }

    let sx = xs.std_dev();
    let sy = ys.std_dev();
    if !(sx > 0.0 && sy > 0.0) || !sx.is_finite() || !sy.is_finite() {
        return f64::NAN;
    }

    let r = xs.covariance(ys) / (sx * sy);
    r.clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ClimateSubset, DisasterRecord, FilterCriteria, FilterEngine, YearRange};
    use std::sync::Arc;

    fn view_of(records: Vec<DisasterRecord>, types: &[&str]) -> FilteredView {
        let subset = Arc::new(ClimateSubset::new(records, Vec::new()));
        let criteria = FilterCriteria::new(YearRange::new(1900, 2100), types.iter().copied());
        FilterEngine::apply(&subset, &criteria)
    }

    #[test]
    fn sums_impact_columns() {
        let view = view_of(
            vec![
                DisasterRecord::new(2000, "Flood", 5.0, 100.0, 1.5),
                DisasterRecord::new(2001, "Flood", 0.0, 50.0, 2.5),
                DisasterRecord::new(2002, "Flood", 10.0, 0.0, 6.0),
            ],
            &["Flood"],
        );

        let metrics = MetricsAggregator::summarize(&view);
        assert_eq!(metrics.event_count, 3);
        assert_eq!(metrics.total_deaths, 15.0);
        assert_eq!(metrics.total_affected, 150.0);
        assert_eq!(metrics.total_damages, 10.0);
    }

    #[test]
    fn empty_view_sums_to_zero() {
        let view = view_of(vec![DisasterRecord::new(2000, "Flood", 5.0, 1.0, 1.0)], &[]);
        assert_eq!(MetricsAggregator::summarize(&view), Metrics::default());
    }

    #[test]
    fn pearson_perfect_and_inverse() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        assert!((pearson(&xs, &[2.0, 4.0, 6.0, 8.0]) - 1.0).abs() < 1e-12);
        assert!((pearson(&xs, &[8.0, 6.0, 4.0, 2.0]) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_undefined_cases() {
        assert!(pearson(&[1.0], &[2.0]).is_nan());
        assert!(pearson(&[], &[]).is_nan());
        assert!(pearson(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).is_nan());
    }
}
