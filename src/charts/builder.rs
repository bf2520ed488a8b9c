//! Chart Data Builder Module
//! Derives the series behind each chart from a filtered view.

use crate::data::FilteredView;
use crate::stats::pearson;
use std::collections::{BTreeMap, HashMap};

/// Labels of the correlated impact measures, in matrix order.
pub const IMPACT_LABELS: [&str; 3] = ["Total Deaths", "Total Affected", "Total Damages ('000 US$)"];

/// Pairwise Pearson coefficients of deaths, affected and damages.
/// Undefined cells hold NaN.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationMatrix {
    pub values: [[f64; 3]; 3],
    /// Rows the coefficients were computed from.
    pub sample_size: usize,
}

impl CorrelationMatrix {
    /// Coefficient at (`row`, `col`) in [`IMPACT_LABELS`] order; `None` past index 2.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row)?.get(col).copied()
    }

    /// True when no cell is defined.
    pub fn is_undefined(&self) -> bool {
        self.values.iter().flatten().all(|v| v.is_nan())
    }
}

/// Everything the chart section draws for one recomputation pass.
#[derive(Debug, Clone)]
pub struct ChartData {
    /// (year, event count), ascending by year.
    pub yearly_trend: Vec<(i32, usize)>,
    /// (disaster type, event count), descending by count.
    pub type_distribution: Vec<(String, usize)>,
    pub correlation: CorrelationMatrix,
}

pub struct ChartDataBuilder;

impl ChartDataBuilder {
    pub fn build(view: &FilteredView) -> ChartData {
        ChartData {
            yearly_trend: Self::yearly_trend(view),
            type_distribution: Self::type_distribution(view),
            correlation: Self::correlation_matrix(view),
        }
    }

    pub fn yearly_trend(view: &FilteredView) -> Vec<(i32, usize)> {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for record in view.iter() {
            *counts.entry(record.year).or_default() += 1;
        }
        counts.into_iter().collect()
    }

    /// Ties keep first-encountered order.
    pub fn type_distribution(view: &FilteredView) -> Vec<(String, usize)> {
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(String, usize)> = Vec::new();

        for record in view.iter() {
            let slot = *slots.entry(record.disaster_type.as_str()).or_insert_with(|| {
                counts.push((record.disaster_type.clone(), 0));
                counts.len() - 1
            });
            counts[slot].1 += 1;
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    pub fn correlation_matrix(view: &FilteredView) -> CorrelationMatrix {
        let columns: [Vec<f64>; 3] = [
            view.iter().map(|r| r.total_deaths).collect(),
            view.iter().map(|r| r.total_affected).collect(),
            view.iter().map(|r| r.total_damages).collect(),
        ];

        let mut values = [[f64::NAN; 3]; 3];
        for i in 0..3 {
            for j in i..3 {
                let r = if i == j {
                    // defined iff the column has variance
                    pearson(&columns[i], &columns[i]).signum()
                } else {
                    pearson(&columns[i], &columns[j])
                };
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        CorrelationMatrix {
            values,
            sample_size: view.len(),
        }
    }
}
