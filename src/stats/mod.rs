//! Stats module - metric summaries and correlation

mod calculator;

pub use calculator::{pearson, Metrics, MetricsAggregator};
