//! Dashboard Module
//! Load once, then rerun filter -> aggregate -> chart inputs on every
//! criteria change.

use crate::charts::{ChartData, ChartDataBuilder};
use crate::data::{
    ClimateSubset, DataLoader, DataProcessor, FilterCriteria, FilterEngine, FilteredView,
    LoaderError, ProcessorError,
};
use crate::stats::{Metrics, MetricsAggregator};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error("Error preparing dataset: {0}")]
    Preprocess(#[from] ProcessorError),
}

/// Output of one recomputation pass.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub view: FilteredView,
    pub metrics: Metrics,
    pub charts: ChartData,
}

impl DashboardSnapshot {
    pub fn compute(subset: &Arc<ClimateSubset>, criteria: &FilterCriteria) -> Self {
        let view = FilterEngine::apply(subset, criteria);
        let metrics = MetricsAggregator::summarize(&view);
        let charts = ChartDataBuilder::build(&view);
        Self {
            view,
            metrics,
            charts,
        }
    }
}

/// The cleaned subset plus the latest criteria and their results.
pub struct Dashboard {
    subset: Arc<ClimateSubset>,
    criteria: FilterCriteria,
    snapshot: DashboardSnapshot,
}

impl Dashboard {
    /// Load and preprocess the dataset, starting with everything selected.
    pub fn open(loader: &mut DataLoader) -> Result<Self, DashboardError> {
        let dataset = loader.load()?;
        let subset = DataProcessor::restrict_and_clean(&dataset)?;
        if subset.is_empty() {
            log::warn!("No climate-driven disasters in {}", dataset.source.display());
        }
        Ok(Self::from_subset(Arc::new(subset)))
    }

    pub fn from_subset(subset: Arc<ClimateSubset>) -> Self {
        let criteria = FilterCriteria::full(&subset);
        let snapshot = DashboardSnapshot::compute(&subset, &criteria);
        Self {
            subset,
            criteria,
            snapshot,
        }
    }

    pub fn subset(&self) -> &ClimateSubset {
        &self.subset
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    /// Replace the criteria and recompute every derived value.
    pub fn refresh(&mut self, criteria: FilterCriteria) {
        self.snapshot = DashboardSnapshot::compute(&self.subset, &criteria);
        log::debug!(
            "Refreshed: years {}..={}, {} types -> {} rows",
            criteria.year_range.low,
            criteria.year_range.high,
            criteria.selected_types.len(),
            self.snapshot.view.len()
        );
        self.criteria = criteria;
    }
}
