//! Filter Engine Module
//! Applies the user's year range and type selection to the climate subset.

use crate::data::model::{ClimateSubset, DisasterRecord, FilterCriteria};
use std::sync::Arc;

/// Rows of a [`ClimateSubset`] that pass a [`FilterCriteria`].
///
/// Holds indices into the shared subset; a new view is derived for every
/// criteria change and never patched in place.
#[derive(Debug, Clone)]
pub struct FilteredView {
    subset: Arc<ClimateSubset>,
    indices: Vec<usize>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&DisasterRecord> {
        self.indices
            .get(row)
            .and_then(|&idx| self.subset.records().get(idx))
    }

    /// Records in source order.
    pub fn iter(&self) -> impl Iterator<Item = &DisasterRecord> + '_ {
        self.indices
            .iter()
            .filter_map(|&idx| self.subset.records().get(idx))
    }

    /// Column names of the pass-through attributes.
    pub fn extra_columns(&self) -> &[String] {
        self.subset.extra_columns()
    }
}

pub struct FilterEngine;

impl FilterEngine {
    /// Keep rows with `low <= year <= high` and a selected type.
    /// An empty type selection produces an empty view.
    pub fn apply(subset: &Arc<ClimateSubset>, criteria: &FilterCriteria) -> FilteredView {
        let indices = subset
            .records()
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                criteria.year_range.contains(record.year)
                    && criteria.selected_types.contains(&record.disaster_type)
            })
            .map(|(i, _)| i)
            .collect();

        FilteredView {
            subset: Arc::clone(subset),
            indices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::YearRange;

    fn subset() -> Arc<ClimateSubset> {
        Arc::new(ClimateSubset::new(
            vec![
                DisasterRecord::new(2000, "Flood", 1.0, 0.0, 0.0),
                DisasterRecord::new(2001, "Flood", 2.0, 0.0, 0.0),
                DisasterRecord::new(2002, "Flood", 3.0, 0.0, 0.0),
                DisasterRecord::new(2001, "Storm", 4.0, 0.0, 0.0),
                DisasterRecord::new(2002, "Wildfire", 5.0, 0.0, 0.0),
            ],
            Vec::new(),
        ))
    }

    #[test]
    fn keeps_exactly_matching_rows() {
        let criteria = FilterCriteria::new(YearRange::new(2001, 2002), ["Flood"]);
        let view = FilterEngine::apply(&subset(), &criteria);

        let years: Vec<i32> = view.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2001, 2002]);
        assert!(view.iter().all(|r| r.disaster_type == "Flood"));
    }

    #[test]
    fn empty_selection_gives_empty_view() {
        let criteria = FilterCriteria::new(YearRange::new(2000, 2002), Vec::<String>::new());
        let view = FilterEngine::apply(&subset(), &criteria);
        assert!(view.is_empty());
    }

    #[test]
    fn inverted_range_gives_empty_view() {
        let criteria = FilterCriteria::new(YearRange::new(2002, 2000), ["Flood", "Storm"]);
        assert!(FilterEngine::apply(&subset(), &criteria).is_empty());
    }

    #[test]
    fn subset_is_untouched() {
        let source = subset();
        let criteria = FilterCriteria::new(YearRange::new(2002, 2002), ["Wildfire"]);

        let first = FilterEngine::apply(&source, &criteria);
        let second = FilterEngine::apply(&source, &criteria);

        assert_eq!(source.len(), 5);
        assert_eq!(first.len(), 1);
        assert_eq!(first.get(0), second.get(0));
        assert_eq!(first.get(0).map(|r| r.total_deaths), Some(5.0));
    }
}
