//! Control Panel Widget
//! Left side panel with the year range and disaster type filters.

use crate::data::{ClimateSubset, FilterCriteria, YearRange};
use egui::{Color32, RichText};
use std::collections::BTreeSet;

/// Sidebar filter widgets. Bounds and options come from the climate subset.
pub struct ControlPanel {
    pub min_year: i32,
    pub max_year: i32,
    pub year_low: i32,
    pub year_high: i32,
    pub disaster_types: Vec<String>,
    pub selected: BTreeSet<String>,
}

impl ControlPanel {
    /// Widget bounds from the subset, initial values from `criteria`.
    pub fn new(subset: &ClimateSubset, criteria: &FilterCriteria) -> Self {
        let (min_year, max_year) = subset.year_bounds().unwrap_or((0, 0));
        Self {
            min_year,
            max_year,
            year_low: criteria.year_range.low,
            year_high: criteria.year_range.high,
            disaster_types: subset.disaster_types(),
            selected: criteria.selected_types.clone(),
        }
    }

    /// Current widget state as filter criteria.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(
            YearRange::new(self.year_low, self.year_high),
            self.selected.iter().cloned(),
        )
    }

    /// Keep `low <= high` by moving the handle that was not touched.
    pub fn set_year_low(&mut self, year: i32) {
        self.year_low = year.clamp(self.min_year, self.max_year);
        if self.year_high < self.year_low {
            self.year_high = self.year_low;
        }
    }

    pub fn set_year_high(&mut self, year: i32) {
        self.year_high = year.clamp(self.min_year, self.max_year);
        if self.year_low > self.year_high {
            self.year_low = self.year_high;
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.disaster_types.iter().cloned().collect();
    }

    pub fn select_none(&mut self) {
        self.selected.clear();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut changed = false;

        ui.add_space(5.0);
        ui.label(RichText::new("Filter Options").size(18.0).strong());
        ui.add_space(8.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Year Range =====
        ui.label(RichText::new("Select Year Range").size(14.0).strong());
        ui.add_space(5.0);

        let mut low = self.year_low;
        let mut high = self.year_high;
        let low_changed = ui
            .add(egui::Slider::new(&mut low, self.min_year..=self.max_year).text("From"))
            .changed();
        let high_changed = ui
            .add(egui::Slider::new(&mut high, self.min_year..=self.max_year).text("To"))
            .changed();

        if low_changed {
            self.set_year_low(low);
            changed = true;
        }
        if high_changed {
            self.set_year_high(high);
            changed = true;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Disaster Types =====
        ui.label(RichText::new("Select Disaster Types").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.select_all();
                changed = true;
            }
            if ui.small_button("Clear All").clicked() {
                self.select_none();
                changed = true;
            }
        });

        for name in &self.disaster_types {
            let mut checked = self.selected.contains(name);
            if ui.checkbox(&mut checked, name.as_str()).changed() {
                if checked {
                    self.selected.insert(name.clone());
                } else {
                    self.selected.remove(name);
                }
                changed = true;
            }
        }

        if self.selected.is_empty() {
            ui.add_space(5.0);
            ui.label(
                RichText::new("No disaster types selected")
                    .size(11.0)
                    .color(Color32::from_rgb(220, 53, 69)),
            );
        }

        if changed {
            ControlPanelAction::CriteriaChanged
        } else {
            ControlPanelAction::None
        }
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    CriteriaChanged,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DisasterRecord;

    fn panel() -> ControlPanel {
        let subset = ClimateSubset::new(
            vec![
                DisasterRecord::new(1990, "Storm", 0.0, 0.0, 0.0),
                DisasterRecord::new(2010, "Flood", 0.0, 0.0, 0.0),
            ],
            Vec::new(),
        );
        ControlPanel::new(&subset, &FilterCriteria::full(&subset))
    }

    #[test]
    fn starts_fully_selected() {
        let criteria = panel().criteria();
        assert_eq!(criteria.year_range, YearRange::new(1990, 2010));
        assert_eq!(criteria.selected_types.len(), 2);
    }

    #[test]
    fn year_handles_never_cross() {
        let mut panel = panel();
        panel.set_year_high(1995);
        panel.set_year_low(2000);
        assert_eq!((panel.year_low, panel.year_high), (2000, 2000));

        panel.set_year_high(1992);
        assert_eq!((panel.year_low, panel.year_high), (1992, 1992));

        panel.set_year_low(1800);
        assert_eq!(panel.year_low, 1990);
    }

    #[test]
    fn clear_all_yields_empty_selection() {
        let mut panel = panel();
        panel.select_none();
        assert!(panel.criteria().selected_types.is_empty());
        panel.select_all();
        assert_eq!(panel.criteria().selected_types.len(), 2);
    }
}
