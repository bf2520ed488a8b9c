//! Chart Viewer Widget
//! Central panel: metrics row, charts and the detailed table.

use crate::charts::ChartPlotter;
use crate::dashboard::DashboardSnapshot;
use crate::data::{DisasterRecord, FilteredView};
use crate::gui::format::{format_damages, format_thousands};
use crate::stats::Metrics;
use egui::{Color32, RichText, ScrollArea};

const TREND_HEIGHT: f32 = 280.0;
const DISTRIBUTION_HEIGHT: f32 = 260.0;
const TABLE_HEIGHT: f32 = 360.0;
const TABLE_ROW_HEIGHT: f32 = 18.0;
const TABLE_COL_WIDTH: f32 = 140.0;

const CORE_HEADERS: [&str; 5] = [
    "Year",
    "Disaster Type",
    "Total Deaths",
    "Total Affected",
    "Total Damages ('000 US$)",
];

pub struct ChartViewer;

impl ChartViewer {
    pub fn show(ui: &mut egui::Ui, snapshot: &DashboardSnapshot) {
        ui.heading(RichText::new("Climate-Driven Disaster Risk Reduction Analysis").size(24.0));
        ui.label(
            "Interactive analysis of climate-driven disasters (Flood, Storm, Wildfire, \
             Extreme temperature) to support Disaster Risk Reduction (DRR) strategies.",
        );
        ui.add_space(10.0);

        Self::draw_metrics(ui, &snapshot.metrics);
        ui.add_space(15.0);

        ui.heading("Temporal Analysis of Climate Disasters");
        ui.label(RichText::new("Trend of Climate-Driven Disasters").strong());
        ChartPlotter::draw_trend_chart(ui, &snapshot.charts.yearly_trend, TREND_HEIGHT);
        ui.add_space(15.0);

        ui.heading("Disaster Distribution and Impact Analysis");
        ui.columns(2, |cols| {
            cols[0].label(RichText::new("Distribution of Disaster Types").strong());
            ChartPlotter::draw_distribution_chart(
                &mut cols[0],
                &snapshot.charts.type_distribution,
                DISTRIBUTION_HEIGHT,
            );

            cols[1].label(RichText::new("Correlation of Impact Measures").strong());
            ChartPlotter::draw_correlation_heatmap(&mut cols[1], &snapshot.charts.correlation);
        });
        ui.add_space(15.0);

        ui.heading("Detailed Dataset View");
        Self::draw_table(ui, &snapshot.view);
    }

    fn draw_metrics(ui: &mut egui::Ui, metrics: &Metrics) {
        let cards = [
            ("Total Events", format_thousands(metrics.event_count as f64)),
            ("Total Deaths", format_thousands(metrics.total_deaths)),
            ("Total Affected", format_thousands(metrics.total_affected)),
            ("Total Damages (USD)", format_damages(metrics.total_damages)),
        ];

        ui.columns(cards.len(), |cols| {
            for (col, (label, value)) in cols.iter_mut().zip(cards.iter()) {
                egui::Frame::none()
                    .fill(col.visuals().widgets.noninteractive.bg_fill)
                    .rounding(5.0)
                    .inner_margin(8.0)
                    .show(col, |ui| {
                        ui.label(RichText::new(*label).size(12.0).color(Color32::GRAY));
                        ui.label(RichText::new(value).size(22.0).strong());
                    });
            }
        });
    }

    fn draw_table(ui: &mut egui::Ui, view: &FilteredView) {
        let headers: Vec<&str> = CORE_HEADERS
            .iter()
            .copied()
            .chain(view.extra_columns().iter().map(String::as_str))
            .collect();

        let caption = if view.is_empty() {
            "No events match the current filters".to_string()
        } else {
            format!("{} rows", view.len())
        };
        ui.label(RichText::new(caption).size(11.0).color(Color32::GRAY));

        ScrollArea::horizontal().id_salt("table_scroll_x").show(ui, |ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    for header in &headers {
                        Self::table_cell(ui, RichText::new(*header).strong());
                    }
                });
                ui.separator();

                ScrollArea::vertical()
                    .id_salt("table_scroll_y")
                    .max_height(TABLE_HEIGHT)
                    .auto_shrink([false, true])
                    .show_rows(ui, TABLE_ROW_HEIGHT, view.len(), |ui, row_range| {
                        for row in row_range {
                            let Some(record) = view.get(row) else {
                                continue;
                            };
                            ui.horizontal(|ui| Self::table_row(ui, record));
                        }
                    });
            });
        });
    }

    fn table_row(ui: &mut egui::Ui, record: &DisasterRecord) {
        Self::table_cell(ui, record.year.to_string().into());
        Self::table_cell(ui, record.disaster_type.as_str().into());
        Self::table_cell(ui, format!("{:.0}", record.total_deaths).into());
        Self::table_cell(ui, format!("{:.0}", record.total_affected).into());
        Self::table_cell(ui, format!("{:.1}", record.total_damages).into());
        for value in &record.attributes {
            Self::table_cell(ui, value.as_str().into());
        }
    }

    fn table_cell(ui: &mut egui::Ui, text: RichText) {
        ui.add_sized(
            [TABLE_COL_WIDTH, TABLE_ROW_HEIGHT],
            egui::Label::new(text.size(12.0)).truncate(),
        );
    }
}
