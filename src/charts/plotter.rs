//! Chart Plotter Module
//! Draws the dashboard charts with egui_plot.

use crate::charts::builder::{CorrelationMatrix, IMPACT_LABELS};
use crate::gui::format::format_correlation;
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

pub const TREND_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
pub const BAR_COLOR: Color32 = Color32::from_rgb(100, 149, 237);

/// Diverging scale end points for the heatmap.
const COOL: Color32 = Color32::from_rgb(59, 76, 192);
const NEUTRAL: Color32 = Color32::from_rgb(221, 221, 221);
const WARM: Color32 = Color32::from_rgb(180, 4, 38);

const HEATMAP_CELL: f32 = 70.0;

pub struct ChartPlotter;

impl ChartPlotter {
    /// Events per year as a line with markers.
    pub fn draw_trend_chart(ui: &mut egui::Ui, trend: &[(i32, usize)], height: f32) {
        Plot::new("yearly_trend")
            .height(height)
            .x_axis_label("Year")
            .y_axis_label("Number of Events")
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_formatter(|mark, _range| {
                if mark.value.fract() == 0.0 {
                    format!("{:.0}", mark.value)
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                if trend.is_empty() {
                    return;
                }
                let points: Vec<[f64; 2]> = trend
                    .iter()
                    .map(|&(year, count)| [year as f64, count as f64])
                    .collect();

                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(TREND_COLOR)
                        .width(1.5)
                        .name("Events"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(3.0)
                        .color(TREND_COLOR),
                );
            });
    }

    /// Bar per disaster type, in the order given.
    pub fn draw_distribution_chart(ui: &mut egui::Ui, distribution: &[(String, usize)], height: f32) {
        let labels: Vec<String> = distribution.iter().map(|(name, _)| name.clone()).collect();

        Plot::new("type_distribution")
            .height(height)
            .x_axis_label("Disaster Type")
            .y_axis_label("Count")
            .allow_scroll(false)
            .allow_drag(false)
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = distribution
                    .iter()
                    .enumerate()
                    .map(|(i, (name, count))| {
                        Bar::new(i as f64, *count as f64)
                            .name(name)
                            .width(0.6)
                            .fill(BAR_COLOR)
                            .stroke(egui::Stroke::new(1.0, Color32::BLACK))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name("Count"));
            });
    }

    /// Annotated 3x3 heatmap; undefined cells read "N/A".
    pub fn draw_correlation_heatmap(ui: &mut egui::Ui, matrix: &CorrelationMatrix) {
        let short_labels = ["Deaths", "Affected", "Damages"];

        egui::Grid::new("correlation_heatmap")
            .spacing([2.0, 2.0])
            .show(ui, |ui| {
                ui.label("");
                for label in short_labels {
                    ui.add_sized([HEATMAP_CELL, 20.0], egui::Label::new(RichText::new(label).strong()));
                }
                ui.end_row();

                for (row, label) in short_labels.iter().enumerate() {
                    ui.label(RichText::new(*label).strong())
                        .on_hover_text(IMPACT_LABELS[row]);
                    for col in 0..IMPACT_LABELS.len() {
                        let value = matrix.get(row, col).unwrap_or(f64::NAN);
                        Self::draw_heatmap_cell(ui, value);
                    }
                    ui.end_row();
                }
            });

        let caption = if matrix.is_undefined() {
            format!("n = {}, needs two or more rows with varying values", matrix.sample_size)
        } else {
            format!("n = {}", matrix.sample_size)
        };
        ui.label(
            RichText::new(caption)
                .size(11.0)
                .color(Color32::GRAY),
        );
    }

    fn draw_heatmap_cell(ui: &mut egui::Ui, value: f64) {
        let fill = Self::heat_color(value);
        let text_color = if value.is_nan() || value.abs() < 0.5 {
            Color32::BLACK
        } else {
            Color32::WHITE
        };

        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(HEATMAP_CELL, HEATMAP_CELL * 0.6), egui::Sense::hover());
        ui.painter().rect_filled(rect, 2.0, fill);
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            format_correlation(value),
            egui::FontId::proportional(13.0),
            text_color,
        );
        if value.is_nan() {
            response.on_hover_text("Undefined: fewer than two rows or no variance");
        }
    }

    /// Blue-white-red scale centred at 0; NaN maps to neutral grey.
    pub fn heat_color(value: f64) -> Color32 {
        if value.is_nan() {
            return NEUTRAL;
        }
        let t = value.clamp(-1.0, 1.0) as f32;
        if t < 0.0 {
            Self::lerp(NEUTRAL, COOL, -t)
        } else {
            Self::lerp(NEUTRAL, WARM, t)
        }
    }

    fn lerp(from: Color32, to: Color32, t: f32) -> Color32 {
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color32::from_rgb(mix(from.r(), to.r()), mix(from.g(), to.g()), mix(from.b(), to.b()))
    }
}
