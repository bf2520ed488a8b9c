//! Climate Dashboard Main Application
//! Main window with filter panel and chart viewer.

use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::data::DataLoader;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::{Color32, RichText, SidePanel};

enum AppState {
    Ready {
        dashboard: Dashboard,
        control_panel: ControlPanel,
    },
    /// Load or preprocessing failed; only the message is shown.
    Failed(String),
}

/// Main application window.
pub struct ClimateDashboardApp {
    /// Keeps the dataset cache alive for the process lifetime.
    loader: DataLoader,
    state: AppState,
}

impl ClimateDashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &DashboardConfig) -> Self {
        let mut loader = DataLoader::new(config.data.clone());
        let state = Self::open(&mut loader);
        Self { loader, state }
    }

    fn open(loader: &mut DataLoader) -> AppState {
        match Dashboard::open(loader) {
            Ok(dashboard) => {
                let control_panel = ControlPanel::new(dashboard.subset(), dashboard.criteria());
                AppState::Ready {
                    dashboard,
                    control_panel,
                }
            }
            Err(e) => {
                log::error!("{e}");
                AppState::Failed(e.to_string())
            }
        }
    }

    fn show_error(ctx: &egui::Context, message: &str, base_dir: &str) -> bool {
        let mut retry = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.heading("Climate-Driven Disaster Risk Reduction Analysis");
                ui.add_space(20.0);
                ui.label(
                    RichText::new(message)
                        .size(15.0)
                        .color(Color32::from_rgb(220, 53, 69)),
                );
                ui.add_space(8.0);
                ui.label(
                    RichText::new(format!("Data directory: {base_dir}"))
                        .size(12.0)
                        .color(Color32::GRAY),
                );
                ui.add_space(15.0);
                if ui.button("Retry").clicked() {
                    retry = true;
                }
            });
        });
        retry
    }
}

impl eframe::App for ClimateDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match &mut self.state {
            AppState::Ready {
                dashboard,
                control_panel,
            } => {
                // Left panel - Filters
                SidePanel::left("control_panel")
                    .min_width(260.0)
                    .max_width(320.0)
                    .show(ctx, |ui| {
                        egui::ScrollArea::vertical().show(ui, |ui| {
                            if control_panel.show(ui) == ControlPanelAction::CriteriaChanged {
                                dashboard.refresh(control_panel.criteria());
                            }
                        });
                    });

                // Central panel - Metrics, charts and table
                egui::CentralPanel::default().show(ctx, |ui| {
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            ChartViewer::show(ui, dashboard.snapshot());
                        });
                });
            }
            AppState::Failed(message) => {
                let base_dir = self.loader.config().base_dir.display().to_string();
                if Self::show_error(ctx, message, &base_dir) {
                    self.state = Self::open(&mut self.loader);
                }
            }
        }
    }
}
