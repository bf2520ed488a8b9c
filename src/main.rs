//! Climate Risk Analysis Dashboard
//!
//! Interactive analysis of climate-driven disasters (Flood, Storm, Wildfire,
//! Extreme temperature) loaded from a disaster-events CSV.

mod charts;
mod config;
mod dashboard;
mod data;
mod gui;
mod stats;

use anyhow::anyhow;
use config::DashboardConfig;
use eframe::egui;
use gui::ClimateDashboardApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::resolve()?;
    let title = config.window.title.clone();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([1000.0, 650.0])
            .with_title(title.clone()),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(ClimateDashboardApp::new(cc, &config)))),
    )
    .map_err(|e| anyhow!("failed to start dashboard window: {e}"))
}
