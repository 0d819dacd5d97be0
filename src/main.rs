mod app;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::CherryBlossomApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    // Loading is the one fatal step: no dataset, no dashboard.
    let config = DashboardConfig::from_env()?;
    let dataset = data::load_prepared(&config.data_path, &config.target_genus)
        .context("preparing street-tree dataset")?;
    log::info!(
        "Loaded {} {} trees across {} neighbourhoods",
        dataset.len(),
        config.target_genus,
        dataset.neighbourhoods.len()
    );
    if dataset.is_empty() {
        log::warn!(
            "{} has no {} trees with a diameter; the chart will stay empty",
            config.data_path.display(),
            config.target_genus
        );
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Cherry Blossom – Diameter Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(CherryBlossomApp::new(dataset, &config)))),
    )
    .map_err(|e| anyhow!("running dashboard window: {e}"))
}
