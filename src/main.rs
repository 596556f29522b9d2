mod app;
mod chart;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use anyhow::{Context, Result};
use app::LaunchboardApp;
use eframe::egui;
use state::AppState;

/// Fixed dataset location, relative to the working directory.
const DATA_PATH: &str = "data/spacex_launch_dash.csv";

fn main() -> Result<()> {
    env_logger::init();

    // The dataset loads exactly once; any problem with it is fatal.
    let dataset = data::loader::load_file(Path::new(DATA_PATH))
        .with_context(|| format!("loading launch records from {DATA_PATH}"))?;
    log::info!(
        "Loaded {} launch records across {} sites",
        dataset.len(),
        dataset.launch_sites.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(dataset);
    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
