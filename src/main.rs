mod api;
mod app;
mod config;
mod data;
mod state;
mod ui;

use anyhow::anyhow;
use app::TePredictorApp;
use clap::Parser;
use config::{Cli, Settings};
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = Settings::from(Cli::parse());
    log::info!(
        "Using API {} and label file {}",
        settings.api_url,
        settings.label_path.display()
    );
    let app = TePredictorApp::new(&settings)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Te Predictor",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow!("running UI: {e}"))
}
