mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use app::BcvizApp;
use bcviz::config::Config;
use eframe::egui;

/// Usage: `bcviz [CONFIG]` (defaults to ./bcviz.toml, credentials may come
/// from BCVIZ_URL / BCVIZ_USERNAME / BCVIZ_PASSWORD).
fn main() -> Result<()> {
    env_logger::init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref()).map_err(|e| {
        log::error!("Failed to load configuration: {e:#}");
        e
    })?;
    let title = config.dashboard.title.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(BcvizApp::new(&config)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
