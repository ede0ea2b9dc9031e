mod app;
mod color;
mod config;
mod data;
mod report;
mod state;
mod stats;
mod theme;
mod ui;

use app::TomatoDashboardApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_env();
    log::debug!("Settings: {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tomato QC Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(TomatoDashboardApp::new(cc, config)))),
    )
}
