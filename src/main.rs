mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::process::ExitCode;
use std::sync::Arc;

use app::LaunchDashApp;
use clap::Parser;
use config::DashboardConfig;
use data::model::SiteSelection;
use eframe::egui;
use state::AppState;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(DashboardConfig::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: DashboardConfig) -> anyhow::Result<()> {
    config.validate()?;

    // The window only opens once a valid dataset is in memory.
    let dataset = Arc::new(data::loader::load_file(&config.dataset)?);
    let mut state = AppState::new(dataset, config.slider_step);
    state.set_site(SiteSelection::from_token(&config.site));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width, config.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
