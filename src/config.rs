use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::{Parser, ValueHint};

/// Command-line configuration for the dashboard window.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Launch records dashboard", long_about = None)]
pub struct DashboardConfig {
    /// Launch records file (.csv, .json or .parquet)
    #[arg(
        env = "LAUNCH_DASH_DATA",
        default_value = "spacex_launch_dash.csv",
        value_hint = ValueHint::FilePath
    )]
    pub dataset: PathBuf,

    /// Initially selected launch site (`ALL` for every site)
    #[arg(long, default_value = "ALL")]
    pub site: String,

    /// Step of the payload range sliders, in kg
    #[arg(long, default_value_t = 1000.0)]
    pub slider_step: f64,

    /// Initial window width
    #[arg(long, default_value_t = 1200.0)]
    pub width: f32,

    /// Initial window height
    #[arg(long, default_value_t = 800.0)]
    pub height: f32,
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.slider_step.is_finite() && self.slider_step > 0.0,
            "--slider-step must be a positive number, got {}",
            self.slider_step
        );
        ensure!(
            self.width > 0.0 && self.height > 0.0,
            "window size must be positive, got {}x{}",
            self.width,
            self.height
        );
        Ok(())
    }
}
