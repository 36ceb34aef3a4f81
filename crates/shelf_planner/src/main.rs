mod app;
mod backend;
mod board_view;
mod forms;
mod results;
mod style;
mod viz;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use shelf_core::config::PlannerConfig;

#[derive(Parser, Debug)]
#[command(
    name = "shelf_planner",
    about = "Raf düzeni planlayıcı ve kategori öneri istemcisi"
)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides the configuration file
    #[arg(long)]
    backend_url: Option<String>,
}

fn main() -> Result<()> {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => PlannerConfig::load_from_file(path)
            .with_context(|| format!("loading config '{}'", path.display()))?,
        None => PlannerConfig::default(),
    };
    if let Some(url) = cli.backend_url {
        config.backend.base_url = url;
        config.validate().context("invalid --backend-url")?;
    }

    info!("Shelf Planner starting...");
    info!("Backend: {}", config.backend.base_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([960.0, 600.0])
            .with_title("Raf Planlayıcı"),
        ..Default::default()
    };

    eframe::run_native(
        "shelf_planner",
        options,
        Box::new(move |cc| Ok(Box::new(app::PlannerApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}
