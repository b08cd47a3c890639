mod config;
mod error;
mod ops;
mod renderer;
mod types;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::ops::clip_submit::UreqTransport;
use crate::renderer::gst_player::GstPlayer;
use crate::ui::app::{AppState, GenreClipApp};

#[derive(Parser)]
#[command(name = "genreclip", about = "Select a clip of an audio file and classify its genre")]
struct Cli {
    /// Audio file to open at startup
    file: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long, default_value = "genreclip.json")]
    config: PathBuf,

    /// Classifier endpoint, overriding the config file
    #[arg(short, long)]
    endpoint: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match Config::load_from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load config");
            std::process::exit(2);
        }
    };
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    tracing::info!(endpoint = %config.endpoint, "Classifier configured");

    let player = match GstPlayer::new() {
        Ok(player) => player,
        Err(e) => {
            tracing::error!(error = %e, "Media engine unavailable");
            std::process::exit(1);
        }
    };
    let transport = Arc::new(UreqTransport::new(
        config.request_timeout_secs.map(Duration::from_secs),
    ));

    let mut app = GenreClipApp::new(AppState::new(&config, player, transport));
    if cli.file.is_some() {
        app.open_file(cli.file);
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([760.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "GenreClip",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
