//! # Taleplay Main Entry Point
//!
//! Loads the scene dataset, sets up the macroquad window and runs the scene manager.

use clap::Parser;
use macroquad::prelude::*;
use std::path::PathBuf;
use taleplay::{
    DirectoryCatalog, GameConfig, GameSession, InputHandler, SceneDataset, SceneManager,
    TaleError, TaleResult,
};
#[cfg(feature = "dev-tools")]
use tracing::{error, info, Level};

#[cfg(not(feature = "dev-tools"))]
use log::{error, info};

/// Command line arguments for Taleplay.
#[derive(Parser, Debug)]
#[command(name = "taleplay")]
#[command(about = "A story-driven 2D adventure with dialogue and turn-based battles")]
#[command(version)]
struct Args {
    /// Scene dataset produced by the story generator
    #[arg(short, long, default_value = "game_data.json")]
    data: PathBuf,

    /// Directory holding images and sounds
    #[arg(short, long, default_value = "assets")]
    assets: PathBuf,

    /// Optional JSON file overriding game tunables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for actor placement
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Taleplay".to_string(),
        window_width: 1280,
        window_height: 720,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() -> TaleResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;

    info!("Starting Taleplay v{}", taleplay::VERSION);

    if let Err(e) = run_game(&args).await {
        error!("Game stopped: {}", e);
        return Err(e);
    }
    Ok(())
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> TaleResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .try_init()
            .map_err(|e| TaleError::Config(format!("Failed to initialize logging: {}", e)))?;
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        let filter = match log_level.to_lowercase().as_str() {
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        };

        env_logger::Builder::new()
            .filter_level(filter)
            .parse_default_env()
            .try_init()
            .map_err(|e| TaleError::Config(format!("Failed to initialize logging: {}", e)))?;
    }

    Ok(())
}

/// Builds the session from the command line and runs it.
async fn run_game(args: &Args) -> TaleResult<()> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            GameConfig::load(path)?
        }
        None => GameConfig::default(),
    };

    let dataset = SceneDataset::load(&args.data);
    info!(
        "Loaded {} scene(s) from {}",
        dataset.scene_count(),
        args.data.display()
    );

    let seed = args.seed.unwrap_or_else(::rand::random);
    info!("Using seed {}", seed);

    let catalog = DirectoryCatalog::new(&args.assets);
    let session = GameSession::new(dataset, config, Box::new(catalog.clone()), seed)?;

    let mut manager = SceneManager::new(session, catalog, InputHandler::new()).await?;
    manager.run().await?;

    info!("Game loop ended");
    Ok(())
}
