use anyhow::{Context, Result};
use clap::Parser;
use neon_snake::audio;
use neon_snake::game::GameConfig;
use neon_snake::modes::HumanMode;
use neon_snake::session::GameSession;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "neon_snake")]
#[command(version, about = "Arcade snake with bloom, scanlines and particles")]
struct Cli {
    /// Disable sound effects
    #[arg(long)]
    mute: bool,

    /// JSON file overriding the board geometry, tick rate and scoring
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for bait placement and effects, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal itself is the game screen)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Frames drawn per second
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u32).range(1..=120))]
    fps: u32,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config = GameConfig::from_json(&json)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded config");
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    let session = match cli.seed {
        Some(seed) => GameSession::with_seed(config, seed),
        None => GameSession::new(config),
    }
    .context("Invalid game configuration")?;

    let mut human_mode = HumanMode::new(session, audio::default_sink(cli.mute), cli.fps);
    human_mode.run().await?;

    Ok(())
}
