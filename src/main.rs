//! # Gloom Main Entry Point
//!
//! Loads configuration, generates a level, and runs the frame-driven game
//! loop on macroquad.

use clap::Parser;
use gloom::{
    clear_actors, render_frame, GameConfig, GloomResult, InputSource, MacroquadDisplay,
    MacroquadInput, PlayerAction, TurnEngine, WorldState,
};
use macroquad::prelude::{next_frame, request_new_screen_size};
use std::path::PathBuf;

/// Pixel size of one map cell.
const CELL_WIDTH: f32 = 12.0;
const CELL_HEIGHT: f32 = 16.0;

/// Command line arguments for Gloom.
#[derive(Parser, Debug)]
#[command(name = "gloom")]
#[command(about = "A turn-based dungeon crawler")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation; overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Field-of-view radius; overrides the config file
    #[arg(long)]
    fov_radius: Option<i32>,
}

#[macroquad::main("Gloom")]
async fn main() -> GloomResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    log::info!("Starting Gloom v{}", gloom::VERSION);

    let config = load_config(&args)?;
    let world = WorldState::from_config(&config)?;
    run_game(config, world).await
}

/// Installs the logger. `RUST_LOG` takes precedence over `--log-level`.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
        tracing::debug!("tracing subscriber installed");
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .format_target(false)
            .init();
    }
}

/// Reads the config file, if any, and applies command line overrides.
fn load_config(args: &Args) -> GloomResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.generation.seed = seed;
    }
    if let Some(radius) = args.fov_radius {
        config.fov.radius = radius;
    }

    config.validate()?;
    Ok(config)
}

/// Runs one level until the player asks to exit.
async fn run_game(config: GameConfig, world: WorldState) -> GloomResult<()> {
    let width = config.generation.width;
    let height = config.generation.height;
    let mut display = MacroquadDisplay::new(width, height);
    request_new_screen_size(width as f32 * CELL_WIDTH, display.rows() as f32 * CELL_HEIGHT);

    let mut input = MacroquadInput::new();
    let mut engine = TurnEngine::new(world);

    loop {
        display.update_panel(engine.world());
        render_frame(engine.world(), &mut display);
        clear_actors(engine.world(), &mut display);
        next_frame().await;

        let intent = input.poll_intent(false);
        if engine.handle_intent(intent, &mut display)? == PlayerAction::Exit {
            break;
        }
    }

    let stats = &engine.world().statistics;
    log::info!(
        "Game ended after {} turns: {} steps, {} monsters slain, {} damage dealt, {} taken",
        stats.turns_elapsed,
        stats.steps_taken,
        stats.monsters_slain,
        stats.damage_dealt,
        stats.damage_taken
    );
    Ok(())
}
