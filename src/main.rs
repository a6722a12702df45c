//! # Fountain of Objects Main Entry Point
//!
//! Parses the command line, initializes logging, generates or loads the cavern,
//! and runs the turn loop on stdin/stdout.

use clap::Parser;
use fountain::{
    FountainResult, GameState, GenerationConfig, InputHandler, MapSize, SceneManager, SceneType,
    TextDisplay,
};
use std::io;
use std::path::PathBuf;
#[cfg(feature = "dev-tools")]
use tracing::{info, Level};

#[cfg(not(feature = "dev-tools"))]
use log::info;

/// Command line arguments for the Fountain of Objects.
#[derive(Parser, Debug)]
#[command(name = "fountain")]
#[command(about = "Find the Fountain of Objects, reactivate it, and escape the cavern")]
#[command(version)]
struct Args {
    /// Cavern size: small, medium or large
    #[arg(short = 'm', long, default_value = "small")]
    size: MapSize,

    /// Random seed for cavern generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Show the full cavern map every turn
    #[arg(long)]
    debug: bool,

    /// Resume a game written with --save (ignores --size and --seed)
    #[arg(long, value_name = "FILE")]
    load: Option<PathBuf>,

    /// Save the game to FILE when quitting before it ends
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> FountainResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting Fountain of Objects v{}", fountain::VERSION);

    let game_state = match &args.load {
        Some(path) => GameState::load_from_file(path)?,
        None => {
            let config = match args.seed {
                Some(seed) => GenerationConfig::new(seed, args.size),
                None => GenerationConfig::from_entropy(args.size),
            };
            info!("Generating {} cavern with seed: {}", config.map_size, config.seed);
            GameState::new(&config)?
        }
    };

    let stdin = io::stdin();
    let input_handler = InputHandler::new(stdin.lock());
    let display = TextDisplay::new(io::stdout(), args.debug);

    let mut scenes = SceneManager::new(game_state, input_handler, display);
    let ending = scenes.run()?;

    if ending == SceneType::Abandoned {
        if let Some(path) = &args.save {
            scenes.game_state().save_to_file(path)?;
            println!("Your progress is scratched into the wall at {}.", path.display());
        }
        println!("The darkness of the cavern closes behind you.");
    }

    let stats = scenes.game_state().statistics();
    info!(
        "Game ended: {:?} ({} steps, {} arrows fired, {} amaroks slain)",
        ending, stats.steps_taken, stats.arrows_fired, stats.amaroks_slain
    );
    Ok(())
}

/// Initializes the logging system based on the specified log level.
///
/// Logs go to stderr so they never interleave with the game text on stdout.
fn initialize_logging(log_level: &str) {
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
            .with_writer(std::io::stderr)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        let level = match log_level.to_lowercase().as_str() {
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Warn,
        };

        env_logger::Builder::new()
            .filter_level(level)
            .target(env_logger::Target::Stderr)
            .init();
    }
}
