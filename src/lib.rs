//! # The Fountain of Objects
//!
//! A small turn-based text adventure set in a pitch-black cavern.
//!
//! ## Architecture Overview
//!
//! The crate is split the same way the game is played:
//!
//! - **Game**: the room grid ([`World`]), the [`Player`], and the [`GameState`]
//!   controller that applies commands and decides when the game is won or lost
//! - **Generation**: seeded placement of the fountain, entrance and hazards
//! - **Input**: the closed [`Command`] vocabulary and a line-based [`InputHandler`]
//! - **Rendering**: plain text output and the debug map
//! - **Scenes**: the session loop tying input, state and display together
//!
//! Every random decision flows through a single seeded [`rand::rngs::StdRng`], so a
//! game is fully reproducible from its [`GenerationConfig`].

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scenes;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use scenes::*;

/// Core error type for the Fountain engine.
///
/// Walls, unknown commands and empty quivers are part of the game and are reported
/// as [`Message`]s; only technical failures end up here.
#[derive(thiserror::Error, Debug)]
pub enum FountainError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A room layout breaks one of the world invariants
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// User supplied value could not be understood
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Fountain codebase.
pub type FountainResult<T> = Result<T, FountainError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Arrows in the player's quiver at the start of a game
    pub const STARTING_ARROWS: u32 = 5;

    /// Upper bound on chained maelstrom encounters resolved within one turn
    pub const MAX_ENCOUNTER_CASCADE: usize = 16;

    /// Width of the separator printed above the status line
    pub const STATUS_SEPARATOR_WIDTH: usize = 100;
}
