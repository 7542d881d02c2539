//! # Gloom
//!
//! A turn-based dungeon-crawler simulation core.
//!
//! ## Architecture Overview
//!
//! The core is organised around a single mutable aggregate, [`WorldState`],
//! owned by the [`TurnEngine`]. Every other system borrows it for the
//! duration of one call:
//!
//! - **Generation**: room-and-corridor layout, monster placement
//! - **Visibility**: recursive shadowcasting field of view with exploration memory
//! - **Actors**: an ordered registry of actors with optional combat and AI capabilities
//! - **Combat**: the damage formula and one-shot death transitions
//! - **Turns**: the input → player action → AI state machine
//!
//! Rendering and raw input are external collaborators reached through the
//! [`Renderer`] and [`InputSource`] traits. Macroquad-backed implementations
//! live in [`rendering::display`] and [`input`].

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Gloom engine.
#[derive(thiserror::Error, Debug)]
pub enum GloomError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration violates a generation or gameplay contract
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Gloom codebase.
pub type GloomResult<T> = Result<T, GloomError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default dungeon width in tiles
    pub const DEFAULT_DUNGEON_WIDTH: u32 = 80;

    /// Default dungeon height in tiles
    pub const DEFAULT_DUNGEON_HEIGHT: u32 = 45;

    /// Default minimum room edge length, walls included
    pub const DEFAULT_ROOM_MIN_SIZE: u32 = 6;

    /// Default maximum room edge length, walls included
    pub const DEFAULT_ROOM_MAX_SIZE: u32 = 10;

    /// Default number of room placement attempts
    pub const DEFAULT_MAX_ROOMS: u32 = 30;

    /// Default upper bound of monsters spawned per room
    pub const DEFAULT_MAX_MONSTERS_PER_ROOM: u32 = 3;

    /// Default field-of-view radius
    pub const DEFAULT_FOV_RADIUS: i32 = 10;

    /// Rows reserved below the map for the message panel
    pub const MESSAGE_PANEL_HEIGHT: u32 = 5;

    /// Maximum number of narration lines kept in the message log
    pub const MAX_MESSAGES: usize = 100;
}
