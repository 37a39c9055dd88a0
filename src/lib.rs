//! # Taleplay
//!
//! A story-driven 2D adventure: the player walks through a linear sequence of
//! scenes, talks to the characters of the story and fights them in turn-based
//! battles, gaining experience and skill points along the way.
//!
//! ## Architecture Overview
//!
//! The crate is split into a deterministic core and a thin front-end:
//!
//! - **Game**: the session object, the per-tick controller and the interaction
//!   state machines (menu, dialogue, battle) plus player progression
//! - **Generation**: the scene dataset, spawn placement and scene loading
//! - **Input**: per-tick input sampling
//! - **Rendering**: macroquad drawing and sound cue playback
//!
//! The core never touches the window. It receives one [`InputSample`] per tick
//! and queues [`GameEvent`]s that the front-end drains every frame.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scenes;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

pub use scenes::{OpeningSequence, SceneManager, SceneType};

/// Core error type for the Taleplay engine.
#[derive(thiserror::Error, Debug)]
pub enum TaleError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Configuration could not be applied
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type used throughout the Taleplay codebase.
pub type TaleResult<T> = Result<T, TaleError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
///
/// These are the defaults behind [`GameConfig`]; the session always reads the
/// config values, never the constants directly.
pub mod config {
    /// World width in world units
    pub const WORLD_WIDTH: f32 = 2560.0;

    /// World height in world units
    pub const WORLD_HEIGHT: f32 = 1440.0;

    /// Edge margin kept free of obstacles so the scene transition is walkable
    pub const TELEPORT_CLEARANCE: f32 = 140.0;

    /// Distance from the world edge that triggers a scene transition
    pub const TELEPORT_TRIGGER: f32 = 50.0;

    /// Distance from the world edge where the player lands after a transition
    pub const TELEPORT_LANDING: f32 = 100.0;

    /// Inset from the world edge for random spawn points
    pub const SPAWN_BORDER: i32 = 100;

    /// Padding around buildings for spawn and collision checks
    pub const BUILDING_PADDING: f32 = 10.0;

    /// Minimum distance between a new spawn point and any existing actor
    pub const MIN_ACTOR_DISTANCE: f32 = 200.0;

    /// Spawn attempts before returning a best-effort point
    pub const SPAWN_MAX_TRIES: u32 = 150;

    /// Distance under which an actor can be interacted with
    pub const INTERACTION_RANGE: f32 = 140.0;

    /// Walking speed in world units per second
    pub const WALK_SPEED: f32 = 220.0;

    /// Running speed in world units per second
    pub const RUN_SPEED: f32 = 320.0;

    /// Milliseconds between player strikes
    pub const TURN_INTERVAL_MS: u64 = 1000;

    /// Milliseconds between the player strike and the counter strike
    pub const COUNTER_DELAY_MS: u64 = 500;

    /// Milliseconds the battle view stays open after resolution
    pub const BATTLE_CLOSE_DELAY_MS: u64 = 2000;

    /// Experience needed for one level
    pub const EXPERIENCE_PER_LEVEL: u32 = 100;

    /// Skill points granted per level
    pub const SKILL_POINTS_PER_LEVEL: u32 = 5;
}
