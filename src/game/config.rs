//! # Game Configuration
//!
//! Tunable parameters for world geometry, movement, battle pacing and progression.
//!
//! Every section deserializes with defaults, so a config file only needs to name
//! the values it overrides.

use crate::config as defaults;
use crate::{TaleError, TaleResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Complete game configuration.
///
/// # Examples
///
/// ```
/// use taleplay::GameConfig;
///
/// let config = GameConfig::default();
/// assert_eq!(config.world.teleport_clearance, 140.0);
/// assert!(config.movement.run_speed > config.movement.walk_speed);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub movement: MovementConfig,
    pub battle: BattleConfig,
    pub progression: ProgressionConfig,
    pub sprites: SpriteConfig,
}

impl GameConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// Missing keys fall back to their defaults; an unreadable or invalid file is an
    /// error because the path was asked for explicitly.
    pub fn load(path: &Path) -> TaleResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values that the rest of the game relies on.
    pub fn validate(&self) -> TaleResult<()> {
        let world = &self.world;
        if world.width <= 0.0 || world.height <= 0.0 {
            return Err(TaleError::Config("world size must be positive".to_string()));
        }
        if world.spawn_border as f32 * 2.0 >= world.width.min(world.height) {
            return Err(TaleError::Config(
                "spawn border leaves no room to spawn".to_string(),
            ));
        }
        if world.teleport_landing <= world.teleport_trigger {
            return Err(TaleError::Config(
                "teleport landing must be past the trigger margin".to_string(),
            ));
        }
        if self.battle.counter_delay_ms >= self.battle.turn_interval_ms {
            return Err(TaleError::Config(
                "counter delay must be shorter than the turn interval".to_string(),
            ));
        }
        if self.progression.experience_per_level == 0 {
            return Err(TaleError::Config(
                "experience per level must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// A configuration with a small world, used by tests.
    pub fn for_testing() -> Self {
        let mut config = Self::default();
        config.world.width = 1280.0;
        config.world.height = 720.0;
        config
    }
}

/// World geometry and spawn placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    pub teleport_clearance: f32,
    pub teleport_trigger: f32,
    pub teleport_landing: f32,
    pub spawn_border: i32,
    pub building_padding: f32,
    pub min_actor_distance: f32,
    pub spawn_max_tries: u32,
    pub interaction_range: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: defaults::WORLD_WIDTH,
            height: defaults::WORLD_HEIGHT,
            teleport_clearance: defaults::TELEPORT_CLEARANCE,
            teleport_trigger: defaults::TELEPORT_TRIGGER,
            teleport_landing: defaults::TELEPORT_LANDING,
            spawn_border: defaults::SPAWN_BORDER,
            building_padding: defaults::BUILDING_PADDING,
            min_actor_distance: defaults::MIN_ACTOR_DISTANCE,
            spawn_max_tries: defaults::SPAWN_MAX_TRIES,
            interaction_range: defaults::INTERACTION_RANGE,
        }
    }
}

/// Player movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Collision box of the player and of every actor
    pub footprint_width: f32,
    pub footprint_height: f32,
    /// Milliseconds per walk-cycle frame
    pub frame_interval_ms: u64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: defaults::WALK_SPEED,
            run_speed: defaults::RUN_SPEED,
            footprint_width: 40.0,
            footprint_height: 56.0,
            frame_interval_ms: 120,
        }
    }
}

/// Battle pacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub turn_interval_ms: u64,
    pub counter_delay_ms: u64,
    pub close_delay_ms: u64,
}

impl BattleConfig {
    pub fn turn_interval(&self) -> Duration {
        Duration::from_millis(self.turn_interval_ms)
    }

    pub fn counter_delay(&self) -> Duration {
        Duration::from_millis(self.counter_delay_ms)
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            turn_interval_ms: defaults::TURN_INTERVAL_MS,
            counter_delay_ms: defaults::COUNTER_DELAY_MS,
            close_delay_ms: defaults::BATTLE_CLOSE_DELAY_MS,
        }
    }
}

/// Leveling rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    pub experience_per_level: u32,
    pub skill_points_per_level: u32,
    /// Max HP gained per skill point spent on HP
    pub hp_per_point: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            experience_per_level: defaults::EXPERIENCE_PER_LEVEL,
            skill_points_per_level: defaults::SKILL_POINTS_PER_LEVEL,
            hp_per_point: 10,
        }
    }
}

/// How the player's walk animation is laid out in the sprite assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteStrategy {
    /// One sheet with a column per direction
    SingleSheet,
    /// One three-frame strip per direction; left is the right strip mirrored
    #[default]
    DirectionalStrips,
}

/// Sprite and avatar references used by the loader and the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteConfig {
    pub strategy: SpriteStrategy,
    pub player_sheet: String,
    pub player_strips: [String; 3],
    pub player_avatar: String,
    pub placeholder_background: String,
}

impl SpriteConfig {
    /// Sprite used for the player and for actors whose own sprite is missing.
    pub fn player_sprite(&self) -> &str {
        match self.strategy {
            SpriteStrategy::SingleSheet => &self.player_sheet,
            // down strip
            SpriteStrategy::DirectionalStrips => &self.player_strips[0],
        }
    }
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            strategy: SpriteStrategy::default(),
            player_sheet: "player_running.png".to_string(),
            player_strips: [
                "temp_down.png".to_string(),
                "temp_up.png".to_string(),
                "temp_right.png".to_string(),
            ],
            player_avatar: "player_avatar.png".to_string(),
            placeholder_background: "bg_placeholder".to_string(),
        }
    }
}
