//! # Game Settings
//!
//! Startup configuration, loadable from JSON.
//!
//! Every field carries a serde default, so a file only needs to mention
//! what it overrides:
//!
//! ```
//! use gloom::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "fov": { "radius": 6 } }"#).unwrap();
//! assert_eq!(config.fov.radius, 6);
//! assert!(config.fov.light_walls);
//! assert_eq!(config.generation.width, 80);
//! ```

use crate::config::DEFAULT_FOV_RADIUS;
use crate::game::{Actor, Combat, DeathTransition, Glyph, Position, Rgb};
use crate::generation::{default_monster_table, EncounterTable, GenerationConfig, MonsterArchetype};
use crate::{GloomError, GloomResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Field-of-view parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FovSettings {
    /// Sight radius in tiles
    pub radius: i32,
    /// Whether the first wall hit along a ray is itself visible
    pub light_walls: bool,
}

impl Default for FovSettings {
    fn default() -> Self {
        Self {
            radius: DEFAULT_FOV_RADIUS,
            light_walls: true,
        }
    }
}

/// Stats the player starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTemplate {
    pub name: String,
    pub glyph: Glyph,
    pub max_hp: i32,
    pub defense: i32,
    pub power: i32,
}

impl Default for PlayerTemplate {
    fn default() -> Self {
        Self {
            name: "Hero".to_string(),
            glyph: Glyph::new('@', Rgb::WHITE),
            max_hp: 30,
            defense: 2,
            power: 5,
        }
    }
}

impl PlayerTemplate {
    /// Builds the player actor at `position`.
    pub fn spawn(&self, position: Position) -> Actor {
        Actor::new(self.name.clone(), position, self.glyph, true).with_combat(Combat::new(
            self.max_hp,
            self.defense,
            self.power,
            DeathTransition::Player,
        ))
    }
}

/// Everything needed to start a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub generation: GenerationConfig,
    pub fov: FovSettings,
    pub player: PlayerTemplate,
    pub monsters: Vec<MonsterArchetype>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            fov: FovSettings::default(),
            player: PlayerTemplate::default(),
            monsters: default_monster_table(),
        }
    }
}

impl GameConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> GloomResult<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> GloomResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serializes the configuration as pretty JSON.
    pub fn to_json(&self) -> GloomResult<String> {
        serde_json::to_string_pretty(self).map_err(GloomError::from)
    }

    /// Checks every section for contract violations.
    pub fn validate(&self) -> GloomResult<()> {
        self.generation.validate()?;

        if self.fov.radius < 0 {
            return Err(GloomError::InvalidConfig(format!(
                "FOV radius must not be negative, got {}",
                self.fov.radius
            )));
        }
        if self.player.max_hp <= 0 {
            return Err(GloomError::InvalidConfig(format!(
                "Player max_hp must be positive, got {}",
                self.player.max_hp
            )));
        }

        // Builds the weighted table, which rejects empty or zero-weight tables.
        EncounterTable::new(self.monsters.clone())?;
        Ok(())
    }
}
