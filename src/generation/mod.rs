//! # Generation Module
//!
//! Procedural level generation: room layout, corridors, and monster
//! placement.
//!
//! All randomness comes from a single [`StdRng`] seeded from
//! [`GenerationConfig::seed`] and threaded explicitly through every call, so
//! a seed always reproduces the same level.

pub mod dungeon;
pub mod encounters;
pub mod items;

pub use dungeon::*;
pub use encounters::*;
pub use items::*;

use crate::config::{
    DEFAULT_DUNGEON_HEIGHT, DEFAULT_DUNGEON_WIDTH, DEFAULT_MAX_MONSTERS_PER_ROOM,
    DEFAULT_MAX_ROOMS, DEFAULT_ROOM_MAX_SIZE, DEFAULT_ROOM_MIN_SIZE,
};
use crate::game::{Actor, Position, TileGrid};
use crate::{GloomError, GloomResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Parameters for one level.
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Smallest room edge, walls included
    pub room_min_size: u32,
    /// Largest room edge, walls included
    pub room_max_size: u32,
    /// Number of placement attempts
    pub max_rooms: u32,
    /// Upper bound of monsters spawned in one room
    pub max_monsters_per_room: u32,
}

impl GenerationConfig {
    /// Creates the default configuration with the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!((config.width, config.height), (80, 45));
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: DEFAULT_DUNGEON_WIDTH,
            height: DEFAULT_DUNGEON_HEIGHT,
            room_min_size: DEFAULT_ROOM_MIN_SIZE,
            room_max_size: DEFAULT_ROOM_MAX_SIZE,
            max_rooms: DEFAULT_MAX_ROOMS,
            max_monsters_per_room: DEFAULT_MAX_MONSTERS_PER_ROOM,
        }
    }

    /// Creates a configuration for testing with smaller, simpler levels.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            width: 40,
            height: 25,
            room_min_size: 4,
            room_max_size: 7,
            max_rooms: 12,
            max_monsters_per_room: 2,
        }
    }

    /// Rejects parameters the generator cannot honour.
    pub fn validate(&self) -> GloomResult<()> {
        let invalid = |msg: String| -> GloomResult<()> { Err(GloomError::InvalidConfig(msg)) };

        if self.width == 0 || self.height == 0 {
            return invalid(format!("grid must be non-empty, got {}x{}", self.width, self.height));
        }
        if self.room_min_size < 2 {
            return invalid(format!(
                "room_min_size must be at least 2 to leave an interior, got {}",
                self.room_min_size
            ));
        }
        if self.room_min_size > self.room_max_size {
            return invalid(format!(
                "room_min_size {} exceeds room_max_size {}",
                self.room_min_size, self.room_max_size
            ));
        }
        if self.room_max_size >= self.width.min(self.height) {
            return invalid(format!(
                "room_max_size {} must be smaller than the grid ({}x{})",
                self.room_max_size, self.width, self.height
            ));
        }
        if self.max_rooms == 0 {
            return invalid("max_rooms must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// An axis-aligned room footprint. The border row and column are walls;
/// only cells strictly inside are carved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    /// Creates a rect from its top-left corner and size.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::{Position, Rect};
    ///
    /// let room = Rect::new(10, 5, 6, 4);
    /// assert_eq!((room.x2, room.y2), (16, 9));
    /// assert_eq!(room.center(), Position::new(13, 7));
    /// ```
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + w,
            y2: y + h,
        }
    }

    /// The center cell, rounding toward the top-left.
    pub fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Inclusive overlap test: rects that share a border also intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    /// Whether `pos` lies strictly inside the border.
    pub fn contains_interior(&self, pos: Position) -> bool {
        pos.x > self.x1 && pos.x < self.x2 && pos.y > self.y1 && pos.y < self.y2
    }

    /// Every interior cell, row by row.
    pub fn interior(&self) -> impl Iterator<Item = Position> {
        let (x1, x2) = (self.x1, self.x2);
        ((self.y1 + 1)..self.y2).flat_map(move |y| ((x1 + 1)..x2).map(move |x| Position::new(x, y)))
    }
}

/// The output of level generation.
#[derive(Debug, Clone)]
pub struct GeneratedLevel {
    /// Where the player starts: the first room's center
    pub spawn: Position,
    /// The carved grid
    pub grid: TileGrid,
    /// Monsters and other placed actors, in placement order
    pub actors: Vec<Actor>,
    /// Accepted rooms in acceptance order
    pub rooms: Vec<Rect>,
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> GloomResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> GloomResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_default_config_is_valid() {
        let config = GenerationConfig::default();
        assert_eq!(config.room_min_size, 6);
        assert_eq!(config.room_max_size, 10);
        assert_eq!(config.max_rooms, 30);
        assert!(config.validate().is_ok());
        assert!(GenerationConfig::for_testing(1).validate().is_ok());
    }

    #[test]
    fn test_config_rejects_contract_violations() {
        let base = GenerationConfig::default();

        let cases = [
            GenerationConfig { width: 0, ..base.clone() },
            GenerationConfig { room_min_size: 1, ..base.clone() },
            GenerationConfig { room_min_size: 11, ..base.clone() },
            GenerationConfig { room_max_size: 45, ..base.clone() },
            GenerationConfig { max_rooms: 0, ..base.clone() },
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(GloomError::InvalidConfig(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn test_rect_geometry() {
        let room = Rect::new(5, 5, 10, 8);
        assert_eq!(room, Rect { x1: 5, y1: 5, x2: 15, y2: 13 });
        assert_eq!(room.center(), Position::new(10, 9));

        assert!(room.contains_interior(Position::new(6, 6)));
        assert!(room.contains_interior(Position::new(14, 12)));
        assert!(!room.contains_interior(Position::new(5, 6)));
        assert!(!room.contains_interior(Position::new(15, 12)));
        assert_eq!(room.interior().count(), 9 * 7);
        assert!(room.interior().all(|pos| room.contains_interior(pos)));

        let closet = Rect::new(3, 3, 2, 2);
        assert_eq!(closet.interior().collect::<Vec<_>>(), vec![Position::new(4, 4)]);
        assert!(closet.contains_interior(closet.center()));
    }

    #[test]
    fn test_smallest_rooms_are_accepted() {
        let config = GenerationConfig {
            room_min_size: 2,
            room_max_size: 2,
            ..GenerationConfig::for_testing(3)
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rect_intersection_is_inclusive() {
        let room = Rect::new(0, 0, 6, 6);
        assert!(room.intersects(&Rect::new(6, 0, 6, 6)));
        assert!(room.intersects(&Rect::new(3, 3, 2, 2)));
        assert!(!room.intersects(&Rect::new(7, 0, 6, 6)));
        assert!(!room.intersects(&Rect::new(0, 7, 6, 6)));
    }

    #[test]
    fn test_rng_is_seeded_from_config() {
        let config = GenerationConfig::new(12345);
        let mut a = utils::create_rng(&config);
        let mut b = utils::create_rng(&config);
        for _ in 0..5 {
            assert_eq!(a.gen::<u32>(), b.gen::<u32>());
        }
    }
}
