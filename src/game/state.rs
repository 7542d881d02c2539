//! # World State Module
//!
//! The single mutable aggregate a level is played on.
//!
//! [`WorldState`] owns the tile grid, the actor registry, and the field of
//! view. Systems such as combat and AI borrow it for the length of one
//! call and keep no references between calls.

use crate::config::MAX_MESSAGES;
use crate::game::{
    ActorId, ActorRegistry, FovSettings, GameConfig, GameEvent, GameStatistics, PlayerTemplate,
    Position, TileGrid, VisibilityField,
};
use crate::generation::{utils, EncounterTable, GeneratedLevel, Generator, Rect, RoomCorridorGenerator};
use crate::GloomResult;
use serde::{Deserialize, Serialize};

/// Whether the player is still in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Dead,
}

/// Outcome of resolving one player intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// The player stepped onto a new tile
    Moved,
    /// The player bumped into an attackable actor
    Attacked,
    /// Nothing in the world changed; monsters do not act
    NoAction,
    /// The player asked to leave
    Exit,
}

/// Central state for one level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    /// The level's tiles
    pub grid: TileGrid,
    /// Every actor, player first
    pub actors: ActorRegistry,
    /// What the player saw at the last recompute
    pub visibility: VisibilityField,
    /// Set after the player moves; cleared by the next recompute
    pub visibility_dirty: bool,
    /// Playing until the player's death transition fires
    pub status: GameStatus,
    /// The most recently resolved player action
    pub last_action: Option<PlayerAction>,
    /// Sight radius and wall lighting
    pub fov: FovSettings,
    /// Rooms in acceptance order
    pub rooms: Vec<Rect>,
    /// Narration, oldest first
    pub messages: Vec<String>,
    /// Running totals for this level
    pub statistics: GameStatistics,
    /// Seed the level was generated from
    pub seed: u64,
}

impl WorldState {
    /// Builds a world from a generated level, placing the player on its
    /// spawn point ahead of the generated actors.
    pub fn new(level: GeneratedLevel, player: &PlayerTemplate, fov: FovSettings, seed: u64) -> Self {
        let mut actors = ActorRegistry::new(player.spawn(level.spawn));
        for actor in level.actors {
            actors.push(actor);
        }

        Self {
            grid: level.grid,
            actors,
            visibility: VisibilityField::new(),
            visibility_dirty: true,
            status: GameStatus::Playing,
            last_action: None,
            fov,
            rooms: level.rooms,
            messages: Vec::new(),
            statistics: GameStatistics::new(),
            seed,
        }
    }

    /// Validates `config`, generates a level from its seed, and builds the
    /// world around it.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::{GameConfig, GameStatus, WorldState};
    ///
    /// let world = WorldState::from_config(&GameConfig::default()).unwrap();
    /// assert_eq!(world.status, GameStatus::Playing);
    /// assert!(world.visibility_dirty);
    /// assert!(!world.rooms.is_empty());
    /// ```
    pub fn from_config(config: &GameConfig) -> GloomResult<Self> {
        config.validate()?;

        let encounters = EncounterTable::new(config.monsters.clone())?;
        let generator = RoomCorridorGenerator::new(encounters);
        let mut rng = utils::create_rng(&config.generation);
        let level = generator.generate(&config.generation, &mut rng)?;

        log::info!(
            "Generated level with seed {}: {} rooms, {} monsters",
            config.generation.seed,
            level.rooms.len(),
            level.actors.len()
        );

        Ok(Self::new(
            level,
            &config.player,
            config.fov.clone(),
            config.generation.seed,
        ))
    }

    /// Whether a position blocks movement, by terrain or by a blocking actor.
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.grid.is_blocked(pos) || self.actors.blocking_actor_at(pos).is_some()
    }

    /// Moves an actor by `delta` unless the destination is blocked.
    ///
    /// Returns the movement event, or `None` for a blocked move.
    pub fn move_actor(&mut self, id: ActorId, delta: Position) -> GloomResult<Option<GameEvent>> {
        let from = self.actors.require(id)?.position;
        let to = from + delta;
        if self.is_blocked(to) {
            return Ok(None);
        }

        let actor = self.actors.require_mut(id)?;
        actor.position = to;
        Ok(Some(GameEvent::Moved {
            actor: id,
            name: actor.name.clone(),
            from,
            to,
        }))
    }

    /// The player's position.
    pub fn player_position(&self) -> Position {
        self.actors.player().position
    }

    /// Whether the player currently sees `pos`.
    pub fn is_visible(&self, pos: Position) -> bool {
        self.visibility.is_visible(pos)
    }

    /// Recomputes the field of view if the player has moved since the
    /// last recompute. Returns whether a recompute happened.
    pub fn refresh_visibility(&mut self) -> bool {
        if !self.visibility_dirty {
            return false;
        }

        let viewer = self.player_position();
        self.visibility
            .recompute(&mut self.grid, viewer, self.fov.radius, self.fov.light_walls);
        self.visibility_dirty = false;
        true
    }

    /// Appends narration and folds events into the statistics.
    pub fn record_events(&mut self, events: &[GameEvent]) {
        let player = self.actors.player_id();
        for event in events {
            self.statistics.update_from_event(event, player);
            if let Some(text) = event.message() {
                self.add_message(text);
            }
        }
    }

    /// Adds a line to the message log, dropping the oldest past the cap.
    pub fn add_message(&mut self, text: String) {
        self.messages.push(text);
        if self.messages.len() > MAX_MESSAGES {
            let overflow = self.messages.len() - MAX_MESSAGES;
            self.messages.drain(..overflow);
        }
    }

    /// Whether the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::Dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Actor, Glyph, Rgb, Tile};

    fn corridor_world() -> WorldState {
        let mut grid = TileGrid::new(10, 3);
        for x in 1..9 {
            grid.set_tile(Position::new(x, 1), Tile::floor()).unwrap();
        }
        let level = GeneratedLevel {
            spawn: Position::new(1, 1),
            grid,
            actors: vec![Actor::new(
                "crate",
                Position::new(4, 1),
                Glyph::new('#', Rgb::WHITE),
                true,
            )],
            rooms: Vec::new(),
        };
        WorldState::new(level, &PlayerTemplate::default(), FovSettings::default(), 1)
    }

    #[test]
    fn test_new_world_places_player_first() {
        let world = corridor_world();
        assert_eq!(world.actors.len(), 2);
        assert_eq!(world.player_position(), Position::new(1, 1));
        assert_eq!(world.actors.player().name, "Hero");
        assert_eq!(world.status, GameStatus::Playing);
        assert!(world.last_action.is_none());
    }

    #[test]
    fn test_move_actor_respects_walls_and_actors() {
        let mut world = corridor_world();
        let player = world.actors.player_id();

        assert!(world.move_actor(player, Position::new(0, -1)).unwrap().is_none());
        assert!(world.move_actor(player, Position::new(1, 0)).unwrap().is_some());
        assert!(world.move_actor(player, Position::new(1, 0)).unwrap().is_some());
        assert_eq!(world.player_position(), Position::new(3, 1));

        // The crate at (4, 1) blocks the corridor.
        assert!(world.move_actor(player, Position::new(1, 0)).unwrap().is_none());
        assert_eq!(world.player_position(), Position::new(3, 1));
    }

    #[test]
    fn test_refresh_visibility_only_when_dirty() {
        let mut world = corridor_world();
        assert!(world.refresh_visibility());
        assert!(!world.visibility_dirty);
        assert!(!world.refresh_visibility());
        assert_eq!(world.visibility.recomputations(), 1);
        assert!(world.is_visible(Position::new(1, 1)));
    }

    #[test]
    fn test_statistics_follow_player_id_not_name() {
        let mut world = corridor_world();
        world.actors.player_mut().name = "crate".to_string();

        let crate_move = world.move_actor(ActorId(1), Position::new(1, 0)).unwrap().unwrap();
        world.record_events(&[crate_move]);
        assert_eq!(world.statistics.steps_taken, 0);

        let player = world.actors.player_id();
        let step = world.move_actor(player, Position::new(1, 0)).unwrap().unwrap();
        world.record_events(&[step]);
        assert_eq!(world.statistics.steps_taken, 1);
    }

    #[test]
    fn test_message_log_is_bounded() {
        let mut world = corridor_world();
        for i in 0..(MAX_MESSAGES + 5) {
            world.add_message(format!("line {}", i));
        }
        assert_eq!(world.messages.len(), MAX_MESSAGES);
        assert_eq!(world.messages[0], "line 5");
    }
}
