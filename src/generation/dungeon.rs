//! # Dungeon Generation
//!
//! Room-and-corridor layout generation.
//!
//! The generator:
//! 1. Starts from a grid of solid wall
//! 2. Tries `max_rooms` random rectangles, rejecting any that touch an
//!    accepted room
//! 3. Carves each accepted room and populates it with monsters
//! 4. Joins each new room's center to the previous room's center with an
//!    L-shaped corridor
//!
//! Rooms are chained in acceptance order, so every room is reachable from
//! the first one, where the player spawns.

use crate::game::{Position, TileGrid};
use crate::generation::{
    EncounterTable, GeneratedLevel, GenerationConfig, Generator, ItemGenerator, Rect,
};
use crate::{GloomError, GloomResult};
use rand::{rngs::StdRng, Rng};

/// Primary dungeon generator using the room-and-corridor algorithm.
#[derive(Debug, Clone)]
pub struct RoomCorridorGenerator {
    /// Monster kinds placed in rooms
    pub encounters: EncounterTable,
    /// Item hook run for every accepted room
    pub items: ItemGenerator,
}

impl RoomCorridorGenerator {
    /// Creates a generator drawing monsters from `encounters`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::generation::utils;
    /// use gloom::{EncounterTable, GenerationConfig, Generator, RoomCorridorGenerator};
    ///
    /// let generator = RoomCorridorGenerator::new(EncounterTable::standard().unwrap());
    /// let config = GenerationConfig::new(1);
    /// let level = generator.generate(&config, &mut utils::create_rng(&config)).unwrap();
    /// assert_eq!(level.spawn, level.rooms[0].center());
    /// ```
    pub fn new(encounters: EncounterTable) -> Self {
        Self {
            encounters,
            items: ItemGenerator,
        }
    }

    /// Draws one candidate room. Draw order is width, height, x, y.
    fn roll_room(&self, config: &GenerationConfig, rng: &mut StdRng) -> Rect {
        let w = rng.gen_range(config.room_min_size..=config.room_max_size) as i32;
        let h = rng.gen_range(config.room_min_size..=config.room_max_size) as i32;
        let x = rng.gen_range(0..=config.width as i32 - w - 1);
        let y = rng.gen_range(0..=config.height as i32 - h - 1);
        Rect::new(x, y, w, h)
    }

    /// Carves the interior of `room`, leaving its border as wall.
    fn carve_room(&self, grid: &mut TileGrid, room: &Rect) -> GloomResult<()> {
        for pos in room.interior() {
            grid.carve(pos)?;
        }
        Ok(())
    }

    /// Carves a horizontal run at row `y`, both ends inclusive.
    fn carve_h_tunnel(&self, grid: &mut TileGrid, x1: i32, x2: i32, y: i32) -> GloomResult<()> {
        for x in x1.min(x2)..=x1.max(x2) {
            grid.carve(Position::new(x, y))?;
        }
        Ok(())
    }

    /// Carves a vertical run at column `x`, both ends inclusive.
    fn carve_v_tunnel(&self, grid: &mut TileGrid, y1: i32, y2: i32, x: i32) -> GloomResult<()> {
        for y in y1.min(y2)..=y1.max(y2) {
            grid.carve(Position::new(x, y))?;
        }
        Ok(())
    }

    /// Joins two room centers with an L-shaped corridor. A coin flip picks
    /// which leg comes first.
    fn connect(&self, grid: &mut TileGrid, from: Position, to: Position, rng: &mut StdRng) -> GloomResult<()> {
        if rng.gen_range(0..=1) == 1 {
            self.carve_h_tunnel(grid, from.x, to.x, from.y)?;
            self.carve_v_tunnel(grid, from.y, to.y, to.x)
        } else {
            self.carve_v_tunnel(grid, from.y, to.y, from.x)?;
            self.carve_h_tunnel(grid, from.x, to.x, to.y)
        }
    }
}

impl Generator<GeneratedLevel> for RoomCorridorGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> GloomResult<GeneratedLevel> {
        config.validate()?;

        let mut grid = TileGrid::new(config.width, config.height);
        let mut rooms: Vec<Rect> = Vec::new();
        let mut actors = Vec::new();
        let mut spawn: Option<Position> = None;
        let mut rejected = 0u32;

        for _ in 0..config.max_rooms {
            let room = self.roll_room(config, rng);
            if rooms.iter().any(|other| room.intersects(other)) {
                rejected += 1;
                continue;
            }

            self.carve_room(&mut grid, &room)?;
            let spawn_point = *spawn.get_or_insert(room.center());

            let monsters = self.encounters.populate_room(
                &room,
                config.max_monsters_per_room,
                spawn_point,
                &actors,
                rng,
            );
            actors.extend(monsters);
            actors.extend(self.items.place_items(&room, rng));

            if let Some(previous) = rooms.last() {
                self.connect(&mut grid, previous.center(), room.center(), rng)?;
            }
            rooms.push(room);
        }

        let spawn = spawn.ok_or_else(|| {
            GloomError::GenerationFailed(format!("no room accepted in {} attempts", config.max_rooms))
        })?;

        log::debug!(
            "{}: {} rooms accepted, {} rejected, {} actors placed",
            self.generator_type(),
            rooms.len(),
            rejected,
            actors.len()
        );

        let level = GeneratedLevel {
            spawn,
            grid,
            actors,
            rooms,
        };
        self.validate(&level, config)?;
        Ok(level)
    }

    fn validate(&self, level: &GeneratedLevel, _config: &GenerationConfig) -> GloomResult<()> {
        for (i, room) in level.rooms.iter().enumerate() {
            if let Some(other) = level.rooms[i + 1..].iter().find(|other| room.intersects(other)) {
                return Err(GloomError::GenerationFailed(format!(
                    "rooms {:?} and {:?} overlap",
                    room, other
                )));
            }
        }

        let reachable = level.grid.reachable_from(level.spawn);
        if reachable.is_empty() {
            return Err(GloomError::GenerationFailed(format!(
                "spawn point ({}, {}) is not walkable",
                level.spawn.x, level.spawn.y
            )));
        }
        if let Some(room) = level.rooms.iter().find(|room| !reachable.contains(&room.center())) {
            return Err(GloomError::GenerationFailed(format!(
                "room centered at ({}, {}) is not connected to the spawn",
                room.center().x,
                room.center().y
            )));
        }

        if let Some(actor) = level.actors.iter().find(|actor| level.grid.is_blocked(actor.position)) {
            return Err(GloomError::GenerationFailed(format!(
                "{} was placed inside a wall",
                actor.name
            )));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "RoomCorridorGenerator"
    }
}
