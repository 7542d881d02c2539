//! # World Representation
//!
//! The tile grid a level is played on.
//!
//! A [`TileGrid`] is pure data: every cell records whether it blocks
//! movement, whether it blocks sight, and whether the player has ever seen
//! it. Generation carves it, the field of view marks it explored, and the
//! renderer reads it.

use crate::game::Position;
use crate::{GloomError, GloomResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single cell of the dungeon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Whether actors can walk onto this tile
    pub blocks: bool,
    /// Whether this tile stops line of sight
    pub blocks_sight: bool,
    /// Whether the player has ever seen this tile
    explored: bool,
}

impl Tile {
    /// Creates a tile whose sight-blocking matches its movement-blocking.
    pub fn new(blocks: bool) -> Self {
        Self::with_sight(blocks, blocks)
    }

    /// Creates a tile with independent movement and sight blocking.
    pub fn with_sight(blocks: bool, blocks_sight: bool) -> Self {
        Self {
            blocks,
            blocks_sight,
            explored: false,
        }
    }

    /// Solid rock.
    pub fn wall() -> Self {
        Self::new(true)
    }

    /// Open floor.
    pub fn floor() -> Self {
        Self::new(false)
    }

    /// Whether the player has seen this tile at least once.
    pub fn is_explored(&self) -> bool {
        self.explored
    }

    /// Marks the tile as explored. Exploration is never undone.
    pub fn mark_explored(&mut self) {
        self.explored = true;
    }
}

/// A rectangular grid of tiles, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    /// Width in tiles
    pub width: u32,
    /// Height in tiles
    pub height: u32,
    /// Tiles indexed as `tiles[y][x]`
    pub tiles: Vec<Vec<Tile>>,
}

impl TileGrid {
    /// Creates a grid where every cell blocks movement and sight.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::{Position, TileGrid};
    ///
    /// let grid = TileGrid::new(10, 8);
    /// assert!(grid.is_blocked(Position::new(3, 3)));
    /// assert!(grid.is_blocked(Position::new(-1, 3)));
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Tile::wall())
    }

    /// Creates a grid with every cell set to `tile`.
    pub fn filled(width: u32, height: u32, tile: Tile) -> Self {
        Self {
            width,
            height,
            tiles: vec![vec![tile; width as usize]; height as usize],
        }
    }

    /// Checks whether a position lies inside the grid.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Gets the tile at a position, if it is inside the grid.
    pub fn get_tile(&self, pos: Position) -> Option<&Tile> {
        if !self.is_valid_position(pos) {
            return None;
        }
        self.tiles
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
    }

    /// Gets the tile at a position mutably, if it is inside the grid.
    pub fn get_tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        if !self.is_valid_position(pos) {
            return None;
        }
        self.tiles
            .get_mut(pos.y as usize)
            .and_then(|row| row.get_mut(pos.x as usize))
    }

    /// Replaces the tile at a position.
    pub fn set_tile(&mut self, pos: Position, tile: Tile) -> GloomResult<()> {
        let slot = self.get_tile_mut(pos).ok_or_else(|| {
            GloomError::InvalidState(format!("Position {:?} is outside the grid", pos))
        })?;
        *slot = tile;
        Ok(())
    }

    /// Makes a tile walkable and transparent, keeping its exploration state.
    pub fn carve(&mut self, pos: Position) -> GloomResult<()> {
        let tile = self.get_tile_mut(pos).ok_or_else(|| {
            GloomError::InvalidState(format!("Cannot carve {:?}: outside the grid", pos))
        })?;
        tile.blocks = false;
        tile.blocks_sight = false;
        Ok(())
    }

    /// Whether the tile blocks movement. Positions outside the grid block.
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.get_tile(pos).map(|tile| tile.blocks).unwrap_or(true)
    }

    /// Whether the tile blocks sight. Positions outside the grid block.
    pub fn blocks_sight(&self, pos: Position) -> bool {
        self.get_tile(pos)
            .map(|tile| tile.blocks_sight)
            .unwrap_or(true)
    }

    /// Iterates over every position in the grid, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }

    /// Number of tiles actors can walk on.
    pub fn floor_count(&self) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|tile| !tile.blocks)
            .count()
    }

    /// All positions the player has explored.
    pub fn explored_positions(&self) -> HashSet<Position> {
        self.positions()
            .filter(|&pos| self.get_tile(pos).is_some_and(Tile::is_explored))
            .collect()
    }

    /// All walkable positions reachable from `start` through cardinal steps.
    ///
    /// Returns an empty set if `start` itself is blocked.
    pub fn reachable_from(&self, start: Position) -> HashSet<Position> {
        if self.is_blocked(start) {
            return HashSet::new();
        }
        crate::utils::flood_fill(start, |pos| !self.is_blocked(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_defaults() {
        let wall = Tile::wall();
        assert!(wall.blocks);
        assert!(wall.blocks_sight);
        assert!(!wall.is_explored());

        let glass = Tile::with_sight(true, false);
        assert!(glass.blocks);
        assert!(!glass.blocks_sight);
    }

    #[test]
    fn test_grid_starts_solid() {
        let grid = TileGrid::new(12, 7);
        assert_eq!(grid.tiles.len(), 7);
        assert_eq!(grid.tiles[0].len(), 12);
        assert_eq!(grid.floor_count(), 0);
        assert!(grid.positions().all(|pos| grid.is_blocked(pos)));
    }

    #[test]
    fn test_bounds() {
        let grid = TileGrid::new(10, 5);
        assert!(grid.is_valid_position(Position::new(0, 0)));
        assert!(grid.is_valid_position(Position::new(9, 4)));
        assert!(!grid.is_valid_position(Position::new(10, 4)));
        assert!(!grid.is_valid_position(Position::new(3, -1)));
        assert!(grid.get_tile(Position::new(-1, 0)).is_none());
        assert!(grid.is_blocked(Position::new(100, 100)));
        assert!(grid.blocks_sight(Position::new(100, 100)));
    }

    #[test]
    fn test_carve_keeps_exploration() {
        let mut grid = TileGrid::new(5, 5);
        let pos = Position::new(2, 2);
        grid.get_tile_mut(pos).unwrap().mark_explored();
        grid.carve(pos).unwrap();

        let tile = grid.get_tile(pos).unwrap();
        assert!(!tile.blocks);
        assert!(!tile.blocks_sight);
        assert!(tile.is_explored());
        assert!(grid.carve(Position::new(5, 0)).is_err());
    }

    #[test]
    fn test_reachable_from_stops_at_walls() {
        let mut grid = TileGrid::new(10, 3);
        // Two corridors separated by a wall at x = 4.
        for x in 1..4 {
            grid.carve(Position::new(x, 1)).unwrap();
        }
        for x in 5..9 {
            grid.carve(Position::new(x, 1)).unwrap();
        }

        let reachable = grid.reachable_from(Position::new(1, 1));
        assert_eq!(reachable.len(), 3);
        assert!(!reachable.contains(&Position::new(5, 1)));

        grid.carve(Position::new(4, 1)).unwrap();
        assert_eq!(grid.reachable_from(Position::new(1, 1)).len(), 8);
        assert!(grid.reachable_from(Position::new(0, 0)).is_empty());
    }
}
