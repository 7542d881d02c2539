//! # Field of View
//!
//! Recursive shadowcasting over the eight octants around a viewer.
//!
//! The field keeps the visible set from its last computation; it is only
//! recomputed when the viewer moves. Every tile found visible is marked
//! explored on the grid, and exploration is never cleared.

use crate::game::{Position, TileGrid};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Octant transforms `(xx, xy, yx, yy)` mapping octant-local `(dx, dy)` to
/// grid offsets.
const OCTANTS: [(i32, i32, i32, i32); 8] = [
    (1, 0, 0, 1),
    (0, 1, 1, 0),
    (0, -1, 1, 0),
    (-1, 0, 0, 1),
    (-1, 0, 0, -1),
    (0, -1, -1, 0),
    (0, 1, -1, 0),
    (1, 0, 0, -1),
];

/// The set of tiles visible from the last viewer position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisibilityField {
    visible: HashSet<Position>,
    viewer: Option<Position>,
    recomputations: u64,
}

impl VisibilityField {
    /// Creates an empty field. Nothing is visible until the first recompute.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the visible set from `viewer` and marks every visible
    /// tile explored.
    ///
    /// The viewer's own tile is always visible. With `light_walls`, the
    /// first sight-blocking tile along a ray is visible; without it,
    /// sight-blocking tiles are never visible.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::{Position, Tile, TileGrid, VisibilityField};
    ///
    /// let mut grid = TileGrid::filled(9, 9, Tile::floor());
    /// let mut field = VisibilityField::new();
    /// let visible = field.recompute(&mut grid, Position::new(4, 4), 2, true);
    ///
    /// assert!(visible.contains(&Position::new(4, 4)));
    /// assert!(visible.contains(&Position::new(6, 4)));
    /// assert!(!visible.contains(&Position::new(7, 4)));
    /// assert!(grid.get_tile(Position::new(6, 4)).unwrap().is_explored());
    /// ```
    pub fn recompute(
        &mut self,
        grid: &mut TileGrid,
        viewer: Position,
        radius: i32,
        light_walls: bool,
    ) -> &HashSet<Position> {
        let mut visible = HashSet::new();
        // Past width + height every tile is already inside the circle.
        let radius = radius.clamp(0, (grid.width + grid.height).min(i32::MAX as u32) as i32);

        if grid.is_valid_position(viewer) {
            visible.insert(viewer);
            for &(xx, xy, yx, yy) in &OCTANTS {
                cast_light(
                    grid,
                    &mut visible,
                    Octant {
                        origin: viewer,
                        radius,
                        light_walls,
                        transform: (xx, xy, yx, yy),
                    },
                    1,
                    1.0,
                    0.0,
                );
            }
        }

        for &pos in &visible {
            if let Some(tile) = grid.get_tile_mut(pos) {
                tile.mark_explored();
            }
        }

        self.recomputations += 1;
        self.viewer = Some(viewer);
        self.visible = visible;
        log::trace!(
            "FOV recomputed from ({}, {}): {} tiles visible",
            viewer.x,
            viewer.y,
            self.visible.len()
        );
        &self.visible
    }

    /// Whether `pos` was visible at the last recompute.
    pub fn is_visible(&self, pos: Position) -> bool {
        self.visible.contains(&pos)
    }

    /// The visible set from the last recompute.
    pub fn visible(&self) -> &HashSet<Position> {
        &self.visible
    }

    /// Where the last recompute was made from.
    pub fn viewer(&self) -> Option<Position> {
        self.viewer
    }

    /// How many times the field has been recomputed.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

/// Parameters shared by every row scanned in one octant.
#[derive(Debug, Clone, Copy)]
struct Octant {
    origin: Position,
    radius: i32,
    light_walls: bool,
    transform: (i32, i32, i32, i32),
}

impl Octant {
    fn to_grid(&self, dx: i32, dy: i32) -> Position {
        let (xx, xy, yx, yy) = self.transform;
        Position::new(
            self.origin.x + dx * xx + dy * xy,
            self.origin.y + dx * yx + dy * yy,
        )
    }
}

/// Scans rows `row..=radius` of one octant between the `start` and `end`
/// slopes, recursing past each run of sight-blocking tiles.
fn cast_light(
    grid: &TileGrid,
    visible: &mut HashSet<Position>,
    octant: Octant,
    row: i32,
    mut start: f64,
    end: f64,
) {
    if start < end {
        return;
    }

    let radius_squared = i64::from(octant.radius).pow(2);
    let mut next_start = start;

    for distance in row..=octant.radius {
        let dy = -distance;
        let mut blocked = false;

        for dx in -distance..=0 {
            let pos = octant.to_grid(dx, dy);
            let left_slope = (dx as f64 - 0.5) / (dy as f64 + 0.5);
            let right_slope = (dx as f64 + 0.5) / (dy as f64 - 0.5);

            if start < right_slope {
                continue;
            }
            if end > left_slope {
                break;
            }

            let opaque = grid.blocks_sight(pos);
            if i64::from(dx).pow(2) + i64::from(dy).pow(2) <= radius_squared
                && grid.is_valid_position(pos)
                && (octant.light_walls || !opaque)
            {
                visible.insert(pos);
            }

            if blocked {
                if opaque {
                    next_start = right_slope;
                    continue;
                }
                blocked = false;
                start = next_start;
            } else if opaque && distance < octant.radius {
                blocked = true;
                cast_light(grid, visible, octant, distance + 1, start, left_slope);
                next_start = right_slope;
            }
        }

        if blocked {
            break;
        }
    }
}
