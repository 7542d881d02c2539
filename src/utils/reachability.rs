//! # Reachability
//!
//! Flood fills over the tile grid, used to check that generated levels
//! are connected.

use crate::game::Position;
use pathfinding::prelude::bfs_reach;
use std::collections::HashSet;

/// Collects every position reachable from `start` through cardinal steps
/// onto positions accepted by `passable`.
///
/// `start` is always part of the result.
pub fn flood_fill<F>(start: Position, passable: F) -> HashSet<Position>
where
    F: Fn(Position) -> bool,
{
    bfs_reach(start, |pos: &Position| {
        pos.cardinal_adjacent_positions()
            .into_iter()
            .filter(|&next| passable(next))
            .collect::<Vec<_>>()
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flood_fill_bounded_square() {
        let reachable = flood_fill(Position::new(0, 0), |pos| {
            (0..3).contains(&pos.x) && (0..3).contains(&pos.y)
        });
        assert_eq!(reachable.len(), 9);
        assert!(reachable.contains(&Position::new(2, 2)));
    }

    #[test]
    fn test_flood_fill_includes_start() {
        let reachable = flood_fill(Position::new(7, 7), |_| false);
        assert_eq!(reachable.len(), 1);
        assert!(reachable.contains(&Position::new(7, 7)));
    }

    #[test]
    fn test_flood_fill_stops_at_walls() {
        // Two 2x1 pockets separated by a wall column at x = 2.
        let reachable = flood_fill(Position::new(0, 0), |pos| {
            pos.y == 0 && (0..5).contains(&pos.x) && pos.x != 2
        });
        assert_eq!(
            reachable,
            HashSet::from([Position::new(0, 0), Position::new(1, 0)])
        );
    }
}
