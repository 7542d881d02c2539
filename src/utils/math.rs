//! # Game Mathematics
//!
//! Grid-step arithmetic used by monster movement.

use crate::game::Position;

/// Returns the single grid step that best approximates moving from `from`
/// toward `to`.
///
/// The displacement is normalised to unit length and each component is
/// rounded, which restricts motion to the eight neighbouring cells.
/// Returns `(0, 0)` when the positions coincide.
///
/// # Examples
///
/// ```
/// use gloom::{unit_step_toward, Position};
///
/// let step = unit_step_toward(Position::new(0, 0), Position::new(5, 1));
/// assert_eq!(step, Position::new(1, 0));
///
/// let step = unit_step_toward(Position::new(0, 0), Position::new(-4, -4));
/// assert_eq!(step, Position::new(-1, -1));
/// ```
pub fn unit_step_toward(from: Position, to: Position) -> Position {
    let distance = from.euclidean_distance(to);
    if distance == 0.0 {
        return Position::new(0, 0);
    }

    let dx = (to.x - from.x) as f64 / distance;
    let dy = (to.y - from.y) as f64 / distance;
    Position::new(dx.round() as i32, dy.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_step_cardinal() {
        let origin = Position::new(10, 10);
        assert_eq!(unit_step_toward(origin, Position::new(10, 3)), Position::new(0, -1));
        assert_eq!(unit_step_toward(origin, Position::new(20, 10)), Position::new(1, 0));
    }

    #[test]
    fn test_unit_step_prefers_dominant_axis() {
        let origin = Position::new(0, 0);
        // atan(1/3) is well under 22.5 degrees, so the step stays horizontal.
        assert_eq!(unit_step_toward(origin, Position::new(3, 1)), Position::new(1, 0));
        // atan(2/3) is past 22.5 degrees, so the step becomes diagonal.
        assert_eq!(unit_step_toward(origin, Position::new(3, 2)), Position::new(1, 1));
    }

    #[test]
    fn test_unit_step_same_position() {
        let pos = Position::new(4, 4);
        assert_eq!(unit_step_toward(pos, pos), Position::new(0, 0));
    }
}
