//! # Item Placement
//!
//! Hook for placing items in rooms. Items would be actors with neither a
//! combat nor an AI capability; none are generated yet.

use crate::game::Actor;
use crate::generation::Rect;
use rand::rngs::StdRng;

/// Placeholder item placer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemGenerator;

impl ItemGenerator {
    /// Places items in `room`. Currently places none and draws nothing from
    /// `rng`, so enabling it later will not shift existing seeds until
    /// items are actually rolled.
    pub fn place_items(&self, room: &Rect, rng: &mut StdRng) -> Vec<Actor> {
        let _ = (room, rng);
        Vec::new()
    }
}
