//! # Rendering Module
//!
//! Frame composition against an abstract [`Renderer`].
//!
//! The core never draws pixels itself. Each frame it hands the renderer
//! tile backgrounds for everything the player has seen, then the actors in
//! draw order, then asks it to present. [`MacroquadDisplay`] is the
//! windowed implementation.

pub mod display;

pub use display::*;

use crate::game::{Actor, Position, Rgb, Tile, WorldState};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How a tile's background should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorCategory {
    WallLit,
    WallDark,
    FloorLit,
    FloorDark,
}

impl ColorCategory {
    /// Picks the category for `tile`, or `None` if the player has never
    /// seen it.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::{ColorCategory, Tile};
    ///
    /// let mut wall = Tile::wall();
    /// assert_eq!(ColorCategory::for_tile(&wall, false), None);
    /// wall.mark_explored();
    /// assert_eq!(ColorCategory::for_tile(&wall, false), Some(ColorCategory::WallDark));
    /// assert_eq!(ColorCategory::for_tile(&wall, true), Some(ColorCategory::WallLit));
    /// ```
    pub fn for_tile(tile: &Tile, visible: bool) -> Option<Self> {
        match (visible, tile.is_explored(), tile.blocks_sight) {
            (true, _, true) => Some(ColorCategory::WallLit),
            (true, _, false) => Some(ColorCategory::FloorLit),
            (false, true, true) => Some(ColorCategory::WallDark),
            (false, true, false) => Some(ColorCategory::FloorDark),
            (false, false, _) => None,
        }
    }

    /// The background color for this category.
    pub fn rgb(self) -> Rgb {
        match self {
            ColorCategory::WallDark => Rgb::new(0, 0, 100),
            ColorCategory::WallLit => Rgb::new(130, 110, 50),
            ColorCategory::FloorDark => Rgb::new(50, 50, 150),
            ColorCategory::FloorLit => Rgb::new(200, 180, 50),
        }
    }
}

/// A drawing surface the core can compose frames onto.
pub trait Renderer {
    /// Draws `actor` if its position is in `visible`.
    fn draw_actor(&mut self, actor: &Actor, visible: &HashSet<Position>);

    /// Erases whatever was drawn for `actor`.
    fn clear_actor(&mut self, actor: &Actor);

    /// Sets the background of one cell.
    fn set_tile_background(&mut self, pos: Position, category: ColorCategory);

    /// Shows the composed frame.
    fn present(&mut self);

    /// Switches between windowed and fullscreen.
    fn toggle_fullscreen(&mut self);
}

/// Composes one frame of `world` onto `renderer` and presents it.
///
/// Visible tiles get a lit background, remembered tiles a dark one, and
/// unexplored tiles nothing. Actors follow in draw order, so the player
/// ends up on top.
pub fn render_frame(world: &WorldState, renderer: &mut dyn Renderer) {
    for pos in world.grid.positions() {
        let category = world
            .grid
            .get_tile(pos)
            .and_then(|tile| ColorCategory::for_tile(tile, world.is_visible(pos)));
        if let Some(category) = category {
            renderer.set_tile_background(pos, category);
        }
    }

    let visible = world.visibility.visible();
    for actor in world.actors.draw_order() {
        renderer.draw_actor(actor, visible);
    }

    renderer.present();
}

/// Erases every actor drawn by the last [`render_frame`].
pub fn clear_actors(world: &WorldState, renderer: &mut dyn Renderer) {
    for (_, actor) in world.actors.iter() {
        renderer.clear_actor(actor);
    }
}
