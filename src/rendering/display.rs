//! # Display Management
//!
//! A console-style cell buffer drawn with macroquad.
//!
//! The core composes a frame into the buffer through the [`Renderer`]
//! trait; [`Renderer::present`] then paints every cell as a colored
//! rectangle with its glyph on top, followed by the message panel under the
//! map.

use crate::config::MESSAGE_PANEL_HEIGHT;
use crate::game::{Actor, Glyph, Position, Rgb, WorldState};
use crate::rendering::{ColorCategory, Renderer};
use macroquad::prelude::{
    clear_background, draw_rectangle, draw_text, screen_height, screen_width, set_fullscreen,
    Color, BLACK,
};
use std::collections::HashSet;

/// One character cell of the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    /// Background color, once the tile has been seen
    pub background: Option<Rgb>,
    /// Glyph drawn over the background
    pub glyph: Option<Glyph>,
}

/// Macroquad display for the map and message panel.
pub struct MacroquadDisplay {
    /// Map width in cells
    pub width: u32,
    /// Map height in cells
    pub height: u32,
    cells: Vec<Cell>,
    status_line: String,
    panel_lines: Vec<String>,
    fullscreen: bool,
}

impl MacroquadDisplay {
    /// Creates a blank display for a `width` x `height` map.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
            status_line: String::new(),
            panel_lines: Vec::new(),
            fullscreen: false,
        }
    }

    /// Total rows on screen: the map plus the message panel.
    pub fn rows(&self) -> u32 {
        self.height + MESSAGE_PANEL_HEIGHT
    }

    /// The cell at `pos`, if it is on the map.
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).and_then(|i| self.cells.get(i))
    }

    /// Whether the window is currently fullscreen.
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Refreshes the panel from `world`: the player's hit points and the
    /// most recent messages that fit.
    pub fn update_panel(&mut self, world: &WorldState) {
        let player = world.actors.player();
        self.status_line = match &player.combat {
            Some(combat) => format!("HP: {}/{}", combat.display_hp(), combat.max_hp),
            None => String::new(),
        };

        let room = MESSAGE_PANEL_HEIGHT.saturating_sub(1) as usize;
        let skip = world.messages.len().saturating_sub(room);
        self.panel_lines = world.messages[skip..].to_vec();
    }

    /// The lines the panel will show, status first.
    pub fn panel(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.status_line.as_str()).chain(self.panel_lines.iter().map(String::as_str))
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x as u32 >= self.width || pos.y as u32 >= self.height {
            return None;
        }
        Some(pos.y as usize * self.width as usize + pos.x as usize)
    }

    fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        let i = self.index(pos)?;
        self.cells.get_mut(i)
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::from_rgba(rgb.r, rgb.g, rgb.b, 255)
}

impl Renderer for MacroquadDisplay {
    fn draw_actor(&mut self, actor: &Actor, visible: &HashSet<Position>) {
        if !visible.contains(&actor.position) {
            return;
        }
        if let Some(cell) = self.cell_mut(actor.position) {
            cell.glyph = Some(actor.glyph);
        }
    }

    fn clear_actor(&mut self, actor: &Actor) {
        if let Some(cell) = self.cell_mut(actor.position) {
            cell.glyph = None;
        }
    }

    fn set_tile_background(&mut self, pos: Position, category: ColorCategory) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.background = Some(category.rgb());
        }
    }

    fn present(&mut self) {
        let cell_w = screen_width() / self.width as f32;
        let cell_h = screen_height() / self.rows() as f32;
        let font_size = cell_h * 1.1;
        let mut buf = [0u8; 4];

        clear_background(BLACK);

        for (i, cell) in self.cells.iter().enumerate() {
            let x = (i % self.width as usize) as f32 * cell_w;
            let y = (i / self.width as usize) as f32 * cell_h;

            if let Some(background) = cell.background {
                draw_rectangle(x, y, cell_w, cell_h, to_color(background));
            }
            if let Some(glyph) = cell.glyph {
                let text = glyph.ch.encode_utf8(&mut buf);
                draw_text(text, x + cell_w * 0.15, y + cell_h * 0.85, font_size, to_color(glyph.color));
            }
        }

        let panel_top = self.height as f32 * cell_h;
        for (row, line) in self.panel().enumerate() {
            let y = panel_top + (row as f32 + 0.85) * cell_h;
            draw_text(line, cell_w, y, font_size, to_color(Rgb::WHITE));
        }
    }

    fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        log::debug!("Fullscreen {}", if self.fullscreen { "on" } else { "off" });
        set_fullscreen(self.fullscreen);
    }
}
