//! # Actors
//!
//! Everything that occupies a tile: the player, monsters, corpses, and
//! (eventually) items.
//!
//! An [`Actor`] is a plain record. Behaviour is attached through optional
//! capabilities: [`Combat`] makes it attackable and able to fight, [`Ai`]
//! gives it a turn during the AI phase.

use crate::game::{Ai, Position};
use serde::{Deserialize, Serialize};

/// An RGB colour. Opaque to the simulation; only renderers read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Creates a colour from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const DARK_RED: Rgb = Rgb::new(128, 0, 0);
    pub const DESATURATED_GREEN: Rgb = Rgb::new(63, 127, 63);
    pub const DARKER_GREEN: Rgb = Rgb::new(0, 127, 0);
}

/// How an actor is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyph {
    pub ch: char,
    pub color: Rgb,
}

impl Glyph {
    pub const fn new(ch: char, color: Rgb) -> Self {
        Self { ch, color }
    }

    /// The glyph every dead actor is swapped to.
    pub const CORPSE: Glyph = Glyph::new('%', Rgb::DARK_RED);
}

/// What happens when an actor's hit points first reach zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathTransition {
    /// Ends the game.
    Player,
    /// Leaves an inert, walkable corpse.
    Monster,
}

/// Fighting capability.
///
/// `hp` is stored signed: a killing blow may push it below zero. Use
/// [`Combat::display_hp`] for anything shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combat {
    pub max_hp: i32,
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
    pub death: DeathTransition,
    /// Set once the death transition has fired.
    dead: bool,
}

impl Combat {
    /// Creates a combat block at full health.
    pub fn new(max_hp: i32, defense: i32, power: i32, death: DeathTransition) -> Self {
        Self {
            max_hp,
            hp: max_hp,
            defense,
            power,
            death,
            dead: false,
        }
    }

    /// Subtracts `amount` hit points.
    ///
    /// Returns `true` only for the hit that takes `hp` to zero or below for
    /// the first time; the caller must then run the death transition.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::{Combat, DeathTransition};
    ///
    /// let mut combat = Combat::new(5, 0, 1, DeathTransition::Monster);
    /// assert!(!combat.take_damage(3));
    /// assert!(combat.take_damage(3));
    /// assert!(!combat.take_damage(3));
    /// assert_eq!(combat.display_hp(), 0);
    /// ```
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if amount > 0 {
            self.hp -= amount;
        }
        if self.hp <= 0 && !self.dead {
            self.dead = true;
            return true;
        }
        false
    }

    /// Whether the death transition has already fired.
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Hit points clamped for display.
    pub fn display_hp(&self) -> i32 {
        self.hp.min(self.max_hp).max(0)
    }
}

/// Anything that occupies a tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub position: Position,
    pub glyph: Glyph,
    pub blocks_movement: bool,
    pub combat: Option<Combat>,
    pub ai: Option<Ai>,
}

impl Actor {
    /// Creates an actor with no capabilities.
    pub fn new(name: impl Into<String>, position: Position, glyph: Glyph, blocks_movement: bool) -> Self {
        Self {
            name: name.into(),
            position,
            glyph,
            blocks_movement,
            combat: None,
            ai: None,
        }
    }

    /// Attaches a combat capability.
    pub fn with_combat(mut self, combat: Combat) -> Self {
        self.combat = Some(combat);
        self
    }

    /// Attaches an AI capability.
    pub fn with_ai(mut self, ai: Ai) -> Self {
        self.ai = Some(ai);
        self
    }

    /// Whether a bump into this actor resolves as an attack.
    pub fn is_attackable(&self) -> bool {
        self.combat.as_ref().is_some_and(|combat| !combat.is_dead())
    }

    /// Whether the actor still fights. Actors without combat are never alive.
    pub fn is_alive(&self) -> bool {
        self.is_attackable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combat_starts_full() {
        let combat = Combat::new(30, 2, 5, DeathTransition::Player);
        assert_eq!(combat.hp, 30);
        assert_eq!(combat.max_hp, 30);
        assert!(!combat.is_dead());
    }

    #[test]
    fn test_take_damage_crossing_fires_once() {
        let mut combat = Combat::new(2, 0, 1, DeathTransition::Player);
        assert!(combat.take_damage(3));
        assert_eq!(combat.hp, -1);
        assert_eq!(combat.display_hp(), 0);
        assert!(combat.is_dead());

        assert!(!combat.take_damage(4));
        assert_eq!(combat.hp, -5);
    }

    #[test]
    fn test_zero_damage_does_not_heal() {
        let mut combat = Combat::new(10, 0, 1, DeathTransition::Monster);
        assert!(!combat.take_damage(0));
        assert!(!combat.take_damage(-3));
        assert_eq!(combat.hp, 10);
    }

    #[test]
    fn test_attackability_is_a_combat_predicate() {
        let pos = Position::new(1, 1);
        let statue = Actor::new("statue", pos, Glyph::new('&', Rgb::WHITE), true);
        assert!(!statue.is_attackable());

        let mut orc = Actor::new("orc", pos, Glyph::new('o', Rgb::DESATURATED_GREEN), true)
            .with_combat(Combat::new(1, 0, 3, DeathTransition::Monster));
        assert!(orc.is_attackable());

        orc.combat.as_mut().unwrap().take_damage(5);
        assert!(!orc.is_attackable());
        assert!(!orc.is_alive());
    }
}
