//! # Input Module
//!
//! Player intents and the sources that produce them.
//!
//! The core only ever sees [`Intent`] values pulled from an
//! [`InputSource`]. [`MacroquadInput`] reads the keyboard; [`ScriptedInput`]
//! replays a fixed sequence for headless runs and tests.

use crate::game::Direction;
use macroquad::prelude::{is_key_down, is_key_pressed, KeyCode};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// What the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Switch between windowed and fullscreen; never touches the world
    ToggleFullscreen,
    /// Leave the game, whatever its state
    Exit,
    /// Nothing pressed
    None,
}

impl Intent {
    /// The direction of a movement intent.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::{Direction, Intent};
    ///
    /// assert_eq!(Intent::MoveLeft.direction(), Some(Direction::West));
    /// assert_eq!(Intent::Exit.direction(), None);
    /// ```
    pub fn direction(self) -> Option<Direction> {
        match self {
            Intent::MoveUp => Some(Direction::North),
            Intent::MoveDown => Some(Direction::South),
            Intent::MoveLeft => Some(Direction::West),
            Intent::MoveRight => Some(Direction::East),
            Intent::ToggleFullscreen | Intent::Exit | Intent::None => None,
        }
    }
}

/// Anything that can hand the turn engine its next intent.
pub trait InputSource {
    /// Returns the next intent. A blocking source waits for one; a
    /// non-blocking source may answer [`Intent::None`].
    fn poll_intent(&mut self, blocking: bool) -> Intent;
}

/// Keyboard input read through macroquad.
///
/// Macroquad delivers key presses once per frame, so this source never
/// blocks: it reports the key pressed during the current frame, or
/// [`Intent::None`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MacroquadInput;

impl MacroquadInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for MacroquadInput {
    fn poll_intent(&mut self, _blocking: bool) -> Intent {
        if is_key_pressed(KeyCode::Escape) {
            return Intent::Exit;
        }

        let alt = is_key_down(KeyCode::LeftAlt) || is_key_down(KeyCode::RightAlt);
        if alt && is_key_pressed(KeyCode::Enter) {
            return Intent::ToggleFullscreen;
        }

        if is_key_pressed(KeyCode::Up) {
            Intent::MoveUp
        } else if is_key_pressed(KeyCode::Down) {
            Intent::MoveDown
        } else if is_key_pressed(KeyCode::Left) {
            Intent::MoveLeft
        } else if is_key_pressed(KeyCode::Right) {
            Intent::MoveRight
        } else {
            Intent::None
        }
    }
}

/// Replays a fixed list of intents, then asks to exit.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<Intent>,
}

impl ScriptedInput {
    /// Creates a source that yields `intents` in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::{InputSource, Intent, ScriptedInput};
    ///
    /// let mut input = ScriptedInput::new([Intent::MoveUp]);
    /// assert_eq!(input.poll_intent(true), Intent::MoveUp);
    /// assert_eq!(input.poll_intent(true), Intent::Exit);
    /// ```
    pub fn new(intents: impl IntoIterator<Item = Intent>) -> Self {
        Self {
            queue: intents.into_iter().collect(),
        }
    }

    /// Appends an intent to the end of the script.
    pub fn push(&mut self, intent: Intent) {
        self.queue.push_back(intent);
    }

    /// Intents not yet consumed.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_intent(&mut self, _blocking: bool) -> Intent {
        self.queue.pop_front().unwrap_or(Intent::Exit)
    }
}
