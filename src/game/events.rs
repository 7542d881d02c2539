//! # Game Events
//!
//! Narration produced while resolving a turn.

use crate::game::{ActorId, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Something that happened during a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An actor stepped to a new tile
    Moved {
        actor: ActorId,
        name: String,
        from: Position,
        to: Position,
    },
    /// An attack dealt damage
    Attacked {
        attacker_id: ActorId,
        attacker: String,
        defender_id: ActorId,
        defender: String,
        damage: i32,
    },
    /// An attack failed to get through the defender's defense
    AttackNoEffect { attacker: String, defender: String },
    /// An actor's death transition fired
    Died { name: String, was_player: bool },
}

impl GameEvent {
    /// Text for the message log. Movement is not narrated.
    pub fn message(&self) -> Option<String> {
        match self {
            GameEvent::Moved { .. } => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Moved { name, from, to, .. } => {
                write!(f, "{} moves from ({}, {}) to ({}, {})", name, from.x, from.y, to.x, to.y)
            }
            GameEvent::Attacked {
                attacker,
                defender,
                damage,
                ..
            } => write!(f, "{} attacks {} for {} hit points.", attacker, defender, damage),
            GameEvent::AttackNoEffect { attacker, defender } => {
                write!(f, "{} attacks {} but it has no effect!", attacker, defender)
            }
            GameEvent::Died {
                was_player: true, ..
            } => write!(f, "You died!"),
            GameEvent::Died { name, .. } => write!(f, "{} is dead!", name),
        }
    }
}

/// Running totals for the current level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Turns in which the player moved or attacked
    pub turns_elapsed: u64,
    /// Successful steps by the player
    pub steps_taken: u64,
    /// Damage the player dealt
    pub damage_dealt: u64,
    /// Damage the player took
    pub damage_taken: u64,
    /// Monsters whose death transition fired
    pub monsters_slain: u32,
}

impl GameStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a game event. `player` identifies whose
    /// steps and damage are counted.
    pub fn update_from_event(&mut self, event: &GameEvent, player: ActorId) {
        match event {
            GameEvent::Moved { actor, .. } if *actor == player => {
                self.steps_taken += 1;
            }
            GameEvent::Attacked {
                attacker_id,
                defender_id,
                damage,
                ..
            } => {
                if *attacker_id == player {
                    self.damage_dealt += *damage as u64;
                }
                if *defender_id == player {
                    self.damage_taken += *damage as u64;
                }
            }
            GameEvent::Died {
                was_player: false, ..
            } => {
                self.monsters_slain += 1;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let hit = GameEvent::Attacked {
            attacker_id: ActorId(1),
            attacker: "orc".to_string(),
            defender_id: ActorId(0),
            defender: "Hero".to_string(),
            damage: 2,
        };
        assert_eq!(hit.message().unwrap(), "orc attacks Hero for 2 hit points.");

        let miss = GameEvent::AttackNoEffect {
            attacker: "Hero".to_string(),
            defender: "troll".to_string(),
        };
        assert_eq!(miss.message().unwrap(), "Hero attacks troll but it has no effect!");

        let step = GameEvent::Moved {
            actor: ActorId(0),
            name: "Hero".to_string(),
            from: Position::new(0, 0),
            to: Position::new(1, 0),
        };
        assert!(step.message().is_none());
    }

    #[test]
    fn test_statistics_update() {
        let player = ActorId(0);
        let mut stats = GameStatistics::new();
        stats.update_from_event(
            &GameEvent::Moved {
                actor: player,
                name: "Hero".to_string(),
                from: Position::new(0, 0),
                to: Position::new(1, 0),
            },
            player,
        );
        stats.update_from_event(
            &GameEvent::Attacked {
                attacker_id: player,
                attacker: "Hero".to_string(),
                defender_id: ActorId(1),
                defender: "orc".to_string(),
                damage: 3,
            },
            player,
        );
        stats.update_from_event(
            &GameEvent::Attacked {
                attacker_id: ActorId(1),
                attacker: "orc".to_string(),
                defender_id: player,
                defender: "Hero".to_string(),
                damage: 1,
            },
            player,
        );
        stats.update_from_event(
            &GameEvent::Died {
                name: "orc".to_string(),
                was_player: false,
            },
            player,
        );

        assert_eq!(stats.steps_taken, 1);
        assert_eq!(stats.damage_dealt, 3);
        assert_eq!(stats.damage_taken, 1);
        assert_eq!(stats.monsters_slain, 1);
    }

    #[test]
    fn test_statistics_ignore_monsters_sharing_the_player_name() {
        let player = ActorId(0);
        let twin = ActorId(2);
        let mut stats = GameStatistics::new();
        stats.update_from_event(
            &GameEvent::Moved {
                actor: twin,
                name: "orc".to_string(),
                from: Position::new(4, 4),
                to: Position::new(4, 3),
            },
            player,
        );
        stats.update_from_event(
            &GameEvent::Attacked {
                attacker_id: twin,
                attacker: "orc".to_string(),
                defender_id: player,
                defender: "orc".to_string(),
                damage: 2,
            },
            player,
        );

        assert_eq!(stats.steps_taken, 0);
        assert_eq!(stats.damage_dealt, 0);
        assert_eq!(stats.damage_taken, 2);
    }
}
