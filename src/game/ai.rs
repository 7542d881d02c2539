//! # Monster AI
//!
//! Per-monster turn behaviour, dispatched through the [`AiStrategy`] trait.

use crate::game::{combat, ActorId, Direction, GameEvent, GameStatus, WorldState};
use crate::utils::unit_step_toward;
use crate::GloomResult;
use serde::{Deserialize, Serialize};

/// Behaviour run once per AI phase for the actor that carries it.
pub trait AiStrategy {
    /// Takes one turn for `actor`, returning what happened.
    fn take_turn(&self, actor: ActorId, world: &mut WorldState) -> GloomResult<Vec<GameEvent>>;
}

/// The AI capability attached to an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ai {
    ChaseAndMelee(ChaseAndMelee),
}

impl Ai {
    /// The standard monster behaviour.
    pub fn chase_and_melee() -> Self {
        Ai::ChaseAndMelee(ChaseAndMelee)
    }
}

impl AiStrategy for Ai {
    fn take_turn(&self, actor: ActorId, world: &mut WorldState) -> GloomResult<Vec<GameEvent>> {
        match self {
            Ai::ChaseAndMelee(strategy) => strategy.take_turn(actor, world),
        }
    }
}

/// Walks toward the player while the player can see it, and attacks once
/// adjacent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaseAndMelee;

impl AiStrategy for ChaseAndMelee {
    fn take_turn(&self, actor: ActorId, world: &mut WorldState) -> GloomResult<Vec<GameEvent>> {
        let position = world.actors.require(actor)?.position;
        if !world.is_visible(position) || world.status == GameStatus::Dead {
            return Ok(Vec::new());
        }

        let target = world.player_position();
        if position.euclidean_distance(target) >= 2.0 {
            return match Direction::from_delta(unit_step_toward(position, target)) {
                Some(direction) => Ok(world.move_actor(actor, direction.to_delta())?.into_iter().collect()),
                None => Ok(Vec::new()),
            };
        }

        let player = world.actors.player_id();
        if world.actors.player().is_alive() {
            return combat::attack(world, actor, player);
        }

        Ok(Vec::new())
    }
}
