//! # Actor Registry
//!
//! The ordered collection of every actor on the level.
//!
//! Registry order is significant: AI turns run in it. Actors are appended
//! during generation and never removed; dead actors stay as corpses.

use crate::game::{Actor, Position};
use crate::{GloomError, GloomResult};
use serde::{Deserialize, Serialize};

/// Stable index of an actor in its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub usize);

/// Ordered actor storage with a known player slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorRegistry {
    actors: Vec<Actor>,
    player: ActorId,
}

impl ActorRegistry {
    /// Creates a registry holding only the player.
    pub fn new(player: Actor) -> Self {
        Self {
            actors: vec![player],
            player: ActorId(0),
        }
    }

    /// Appends an actor and returns its id.
    pub fn push(&mut self, actor: Actor) -> ActorId {
        self.actors.push(actor);
        ActorId(self.actors.len() - 1)
    }

    /// Number of actors, the player included.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Always false: the player is always present.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// The player's id.
    pub fn player_id(&self) -> ActorId {
        self.player
    }

    /// The player actor.
    pub fn player(&self) -> &Actor {
        &self.actors[self.player.0]
    }

    /// The player actor, mutably.
    pub fn player_mut(&mut self) -> &mut Actor {
        &mut self.actors[self.player.0]
    }

    /// Gets an actor by id.
    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.0)
    }

    /// Gets an actor by id mutably.
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id.0)
    }

    /// Gets an actor by id, reporting a missing id as an error.
    pub fn require(&self, id: ActorId) -> GloomResult<&Actor> {
        self.get(id)
            .ok_or_else(|| GloomError::InvalidState(format!("Actor {:?} not found", id)))
    }

    /// Gets an actor by id mutably, reporting a missing id as an error.
    pub fn require_mut(&mut self, id: ActorId) -> GloomResult<&mut Actor> {
        self.get_mut(id)
            .ok_or_else(|| GloomError::InvalidState(format!("Actor {:?} not found", id)))
    }

    /// Iterates over actors in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.actors
            .iter()
            .enumerate()
            .map(|(index, actor)| (ActorId(index), actor))
    }

    /// The first movement-blocking actor standing on `pos`.
    pub fn blocking_actor_at(&self, pos: Position) -> Option<ActorId> {
        self.iter()
            .find(|(_, actor)| actor.blocks_movement && actor.position == pos)
            .map(|(id, _)| id)
    }

    /// The first attackable actor standing on `pos`.
    pub fn attackable_actor_at(&self, pos: Position) -> Option<ActorId> {
        self.iter()
            .find(|(_, actor)| actor.is_attackable() && actor.position == pos)
            .map(|(id, _)| id)
    }

    /// Ids of actors carrying an AI capability, in registry order.
    ///
    /// Returned as a snapshot so callers can mutate the registry while
    /// walking it.
    pub fn ai_actor_ids(&self) -> Vec<ActorId> {
        self.iter()
            .filter(|(_, actor)| actor.ai.is_some())
            .map(|(id, _)| id)
            .collect()
    }

    /// Actors in the order they should be drawn: non-blocking actors such
    /// as corpses first, then blocking actors, then the player on top.
    pub fn draw_order(&self) -> Vec<&Actor> {
        let (blocking, passive): (Vec<(ActorId, &Actor)>, Vec<(ActorId, &Actor)>) = self
            .iter()
            .filter(|(id, _)| *id != self.player)
            .partition(|(_, actor)| actor.blocks_movement);

        passive
            .into_iter()
            .chain(blocking)
            .map(|(_, actor)| actor)
            .chain(std::iter::once(self.player()))
            .collect()
    }
}
