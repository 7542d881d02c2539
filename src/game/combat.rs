//! # Combat Resolution
//!
//! Melee attacks between actors carrying a [`Combat`](crate::Combat)
//! capability, and the death transitions they trigger.

use crate::game::{ActorId, DeathTransition, GameEvent, GameStatus, Glyph, WorldState};
use crate::{GloomError, GloomResult};

/// Resolves `attacker` hitting `defender`.
///
/// Damage is `attacker.power - defender.defense`. Positive damage is
/// subtracted from the defender's hit points; anything else leaves them
/// untouched and reports an attack with no effect. A hit that first takes
/// the defender to zero or below fires its death transition, exactly once.
///
/// # Errors
///
/// Returns [`GloomError::InvalidState`] if either actor is missing or lacks
/// a combat capability.
pub fn attack(world: &mut WorldState, attacker: ActorId, defender: ActorId) -> GloomResult<Vec<GameEvent>> {
    let (attacker_name, power) = {
        let actor = world.actors.require(attacker)?;
        let combat = actor.combat.as_ref().ok_or_else(|| {
            GloomError::InvalidState(format!("{} cannot attack without combat stats", actor.name))
        })?;
        (actor.name.clone(), combat.power)
    };

    let target = world.actors.require_mut(defender)?;
    let defender_name = target.name.clone();
    let combat = target.combat.as_mut().ok_or_else(|| {
        GloomError::InvalidState(format!("{} cannot be attacked", defender_name))
    })?;

    let damage = power - combat.defense;
    if damage <= 0 {
        return Ok(vec![GameEvent::AttackNoEffect {
            attacker: attacker_name,
            defender: defender_name,
        }]);
    }

    let crossed = combat.take_damage(damage);
    let death = combat.death;
    let mut events = vec![GameEvent::Attacked {
        attacker_id: attacker,
        attacker: attacker_name,
        defender_id: defender,
        defender: defender_name,
        damage,
    }];

    if crossed {
        events.push(apply_death(world, defender, death)?);
    }

    Ok(events)
}

/// Runs a death transition on `id`. Callers guarantee it runs once.
fn apply_death(world: &mut WorldState, id: ActorId, death: DeathTransition) -> GloomResult<GameEvent> {
    let actor = world.actors.require_mut(id)?;
    let name = actor.name.clone();
    actor.glyph = Glyph::CORPSE;

    match death {
        DeathTransition::Player => {
            world.status = GameStatus::Dead;
            log::info!("{} died; game over", name);
            Ok(GameEvent::Died {
                name,
                was_player: true,
            })
        }
        DeathTransition::Monster => {
            actor.blocks_movement = false;
            actor.ai = None;
            actor.name = format!("remains of {}", name);
            log::debug!("{} died at ({}, {})", name, actor.position.x, actor.position.y);
            Ok(GameEvent::Died {
                name,
                was_player: false,
            })
        }
    }
}
