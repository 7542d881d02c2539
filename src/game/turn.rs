//! # Turn Engine
//!
//! Drives the game one intent at a time:
//!
//! ```text
//! AwaitingInput -> ResolvingPlayerAction -> ResolvingAi -> AwaitingInput
//!                          |                     |
//!                          +------> GameOver <---+
//! ```
//!
//! The player's action resolves completely, including any death it
//! causes, before any monster acts. Monsters only act after a real move or
//! attack; blocked bumps and interface toggles cost no time.

use crate::game::{
    combat, AiStrategy, Direction, GameEvent, GameStatus, PlayerAction, Position, WorldState,
};
use crate::input::{InputSource, Intent};
use crate::rendering::{clear_actors, render_frame, Renderer};
use crate::GloomResult;

/// Where the engine is in the turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingInput,
    ResolvingPlayerAction,
    ResolvingAi,
    GameOver,
}

/// Owns the world and advances it in response to intents.
pub struct TurnEngine {
    world: WorldState,
    phase: TurnPhase,
}

impl TurnEngine {
    /// Takes ownership of a world and computes the initial field of view.
    pub fn new(mut world: WorldState) -> Self {
        world.refresh_visibility();
        let phase = if world.is_game_over() {
            TurnPhase::GameOver
        } else {
            TurnPhase::AwaitingInput
        };
        Self { world, phase }
    }

    /// The world being played.
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// The world being played, mutably.
    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    /// Gives the world back, ending the engine.
    pub fn into_world(self) -> WorldState {
        self.world
    }

    /// The current phase.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Resolves one intent.
    ///
    /// `Exit` is honoured first and unconditionally. `ToggleFullscreen` is
    /// forwarded to the renderer. Movement is ignored once the player is
    /// dead.
    pub fn handle_intent(&mut self, intent: Intent, renderer: &mut dyn Renderer) -> GloomResult<PlayerAction> {
        let action = match intent {
            Intent::Exit => PlayerAction::Exit,
            Intent::ToggleFullscreen => {
                renderer.toggle_fullscreen();
                PlayerAction::NoAction
            }
            movement => match movement.direction() {
                Some(direction) => self.player_turn(direction)?,
                None => PlayerAction::NoAction,
            },
        };

        self.world.last_action = Some(action);
        Ok(action)
    }

    /// Runs the blocking loop: draw, wait for an intent, resolve it, until
    /// the input source asks to exit.
    pub fn run(&mut self, input: &mut dyn InputSource, renderer: &mut dyn Renderer) -> GloomResult<()> {
        loop {
            render_frame(&self.world, renderer);
            clear_actors(&self.world, renderer);

            let intent = input.poll_intent(true);
            if self.handle_intent(intent, renderer)? == PlayerAction::Exit {
                log::info!("Exit requested after {} turns", self.world.statistics.turns_elapsed);
                return Ok(());
            }
        }
    }

    /// Resolves a movement intent and, if it took time, the AI phase.
    fn player_turn(&mut self, direction: Direction) -> GloomResult<PlayerAction> {
        if self.phase == TurnPhase::GameOver || self.world.status == GameStatus::Dead {
            return Ok(PlayerAction::NoAction);
        }

        self.enter(TurnPhase::ResolvingPlayerAction);
        let action = self.move_or_attack(direction.to_delta())?;
        self.world.refresh_visibility();

        if action != PlayerAction::NoAction && !self.check_game_over() {
            self.world.statistics.turns_elapsed += 1;
            self.enter(TurnPhase::ResolvingAi);
            self.run_ai()?;
        }

        if !self.check_game_over() {
            self.enter(TurnPhase::AwaitingInput);
        }
        Ok(action)
    }

    /// Attacks whatever attackable actor stands at the destination, or
    /// steps there if it is free.
    fn move_or_attack(&mut self, delta: Position) -> GloomResult<PlayerAction> {
        let player = self.world.actors.player_id();
        let destination = self.world.player_position() + delta;

        if let Some(target) = self.world.actors.attackable_actor_at(destination) {
            let events = combat::attack(&mut self.world, player, target)?;
            self.world.record_events(&events);
            return Ok(PlayerAction::Attacked);
        }

        match self.world.move_actor(player, delta)? {
            Some(event) => {
                self.world.visibility_dirty = true;
                self.world.record_events(&[event]);
                Ok(PlayerAction::Moved)
            }
            None => Ok(PlayerAction::NoAction),
        }
    }

    /// Gives every AI-carrying actor one turn, in registry order.
    fn run_ai(&mut self) -> GloomResult<()> {
        for id in self.world.actors.ai_actor_ids() {
            // A monster killed earlier in this phase has lost its AI.
            let Some(ai) = self.world.actors.get(id).and_then(|actor| actor.ai) else {
                continue;
            };
            let events: Vec<GameEvent> = ai.take_turn(id, &mut self.world)?;
            self.world.record_events(&events);
        }
        Ok(())
    }

    /// Moves to `GameOver` if the player has died. Returns whether it did.
    fn check_game_over(&mut self) -> bool {
        if self.world.is_game_over() {
            self.enter(TurnPhase::GameOver);
            return true;
        }
        false
    }

    fn enter(&mut self, phase: TurnPhase) {
        if self.phase != phase {
            log::trace!("Turn phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }
}
