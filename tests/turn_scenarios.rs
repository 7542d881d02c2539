//! End-to-end turn scenarios driven through the public API with scripted
//! input and a recording renderer.

use gloom::{
    Actor, ActorId, Ai, ColorCategory, Combat, DeathTransition, FovSettings, GameConfig,
    GameStatus, GeneratedLevel, Glyph, GloomResult, Intent, PlayerAction, PlayerTemplate,
    Position, Renderer, Rgb, ScriptedInput, TileGrid, TurnEngine, TurnPhase, WorldState,
};
use std::collections::HashSet;

#[derive(Default)]
struct RecordingRenderer {
    frames: usize,
    fullscreen: bool,
    drawn: Vec<String>,
    backgrounds: usize,
}

impl Renderer for RecordingRenderer {
    fn draw_actor(&mut self, actor: &Actor, visible: &HashSet<Position>) {
        if visible.contains(&actor.position) {
            self.drawn.push(actor.name.clone());
        }
    }

    fn clear_actor(&mut self, _actor: &Actor) {}

    fn set_tile_background(&mut self, _pos: Position, _category: ColorCategory) {
        self.backgrounds += 1;
    }

    fn present(&mut self) {
        self.frames += 1;
    }

    fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }
}

fn orc(pos: Position) -> Actor {
    Actor::new("orc", pos, Glyph::new('o', Rgb::DESATURATED_GREEN), true)
        .with_combat(Combat::new(10, 0, 3, DeathTransition::Monster))
        .with_ai(Ai::chase_and_melee())
}

/// A walled 12x7 room with the player at (2, 3).
fn arena(monsters: Vec<Actor>) -> TurnEngine {
    let mut grid = TileGrid::new(12, 7);
    for y in 1..6 {
        for x in 1..11 {
            grid.carve(Position::new(x, y)).unwrap();
        }
    }
    let level = GeneratedLevel {
        spawn: Position::new(2, 3),
        grid,
        actors: monsters,
        rooms: Vec::new(),
    };
    TurnEngine::new(WorldState::new(
        level,
        &PlayerTemplate::default(),
        FovSettings::default(),
        11,
    ))
}

#[test]
fn test_scripted_walk_renders_every_frame_and_exits() -> GloomResult<()> {
    let mut engine = arena(Vec::new());
    let mut input = ScriptedInput::new([
        Intent::MoveRight,
        Intent::MoveRight,
        Intent::ToggleFullscreen,
        Intent::MoveDown,
        Intent::None,
    ]);
    let mut renderer = RecordingRenderer::default();

    engine.run(&mut input, &mut renderer)?;

    // One frame per intent, including the final Exit.
    assert_eq!(renderer.frames, 6);
    assert!(renderer.fullscreen);
    assert!(renderer.backgrounds > 0);
    assert_eq!(engine.world().player_position(), Position::new(4, 4));
    assert_eq!(engine.world().statistics.steps_taken, 3);
    assert_eq!(engine.world().statistics.turns_elapsed, 3);
    assert_eq!(engine.world().last_action, Some(PlayerAction::Exit));
    assert!(renderer.drawn.iter().all(|name| name == "Hero"));
    Ok(())
}

#[test]
fn test_exit_wins_even_after_death() -> GloomResult<()> {
    let mut engine = arena(vec![orc(Position::new(3, 3))]);
    engine.world_mut().actors.player_mut().combat.as_mut().unwrap().hp = 1;
    let mut renderer = RecordingRenderer::default();

    // Bumping the orc wounds it; its reply kills the player.
    engine.handle_intent(Intent::MoveRight, &mut renderer)?;
    assert_eq!(engine.world().status, GameStatus::Dead);
    assert_eq!(engine.phase(), TurnPhase::GameOver);
    assert!(engine
        .world()
        .messages
        .iter()
        .any(|line| line == "You died!"));

    let mut input = ScriptedInput::new([Intent::MoveLeft, Intent::MoveLeft, Intent::Exit, Intent::MoveUp]);
    engine.run(&mut input, &mut renderer)?;

    assert_eq!(input.remaining(), 1);
    assert_eq!(engine.world().player_position(), Position::new(2, 3));
    Ok(())
}

#[test]
fn test_monsters_close_in_and_fight() -> GloomResult<()> {
    let mut engine = arena(vec![orc(Position::new(8, 3))]);
    let mut renderer = RecordingRenderer::default();

    // Walk toward the orc until it is adjacent and has started hitting back.
    for _ in 0..4 {
        engine.handle_intent(Intent::MoveRight, &mut renderer)?;
    }

    let world = engine.world();
    let orc = world.actors.get(ActorId(1)).unwrap();
    assert!(orc.position.euclidean_distance(world.player_position()) < 2.0);
    assert!(world.statistics.damage_taken > 0 || world.statistics.damage_dealt > 0);
    Ok(())
}

#[test]
fn test_kill_leaves_walkable_corpse() -> GloomResult<()> {
    let mut weak = orc(Position::new(3, 3));
    weak.combat.as_mut().unwrap().hp = 4;
    let mut engine = arena(vec![weak]);
    let mut renderer = RecordingRenderer::default();

    assert_eq!(engine.handle_intent(Intent::MoveRight, &mut renderer)?, PlayerAction::Attacked);
    assert_eq!(engine.world().statistics.monsters_slain, 1);
    assert!(engine.world().messages.contains(&"orc is dead!".to_string()));

    let corpse = engine.world().actors.get(ActorId(1)).unwrap();
    assert_eq!(corpse.glyph, Glyph::CORPSE);
    assert!(corpse.ai.is_none());

    assert_eq!(engine.handle_intent(Intent::MoveRight, &mut renderer)?, PlayerAction::Moved);
    assert_eq!(engine.world().player_position(), Position::new(3, 3));
    Ok(())
}

#[test]
fn test_generated_world_plays() -> GloomResult<()> {
    let world = WorldState::from_config(&GameConfig::default())?;
    let spawn = world.player_position();
    let mut engine = TurnEngine::new(world);
    let mut renderer = RecordingRenderer::default();

    assert!(engine.world().is_visible(spawn));
    assert!(engine.world().grid.get_tile(spawn).unwrap().is_explored());

    let mut input = ScriptedInput::new(
        [Intent::MoveUp, Intent::MoveLeft, Intent::MoveDown, Intent::MoveRight].repeat(5),
    );
    engine.run(&mut input, &mut renderer)?;

    assert!(renderer.drawn.iter().any(|name| name == "Hero"));
    assert_eq!(renderer.frames, 21);
    Ok(())
}
