//! # Encounter Generation
//!
//! Monster archetypes, the weighted table they are drawn from, and
//! per-room placement.

use crate::game::{Actor, Ai, Combat, DeathTransition, Glyph, Position, Rgb};
use crate::generation::Rect;
use crate::{GloomError, GloomResult};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A kind of monster and how often it appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterArchetype {
    pub name: String,
    pub glyph: Glyph,
    pub max_hp: i32,
    pub defense: i32,
    pub power: i32,
    /// Relative selection weight
    pub weight: u32,
}

impl MonsterArchetype {
    /// Builds a live monster of this kind at `position`.
    pub fn spawn(&self, position: Position) -> Actor {
        Actor::new(self.name.clone(), position, self.glyph, true)
            .with_combat(Combat::new(
                self.max_hp,
                self.defense,
                self.power,
                DeathTransition::Monster,
            ))
            .with_ai(Ai::chase_and_melee())
    }
}

/// The classic pairing: mostly orcs, sometimes a troll.
pub fn default_monster_table() -> Vec<MonsterArchetype> {
    vec![
        MonsterArchetype {
            name: "orc".to_string(),
            glyph: Glyph::new('o', Rgb::DESATURATED_GREEN),
            max_hp: 10,
            defense: 0,
            power: 3,
            weight: 80,
        },
        MonsterArchetype {
            name: "troll".to_string(),
            glyph: Glyph::new('T', Rgb::DARKER_GREEN),
            max_hp: 16,
            defense: 1,
            power: 4,
            weight: 20,
        },
    ]
}

/// A weighted table of archetypes.
#[derive(Debug, Clone)]
pub struct EncounterTable {
    archetypes: Vec<MonsterArchetype>,
    weights: WeightedIndex<u32>,
}

impl EncounterTable {
    /// Builds a table.
    ///
    /// # Errors
    ///
    /// Returns [`GloomError::InvalidConfig`] for an empty table, a table
    /// whose weights are all zero, or an archetype without hit points.
    pub fn new(archetypes: Vec<MonsterArchetype>) -> GloomResult<Self> {
        if let Some(bad) = archetypes.iter().find(|a| a.max_hp <= 0) {
            return Err(GloomError::InvalidConfig(format!(
                "monster '{}' needs positive max_hp",
                bad.name
            )));
        }

        let weights = WeightedIndex::new(archetypes.iter().map(|a| a.weight)).map_err(|e| {
            GloomError::InvalidConfig(format!("invalid monster weights: {}", e))
        })?;

        Ok(Self {
            archetypes,
            weights,
        })
    }

    /// The table built from [`default_monster_table`].
    pub fn standard() -> GloomResult<Self> {
        Self::new(default_monster_table())
    }

    /// The archetypes, in table order.
    pub fn archetypes(&self) -> &[MonsterArchetype] {
        &self.archetypes
    }

    /// Draws one archetype by weight.
    pub fn choose(&self, rng: &mut StdRng) -> &MonsterArchetype {
        &self.archetypes[self.weights.sample(rng)]
    }

    /// Places up to `max_monsters` monsters at random interior cells of
    /// `room`.
    ///
    /// A draw that lands on `spawn`, or on a cell already holding a
    /// blocking actor in `placed` or in this batch, is skipped rather than
    /// retried.
    pub fn populate_room(
        &self,
        room: &Rect,
        max_monsters: u32,
        spawn: Position,
        placed: &[Actor],
        rng: &mut StdRng,
    ) -> Vec<Actor> {
        let count = rng.gen_range(0..=max_monsters);
        let mut monsters: Vec<Actor> = Vec::new();

        for _ in 0..count {
            let pos = Position::new(
                rng.gen_range(room.x1 + 1..=room.x2 - 1),
                rng.gen_range(room.y1 + 1..=room.y2 - 1),
            );

            let occupied = pos == spawn
                || placed
                    .iter()
                    .chain(monsters.iter())
                    .any(|actor| actor.blocks_movement && actor.position == pos);
            if occupied {
                log::trace!("Skipping monster draw at occupied ({}, {})", pos.x, pos.y);
                continue;
            }

            monsters.push(self.choose(rng).spawn(pos));
        }

        monsters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_table_rejects_bad_weights() {
        assert!(EncounterTable::new(Vec::new()).is_err());

        let mut zeroed = default_monster_table();
        for archetype in &mut zeroed {
            archetype.weight = 0;
        }
        assert!(matches!(
            EncounterTable::new(zeroed),
            Err(GloomError::InvalidConfig(_))
        ));

        let mut hollow = default_monster_table();
        hollow[1].max_hp = 0;
        assert!(EncounterTable::new(hollow).is_err());
    }

    #[test]
    fn test_weighted_choice_favours_orcs() {
        let table = EncounterTable::standard().unwrap();
        let mut rng = StdRng::seed_from_u64(99);

        let orcs = (0..2000).filter(|_| table.choose(&mut rng).name == "orc").count();
        // 80% expected; allow generous slack.
        assert!((1450..=1750).contains(&orcs), "got {} orcs", orcs);
    }

    #[test]
    fn test_single_weight_always_chosen() {
        let mut archetypes = default_monster_table();
        archetypes[0].weight = 0;
        let table = EncounterTable::new(archetypes).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        assert!((0..50).all(|_| table.choose(&mut rng).name == "troll"));
    }

    #[test]
    fn test_spawned_monster_has_capabilities() {
        let troll = default_monster_table()[1].spawn(Position::new(3, 4));
        assert_eq!(troll.glyph.ch, 'T');
        assert!(troll.blocks_movement);
        assert!(troll.ai.is_some());

        let combat = troll.combat.unwrap();
        assert_eq!((combat.hp, combat.max_hp, combat.defense, combat.power), (16, 16, 1, 4));
        assert_eq!(combat.death, DeathTransition::Monster);
    }

    #[test]
    fn test_populate_room_stays_inside_and_avoids_spawn() {
        let table = EncounterTable::standard().unwrap();
        let room = Rect::new(10, 10, 4, 4);
        let spawn = room.center();

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let monsters = table.populate_room(&room, 3, spawn, &[], &mut rng);

            assert!(monsters.len() <= 3);
            for (i, monster) in monsters.iter().enumerate() {
                assert!(room.contains_interior(monster.position));
                assert_ne!(monster.position, spawn);
                assert!(monsters[..i].iter().all(|m| m.position != monster.position));
            }
        }
    }

    #[test]
    fn test_populate_room_zero_max_places_nothing() {
        let table = EncounterTable::standard().unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let monsters = table.populate_room(&Rect::new(0, 0, 8, 8), 0, Position::new(-1, -1), &[], &mut rng);
        assert!(monsters.is_empty());
    }
}
