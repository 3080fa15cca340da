//! Read-only views of the world for presentation and reporting

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use crate::components::*;

/// One human as seen from outside the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanView {
    /// Stable for the lifetime of the human
    pub id: u64,
    pub position: Vec2,
    pub needs: Needs,
    pub alive: bool,
    pub asleep: bool,
    pub age: u32,
    pub death_age: u32,
    pub generation: u32,
    pub gender: Gender,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuddleView {
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
}

/// Full picture of the world after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub elapsed_ms: f64,
    pub bounds: Bounds,
    pub humans: Vec<HumanView>,
    pub puddles: Vec<PuddleView>,
    pub plants: Vec<Vec2>,
    pub animals: Vec<Vec2>,
}

pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

impl WorldSnapshot {
    /// Humans are listed in roster order
    pub fn capture(
        world: &World,
        roster: &[Entity],
        tick: u64,
        elapsed_ms: f64,
        bounds: Bounds,
    ) -> Self {
        let humans = roster
            .iter()
            .filter_map(|&entity| {
                let mut query = world
                    .query_one::<(&Position, &Needs, &LifeState, &Human)>(entity)
                    .ok()?;
                let (position, needs, state, human) = query.get()?;
                Some(HumanView {
                    id: entity_id(entity),
                    position: position.0,
                    needs: *needs,
                    alive: state.is_alive(),
                    asleep: state.is_asleep(),
                    age: human.age,
                    death_age: human.death_age,
                    generation: human.generation,
                    gender: human.gender,
                })
            })
            .collect();

        let puddles = world
            .query::<(&Puddle, &Position)>()
            .iter()
            .map(|(_, (puddle, position))| PuddleView {
                position: position.0,
                width: puddle.width,
                height: puddle.height,
            })
            .collect();

        let plants = world
            .query::<(&Plant, &Position)>()
            .iter()
            .map(|(_, (_, position))| position.0)
            .collect();

        let animals = world
            .query::<(&Animal, &Position)>()
            .iter()
            .map(|(_, (_, position))| position.0)
            .collect();

        Self {
            tick,
            elapsed_ms,
            bounds,
            humans,
            puddles,
            plants,
            animals,
        }
    }
}

/// Aggregate population figures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub humans: usize,
    pub asleep: usize,
    pub puddles: usize,
    pub plants: usize,
    pub animals: usize,
    pub max_generation: u32,
    pub oldest_age: u32,
    pub average_water: f32,
    pub average_hunger: f32,
    pub average_energy: f32,
    pub extinct: bool,
}

impl PopulationStats {
    pub fn collect(world: &World) -> Self {
        let mut stats = Self::default();
        let (mut water, mut hunger, mut energy) = (0.0, 0.0, 0.0);

        for (_, (human, needs, state)) in world.query::<(&Human, &Needs, &LifeState)>().iter() {
            if !state.is_alive() {
                continue;
            }
            stats.humans += 1;
            if state.is_asleep() {
                stats.asleep += 1;
            }
            stats.max_generation = stats.max_generation.max(human.generation);
            stats.oldest_age = stats.oldest_age.max(human.age);
            water += needs.water;
            hunger += needs.hunger;
            energy += needs.energy;
        }

        if stats.humans > 0 {
            let n = stats.humans as f32;
            stats.average_water = water / n;
            stats.average_hunger = hunger / n;
            stats.average_energy = energy / n;
        }

        stats.puddles = world.query::<&Puddle>().iter().count();
        stats.plants = world.query::<&Plant>().iter().count();
        stats.animals = world.query::<&Animal>().iter().count();
        stats.extinct = stats.humans == 0;
        stats
    }
}

/// What happened during one engine update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub elapsed_ms: f64,
    pub births: u32,
    pub deaths: Vec<DeathCause>,
    pub drinks: u32,
    pub animals_eaten: u32,
    pub plants_eaten: u32,
    pub fell_asleep: u32,
    pub woke: u32,
    /// Every living human aged a year this tick
    pub aged: bool,
    /// Fresh plants and animals were added this tick
    pub respawned: bool,
}
