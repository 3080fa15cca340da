//! Foraging - seeking water and food

use hecs::{Entity, World};

use super::agent::Agent;
use super::movement::move_towards;
use super::targeting::{nearest_with, position_of, revalidate};
use crate::components::{Animal, NeedType, Plant, Puddle};
use crate::constants::{needs, reach};

/// Something a human ate this tick; the caller removes it from the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meal {
    Animal(Entity),
    Plant(Entity),
}

impl Meal {
    pub fn entity(&self) -> Entity {
        match self {
            Meal::Animal(entity) | Meal::Plant(entity) => *entity,
        }
    }
}

/// Walk to the nearest puddle; drink to full once within reach.
///
/// The nearest puddle is rescanned every tick. Returns true if the agent drank.
pub fn seek_water(agent: &mut Agent, world: &World) -> bool {
    agent.targets.puddle = nearest_with::<Puddle>(world, agent.position);

    let Some(target) = agent.targets.puddle.and_then(|p| position_of(world, p)) else {
        return false;
    };

    move_towards(&mut agent.position, &mut agent.velocity, target);

    if agent.position.distance(&target) < reach::DRINK {
        agent.needs.fill(NeedType::Water);
        agent.targets.puddle = None;
        return true;
    }
    false
}

/// Hunt the held animal, or graze the held plant when no animal is held.
///
/// Targets persist across ticks but are re-validated first; an invalid target
/// is replaced by the nearest animal, falling back to the nearest plant. Eating
/// an animal fills hunger; a plant adds `PLANT_NOURISHMENT`. The eaten entity
/// is returned for removal.
pub fn seek_food(agent: &mut Agent, world: &World) -> Option<Meal> {
    agent.targets.animal = revalidate::<Animal>(world, agent.targets.animal)
        .or_else(|| nearest_with::<Animal>(world, agent.position));

    if let Some(animal) = agent.targets.animal {
        let target = position_of(world, animal)?;
        move_towards(&mut agent.position, &mut agent.velocity, target);

        if agent.position.distance(&target) < reach::EAT {
            agent.needs.fill(NeedType::Hunger);
            agent.targets.animal = None;
            return Some(Meal::Animal(animal));
        }
        return None;
    }

    agent.targets.plant = revalidate::<Plant>(world, agent.targets.plant)
        .or_else(|| nearest_with::<Plant>(world, agent.position));

    let plant = agent.targets.plant?;
    let target = position_of(world, plant)?;
    move_towards(&mut agent.position, &mut agent.velocity, target);

    if agent.position.distance(&target) < reach::EAT {
        agent.needs.satisfy(NeedType::Hunger, needs::PLANT_NOURISHMENT);
        agent.targets.plant = None;
        return Some(Meal::Plant(plant));
    }
    None
}
