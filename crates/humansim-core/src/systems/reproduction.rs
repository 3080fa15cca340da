//! Reproduction - mate selection and births

use hecs::{Entity, World};
use rand::Rng;

use super::agent::Agent;
use super::movement::move_towards;
use super::targeting::{nearest_matching, position_of};
use crate::components::{Bounds, Human, LifeState, Vec2};
use crate::constants::{lifecycle, reach};

/// A child to be spawned by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Birth {
    pub parent: Entity,
    pub mate: Entity,
    pub position: Vec2,
    pub generation: u32,
}

/// Another living, awake human of the opposite gender
fn is_eligible_mate(agent: &Agent, world: &World, candidate: Entity, human: &Human) -> bool {
    candidate != agent.entity
        && human.gender == agent.human.gender.opposite()
        && world
            .get::<&LifeState>(candidate)
            .map(|state| state.is_awake())
            .unwrap_or(false)
}

/// Approach the held mate and reproduce once within reach.
///
/// The held mate is dropped if it no longer qualifies and the nearest eligible
/// human is chosen instead. On success only this agent's cooldown restarts;
/// the mate's own cooldown is left alone.
pub fn seek_mate(
    agent: &mut Agent,
    world: &World,
    now_ms: f64,
    bounds: &Bounds,
    rng: &mut impl Rng,
) -> Option<Birth> {
    let held = agent.targets.mate.filter(|&mate| {
        world
            .get::<&Human>(mate)
            .map(|human| is_eligible_mate(agent, world, mate, &human))
            .unwrap_or(false)
    });

    agent.targets.mate = held.or_else(|| {
        nearest_matching::<Human>(world, agent.position, |entity, human| {
            is_eligible_mate(agent, world, entity, human)
        })
    });

    let mate = agent.targets.mate?;
    let target = position_of(world, mate)?;
    move_towards(&mut agent.position, &mut agent.velocity, target);

    if agent.position.distance(&target) >= reach::MATE || !agent.human.can_reproduce_at(now_ms) {
        return None;
    }

    let mate_generation = world
        .get::<&Human>(mate)
        .map(|h| h.generation)
        .unwrap_or(agent.human.generation);

    let jitter = lifecycle::BIRTH_JITTER;
    let offset = Vec2::new(
        rng.gen_range(-jitter..=jitter) as f32,
        rng.gen_range(-jitter..=jitter) as f32,
    );

    agent.human.last_reproduction_ms = now_ms;
    agent.targets.mate = None;

    Some(Birth {
        parent: agent.entity,
        mate,
        position: bounds.clamp(agent.position + offset),
        generation: agent.human.generation.max(mate_generation) + 1,
    })
}
