//! Behavior system - the per-tick decision loop of a human
//!
//! Each tick a living human first updates its vitals, then (if awake) picks
//! exactly one behavior in strict priority order:
//!
//! 1. thirsty → seek water
//! 2. hungry → seek food
//! 3. tired → fall asleep
//! 4. adult, off cooldown, aging lifecycle → seek a mate
//! 5. otherwise → roam

use hecs::World;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::foraging::{seek_food, seek_water, Meal};
use super::movement::roam;
use super::needs::{update_vitals, VitalsEvent};
use super::reproduction::{seek_mate, Birth};
use crate::components::{Bounds, DeathCause, Human, LifeState, Needs};
use crate::config::Lifecycle;

/// The single action an awake human takes in a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Behavior {
    SeekWater,
    SeekFood,
    Sleep,
    Reproduce,
    Roam,
}

/// Read-only facts about the current tick
#[derive(Debug, Clone, Copy)]
pub struct TurnContext {
    pub now_ms: f64,
    pub bounds: Bounds,
    pub lifecycle: Lifecycle,
}

/// Everything that happened during one human's turn
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TurnOutcome {
    pub behavior: Option<Behavior>,
    pub woke: bool,
    pub drank: bool,
    pub meal: Option<Meal>,
    pub birth: Option<Birth>,
    pub died: Option<DeathCause>,
}

/// Pick the behavior for an awake human
pub fn select_behavior(
    needs: &Needs,
    human: &Human,
    lifecycle: Lifecycle,
    now_ms: f64,
) -> Behavior {
    if needs.is_thirsty() {
        Behavior::SeekWater
    } else if needs.is_hungry() {
        Behavior::SeekFood
    } else if needs.is_tired() {
        Behavior::Sleep
    } else if lifecycle.reproduces() && human.is_adult() && human.can_reproduce_at(now_ms) {
        Behavior::Reproduce
    } else {
        Behavior::Roam
    }
}

/// Run one full turn: vitals, then at most one behavior.
///
/// The world is only read; removals and births are returned in the outcome
/// for the caller to apply.
pub fn run_turn(
    agent: &mut Agent,
    world: &World,
    ctx: &TurnContext,
    rng: &mut impl Rng,
) -> TurnOutcome {
    let mut outcome = TurnOutcome::default();

    match update_vitals(
        &mut agent.needs,
        &mut agent.state,
        &agent.human,
        ctx.lifecycle.ages(),
    ) {
        Some(VitalsEvent::Died(cause)) => {
            outcome.died = Some(cause);
            return outcome;
        }
        Some(VitalsEvent::Woke) => outcome.woke = true,
        None => {}
    }

    if !agent.state.is_awake() {
        return outcome;
    }

    let behavior = select_behavior(&agent.needs, &agent.human, ctx.lifecycle, ctx.now_ms);
    outcome.behavior = Some(behavior);

    match behavior {
        Behavior::SeekWater => outcome.drank = seek_water(agent, world),
        Behavior::SeekFood => outcome.meal = seek_food(agent, world),
        Behavior::Sleep => agent.state = LifeState::Asleep { ticks: 0 },
        Behavior::Reproduce => {
            outcome.birth = seek_mate(agent, world, ctx.now_ms, &ctx.bounds, rng)
        }
        Behavior::Roam => roam(
            &mut agent.position,
            &mut agent.velocity,
            &mut agent.roam,
            &ctx.bounds,
            rng,
        ),
    }

    outcome
}
