//! Agent components: Human, Needs, LifeState, Targets, etc.

use hecs::Entity;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{lifecycle, needs as need, sleep};

/// Identity and lifecycle data of a human agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Human {
    pub gender: Gender,
    pub generation: u32,
    /// Age in years; one year passes every `AGE_INTERVAL_MS`
    pub age: u32,
    /// Age at which this human dies of old age
    pub death_age: u32,
    /// Simulated time of this human's last reproduction
    pub last_reproduction_ms: f64,
}

impl Human {
    /// A fresh human of the given generation with random gender and lifespan
    pub fn random(rng: &mut impl Rng, generation: u32) -> Self {
        Self {
            gender: Gender::random(rng),
            generation,
            age: 0,
            death_age: rng.gen_range(lifecycle::DEATH_AGE_MIN..=lifecycle::DEATH_AGE_MAX),
            last_reproduction_ms: 0.0,
        }
    }

    pub fn is_adult(&self) -> bool {
        self.age > lifecycle::ADULT_AGE
    }

    pub fn is_past_lifespan(&self) -> bool {
        self.age >= self.death_age
    }

    pub fn can_reproduce_at(&self, now_ms: f64) -> bool {
        now_ms - self.last_reproduction_ms >= lifecycle::REPRODUCTION_COOLDOWN_MS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }
}

/// Survival needs - all values 0.0 (depleted) to 100.0 (satisfied)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Needs {
    pub water: f32,
    pub hunger: f32,
    pub energy: f32,
}

impl Default for Needs {
    fn default() -> Self {
        Self::full()
    }
}

impl Needs {
    pub fn full() -> Self {
        Self {
            water: need::MAX,
            hunger: need::MAX,
            energy: need::MAX,
        }
    }

    /// Apply one tick of decay. Energy only drains while awake.
    pub fn decay(&mut self, awake: bool) {
        self.water = clamp(self.water - need::WATER_DECAY);
        self.hunger = clamp(self.hunger - need::HUNGER_DECAY);
        if awake {
            self.energy = clamp(self.energy - need::ENERGY_DECAY);
        }
    }

    /// The first need found at or below zero, in water/hunger/energy order
    pub fn depleted(&self) -> Option<NeedType> {
        [
            (NeedType::Water, self.water),
            (NeedType::Hunger, self.hunger),
            (NeedType::Energy, self.energy),
        ]
        .into_iter()
        .find(|(_, v)| *v <= need::MIN)
        .map(|(t, _)| t)
    }

    pub fn is_thirsty(&self) -> bool {
        self.water < need::THIRST_THRESHOLD
    }

    pub fn is_hungry(&self) -> bool {
        self.hunger < need::HUNGER_THRESHOLD
    }

    pub fn is_tired(&self) -> bool {
        self.energy < need::TIRED_THRESHOLD
    }

    /// Raise a need by `amount`, capped at the maximum
    pub fn satisfy(&mut self, need: NeedType, amount: f32) {
        let value = self.get_mut(need);
        *value = clamp(*value + amount);
    }

    /// Set a need straight to the maximum
    pub fn fill(&mut self, need: NeedType) {
        *self.get_mut(need) = need::MAX;
    }

    fn get_mut(&mut self, need: NeedType) -> &mut f32 {
        match need {
            NeedType::Water => &mut self.water,
            NeedType::Hunger => &mut self.hunger,
            NeedType::Energy => &mut self.energy,
        }
    }
}

fn clamp(value: f32) -> f32 {
    value.clamp(need::MIN, need::MAX)
}

/// Types of needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeedType {
    Water,
    Hunger,
    Energy,
}

/// Why a human died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    Dehydration,
    Starvation,
    Exhaustion,
    OldAge,
}

impl From<NeedType> for DeathCause {
    fn from(need: NeedType) -> Self {
        match need {
            NeedType::Water => DeathCause::Dehydration,
            NeedType::Hunger => DeathCause::Starvation,
            NeedType::Energy => DeathCause::Exhaustion,
        }
    }
}

/// Awake / asleep / dead state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LifeState {
    Awake,
    /// Asleep for `ticks` ticks so far
    Asleep { ticks: u32 },
    Dead(DeathCause),
}

impl Default for LifeState {
    fn default() -> Self {
        LifeState::Awake
    }
}

impl LifeState {
    pub fn is_alive(&self) -> bool {
        !matches!(self, LifeState::Dead(_))
    }

    pub fn is_awake(&self) -> bool {
        matches!(self, LifeState::Awake)
    }

    pub fn is_asleep(&self) -> bool {
        matches!(self, LifeState::Asleep { .. })
    }

    /// Advance the sleep counter. Returns true on the tick the sleeper wakes.
    pub fn tick_sleep(&mut self) -> bool {
        if let LifeState::Asleep { ticks } = self {
            *ticks += 1;
            if *ticks >= sleep::DURATION_TICKS {
                *self = LifeState::Awake;
                return true;
            }
        }
        false
    }
}

/// Cached target references. Each is re-validated against the world every
/// tick since another agent may have consumed the entity in the meantime.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Targets {
    pub puddle: Option<Entity>,
    pub animal: Option<Entity>,
    pub plant: Option<Entity>,
    pub mate: Option<Entity>,
}

/// Ticks since the last random change of roaming direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoamTimer(pub u32);
