//! Fixed behavior constants: decay rates, thresholds, radii and timers.
//!
//! These are design parameters of the simulation, not configuration.
//! Tick-based values assume the fixed 60 Hz step.

/// Fixed simulation step length (60 steps per second)
pub const FRAME_MS: f64 = 1000.0 / 60.0;

pub mod needs {
    /// Upper bound of every need
    pub const MAX: f32 = 100.0;
    pub const MIN: f32 = 0.0;

    /// Per-tick decay, applied awake or asleep
    pub const WATER_DECAY: f32 = 0.05;
    pub const HUNGER_DECAY: f32 = 0.03;
    /// Per-tick decay, applied only while awake
    pub const ENERGY_DECAY: f32 = 0.02;

    /// Below this, water is the top priority
    pub const THIRST_THRESHOLD: f32 = 80.0;
    /// Below this (and not thirsty), food is the priority
    pub const HUNGER_THRESHOLD: f32 = 50.0;
    /// Below this (and fed and watered), the agent sleeps
    pub const TIRED_THRESHOLD: f32 = 50.0;

    /// Hunger restored by eating a plant (capped at MAX)
    pub const PLANT_NOURISHMENT: f32 = 20.0;
}

pub mod sleep {
    /// Ticks an agent stays asleep before waking with full energy
    pub const DURATION_TICKS: u32 = 600;
}

pub mod movement {
    pub const HUMAN_SPEED: f32 = 1.0;
    /// Animal speed under the aging lifecycle
    pub const ANIMAL_SPEED: f32 = 0.6;
    /// Animal speed under the basic lifecycle
    pub const BASIC_ANIMAL_SPEED: f32 = 0.8;
    /// Humans pick a new roaming direction this often
    pub const ROAM_DIRECTION_TICKS: u32 = 60;
    /// Per-axis range of a random human velocity
    pub const HUMAN_VELOCITY_RANGE: f32 = 1.0;
    /// Per-axis range of a random animal velocity
    pub const ANIMAL_VELOCITY_RANGE: f32 = 0.5;
}

pub mod reach {
    /// Distance at which a puddle can be drunk from
    pub const DRINK: f32 = 20.0;
    /// Distance at which an animal or plant can be eaten
    pub const EAT: f32 = 10.0;
    /// Distance at which mates are close enough to reproduce
    pub const MATE: f32 = 10.0;
}

pub mod lifecycle {
    /// Simulated milliseconds between age increments
    pub const AGE_INTERVAL_MS: f64 = 2000.0;
    /// Death age is drawn uniformly from this inclusive range
    pub const DEATH_AGE_MIN: u32 = 70;
    pub const DEATH_AGE_MAX: u32 = 100;
    /// Agents must be strictly older than this to reproduce
    pub const ADULT_AGE: u32 = 25;
    /// Minimum simulated milliseconds between two reproductions of one agent
    pub const REPRODUCTION_COOLDOWN_MS: f64 = 45_000.0;
    /// Children spawn within this many units of the parent on each axis
    pub const BIRTH_JITTER: i32 = 20;
    pub const FIRST_GENERATION: u32 = 1;
}

pub mod respawn {
    /// Simulated milliseconds between resource refills
    pub const INTERVAL_MS: f64 = 60_000.0;
}

pub mod puddle {
    /// Footprint of puddles generated by the aging lifecycle
    pub const WIDTH: f32 = 60.0;
    pub const HEIGHT: f32 = 30.0;
    /// Basic lifecycle puddles keep this far from the edges and are sized
    /// between this and this plus `SIZE_SPREAD`
    pub const INSET: f32 = 40.0;
    pub const SIZE_SPREAD: f32 = 40.0;
}

pub mod plant {
    /// Basic lifecycle plants keep this far from the edges
    pub const INSET: f32 = 10.0;
}
