//! Movement system - steering toward targets, roaming, and animal wandering

use hecs::World;
use rand::Rng;

use crate::components::{Animal, Bounds, Position, RoamTimer, Vec2, Velocity};
use crate::constants::movement;

/// Point the heading at `target` and advance one step.
///
/// The heading becomes the unit direction to the target (kept unchanged when
/// already on it). There is no deceleration, so the mover can overshoot.
pub fn move_towards(position: &mut Vec2, velocity: &mut Velocity, target: Vec2) {
    let offset = target - *position;
    if offset.length() > 0.0 {
        velocity.heading = offset.normalize();
    }
    *position += velocity.step();
}

/// Advance along the current heading, bounce off the world edges, and pick a
/// fresh random heading every `ROAM_DIRECTION_TICKS` ticks.
pub fn roam(
    position: &mut Vec2,
    velocity: &mut Velocity,
    timer: &mut RoamTimer,
    bounds: &Bounds,
    rng: &mut impl Rng,
) {
    drift(position, velocity, bounds);

    timer.0 += 1;
    if timer.0 >= movement::ROAM_DIRECTION_TICKS {
        *velocity = Velocity::random(rng, movement::HUMAN_VELOCITY_RANGE, velocity.speed);
        timer.0 = 0;
    }
}

/// One bounded step along the current heading
pub fn drift(position: &mut Vec2, velocity: &mut Velocity, bounds: &Bounds) {
    *position += velocity.step();
    bounds.reflect(position, &mut velocity.heading);
}

/// Move every animal one step
pub fn animal_movement_system(world: &mut World, bounds: &Bounds) {
    for (_, (_, position, velocity)) in world.query_mut::<(&Animal, &mut Position, &mut Velocity)>() {
        drift(&mut position.0, velocity, bounds);
    }
}
