//! World generation - scatters humans, puddles, plants and animals

use hecs::{Entity, World};
use rand::Rng;

use crate::components::*;
use crate::config::{Lifecycle, WorldConfig};
use crate::constants::{lifecycle, movement, plant, puddle};

/// Random whole-number coordinate in `[inset, extent - inset]`.
/// Falls back to the midpoint when the extent is too small for the inset.
fn random_coord(rng: &mut impl Rng, extent: f32, inset: f32) -> f32 {
    let lo = inset.ceil() as i64;
    let hi = (extent - inset).floor() as i64;
    if hi < lo {
        return (extent / 2.0).round();
    }
    rng.gen_range(lo..=hi) as f32
}

/// Random whole-number point inside the bounds, keeping `inset` from each edge
pub fn random_point(rng: &mut impl Rng, bounds: &Bounds, inset: f32) -> Vec2 {
    Vec2::new(
        random_coord(rng, bounds.width, inset),
        random_coord(rng, bounds.height, inset),
    )
}

/// Spawn a human with full needs, random gender, lifespan and heading
pub fn spawn_human(world: &mut World, rng: &mut impl Rng, position: Vec2, generation: u32) -> Entity {
    world.spawn((
        Position(position),
        Velocity::random(rng, movement::HUMAN_VELOCITY_RANGE, movement::HUMAN_SPEED),
        Needs::full(),
        LifeState::Awake,
        Human::random(rng, generation),
        Targets::default(),
        RoamTimer(0),
    ))
}

pub fn spawn_animal(
    world: &mut World,
    rng: &mut impl Rng,
    position: Vec2,
    lifecycle: Lifecycle,
) -> Entity {
    world.spawn((
        Animal,
        Position(position),
        Velocity::random(rng, movement::ANIMAL_VELOCITY_RANGE, lifecycle.animal_speed()),
    ))
}

pub fn spawn_plant(world: &mut World, position: Vec2) -> Entity {
    world.spawn((Plant, Position(position)))
}

pub fn spawn_puddle(world: &mut World, position: Vec2, size: Puddle) -> Entity {
    world.spawn((size, Position(position)))
}

/// Scatter `count` humans of the first generation anywhere in bounds
pub fn spawn_humans(
    world: &mut World,
    count: u32,
    bounds: &Bounds,
    rng: &mut impl Rng,
) -> Vec<Entity> {
    (0..count)
        .map(|_| {
            let position = random_point(rng, bounds, 0.0);
            spawn_human(world, rng, position, lifecycle::FIRST_GENERATION)
        })
        .collect()
}

/// Scatter puddles. The basic lifecycle keeps them off the edges with
/// varied sizes; the aging lifecycle uses a fixed footprint anywhere.
pub fn spawn_puddles(
    world: &mut World,
    count: u32,
    bounds: &Bounds,
    lifecycle: Lifecycle,
    rng: &mut impl Rng,
) -> Vec<Entity> {
    (0..count)
        .map(|_| match lifecycle {
            Lifecycle::Basic => {
                let position = random_point(rng, bounds, puddle::INSET);
                let min = puddle::INSET as i32;
                let max = (puddle::INSET + puddle::SIZE_SPREAD) as i32;
                let size = Puddle::new(
                    rng.gen_range(min..=max) as f32,
                    rng.gen_range(min..=max) as f32,
                );
                spawn_puddle(world, position, size)
            }
            Lifecycle::Aging => {
                let position = random_point(rng, bounds, 0.0);
                spawn_puddle(world, position, Puddle::new(puddle::WIDTH, puddle::HEIGHT))
            }
        })
        .collect()
}

pub fn spawn_plants(
    world: &mut World,
    count: u32,
    bounds: &Bounds,
    lifecycle: Lifecycle,
    rng: &mut impl Rng,
) -> Vec<Entity> {
    let inset = match lifecycle {
        Lifecycle::Basic => plant::INSET,
        Lifecycle::Aging => 0.0,
    };
    (0..count)
        .map(|_| {
            let position = random_point(rng, bounds, inset);
            spawn_plant(world, position)
        })
        .collect()
}

pub fn spawn_animals(
    world: &mut World,
    count: u32,
    bounds: &Bounds,
    lifecycle: Lifecycle,
    rng: &mut impl Rng,
) -> Vec<Entity> {
    (0..count)
        .map(|_| {
            let position = random_point(rng, bounds, 0.0);
            spawn_animal(world, rng, position, lifecycle)
        })
        .collect()
}

/// Populate an empty world from the config. Returns the human roster in
/// spawn order.
pub fn generate_world(world: &mut World, config: &WorldConfig, rng: &mut impl Rng) -> Vec<Entity> {
    let bounds = config.bounds();

    let humans = spawn_humans(world, config.initial_humans, &bounds, rng);
    spawn_puddles(world, config.initial_puddles, &bounds, config.lifecycle, rng);
    spawn_animals(world, config.initial_animals, &bounds, config.lifecycle, rng);
    spawn_plants(world, config.initial_plants, &bounds, config.lifecycle, rng);

    humans
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_world_counts() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(42);
        let config = WorldConfig::default();

        let humans = generate_world(&mut world, &config, &mut rng);

        assert_eq!(humans.len(), 10);
        assert_eq!(world.query::<&Human>().iter().count(), 10);
        assert_eq!(world.query::<&Puddle>().iter().count(), 5);
        assert_eq!(world.query::<&Plant>().iter().count(), 10);
        assert_eq!(world.query::<&Animal>().iter().count(), 5);
    }

    #[test]
    fn test_everything_spawns_in_bounds() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(7);
        let config = WorldConfig {
            initial_humans: 50,
            initial_plants: 50,
            initial_animals: 50,
            ..Default::default()
        };
        let bounds = config.bounds();

        generate_world(&mut world, &config, &mut rng);

        for (_, position) in world.query::<&Position>().iter() {
            assert!(bounds.contains(&position.0));
            assert_eq!(position.0.x.fract(), 0.0);
            assert_eq!(position.0.y.fract(), 0.0);
        }
    }

    #[test]
    fn test_new_humans_are_fresh() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(3);

        let e = spawn_human(&mut world, &mut rng, Vec2::new(10.0, 20.0), 4);

        let human = *world.get::<&Human>(e).unwrap();
        assert_eq!(human.generation, 4);
        assert_eq!(human.age, 0);
        assert!((70..=100).contains(&human.death_age));
        assert_eq!(*world.get::<&Needs>(e).unwrap(), Needs::full());
        assert_eq!(*world.get::<&LifeState>(e).unwrap(), LifeState::Awake);
        let velocity = *world.get::<&Velocity>(e).unwrap();
        assert_eq!(velocity.speed, 1.0);
        assert!(velocity.heading.x.abs() <= 1.0 && velocity.heading.y.abs() <= 1.0);
    }

    #[test]
    fn test_basic_puddles_are_inset_and_varied() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = Bounds::new(800.0, 600.0);

        let puddles = spawn_puddles(&mut world, 30, &bounds, Lifecycle::Basic, &mut rng);

        for e in puddles {
            let position = world.get::<&Position>(e).unwrap().0;
            let size = *world.get::<&Puddle>(e).unwrap();
            assert!(position.x >= 40.0 && position.x <= 760.0);
            assert!(position.y >= 40.0 && position.y <= 560.0);
            assert!((40.0..=80.0).contains(&size.width));
            assert!((40.0..=80.0).contains(&size.height));
        }
    }

    #[test]
    fn test_aging_puddles_use_fixed_size() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = Bounds::default();

        let puddles = spawn_puddles(&mut world, 5, &bounds, Lifecycle::Aging, &mut rng);

        for e in puddles {
            assert_eq!(*world.get::<&Puddle>(e).unwrap(), Puddle::new(60.0, 30.0));
        }
    }

    #[test]
    fn test_animal_speed_follows_lifecycle() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(5);
        let bounds = Bounds::default();

        for (lifecycle, speed) in [(Lifecycle::Basic, 0.8), (Lifecycle::Aging, 0.6)] {
            for e in spawn_animals(&mut world, 20, &bounds, lifecycle, &mut rng) {
                let velocity = *world.get::<&Velocity>(e).unwrap();
                assert_eq!(velocity.speed, speed);
                assert!(velocity.heading.x.abs() <= 0.5 && velocity.heading.y.abs() <= 0.5);
            }
        }
    }

    #[test]
    fn test_tiny_bounds_fall_back_to_centre() {
        let mut rng = StdRng::seed_from_u64(1);
        let point = random_point(&mut rng, &Bounds::new(50.0, 50.0), 40.0);
        assert_eq!(point, Vec2::new(25.0, 25.0));
    }
}
