//! Targeting - nearest-entity search and re-validation of cached targets

use hecs::{Component, Entity, World};

use crate::components::{Position, Vec2};

/// Nearest entity carrying component `C`, by Euclidean distance.
/// Ties go to the first entity found.
pub fn nearest_with<C: Component>(world: &World, from: Vec2) -> Option<Entity> {
    nearest_matching::<C>(world, from, |_, _| true)
}

/// Nearest entity carrying component `C` for which `accept` holds
pub fn nearest_matching<C: Component>(
    world: &World,
    from: Vec2,
    mut accept: impl FnMut(Entity, &C) -> bool,
) -> Option<Entity> {
    let mut best: Option<(Entity, f32)> = None;

    for (entity, (component, position)) in world.query::<(&C, &Position)>().iter() {
        if !accept(entity, component) {
            continue;
        }
        let distance = from.distance_squared(&position.0);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((entity, distance)),
        }
    }

    best.map(|(entity, _)| entity)
}

/// Keep a cached target only while it still exists and carries `C`
pub fn revalidate<C: Component>(world: &World, target: Option<Entity>) -> Option<Entity> {
    target.filter(|&entity| world.get::<&C>(entity).is_ok())
}

/// Current position of an entity, if it still exists
pub fn position_of(world: &World, entity: Entity) -> Option<Vec2> {
    world.get::<&Position>(entity).ok().map(|p| p.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Animal, Plant};

    #[test]
    fn test_nearest_picks_closest() {
        let mut world = World::new();
        world.spawn((Plant, Position::new(100.0, 100.0)));
        let close = world.spawn((Plant, Position::new(12.0, 10.0)));
        world.spawn((Animal, Position::new(10.0, 10.0)));

        assert_eq!(nearest_with::<Plant>(&world, Vec2::new(10.0, 10.0)), Some(close));
    }

    #[test]
    fn test_nearest_empty_world() {
        let world = World::new();
        assert_eq!(nearest_with::<Plant>(&world, Vec2::ZERO), None);
    }

    #[test]
    fn test_nearest_matching_filters() {
        let mut world = World::new();
        let skipped = world.spawn((Plant, Position::new(1.0, 0.0)));
        let far = world.spawn((Plant, Position::new(50.0, 0.0)));

        let found = nearest_matching::<Plant>(&world, Vec2::ZERO, |entity, _| entity != skipped);
        assert_eq!(found, Some(far));
    }

    #[test]
    fn test_revalidate_drops_despawned() {
        let mut world = World::new();
        let plant = world.spawn((Plant, Position::new(1.0, 1.0)));

        assert_eq!(revalidate::<Plant>(&world, Some(plant)), Some(plant));
        assert_eq!(revalidate::<Animal>(&world, Some(plant)), None);

        world.despawn(plant).unwrap();
        assert_eq!(revalidate::<Plant>(&world, Some(plant)), None);
        assert_eq!(position_of(&world, plant), None);
    }

    #[test]
    fn test_revalidate_survives_id_reuse() {
        let mut world = World::new();
        let old = world.spawn((Plant, Position::new(1.0, 1.0)));
        world.despawn(old).unwrap();
        let new = world.spawn((Plant, Position::new(2.0, 2.0)));

        assert_eq!(revalidate::<Plant>(&world, Some(old)), None);
        assert_eq!(revalidate::<Plant>(&world, Some(new)), Some(new));
    }
}
