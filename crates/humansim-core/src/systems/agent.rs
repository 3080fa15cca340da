//! Working copy of a human's components for the duration of its turn.
//!
//! A turn reads the rest of the world while mutating the acting human, so the
//! human's components are copied out, updated, then written back.

use hecs::{Entity, World};

use crate::components::{
    Human, LifeState, Needs, Position, RoamTimer, Targets, Vec2, Velocity,
};

/// Everything a human's turn can change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agent {
    pub entity: Entity,
    pub position: Vec2,
    pub velocity: Velocity,
    pub needs: Needs,
    pub state: LifeState,
    pub human: Human,
    pub targets: Targets,
    pub roam: RoamTimer,
}

impl Agent {
    /// Copy an agent out of the world. `None` if the entity is gone or is not a human.
    pub fn load(world: &World, entity: Entity) -> Option<Self> {
        let mut query = world
            .query_one::<(
                &Position,
                &Velocity,
                &Needs,
                &LifeState,
                &Human,
                &Targets,
                &RoamTimer,
            )>(entity)
            .ok()?;
        let (position, velocity, needs, state, human, targets, roam) = query.get()?;
        Some(Self {
            entity,
            position: position.0,
            velocity: *velocity,
            needs: *needs,
            state: *state,
            human: *human,
            targets: *targets,
            roam: *roam,
        })
    }

    /// Write the working copy back. Returns false if the entity no longer exists.
    pub fn store(&self, world: &mut World) -> bool {
        match world.query_one_mut::<(
            &mut Position,
            &mut Velocity,
            &mut Needs,
            &mut LifeState,
            &mut Human,
            &mut Targets,
            &mut RoamTimer,
        )>(self.entity)
        {
            Ok((position, velocity, needs, state, human, targets, roam)) => {
                position.0 = self.position;
                *velocity = self.velocity;
                *needs = self.needs;
                *state = self.state;
                *human = self.human;
                *targets = self.targets;
                *roam = self.roam;
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Gender;

    fn test_human() -> Human {
        Human {
            gender: Gender::Female,
            generation: 1,
            age: 30,
            death_age: 80,
            last_reproduction_ms: 0.0,
        }
    }

    #[test]
    fn test_load_and_store_roundtrip() {
        let mut world = World::new();
        let entity = world.spawn((
            Position::new(10.0, 20.0),
            Velocity::new(Vec2::new(1.0, 0.0), 1.0),
            Needs::full(),
            LifeState::Awake,
            test_human(),
            Targets::default(),
            RoamTimer(0),
        ));

        let mut agent = Agent::load(&world, entity).unwrap();
        assert_eq!(agent.position, Vec2::new(10.0, 20.0));

        agent.position = Vec2::new(11.0, 20.0);
        agent.needs.water = 42.0;
        assert!(agent.store(&mut world));

        let reloaded = Agent::load(&world, entity).unwrap();
        assert_eq!(reloaded.position.x, 11.0);
        assert_eq!(reloaded.needs.water, 42.0);
    }

    #[test]
    fn test_load_rejects_non_humans() {
        let mut world = World::new();
        let entity = world.spawn((Position::new(0.0, 0.0),));
        assert!(Agent::load(&world, entity).is_none());

        world.despawn(entity).unwrap();
        assert!(Agent::load(&world, entity).is_none());
    }
}
