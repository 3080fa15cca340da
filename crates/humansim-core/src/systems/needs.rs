//! Needs system - per-tick decay, waking, and death checks

use hecs::World;

use crate::components::{DeathCause, Human, LifeState, NeedType, Needs};

/// What changed while updating a human's vitals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalsEvent {
    Woke,
    Died(DeathCause),
}

/// Apply one tick of need decay and the sleep/death transitions.
///
/// Water and hunger drain in every living state, energy only while awake.
/// A sleeper whose counter completes wakes with full energy. Death is checked
/// after decay: any depleted need, or old age when `ages` is set.
pub fn update_vitals(
    needs: &mut Needs,
    state: &mut LifeState,
    human: &Human,
    ages: bool,
) -> Option<VitalsEvent> {
    if !state.is_alive() {
        return None;
    }

    needs.decay(state.is_awake());

    let woke = state.tick_sleep();
    if woke {
        needs.fill(NeedType::Energy);
    }

    let cause = match needs.depleted() {
        Some(need) => Some(DeathCause::from(need)),
        None if ages && human.is_past_lifespan() => Some(DeathCause::OldAge),
        None => None,
    };

    if let Some(cause) = cause {
        *state = LifeState::Dead(cause);
        return Some(VitalsEvent::Died(cause));
    }

    woke.then_some(VitalsEvent::Woke)
}

/// Age every living human by one year
pub fn aging_system(world: &mut World) -> usize {
    let mut aged = 0;
    for (_, (human, state)) in world.query_mut::<(&mut Human, &LifeState)>() {
        if state.is_alive() {
            human.age += 1;
            aged += 1;
        }
    }
    aged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Gender;
    use crate::constants::sleep;

    fn human(age: u32, death_age: u32) -> Human {
        Human {
            gender: Gender::Male,
            generation: 1,
            age,
            death_age,
            last_reproduction_ms: 0.0,
        }
    }

    #[test]
    fn test_awake_decay() {
        let mut needs = Needs::full();
        let mut state = LifeState::Awake;

        let event = update_vitals(&mut needs, &mut state, &human(0, 80), true);

        assert_eq!(event, None);
        assert!(needs.water < 100.0);
        assert!(needs.energy < 100.0);
    }

    #[test]
    fn test_dehydration_kills_same_tick() {
        let mut needs = Needs {
            water: 0.04,
            hunger: 80.0,
            energy: 80.0,
        };
        let mut state = LifeState::Awake;

        let event = update_vitals(&mut needs, &mut state, &human(0, 80), true);

        assert_eq!(event, Some(VitalsEvent::Died(DeathCause::Dehydration)));
        assert_eq!(state, LifeState::Dead(DeathCause::Dehydration));
        assert_eq!(needs.water, 0.0);
    }

    #[test]
    fn test_starvation_kills_sleepers() {
        let mut needs = Needs {
            water: 90.0,
            hunger: 0.02,
            energy: 40.0,
        };
        let mut state = LifeState::Asleep { ticks: 10 };

        let event = update_vitals(&mut needs, &mut state, &human(0, 80), true);

        assert_eq!(event, Some(VitalsEvent::Died(DeathCause::Starvation)));
    }

    #[test]
    fn test_old_age_only_when_aging() {
        let mut needs = Needs::full();
        let mut state = LifeState::Awake;
        assert_eq!(update_vitals(&mut needs, &mut state, &human(80, 80), false), None);

        let event = update_vitals(&mut needs, &mut state, &human(80, 80), true);
        assert_eq!(event, Some(VitalsEvent::Died(DeathCause::OldAge)));
    }

    #[test]
    fn test_sleep_keeps_energy_until_wake() {
        let mut needs = Needs {
            water: 100.0,
            hunger: 100.0,
            energy: 30.0,
        };
        let mut state = LifeState::Asleep { ticks: 0 };

        for _ in 0..sleep::DURATION_TICKS - 1 {
            assert_eq!(update_vitals(&mut needs, &mut state, &human(0, 80), true), None);
            assert_eq!(needs.energy, 30.0);
        }

        let event = update_vitals(&mut needs, &mut state, &human(0, 80), true);
        assert_eq!(event, Some(VitalsEvent::Woke));
        assert_eq!(state, LifeState::Awake);
        assert_eq!(needs.energy, 100.0);
    }

    #[test]
    fn test_dead_are_untouched() {
        let mut needs = Needs::full();
        let mut state = LifeState::Dead(DeathCause::OldAge);

        assert_eq!(update_vitals(&mut needs, &mut state, &human(0, 80), true), None);
        assert_eq!(needs, Needs::full());
    }

    #[test]
    fn test_aging_skips_dead() {
        let mut world = World::new();
        let alive = world.spawn((human(10, 80), LifeState::Asleep { ticks: 3 }));
        let dead = world.spawn((human(10, 80), LifeState::Dead(DeathCause::Starvation)));

        assert_eq!(aging_system(&mut world), 1);
        assert_eq!(world.get::<&Human>(alive).unwrap().age, 11);
        assert_eq!(world.get::<&Human>(dead).unwrap().age, 10);
    }
}
