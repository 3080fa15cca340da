//! Simulation engine - main entry point for running the simulation

use hecs::{Entity, World};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::components::*;
use crate::config::WorldConfig;
use crate::constants::{lifecycle, respawn, FRAME_MS};
use crate::error::ConfigError;
use crate::generation::{
    generate_world, spawn_animal, spawn_animals, spawn_human, spawn_plant, spawn_plants,
    spawn_puddle,
};
use crate::snapshot::{PopulationStats, TickReport, WorldSnapshot};
use crate::systems::*;

/// Main simulation engine
pub struct SimulationEngine {
    /// ECS world containing all entities
    pub world: World,
    config: WorldConfig,
    rng: StdRng,
    /// Living humans in processing order
    population: Vec<Entity>,
    tick: u64,
    /// Simulated milliseconds since start
    elapsed_ms: f64,

    // Update timing
    last_age_ms: f64,
    last_respawn_ms: f64,

    extinct_logged: bool,
}

impl SimulationEngine {
    /// Create an empty simulation. Call [`generate`](Self::generate) to populate it.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            world: World::new(),
            config,
            rng,
            population: Vec::new(),
            tick: 0,
            elapsed_ms: 0.0,
            last_age_ms: 0.0,
            last_respawn_ms: 0.0,
            extinct_logged: false,
        })
    }

    /// Populate the world with the configured starting humans and resources
    pub fn generate(&mut self) {
        let humans = generate_world(&mut self.world, &self.config, &mut self.rng);
        info!(
            "generated {}x{} world: {} humans, {} puddles, {} plants, {} animals ({:?} lifecycle)",
            self.config.width,
            self.config.height,
            humans.len(),
            self.config.initial_puddles,
            self.config.initial_plants,
            self.config.initial_animals,
            self.config.lifecycle,
        );
        self.population.extend(humans);
        self.extinct_logged = false;
    }

    /// Advance one fixed frame
    pub fn step(&mut self) -> TickReport {
        self.update(FRAME_MS)
    }

    /// Advance the simulation by one tick covering `delta_ms` of simulated time
    pub fn update(&mut self, delta_ms: f64) -> TickReport {
        self.tick += 1;
        self.elapsed_ms += delta_ms.max(0.0);

        let mut report = TickReport {
            tick: self.tick,
            elapsed_ms: self.elapsed_ms,
            ..Default::default()
        };

        // Aging on the simulated clock
        if self.config.lifecycle.ages()
            && self.elapsed_ms - self.last_age_ms >= lifecycle::AGE_INTERVAL_MS
        {
            aging_system(&mut self.world);
            self.last_age_ms = self.elapsed_ms;
            report.aged = true;
        }

        self.run_humans(&mut report);
        self.prune_dead();

        let bounds = self.config.bounds();
        animal_movement_system(&mut self.world, &bounds);

        if self.elapsed_ms - self.last_respawn_ms >= respawn::INTERVAL_MS {
            self.spawn_resources(self.config.respawn_plants, self.config.respawn_animals);
            self.last_respawn_ms = self.elapsed_ms;
            report.respawned = true;
        }

        if self.is_extinct() && !self.extinct_logged {
            info!("population extinct at tick {} ({:.0} ms)", self.tick, self.elapsed_ms);
            self.extinct_logged = true;
        }

        report
    }

    /// Give every human on the roster its turn, applying consumption and
    /// births as they happen so later humans see them.
    fn run_humans(&mut self, report: &mut TickReport) {
        let ctx = TurnContext {
            now_ms: self.elapsed_ms,
            bounds: self.config.bounds(),
            lifecycle: self.config.lifecycle,
        };

        // Children born this tick take their first turn next tick
        let roster = self.population.clone();

        for entity in roster {
            let Some(mut agent) = Agent::load(&self.world, entity) else {
                continue;
            };
            if !agent.state.is_alive() {
                continue;
            }

            let outcome = run_turn(&mut agent, &self.world, &ctx, &mut self.rng);
            agent.store(&mut self.world);

            if let Some(cause) = outcome.died {
                debug!(
                    "human {:?} died of {:?} at age {} (generation {})",
                    entity, cause, agent.human.age, agent.human.generation
                );
                report.deaths.push(cause);
                continue;
            }
            if outcome.woke {
                report.woke += 1;
            }
            if outcome.behavior == Some(Behavior::Sleep) {
                debug!("human {:?} fell asleep", entity);
                report.fell_asleep += 1;
            }
            if outcome.drank {
                report.drinks += 1;
            }
            if let Some(meal) = outcome.meal {
                self.consume(entity, meal, report);
            }
            if let Some(birth) = outcome.birth {
                let child = spawn_human(&mut self.world, &mut self.rng, birth.position, birth.generation);
                self.population.push(child);
                report.births += 1;
                debug!(
                    "human {:?} born to {:?} and {:?} (generation {})",
                    child, birth.parent, birth.mate, birth.generation
                );
            }
        }
    }

    fn consume(&mut self, eater: Entity, meal: Meal, report: &mut TickReport) {
        if self.world.despawn(meal.entity()).is_err() {
            return;
        }
        match meal {
            Meal::Animal(_) => report.animals_eaten += 1,
            Meal::Plant(_) => report.plants_eaten += 1,
        }
        debug!("human {:?} ate {:?}", eater, meal);
    }

    /// Drop dead humans from the roster and the world
    fn prune_dead(&mut self) {
        let world = &mut self.world;
        self.population.retain(|&entity| {
            let alive = world
                .get::<&LifeState>(entity)
                .map(|state| state.is_alive())
                .unwrap_or(false);
            if !alive {
                let _ = world.despawn(entity);
            }
            alive
        });
    }

    /// Add a human of the first generation, clamped into bounds
    pub fn spawn_human_at(&mut self, position: Vec2) -> Entity {
        let position = self.config.bounds().clamp(position);
        let entity = spawn_human(
            &mut self.world,
            &mut self.rng,
            position,
            lifecycle::FIRST_GENERATION,
        );
        self.population.push(entity);
        self.extinct_logged = false;
        entity
    }

    pub fn spawn_plant_at(&mut self, position: Vec2) -> Entity {
        let position = self.config.bounds().clamp(position);
        spawn_plant(&mut self.world, position)
    }

    pub fn spawn_animal_at(&mut self, position: Vec2) -> Entity {
        let position = self.config.bounds().clamp(position);
        spawn_animal(&mut self.world, &mut self.rng, position, self.config.lifecycle)
    }

    pub fn spawn_puddle_at(&mut self, position: Vec2, size: Puddle) -> Entity {
        let position = self.config.bounds().clamp(position);
        spawn_puddle(&mut self.world, position, size)
    }

    /// Scatter a batch of plants and animals at random points
    pub fn spawn_resources(&mut self, plants: u32, animals: u32) {
        let bounds = self.config.bounds();
        spawn_plants(&mut self.world, plants, &bounds, self.config.lifecycle, &mut self.rng);
        spawn_animals(&mut self.world, animals, &bounds, self.config.lifecycle, &mut self.rng);
        info!("spawned {} plants and {} animals", plants, animals);
    }

    pub fn is_extinct(&self) -> bool {
        self.population.is_empty()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.config.bounds()
    }

    /// Living humans in processing order
    pub fn population(&self) -> &[Entity] {
        &self.population
    }

    pub fn human_count(&self) -> usize {
        self.population.len()
    }

    pub fn plant_count(&self) -> usize {
        self.world.query::<&Plant>().iter().count()
    }

    pub fn animal_count(&self) -> usize {
        self.world.query::<&Animal>().iter().count()
    }

    pub fn puddle_count(&self) -> usize {
        self.world.query::<&Puddle>().iter().count()
    }

    pub fn stats(&self) -> PopulationStats {
        PopulationStats::collect(&self.world)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(
            &self.world,
            &self.population,
            self.tick,
            self.elapsed_ms,
            self.config.bounds(),
        )
    }
}
