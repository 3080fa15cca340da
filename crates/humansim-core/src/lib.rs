//! HumanSim Core - 2D Agent-Based Life Simulation Engine
//!
//! Humans and prey animals share a bounded plane with water puddles and
//! plants. Each human drinks, eats, sleeps, ages and reproduces, driven by a
//! priority-ordered decision loop that runs once per tick.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Humans, animals, plants, puddles
//! - **Components**: Pure data attached to entities (Position, Needs, LifeState, etc.)
//! - **Systems**: Logic that queries and updates components
//!
//! # Example
//!
//! ```rust,no_run
//! use humansim_core::prelude::*;
//!
//! let mut engine = SimulationEngine::new(WorldConfig::default()).unwrap();
//! engine.generate();
//!
//! while !engine.is_extinct() {
//!     engine.step(); // one 60 Hz frame
//! }
//! ```

pub mod components;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod generation;
pub mod snapshot;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::{Lifecycle, WorldConfig};
    pub use crate::engine::SimulationEngine;
    pub use crate::error::ConfigError;
    pub use crate::snapshot::{PopulationStats, TickReport, WorldSnapshot};
}
