//! Generation - procedural creation of the starting world and resource refills

mod world;

pub use world::*;
