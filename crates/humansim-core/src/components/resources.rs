//! Resource components: puddles, plants and prey animals.

use serde::{Deserialize, Serialize};

/// A water source. Never consumed, never removed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Puddle {
    pub width: f32,
    pub height: f32,
}

impl Puddle {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Marker component for an edible plant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant;

/// Marker component for a wandering prey animal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal;
