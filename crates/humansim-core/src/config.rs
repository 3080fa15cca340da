//! World configuration - sizes and population counts for a new simulation

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::components::Bounds;
use crate::constants::movement;
use crate::error::ConfigError;

/// Which set of lifecycle rules the humans follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// Needs only: no aging, no old-age death, no reproduction
    Basic,
    /// Humans age, die of old age and reproduce
    #[default]
    Aging,
}

impl Lifecycle {
    pub fn ages(self) -> bool {
        matches!(self, Lifecycle::Aging)
    }

    pub fn reproduces(self) -> bool {
        matches!(self, Lifecycle::Aging)
    }

    pub fn animal_speed(self) -> f32 {
        match self {
            Lifecycle::Basic => movement::BASIC_ANIMAL_SPEED,
            Lifecycle::Aging => movement::ANIMAL_SPEED,
        }
    }
}

/// Configuration for world generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World width in units (x runs 0..=width)
    pub width: f32,
    /// World height in units (y runs 0..=height)
    pub height: f32,
    pub initial_humans: u32,
    pub initial_puddles: u32,
    pub initial_plants: u32,
    pub initial_animals: u32,
    /// Plants added on every respawn
    pub respawn_plants: u32,
    /// Animals added on every respawn
    pub respawn_animals: u32,
    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    pub lifecycle: Lifecycle,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            initial_humans: 10,
            initial_puddles: 5,
            initial_plants: 10,
            initial_animals: 5,
            respawn_plants: 20,
            respawn_animals: 10,
            seed: None,
            lifecycle: Lifecycle::Aging,
        }
    }
}

impl WorldConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(self.width) || !valid(self.height) {
            return Err(ConfigError::InvalidBounds {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_world_layout() {
        let config = WorldConfig::default();
        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.initial_humans, 10);
        assert_eq!(config.lifecycle, Lifecycle::Aging);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = WorldConfig::from_json_str(r#"{ "seed": 7, "lifecycle": "basic" }"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.lifecycle, Lifecycle::Basic);
        assert_eq!(config.initial_plants, 10);
    }

    #[test]
    fn test_rejects_bad_bounds() {
        let err = WorldConfig::from_json_str(r#"{ "width": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBounds { .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = WorldConfig::from_json_str("{ width: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = WorldConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
