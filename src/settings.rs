//! World configuration
//!
//! Loaded from a JSON file; missing fields take their defaults and a missing
//! or broken file falls back to the defaults entirely.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable world parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// RNG seed for the run
    pub seed: u64,
    /// Target rock population, topped up one rock per frame
    pub num_rocks: usize,
    /// Edge length of the square play area
    pub world_size: f32,
    /// Cash per crystal delivered to the station
    pub crystal_value: u64,
    /// Cargo units each ship holds
    pub ship_cargo_capacity: u32,
    /// Per-hit crystal drop chance for newly created rocks
    pub rock_crystal_chance: f32,
    /// Fixed timestep for the frame loop (seconds)
    pub sim_dt: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            num_rocks: NUM_ROCKS,
            world_size: WORLD_SIZE,
            crystal_value: CRYSTAL_VALUE,
            ship_cargo_capacity: SHIP_CARGO_CAPACITY,
            rock_crystal_chance: ROCK_CRYSTAL_CHANCE,
            sim_dt: SIM_DT,
        }
    }
}

impl WorldConfig {
    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(json)?;
        config.sanitize();
        Ok(config)
    }

    /// Load from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded world config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("Invalid world config {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                log::info!("No world config at {} ({}), using defaults", path.display(), err);
                Self::default()
            }
        }
    }

    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Clamp values that would break the simulation
    fn sanitize(&mut self) {
        self.rock_crystal_chance = self.rock_crystal_chance.clamp(0.0, 1.0);
        if !(self.world_size > 0.0) {
            self.world_size = WORLD_SIZE;
        }
        if !(self.sim_dt > 0.0) {
            self.sim_dt = SIM_DT;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = WorldConfig::from_json(r#"{ "num_rocks": 12, "seed": 7 }"#).unwrap();
        assert_eq!(config.num_rocks, 12);
        assert_eq!(config.seed, 7);
        assert_eq!(config.world_size, WORLD_SIZE);
        assert_eq!(config.crystal_value, CRYSTAL_VALUE);
    }

    #[test]
    fn test_sanitize_clamps() {
        let config =
            WorldConfig::from_json(r#"{ "rock_crystal_chance": 4.0, "world_size": -1.0 }"#)
                .unwrap();
        assert_eq!(config.rock_crystal_chance, 1.0);
        assert_eq!(config.world_size, WORLD_SIZE);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(WorldConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = WorldConfig::load("/nonexistent/autominer/world.json");
        assert_eq!(config, WorldConfig::default());
    }
}
