use serde::{Deserialize, Serialize};
use anyhow::Result;
use super::Validate;
use crate::simulation::check_dimensions;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RoadConfig {
    pub lanes: usize,
    pub length: usize,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self {
            lanes: 3,
            length: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Percent chance per tick that a vehicle enters. Clamped to [0, 100].
    pub entry_probability: i64,
    /// Fixed seed for reproducible runs; absent or zero seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            entry_probability: 20,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// The seed that actually reaches the random sources. Zero means entropy.
    pub fn fixed_seed(&self) -> Option<u64> {
        self.seed.filter(|&seed| seed != 0)
    }
}

impl Validate for RoadConfig {
    fn validate(&self) -> Result<()> {
        check_dimensions(self.lanes, self.length)?;
        Ok(())
    }
}

impl Validate for GeneratorConfig {
    fn validate(&self) -> Result<()> {
        // Out-of-range probabilities are clamped, with a warning, by VehicleGenerator::configure.
        Ok(())
    }
}
