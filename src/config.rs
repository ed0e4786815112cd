// src/config.rs

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CUTOFF, DEFAULT_EPOCHS, DEFAULT_POPULATION_SIZE, DEFAULT_ROUNDS_PER_EPOCH};
use crate::error::{Result, SimulationError};
use crate::ga::Evolution;

/// Parameters of one simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub epoch_count: usize,
    pub population_size: usize,
    /// Games per epoch. `None` plays `ROUNDS_PER_INDIVIDUAL` per individual.
    #[serde(default)]
    pub rounds_per_epoch: Option<usize>,
    pub selection_cutoff: f64,
    pub seed: u64,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(SimulationError::InvalidConfig(
                "population size must be at least 1".to_string(),
            ));
        }
        Evolution::new(self.selection_cutoff)?;
        Ok(())
    }

    pub fn evolution(&self) -> Result<Evolution> {
        Evolution::new(self.selection_cutoff)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            epoch_count: DEFAULT_EPOCHS,
            population_size: DEFAULT_POPULATION_SIZE,
            rounds_per_epoch: Some(DEFAULT_ROUNDS_PER_EPOCH),
            selection_cutoff: DEFAULT_CUTOFF,
            seed: 0,
        }
    }
}
