// src/stats.rs

use serde::{Deserialize, Serialize};

use crate::constants::GRID_SIZE;
use crate::error::{Result, SimulationError};
use crate::ga::Population;
use crate::game::Strategy;

/// Elementwise average of `strategies`.
pub fn mean_strategy<'a, I>(strategies: I) -> Result<Strategy>
where
    I: IntoIterator<Item = &'a Strategy>,
{
    let mut totals = vec![0.0; GRID_SIZE];
    let mut count = 0usize;
    for strategy in strategies {
        for (total, p) in totals.iter_mut().zip(strategy.probs()) {
            *total += p;
        }
        count += 1;
    }
    if count == 0 {
        return Err(SimulationError::EmptyInput("mean of zero strategies"));
    }
    let averaged = totals.into_iter().map(|t| t / count as f64).collect::<Vec<_>>();
    Strategy::try_from(averaged)
}

/// Convergence summary of one generation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    pub epoch: usize,
    pub proposer_mean: f64,
    pub proposer_std: f64,
    pub responder_mean: f64,
    pub responder_std: f64,
}

impl EpochStats {
    /// Summarizes `population` through the mean proposer and mean responder
    /// strategies of its members.
    pub fn of(epoch: usize, population: &Population) -> Result<Self> {
        let proposer = mean_strategy(population.iter().map(|i| i.proposer()))?;
        let responder = mean_strategy(population.iter().map(|i| i.responder()))?;
        Ok(Self {
            epoch,
            proposer_mean: proposer.mean(),
            proposer_std: proposer.std(),
            responder_mean: responder.mean(),
            responder_std: responder.std(),
        })
    }
}
