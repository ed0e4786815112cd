// src/simulation.rs

use std::iter::FusedIterator;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, enabled, info, Level};

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::ga::{evolve, Evolution, Population};
use crate::game::Competition;
use crate::stats::EpochStats;

/// A generation index and the population alive at that point.
pub type Snapshot = (usize, Population);

/// Drives a run generation by generation.
///
/// Iterating yields `epoch_count + 1` snapshots: the initial population,
/// then the population after each round of competition and evolution.
/// Work for an epoch only happens when the next snapshot is requested, and
/// the sequence stops for good after the last snapshot or the first error.
pub struct Simulation {
    config: SimulationConfig,
    evolution: Evolution,
    rng: StdRng,
    epoch: usize,
    population: Population,
    emitted: bool,
    finished: bool,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let evolution = config.evolution()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let population = Population::random(config.population_size, &mut rng)?;
        info!(
            epochs = config.epoch_count,
            population = config.population_size,
            cutoff = config.selection_cutoff,
            seed = config.seed,
            "starting simulation"
        );
        Ok(Self {
            config,
            evolution,
            rng,
            epoch: 0,
            population,
            emitted: false,
            finished: false,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Maps every snapshot to its convergence summary.
    pub fn summaries(self) -> impl Iterator<Item = Result<EpochStats>> {
        self.map(|snapshot| snapshot.and_then(|(epoch, population)| EpochStats::of(epoch, &population)))
    }

    fn advance(&mut self) -> Result<()> {
        let mut competition = Competition::new(&self.population, self.config.rounds_per_epoch);
        competition.compete(&self.population, &mut self.rng)?;
        debug!(
            epoch = self.epoch,
            rounds = competition.rounds(),
            acceptance_rate = competition.acceptance_rate(),
            "competition complete"
        );
        self.population = evolve(&self.evolution, &competition, &self.population, &mut self.rng)?;
        self.epoch += 1;
        if enabled!(Level::DEBUG) {
            let stats = EpochStats::of(self.epoch, &self.population)?;
            debug!(
                epoch = stats.epoch,
                proposer_mean = stats.proposer_mean,
                responder_mean = stats.responder_mean,
                "population evolved"
            );
        }
        Ok(())
    }
}

impl Iterator for Simulation {
    type Item = Result<Snapshot>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.emitted {
            if self.epoch >= self.config.epoch_count {
                self.finished = true;
                info!(epochs = self.epoch, "simulation finished");
                return None;
            }
            if let Err(e) = self.advance() {
                self.finished = true;
                return Some(Err(e));
            }
        }
        self.emitted = true;
        Some(Ok((self.epoch, self.population.clone())))
    }
}

impl FusedIterator for Simulation {}

/// Starts a run with explicit parameters.
pub fn run(
    epoch_count: usize,
    population_size: usize,
    rounds_per_epoch: usize,
    selection_cutoff: f64,
    seed: u64,
) -> Result<Simulation> {
    Simulation::new(SimulationConfig {
        epoch_count,
        population_size,
        rounds_per_epoch: Some(rounds_per_epoch),
        selection_cutoff,
        seed,
    })
}
