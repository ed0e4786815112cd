// src/game/competition.rs

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_AWARD, ROUNDS_PER_INDIVIDUAL};
use crate::error::{Result, SimulationError};
use crate::ga::Population;
use crate::game::{propose, respond};

/// One game played during a competition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub proposer: usize,
    pub responder: usize,
    pub offer: f64,
    pub accepted: bool,
}

/// A generation's batch of randomized games and the resulting earnings.
///
/// Scores are indexed by position in the population the competition was
/// built for.
#[derive(Clone, Debug)]
pub struct Competition {
    rounds: usize,
    award: f64,
    proposer_scores: Vec<f64>,
    responder_scores: Vec<f64>,
    log: Vec<Interaction>,
}

impl Competition {
    /// Prepares a competition over `population`. Without an explicit round
    /// count each individual gets `ROUNDS_PER_INDIVIDUAL` rounds on average.
    pub fn new(population: &Population, rounds: Option<usize>) -> Self {
        let size = population.len();
        Self {
            rounds: rounds.unwrap_or(ROUNDS_PER_INDIVIDUAL * size),
            award: DEFAULT_AWARD,
            proposer_scores: vec![0.0; size],
            responder_scores: vec![0.0; size],
            log: Vec::new(),
        }
    }

    pub fn with_award(mut self, award: f64) -> Self {
        self.award = award;
        self
    }

    /// Plays all rounds. Proposers and responders are drawn independently
    /// and with replacement, so an individual may face itself.
    pub fn compete(&mut self, population: &Population, rng: &mut impl Rng) -> Result<()> {
        let size = population.len();
        if size != self.len() {
            return Err(SimulationError::InvalidConfig(format!(
                "competition sized for {} individuals, population has {size}",
                self.len()
            )));
        }
        if self.rounds == 0 {
            return Ok(());
        }
        if size == 0 {
            return Err(SimulationError::EmptyInput("cannot compete over an empty population"));
        }

        let proposers: Vec<usize> = (0..self.rounds).map(|_| rng.gen_range(0..size)).collect();
        let responders: Vec<usize> = (0..self.rounds).map(|_| rng.gen_range(0..size)).collect();
        self.log.reserve(self.rounds);

        for (p, r) in proposers.into_iter().zip(responders) {
            let offer = propose(&population[p], rng)?;
            let accepted = respond(&population[r], offer, rng)?;
            if accepted {
                self.proposer_scores[p] += self.award * offer;
                self.responder_scores[r] += self.award * (1.0 - offer);
            }
            self.log.push(Interaction {
                proposer: p,
                responder: r,
                offer,
                accepted,
            });
        }
        Ok(())
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn award(&self) -> f64 {
        self.award
    }

    /// Number of individuals scored.
    pub fn len(&self) -> usize {
        self.proposer_scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposer_scores.is_empty()
    }

    pub fn proposer_score(&self, index: usize) -> f64 {
        self.proposer_scores[index]
    }

    pub fn responder_score(&self, index: usize) -> f64 {
        self.responder_scores[index]
    }

    pub fn total_score(&self, index: usize) -> f64 {
        self.proposer_scores[index] + self.responder_scores[index]
    }

    pub fn log(&self) -> &[Interaction] {
        &self.log
    }

    pub fn accepted_count(&self) -> usize {
        self.log.iter().filter(|i| i.accepted).count()
    }

    pub fn acceptance_rate(&self) -> f64 {
        if self.log.is_empty() {
            return 0.0;
        }
        self.accepted_count() as f64 / self.log.len() as f64
    }
}

/// Builds a competition over `population` and plays it to completion.
pub fn run_competition(
    population: &Population,
    rounds: Option<usize>,
    award: f64,
    rng: &mut impl Rng,
) -> Result<Competition> {
    let mut competition = Competition::new(population, rounds).with_award(award);
    competition.compete(population, rng)?;
    Ok(competition)
}
