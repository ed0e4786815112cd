use std::ops::Index;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::constants::{DEFAULT_CUTOFF, MUTATION_STEP};
use crate::error::{Result, SimulationError};
use crate::game::{Competition, Strategy};

/// An agent of the population: how it proposes and how it responds.
///
/// Individuals are never edited once built; mutation produces a new one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(Strategy, Strategy)", into = "(Strategy, Strategy)")]
pub struct Individual {
    proposer: Strategy,
    responder: Strategy,
}

impl Individual {
    pub fn new(proposer: Strategy, responder: Strategy) -> Self {
        Self { proposer, responder }
    }

    /// An individual with independently drawn normal-shaped strategies.
    pub fn random(rng: &mut impl Rng) -> Result<Self> {
        Ok(Self::new(Strategy::normal(rng)?, Strategy::normal(rng)?))
    }

    pub fn proposer(&self) -> &Strategy {
        &self.proposer
    }

    pub fn responder(&self) -> &Strategy {
        &self.responder
    }
}

impl From<(Strategy, Strategy)> for Individual {
    fn from((proposer, responder): (Strategy, Strategy)) -> Self {
        Self::new(proposer, responder)
    }
}

impl From<Individual> for (Strategy, Strategy) {
    fn from(individual: Individual) -> Self {
        (individual.proposer, individual.responder)
    }
}

/// The individuals of a single generation.
///
/// Serializes as `[[proposer_probs, responder_probs], ...]`. Members are
/// shared, so survivors carried into the next generation are not copied.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Population {
    individuals: Vec<Arc<Individual>>,
}

impl Population {
    pub fn new(individuals: Vec<Individual>) -> Self {
        Self {
            individuals: individuals.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn from_shared(individuals: Vec<Arc<Individual>>) -> Self {
        Self { individuals }
    }

    /// Generates `size` random individuals for generation 0.
    pub fn random(size: usize, rng: &mut impl Rng) -> Result<Self> {
        let individuals = (0..size)
            .map(|_| Individual::random(rng).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { individuals })
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index).map(Arc::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Individual> + '_ {
        self.individuals.iter().map(Arc::as_ref)
    }

    pub fn shared(&self) -> &[Arc<Individual>] {
        &self.individuals
    }
}

impl Index<usize> for Population {
    type Output = Individual;

    fn index(&self, index: usize) -> &Individual {
        &self.individuals[index]
    }
}

/// Truncation selection settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evolution {
    cutoff: f64,
}

impl Evolution {
    /// `cutoff` is the fraction of lowest scorers discarded each generation.
    pub fn new(cutoff: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&cutoff) {
            return Err(SimulationError::InvalidConfig(format!(
                "selection cutoff {cutoff} outside [0, 1)"
            )));
        }
        Ok(Self { cutoff })
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// How many of `size` individuals are discarded.
    pub fn dropped(&self, size: usize) -> usize {
        (size as f64 * self.cutoff).floor() as usize
    }
}

impl Default for Evolution {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

/// Nudges one random bin of `strategy` up or down by one grid step and
/// renormalizes. Returns the new strategy and the bin that was touched.
pub fn mutate(strategy: &Strategy, rng: &mut impl Rng) -> Result<(Strategy, usize)> {
    let mut values = strategy.probs().to_vec();
    let bin = rng.gen_range(0..values.len());
    let step = if rng.gen_bool(0.5) { MUTATION_STEP } else { -MUTATION_STEP };
    values[bin] = (values[bin] + step).clamp(0.0, 1.0);
    Ok((Strategy::normalized(values)?, bin))
}

/// A child of `parent` with both strategies mutated independently.
pub fn mutate_individual(parent: &Individual, rng: &mut impl Rng) -> Result<Individual> {
    let (proposer, _) = mutate(parent.proposer(), rng)?;
    let (responder, _) = mutate(parent.responder(), rng)?;
    Ok(Individual::new(proposer, responder))
}

/// Derives the next generation from a scored competition.
///
/// The lowest `floor(N * cutoff)` scorers are dropped. The pool is then
/// refilled to `N` with mutants of members picked uniformly from the
/// growing pool, offspring included, regardless of their score.
pub fn evolve(
    evolution: &Evolution,
    competition: &Competition,
    population: &Population,
    rng: &mut impl Rng,
) -> Result<Population> {
    let size = population.len();
    if competition.len() != size {
        return Err(SimulationError::InvalidConfig(format!(
            "competition scored {} individuals, population has {size}",
            competition.len()
        )));
    }

    let mut ranked: Vec<usize> = (0..size).collect();
    ranked.sort_by(|&a, &b| competition.total_score(a).total_cmp(&competition.total_score(b)));

    let dropped = evolution.dropped(size);
    let mut next: Vec<Arc<Individual>> = ranked[dropped..]
        .iter()
        .map(|&i| Arc::clone(&population.shared()[i]))
        .collect();
    trace!(size, dropped, survivors = next.len(), "selection done");

    while next.len() < size {
        let Some(parent) = next.choose(rng).cloned() else {
            return Err(SimulationError::InvalidConfig(format!(
                "cutoff {} leaves no survivors",
                evolution.cutoff()
            )));
        };
        next.push(Arc::new(mutate_individual(&parent, rng)?));
    }

    Ok(Population::from_shared(next))
}
