// src/game/strategy.rs

use once_cell::sync::Lazy;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, Normal};

use crate::constants::{DISCR, GRID_SIZE, NORMAL_MEAN_RANGE, NORMAL_SIGMA_RANGE, PROBABILITY_EPSILON};
use crate::error::{Result, SimulationError};

/// The offer grid shared by every strategy: `GRID_SIZE` evenly spaced
/// points from 0.0 to 1.0, point `i` being exactly `i / DISCR`.
pub static OFFERS: Lazy<Vec<f64>> =
    Lazy::new(|| (0..GRID_SIZE).map(|i| i as f64 / DISCR as f64).collect());

/// A discrete probability distribution over [`OFFERS`].
///
/// A proposer reads it as the distribution of the share it offers, a
/// responder as the distribution of the share it demands. Values are only
/// produced through validating constructors, so every `Strategy` in
/// circulation has `GRID_SIZE` non-negative entries summing to one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Strategy {
    probs: Vec<f64>,
}

impl Strategy {
    /// Scales `values` so they sum to one.
    pub fn normalized(values: Vec<f64>) -> Result<Self> {
        check_shape(&values)?;
        let total: f64 = values.iter().sum();
        if total <= 0.0 {
            return Err(SimulationError::InvalidDistribution(format!(
                "cannot normalize a vector with sum {total}"
            )));
        }
        let probs = values.into_iter().map(|v| v / total).collect();
        Ok(Self { probs })
    }

    /// Equal probability on every grid point.
    pub fn uniform() -> Self {
        Self {
            probs: vec![1.0 / GRID_SIZE as f64; GRID_SIZE],
        }
    }

    /// A discretized normal density with a random center and spread.
    pub fn normal(rng: &mut impl Rng) -> Result<Self> {
        let mu = rng.gen_range(NORMAL_MEAN_RANGE.0..NORMAL_MEAN_RANGE.1);
        let sigma = rng.gen_range(NORMAL_SIGMA_RANGE.0..NORMAL_SIGMA_RANGE.1);
        let density = Normal::new(mu, sigma)
            .map_err(|e| SimulationError::InvalidDistribution(e.to_string()))?;
        Self::normalized(OFFERS.iter().map(|&x| density.pdf(x)).collect())
    }

    /// Puts all probability mass on grid point `index`.
    pub fn point(index: usize) -> Result<Self> {
        if index >= GRID_SIZE {
            return Err(SimulationError::InvalidDistribution(format!(
                "grid index {index} out of range 0..{GRID_SIZE}"
            )));
        }
        let mut probs = vec![0.0; GRID_SIZE];
        probs[index] = 1.0;
        Ok(Self { probs })
    }

    pub fn probs(&self) -> &[f64] {
        &self.probs
    }

    pub fn sum(&self) -> f64 {
        self.probs.iter().sum()
    }

    /// Draws one grid value, weighted by this distribution.
    pub fn sample(&self, rng: &mut impl Rng) -> Result<f64> {
        let dist = WeightedIndex::new(&self.probs)
            .map_err(|e| SimulationError::InvalidDistribution(e.to_string()))?;
        Ok(OFFERS[dist.sample(rng)])
    }

    /// Expected offer (or demand) under this distribution.
    pub fn mean(&self) -> f64 {
        OFFERS.iter().zip(&self.probs).map(|(o, p)| o * p).sum()
    }

    /// Spread of the offer variable. The weighted squared deviations are
    /// divided by the grid size, which keeps recorded histories comparable.
    pub fn std(&self) -> f64 {
        let mean = self.mean();
        let weighted: f64 = OFFERS
            .iter()
            .zip(&self.probs)
            .map(|(o, p)| p * (o - mean).powi(2))
            .sum();
        (weighted / GRID_SIZE as f64).sqrt()
    }
}

impl TryFrom<Vec<f64>> for Strategy {
    type Error = SimulationError;

    /// Accepts an already normalized vector without rescaling it, so that
    /// serialized populations round-trip bit for bit.
    fn try_from(probs: Vec<f64>) -> Result<Self> {
        check_shape(&probs)?;
        let total: f64 = probs.iter().sum();
        if (total - 1.0).abs() > PROBABILITY_EPSILON {
            return Err(SimulationError::InvalidDistribution(format!(
                "probabilities sum to {total}, expected 1"
            )));
        }
        Ok(Self { probs })
    }
}

impl From<Strategy> for Vec<f64> {
    fn from(strategy: Strategy) -> Self {
        strategy.probs
    }
}

fn check_shape(values: &[f64]) -> Result<()> {
    if values.len() != GRID_SIZE {
        return Err(SimulationError::InvalidDistribution(format!(
            "expected {GRID_SIZE} values, found {}",
            values.len()
        )));
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(SimulationError::InvalidDistribution(format!(
            "entry {bad} is not a non-negative finite number"
        )));
    }
    Ok(())
}
