// src/history.rs

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, SimulationError};
use crate::stats::EpochStats;

pub const HISTORY_FILE: &str = "history.json";

type Columns = (Vec<usize>, Vec<f64>, Vec<f64>);

/// Per-run convergence record consumed by plotting tools.
///
/// Stored as a single JSON document `[[epochs], [proposer_means],
/// [responder_means]]` with three columns of equal length.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Columns", into = "Columns")]
pub struct History {
    epochs: Vec<usize>,
    proposer_means: Vec<f64>,
    responder_means: Vec<f64>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects a stream of summaries, stopping at the first error.
    pub fn collect<I>(summaries: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<EpochStats>>,
    {
        let mut history = Self::new();
        for stats in summaries {
            history.record(&stats?);
        }
        Ok(history)
    }

    pub fn record(&mut self, stats: &EpochStats) {
        self.epochs.push(stats.epoch);
        self.proposer_means.push(stats.proposer_mean);
        self.responder_means.push(stats.responder_mean);
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    pub fn epochs(&self) -> &[usize] {
        &self.epochs
    }

    pub fn proposer_means(&self) -> &[f64] {
        &self.proposer_means
    }

    pub fn responder_means(&self) -> &[f64] {
        &self.responder_means
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        fs::write(path, json)?;
        info!(path = %path.display(), epochs = self.len(), "history saved");
        Ok(())
    }

    /// Writes `history.json` into `dir`, creating the directory if needed.
    pub fn save_in(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        self.save(&dir.join(HISTORY_FILE))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl TryFrom<Columns> for History {
    type Error = SimulationError;

    fn try_from((epochs, proposer_means, responder_means): Columns) -> Result<Self> {
        if epochs.len() != proposer_means.len() || epochs.len() != responder_means.len() {
            return Err(SimulationError::InvalidConfig(format!(
                "history columns differ in length: {}, {}, {}",
                epochs.len(),
                proposer_means.len(),
                responder_means.len()
            )));
        }
        Ok(Self {
            epochs,
            proposer_means,
            responder_means,
        })
    }
}

impl From<History> for Columns {
    fn from(history: History) -> Self {
        (history.epochs, history.proposer_means, history.responder_means)
    }
}
