//! Evolutionary dynamics of the Ultimatum Game.
//!
//! A population of agents, each holding a proposer and a responder
//! strategy over a discrete offer grid, plays randomized pairwise games.
//! After every competition the lowest scorers are dropped and the
//! population is refilled with point mutations of the survivors.

pub mod config;
pub mod constants;
pub mod error;
pub mod ga;
pub mod game;
pub mod history;
pub mod simulation;
pub mod stats;

pub use config::SimulationConfig;
pub use error::{Result, SimulationError};
pub use ga::{evolve, mutate, Evolution, Individual, Population};
pub use game::{propose, respond, run_competition, Competition, Interaction, Strategy, OFFERS};
pub use history::History;
pub use simulation::{run, Simulation, Snapshot};
pub use stats::{mean_strategy, EpochStats};
