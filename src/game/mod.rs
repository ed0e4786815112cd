// game/mod.rs

pub mod competition;
pub mod strategy;

#[cfg(test)]
mod tests;

pub use competition::{run_competition, Competition, Interaction};
pub use strategy::{Strategy, OFFERS};

use rand::Rng;

use crate::error::{Result, SimulationError};
use crate::ga::Individual;

/// Draws an offer from `proposer`: the share of the award it proposes to
/// keep, leaving `1 - offer` to the responder.
pub fn propose(proposer: &Individual, rng: &mut impl Rng) -> Result<f64> {
    proposer.proposer().sample(rng)
}

/// Decides whether `responder` accepts `offer`, the share the proposer keeps.
///
/// The responder draws a demand and accepts only when its own share is
/// strictly greater, so a demand equal to the share is a rejection.
pub fn respond(responder: &Individual, offer: f64, rng: &mut impl Rng) -> Result<bool> {
    if !(0.0..=1.0).contains(&offer) {
        return Err(SimulationError::InvalidOffer(offer));
    }
    let share = 1.0 - offer;
    let demand = responder.responder().sample(rng)?;
    Ok(share > demand)
}
