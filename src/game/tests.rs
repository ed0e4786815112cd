//! Tests for the game protocol and competitions.

use super::*;
use crate::constants::{DISCR, GRID_SIZE};
use crate::ga::{Individual, Population};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

/// Equal weight on grid points 0.1 through 0.4, nothing elsewhere.
fn band_strategy() -> Strategy {
    let values = (0..GRID_SIZE)
        .map(|i| if (10..=40).contains(&i) { 20.0 } else { 0.0 })
        .collect();
    Strategy::normalized(values).unwrap()
}

fn degenerate() -> Individual {
    Individual::new(Strategy::point(0).unwrap(), Strategy::point(DISCR).unwrap())
}

fn uniform() -> Individual {
    Individual::new(Strategy::uniform(), Strategy::uniform())
}

#[test]
fn test_propose_stays_in_support() {
    let mut rng = StdRng::seed_from_u64(1);
    let proposer = Individual::new(band_strategy(), Strategy::uniform());
    for _ in 0..1000 {
        let offer = propose(&proposer, &mut rng).unwrap();
        assert!((0.0..=1.0).contains(&offer));
        assert!((0.1..=0.4).contains(&offer), "offer {offer} outside support");
    }
}

#[test]
fn test_respond_is_monotonic_in_share() {
    let mut rng = StdRng::seed_from_u64(2);
    let responder = Individual::new(Strategy::uniform(), band_strategy());
    let mut low = HashSet::new();
    let mut middle = HashSet::new();
    let mut high = HashSet::new();
    for _ in 0..1000 {
        low.insert(respond(&responder, 1.0 - 0.05, &mut rng).unwrap());
        middle.insert(respond(&responder, 1.0 - 0.2, &mut rng).unwrap());
        high.insert(respond(&responder, 1.0 - 0.9, &mut rng).unwrap());
    }
    assert_eq!(low, HashSet::from([false]));
    assert_eq!(middle, HashSet::from([false, true]));
    assert_eq!(high, HashSet::from([true]));
}

#[test]
fn test_respond_rejects_exact_tie() {
    let mut rng = StdRng::seed_from_u64(3);
    let responder = Individual::new(Strategy::uniform(), Strategy::point(50).unwrap());
    for _ in 0..100 {
        assert!(!respond(&responder, 0.5, &mut rng).unwrap());
    }
}

#[test]
fn test_respond_rejects_invalid_offer() {
    let mut rng = StdRng::seed_from_u64(4);
    let responder = uniform();
    for offer in [-0.01, 1.01, f64::NAN] {
        assert!(matches!(
            respond(&responder, offer, &mut rng),
            Err(crate::error::SimulationError::InvalidOffer(_))
        ));
    }
}

#[test]
fn test_degenerate_individual_earns_nothing() {
    let mut rng = StdRng::seed_from_u64(5);
    let population = Population::new(vec![degenerate(), uniform()]);
    for rounds in [1, 10, 500] {
        let competition = run_competition(&population, Some(rounds), 100.0, &mut rng).unwrap();
        assert_eq!(competition.proposer_score(0), 0.0);
        assert_eq!(competition.responder_score(0), 0.0);
        assert!(competition.total_score(0) <= competition.total_score(1));
    }
}

#[test]
fn test_competition_supports_self_play() {
    let mut rng = StdRng::seed_from_u64(6);
    let population = Population::new(vec![uniform()]);
    let competition = run_competition(&population, Some(50), 100.0, &mut rng).unwrap();
    assert_eq!(competition.log().len(), 50);
    assert!(competition.log().iter().all(|i| i.proposer == 0 && i.responder == 0));
    assert!(competition.total_score(0) > 0.0);
}

#[test]
fn test_competition_log_matches_scores() {
    let mut rng = StdRng::seed_from_u64(7);
    let population = Population::random(6, &mut rng).unwrap();
    let competition = run_competition(&population, None, 100.0, &mut rng).unwrap();

    assert_eq!(competition.rounds(), 60);
    assert_eq!(competition.log().len(), 60);

    let mut proposer_scores = vec![0.0; 6];
    let mut responder_scores = vec![0.0; 6];
    for interaction in competition.log().iter().filter(|i| i.accepted) {
        proposer_scores[interaction.proposer] += 100.0 * interaction.offer;
        responder_scores[interaction.responder] += 100.0 * (1.0 - interaction.offer);
    }
    for i in 0..6 {
        assert!((competition.proposer_score(i) - proposer_scores[i]).abs() < 1e-9);
        assert!((competition.responder_score(i) - responder_scores[i]).abs() < 1e-9);
    }
    let rate = competition.acceptance_rate();
    assert!((0.0..=1.0).contains(&rate));
}

#[test]
fn test_competition_uses_award() {
    let mut rng = StdRng::seed_from_u64(8);
    // Always offers 0.3 and always demands 0.0, so every game is accepted.
    let generous = Individual::new(Strategy::point(30).unwrap(), Strategy::point(0).unwrap());
    let population = Population::new(vec![generous]);
    let competition = run_competition(&population, Some(10), 10.0, &mut rng).unwrap();
    assert_eq!(competition.accepted_count(), 10);
    assert!((competition.proposer_score(0) - 30.0).abs() < 1e-9);
    assert!((competition.responder_score(0) - 70.0).abs() < 1e-9);
}

#[test]
fn test_competition_over_empty_population() {
    let mut rng = StdRng::seed_from_u64(9);
    let empty = Population::default();
    assert!(run_competition(&empty, None, 100.0, &mut rng).unwrap().is_empty());
    assert!(run_competition(&empty, Some(3), 100.0, &mut rng).is_err());
}

#[test]
fn test_competition_rejects_other_population() {
    let mut rng = StdRng::seed_from_u64(10);
    let small = Population::new(vec![uniform()]);
    let large = Population::new(vec![uniform(), uniform()]);
    let mut competition = Competition::new(&small, Some(5));
    assert!(competition.compete(&large, &mut rng).is_err());
}
