//! Shared fixtures for integration tests.
#![allow(dead_code)]

use bracket_tournament_web::{
    add_participants, create_tournament, start_tournament_with_rng, BracketMatch, ScoringMode,
    SeedingMode, Tournament, TournamentSettings,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("Player {i:02}")).collect()
}

pub fn tournament(n: usize, scoring_mode: ScoringMode, seeding_mode: SeedingMode) -> Tournament {
    let mut settings = TournamentSettings::new("Friday Cup", "Darts", scoring_mode);
    settings.seeding_mode = seeding_mode;
    let t = create_tournament(&settings).unwrap();
    add_participants(&t, names(n).as_slice()).unwrap()
}

pub fn started(n: usize, scoring_mode: ScoringMode, seeding_mode: SeedingMode) -> Tournament {
    let t = tournament(n, scoring_mode, seeding_mode);
    start_tournament_with_rng(&t, &mut StdRng::seed_from_u64(7)).unwrap()
}

/// Round `round` matches, cloned and ordered by position.
pub fn round(t: &Tournament, round: u32) -> Vec<BracketMatch> {
    t.round_matches(round).into_iter().cloned().collect()
}
