//! Match resolution: decide a winner from two scores under the tournament's scoring mode.

use crate::models::{BracketMatch, ParticipantId, ScoringMode, Slot};

/// Winning slot under `higher_score`: the higher score, ties undecided.
fn higher_score(score_1: i64, score_2: i64) -> Option<Slot> {
    match score_1.cmp(&score_2) {
        std::cmp::Ordering::Greater => Some(Slot::One),
        std::cmp::Ordering::Less => Some(Slot::Two),
        std::cmp::Ordering::Equal => None,
    }
}

/// Winning slot under `lower_score` (finishing positions). A score of 0 means the side has not
/// finished: both 0 is undecided, and with exactly one 0 the side holding a real position wins.
/// Equal nonzero positions are undecided.
fn lower_score(score_1: i64, score_2: i64) -> Option<Slot> {
    match (score_1, score_2) {
        (0, 0) => None,
        (0, _) => Some(Slot::Two),
        (_, 0) => Some(Slot::One),
        _ => higher_score(score_2, score_1),
    }
}

/// Winning slot under `best_of`: the side reaching the target. Without a target, `higher_score`.
fn best_of(score_1: i64, score_2: i64, target: Option<i64>) -> Option<Slot> {
    let Some(target) = target else {
        return higher_score(score_1, score_2);
    };
    match (score_1 >= target, score_2 >= target) {
        (true, false) => Some(Slot::One),
        (false, true) => Some(Slot::Two),
        // Both past the target: the higher one got there.
        (true, true) => higher_score(score_1, score_2),
        (false, false) => None,
    }
}

/// The winning slot for a pair of scores, or None while the match is undecided.
pub fn winning_slot(
    mode: ScoringMode,
    target: Option<i64>,
    score_1: i64,
    score_2: i64,
) -> Option<Slot> {
    match mode {
        ScoringMode::HigherScore => higher_score(score_1, score_2),
        ScoringMode::LowerScore => lower_score(score_1, score_2),
        ScoringMode::BestOf => best_of(score_1, score_2, target),
    }
}

/// The winner of `game` if it were scored `score_1`/`score_2`. Needs both slots occupied.
pub fn determine_winner(
    mode: ScoringMode,
    target: Option<i64>,
    game: &BracketMatch,
    score_1: i64,
    score_2: i64,
) -> Option<ParticipantId> {
    if !game.is_full() {
        return None;
    }
    winning_slot(mode, target, score_1, score_2).and_then(|slot| game.participant(slot))
}
