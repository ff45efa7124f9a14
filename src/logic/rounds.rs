//! Round finalization: lock in a round's results, advance winners, resolve byes and backfill
//! single-occupant slots of the next round with wild cards.
//!
//! A round is open while any two-occupant match lacks a winner, finalizable once every such match
//! is decided and the next round has not begun, and finalized once recorded in
//! `finalized_rounds`.

use crate::models::{BracketMatch, ParticipantId, ScoringMode, Slot, Tournament};
use std::collections::HashSet;

/// Whether `round` can be finalized now.
///
/// False for round 0, rounds past `total_rounds` or `current_round`, rounds with an undecided
/// two-occupant match, and (for non-final rounds) when the next round already shows a winner or a
/// nonzero score.
pub fn can_finalize(tournament: &Tournament, round: u32) -> bool {
    if round == 0 || round > tournament.total_rounds || round > tournament.current_round {
        return false;
    }
    let undecided = tournament
        .matches
        .iter()
        .any(|m| m.round == round && m.is_full() && m.winner.is_none());
    if undecided {
        return false;
    }
    !next_round_started(tournament, round)
}

/// The round after `round` shows a winner or a nonzero score. Always false for the last round.
pub(crate) fn next_round_started(tournament: &Tournament, round: u32) -> bool {
    round < tournament.total_rounds
        && tournament
            .matches
            .iter()
            .any(|m| m.round == round + 1 && m.has_activity())
}

/// Finalize `round`, returning the updated tournament (or an unchanged copy if the round is not
/// finalizable).
///
/// For a non-final round the next round is rebuilt from scratch: winners advance (position `p`
/// feeds position `ceil(p / 2)`, slot 1 if `p` is odd), byes are auto-won and advanced, then
/// remaining single-occupant matches get wild cards. Finalizing the last round only records it.
pub fn finalize_round(tournament: &Tournament, round: u32) -> Tournament {
    let mut next = tournament.clone();
    if !can_finalize(&next, round) {
        log::debug!("Round {} of tournament {} is not finalizable", round, next.id);
        return next;
    }

    if round < next.total_rounds {
        for m in next.matches.iter_mut().filter(|m| m.round == round + 1) {
            m.clear();
        }
        resolve_byes(&mut next, round);
        advance_winners(&mut next, round);
        backfill_wild_cards(&mut next, round);
        if round == next.current_round {
            next.current_round += 1;
        }
    }

    next.finalized_rounds.insert(round);
    if next == *tournament {
        return next;
    }
    next.touch();
    match champion(&next) {
        Some(winner) if round == next.total_rounds => log::info!(
            "Tournament {} finalized: champion is {}",
            next.id,
            next.participant_name(winner)
        ),
        _ => log::info!("Tournament {} finalized round {}", next.id, round),
    }
    next
}

/// Auto-win every bye in `round` for its sole occupant.
fn resolve_byes(tournament: &mut Tournament, round: u32) {
    for m in tournament.matches.iter_mut().filter(|m| m.round == round) {
        if m.is_bye() {
            m.winner = m.sole_occupant();
            log::debug!("Round {} position {}: bye auto-won", round, m.position);
        }
    }
}

/// Copy every winner of `round` into its feeding slot of `round + 1`.
fn advance_winners(tournament: &mut Tournament, round: u32) {
    let advancing: Vec<(u32, ParticipantId)> = tournament
        .matches
        .iter()
        .filter(|m| m.round == round)
        .filter_map(|m| m.winner.map(|w| (m.position, w)))
        .collect();
    for (position, winner) in advancing {
        let target = (position + 1) / 2;
        if let Some(next) = tournament.match_at_mut(round + 1, target) {
            next.set_participant(Slot::fed_by(position), winner, false);
        }
    }
}

/// Losers of `round`'s decided two-occupant matches, best performers first.
///
/// Higher scores rank first for `higher_score` and `best_of`, lower first for `lower_score`;
/// ties go to the name that sorts first.
pub fn wild_card_queue(tournament: &Tournament, round: u32) -> Vec<ParticipantId> {
    let mut losers: Vec<(ParticipantId, i64, &str)> = tournament
        .matches
        .iter()
        .filter(|m| m.round == round)
        .filter_map(BracketMatch::loser)
        .map(|(id, score)| (id, score, tournament.participant_name(id)))
        .collect();
    let ascending = tournament.scoring_mode == ScoringMode::LowerScore;
    losers.sort_by(|a, b| {
        let by_score = if ascending { a.1.cmp(&b.1) } else { b.1.cmp(&a.1) };
        by_score.then_with(|| a.2.cmp(b.2))
    });
    losers.into_iter().map(|(id, _, _)| id).collect()
}

/// Fill the empty slot of each single-occupant, undecided match in `round + 1` with the next
/// unused loser from `round`, flagging it as a wild card.
fn backfill_wild_cards(tournament: &mut Tournament, round: u32) {
    let mut queue = wild_card_queue(tournament, round).into_iter();
    let mut used: HashSet<ParticipantId> = HashSet::new();
    let mut positions: Vec<u32> = tournament
        .matches
        .iter()
        .filter(|m| m.round == round + 1 && m.is_bye())
        .map(|m| m.position)
        .collect();
    positions.sort_unstable();

    'matches: for position in positions {
        let wild_card = loop {
            match queue.next() {
                Some(id) if used.insert(id) => break id,
                Some(_) => continue,
                None => break 'matches,
            }
        };
        if let Some(m) = tournament.match_at_mut(round + 1, position) {
            let empty = if m.participant_1.is_none() { Slot::One } else { Slot::Two };
            m.set_participant(empty, wild_card, true);
            log::debug!(
                "Round {} position {}: wild card placed in {:?}",
                round + 1,
                position,
                empty
            );
        }
    }
}

/// The winner of the final match, if decided.
pub fn champion(tournament: &Tournament) -> Option<ParticipantId> {
    tournament.final_match().and_then(|m| m.winner)
}
