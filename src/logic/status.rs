//! Participant status within the bracket (for display).

use crate::logic::rounds::champion;
use crate::models::{ParticipantId, Tournament};
use serde::{Deserialize, Serialize};

/// Where a participant stands in the tournament.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    /// Won the final.
    Champion,
    /// Lost their most recent two-occupant match.
    Eliminated,
    /// In an undecided current-round match against an opponent.
    Playing,
    /// Already won their current-round match.
    Advanced,
    /// Alone in their current-round match; moves on without playing.
    Bye,
    /// Not (yet) placed in the current round.
    Waiting,
}

/// Status of `participant` in `tournament`.
///
/// Checked in order: champion; eliminated if they lost their latest-round two-occupant match;
/// waiting if that match is not in the current round; then advanced, playing or bye from that
/// match. Only the latest-round match counts towards elimination, so a loser brought back as a
/// wild card reports `playing` (or `advanced`) from their new match, not `eliminated` from the
/// one they lost. `bye` means alone in a current-round match: a round-1 bye, or a next-round slot
/// that no wild card was left to fill.
pub fn participant_status(tournament: &Tournament, participant: ParticipantId) -> ParticipantStatus {
    if champion(tournament) == Some(participant) {
        return ParticipantStatus::Champion;
    }
    let latest = tournament
        .matches
        .iter()
        .filter(|m| m.contains(participant))
        .max_by_key(|m| m.round);
    let Some(latest) = latest else {
        return ParticipantStatus::Waiting;
    };

    if latest.is_full() && latest.winner.is_some_and(|w| w != participant) {
        return ParticipantStatus::Eliminated;
    }
    if latest.round != tournament.current_round {
        return ParticipantStatus::Waiting;
    }
    if latest.winner == Some(participant) {
        if latest.is_full() {
            ParticipantStatus::Advanced
        } else {
            ParticipantStatus::Bye
        }
    } else if latest.is_full() {
        ParticipantStatus::Playing
    } else {
        ParticipantStatus::Bye
    }
}
