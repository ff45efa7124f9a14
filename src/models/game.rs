//! Bracket match and the two slots a match has.

use crate::models::player::ParticipantId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// One of the two participant slots of a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    #[default]
    One,
    Two,
}

impl Slot {
    /// The slot a match at `position` feeds in the next round (odd positions feed slot 1).
    pub fn fed_by(position: u32) -> Self {
        if position % 2 == 1 {
            Slot::One
        } else {
            Slot::Two
        }
    }

    pub fn other(self) -> Self {
        match self {
            Slot::One => Slot::Two,
            Slot::Two => Slot::One,
        }
    }
}

/// A single bracket match: two optional participants, their scores and the winner once decided.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub id: MatchId,
    /// 1-indexed round; round 1 is the earliest.
    pub round: u32,
    /// 1-indexed position within the round.
    pub position: u32,
    #[serde(default)]
    pub participant_1: Option<ParticipantId>,
    #[serde(default)]
    pub participant_2: Option<ParticipantId>,
    #[serde(default)]
    pub score_1: i64,
    #[serde(default)]
    pub score_2: i64,
    /// None until decided. Always one of the two occupants.
    #[serde(default)]
    pub winner: Option<ParticipantId>,
    /// Slot 1 occupant arrived as a wild card rather than by winning.
    #[serde(default)]
    pub wild_card_1: bool,
    #[serde(default)]
    pub wild_card_2: bool,
}

impl BracketMatch {
    pub fn new(round: u32, position: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            position,
            participant_1: None,
            participant_2: None,
            score_1: 0,
            score_2: 0,
            winner: None,
            wild_card_1: false,
            wild_card_2: false,
        }
    }

    pub fn participant(&self, slot: Slot) -> Option<ParticipantId> {
        match slot {
            Slot::One => self.participant_1,
            Slot::Two => self.participant_2,
        }
    }

    pub fn score(&self, slot: Slot) -> i64 {
        match slot {
            Slot::One => self.score_1,
            Slot::Two => self.score_2,
        }
    }

    pub fn is_wild_card(&self, slot: Slot) -> bool {
        match slot {
            Slot::One => self.wild_card_1,
            Slot::Two => self.wild_card_2,
        }
    }

    /// Put `participant` into `slot`, flagging it as a wild card or normal advancement.
    pub fn set_participant(&mut self, slot: Slot, participant: ParticipantId, wild_card: bool) {
        match slot {
            Slot::One => {
                self.participant_1 = Some(participant);
                self.wild_card_1 = wild_card;
            }
            Slot::Two => {
                self.participant_2 = Some(participant);
                self.wild_card_2 = wild_card;
            }
        }
    }

    /// Number of occupied slots (0, 1 or 2).
    pub fn occupants(&self) -> usize {
        usize::from(self.participant_1.is_some()) + usize::from(self.participant_2.is_some())
    }

    /// Both slots occupied, so the match has to be played.
    pub fn is_full(&self) -> bool {
        self.occupants() == 2
    }

    /// Exactly one occupant and no winner yet: auto-won by that occupant on finalization.
    pub fn is_bye(&self) -> bool {
        self.occupants() == 1 && self.winner.is_none()
    }

    /// The only occupant, if the match has exactly one.
    pub fn sole_occupant(&self) -> Option<ParticipantId> {
        match (self.participant_1, self.participant_2) {
            (Some(p), None) | (None, Some(p)) => Some(p),
            _ => None,
        }
    }

    /// The slot holding `participant`, if any.
    pub fn slot_of(&self, participant: ParticipantId) -> Option<Slot> {
        if self.participant_1 == Some(participant) {
            Some(Slot::One)
        } else if self.participant_2 == Some(participant) {
            Some(Slot::Two)
        } else {
            None
        }
    }

    pub fn contains(&self, participant: ParticipantId) -> bool {
        self.slot_of(participant).is_some()
    }

    /// The losing occupant of a decided two-occupant match, with the score they recorded.
    pub fn loser(&self) -> Option<(ParticipantId, i64)> {
        if !self.is_full() {
            return None;
        }
        let winner_slot = self.slot_of(self.winner?)?;
        let loser_slot = winner_slot.other();
        Some((self.participant(loser_slot)?, self.score(loser_slot)))
    }

    /// Some play has been recorded: a winner or any nonzero score.
    pub fn has_activity(&self) -> bool {
        self.winner.is_some() || self.score_1 != 0 || self.score_2 != 0
    }

    /// Empty both slots and forget scores, winner and wild-card flags.
    pub fn clear(&mut self) {
        self.participant_1 = None;
        self.participant_2 = None;
        self.score_1 = 0;
        self.score_2 = 0;
        self.winner = None;
        self.wild_card_1 = false;
        self.wild_card_2 = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_positions_feed_slot_one() {
        assert_eq!(Slot::fed_by(1), Slot::One);
        assert_eq!(Slot::fed_by(2), Slot::Two);
        assert_eq!(Slot::fed_by(7), Slot::One);
    }

    #[test]
    fn loser_reports_the_other_occupant_and_score() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut m = BracketMatch::new(1, 1);
        m.set_participant(Slot::One, a, false);
        assert_eq!(m.sole_occupant(), Some(a));
        assert!(m.is_bye());
        m.set_participant(Slot::Two, b, false);
        m.score_1 = 4;
        m.score_2 = 9;
        m.winner = Some(b);
        assert_eq!(m.loser(), Some((a, 4)));
        assert!(!m.is_bye());
    }
}
