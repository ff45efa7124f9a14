//! Data structures for the bracket manager: participants, matches, tournament record.

mod game;
mod player;
mod tournament;

pub use game::{BracketMatch, MatchId, Slot};
pub use player::{
    validate_name, validate_participant_name, Participant, ParticipantId, PARTICIPANT_NAME_LEN,
    TOURNAMENT_NAME_LEN,
};
pub(crate) use tournament::default_score_label;
pub use tournament::{ScoringMode, SeedingMode, Tournament, TournamentError, TournamentId};
