//! Tournament aggregate, scoring/seeding modes and TournamentError.

use crate::models::game::{BracketMatch, MatchId};
use crate::models::player::{Participant, ParticipantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A tournament, participant or label name failed validation.
    InvalidName { reason: String },
    /// A participant with this name already exists (names are unique, case-insensitive).
    DuplicateParticipantName,
    /// The tournament has started, so the roster and scoring settings are locked.
    AlreadyStarted,
    /// Need at least 2 participants to start.
    NotEnoughParticipants,
    /// Target score must be at least 1.
    InvalidTargetScore,
    ParticipantNotFound(ParticipantId),
    MatchNotFound(MatchId),
    TournamentNotFound(TournamentId),
    /// An imported record is missing required fields or is malformed.
    InvalidRecord { index: usize, reason: String },
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidName { reason } => write!(f, "{}", reason),
            TournamentError::DuplicateParticipantName => {
                write!(f, "A participant with this name already exists")
            }
            TournamentError::AlreadyStarted => write!(f, "Tournament has already started"),
            TournamentError::NotEnoughParticipants => {
                write!(f, "Need at least 2 participants to start")
            }
            TournamentError::InvalidTargetScore => write!(f, "Target score must be at least 1"),
            TournamentError::ParticipantNotFound(_) => write!(f, "Participant not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::TournamentNotFound(_) => write!(f, "Tournament not found"),
            TournamentError::InvalidRecord { index, reason } => {
                write!(f, "Invalid tournament record at index {}: {}", index, reason)
            }
        }
    }
}

impl std::error::Error for TournamentError {}

impl TournamentError {
    /// Unknown tournament, participant or match identifier.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TournamentError::ParticipantNotFound(_)
                | TournamentError::MatchNotFound(_)
                | TournamentError::TournamentNotFound(_)
        )
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// How a match winner is decided from the two scores.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    #[default]
    HigherScore,
    /// Finishing positions: lower wins, 0 means not finished.
    LowerScore,
    /// First to reach the target score wins.
    BestOf,
}

/// How participants are placed into round 1.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedingMode {
    #[default]
    Random,
    /// Ranked by last observed score; top seeds get the byes.
    Seeded,
}

/// Score label used when none is given.
pub(crate) fn default_score_label() -> String {
    "Score".to_string()
}

/// Full tournament record: settings, roster, bracket and round progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub game: String,
    #[serde(default)]
    pub scoring_mode: ScoringMode,
    #[serde(default = "default_score_label")]
    pub score_label: String,
    /// Only meaningful for `best_of`.
    #[serde(default)]
    pub target_score: Option<i64>,
    #[serde(default)]
    pub seeding_mode: SeedingMode,
    #[serde(default)]
    pub started: bool,
    /// Participants in creation order.
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub matches: Vec<BracketMatch>,
    #[serde(default)]
    pub current_round: u32,
    #[serde(default)]
    pub total_rounds: u32,
    #[serde(default)]
    pub finalized_rounds: BTreeSet<u32>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Tournament {
    /// Create an empty, unstarted tournament. Names are stored as given; see
    /// [`crate::create_tournament`] for the validating constructor.
    pub fn new(name: impl Into<String>, game: impl Into<String>, scoring_mode: ScoringMode) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            game: game.into(),
            scoring_mode,
            score_label: default_score_label(),
            target_score: None,
            seeding_mode: SeedingMode::Random,
            started: false,
            participants: Vec::new(),
            matches: Vec::new(),
            current_round: 0,
            total_rounds: 0,
            finalized_rounds: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn participant_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id == id)
    }

    /// Display name of a participant, or an empty string if unknown.
    pub fn participant_name(&self, id: ParticipantId) -> &str {
        self.participant(id).map(|p| p.name.as_str()).unwrap_or("")
    }

    pub fn match_by_id(&self, id: MatchId) -> Option<&BracketMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Matches of `round`, ordered by position.
    pub fn round_matches(&self, round: u32) -> Vec<&BracketMatch> {
        let mut matches: Vec<_> = self.matches.iter().filter(|m| m.round == round).collect();
        matches.sort_by_key(|m| m.position);
        matches
    }

    pub fn match_at_mut(&mut self, round: u32, position: u32) -> Option<&mut BracketMatch> {
        self.matches
            .iter_mut()
            .find(|m| m.round == round && m.position == position)
    }

    /// The final match (the only match of the last round), once the bracket exists.
    pub fn final_match(&self) -> Option<&BracketMatch> {
        if self.total_rounds == 0 {
            return None;
        }
        self.matches
            .iter()
            .find(|m| m.round == self.total_rounds && m.position == 1)
    }

    pub fn is_round_finalized(&self, round: u32) -> bool {
        self.finalized_rounds.contains(&round)
    }

    /// Refresh `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
