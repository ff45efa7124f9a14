//! Tournament lifecycle: create, edit settings and roster, start, score matches, reset.
//!
//! Every operation takes the current tournament and returns an updated copy; the input is never
//! modified, so a caller can persist the result or drop it.

use crate::logic::bracket::total_rounds;
use crate::logic::resolver::determine_winner;
use crate::logic::rounds::{finalize_round, next_round_started};
use crate::logic::seeding::seed_bracket;
use crate::models::{
    default_score_label, validate_name, validate_participant_name, MatchId, Participant,
    ParticipantId, ScoringMode, SeedingMode, Tournament, TournamentError, TOURNAMENT_NAME_LEN,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const GAME_LEN: (usize, usize) = (1, 100);
const SCORE_LABEL_LEN: (usize, usize) = (1, 50);

/// Editable tournament settings (used on create and update).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentSettings {
    pub name: String,
    pub game: String,
    #[serde(default)]
    pub scoring_mode: ScoringMode,
    #[serde(default = "default_score_label")]
    pub score_label: String,
    #[serde(default)]
    pub target_score: Option<i64>,
    #[serde(default)]
    pub seeding_mode: SeedingMode,
}

impl TournamentSettings {
    pub fn new(name: impl Into<String>, game: impl Into<String>, scoring_mode: ScoringMode) -> Self {
        Self {
            name: name.into(),
            game: game.into(),
            scoring_mode,
            score_label: default_score_label(),
            target_score: None,
            seeding_mode: SeedingMode::Random,
        }
    }

    /// Trimmed, validated copy.
    fn validated(&self) -> Result<Self, TournamentError> {
        if matches!(self.target_score, Some(target) if target < 1) {
            return Err(TournamentError::InvalidTargetScore);
        }
        Ok(Self {
            name: validate_name(&self.name, TOURNAMENT_NAME_LEN, "Tournament name")?,
            game: validate_name(&self.game, GAME_LEN, "Game")?,
            score_label: validate_name(&self.score_label, SCORE_LABEL_LEN, "Score label")?,
            ..self.clone()
        })
    }
}

/// Create an empty, unstarted tournament.
pub fn create_tournament(settings: &TournamentSettings) -> Result<Tournament, TournamentError> {
    let settings = settings.validated()?;
    let mut tournament = Tournament::new(settings.name, settings.game, settings.scoring_mode);
    tournament.score_label = settings.score_label;
    tournament.target_score = settings.target_score;
    tournament.seeding_mode = settings.seeding_mode;
    log::info!("Created tournament {} ({})", tournament.id, tournament.name);
    Ok(tournament)
}

/// Apply new settings. Once started, only name, game and score label may change.
pub fn update_settings(
    tournament: &Tournament,
    settings: &TournamentSettings,
) -> Result<Tournament, TournamentError> {
    let settings = settings.validated()?;
    let locked_changed = settings.scoring_mode != tournament.scoring_mode
        || settings.target_score != tournament.target_score
        || settings.seeding_mode != tournament.seeding_mode;
    if tournament.started && locked_changed {
        return Err(TournamentError::AlreadyStarted);
    }
    let mut next = tournament.clone();
    next.name = settings.name;
    next.game = settings.game;
    next.score_label = settings.score_label;
    next.scoring_mode = settings.scoring_mode;
    next.target_score = settings.target_score;
    next.seeding_mode = settings.seeding_mode;
    next.touch();
    Ok(next)
}

/// Add a participant (unstarted tournaments only). Names must be unique (case-insensitive).
pub fn add_participant(tournament: &Tournament, name: &str) -> Result<Tournament, TournamentError> {
    add_participants(tournament, &[name])
}

/// Add several participants at once; nothing is added if any name is rejected.
pub fn add_participants<S: AsRef<str>>(
    tournament: &Tournament,
    names: &[S],
) -> Result<Tournament, TournamentError> {
    if tournament.started {
        return Err(TournamentError::AlreadyStarted);
    }
    let mut next = tournament.clone();
    for name in names {
        let name = validate_participant_name(name.as_ref(), &next.participants, None)?;
        next.participants.push(Participant::new(name));
    }
    next.total_rounds = total_rounds(next.participants.len());
    next.touch();
    Ok(next)
}

/// Remove a participant by id (unstarted tournaments only).
pub fn remove_participant(
    tournament: &Tournament,
    participant_id: ParticipantId,
) -> Result<Tournament, TournamentError> {
    if tournament.started {
        return Err(TournamentError::AlreadyStarted);
    }
    let mut next = tournament.clone();
    let idx = next
        .participants
        .iter()
        .position(|p| p.id == participant_id)
        .ok_or(TournamentError::ParticipantNotFound(participant_id))?;
    next.participants.remove(idx);
    next.total_rounds = total_rounds(next.participants.len());
    next.touch();
    Ok(next)
}

/// Rename a participant. Allowed at any time.
pub fn rename_participant(
    tournament: &Tournament,
    participant_id: ParticipantId,
    name: &str,
) -> Result<Tournament, TournamentError> {
    let name = validate_participant_name(name, &tournament.participants, Some(participant_id))?;
    let mut next = tournament.clone();
    next.participant_mut(participant_id)
        .ok_or(TournamentError::ParticipantNotFound(participant_id))?
        .name = name;
    next.touch();
    Ok(next)
}

/// Start the tournament: build and seed the bracket. Requires 2 participants and not started.
pub fn start_tournament(tournament: &Tournament) -> Result<Tournament, TournamentError> {
    start_tournament_with_rng(tournament, &mut rand::thread_rng())
}

/// [`start_tournament`] with a caller-supplied RNG for the random seeding shuffle.
pub fn start_tournament_with_rng<R: Rng + ?Sized>(
    tournament: &Tournament,
    rng: &mut R,
) -> Result<Tournament, TournamentError> {
    if tournament.started {
        return Err(TournamentError::AlreadyStarted);
    }
    if tournament.participants.len() < 2 {
        return Err(TournamentError::NotEnoughParticipants);
    }
    let mut next = seed_bracket(tournament, rng);
    next.started = true;
    next.finalized_rounds.clear();
    next.touch();
    log::info!(
        "Started tournament {} with {} participants over {} rounds",
        next.id,
        next.participants.len(),
        next.total_rounds
    );
    Ok(next)
}

/// Record scores for a match and set (or clear) its winner.
///
/// A match missing an occupant is left as is. Each occupant's score also becomes their last
/// observed score. A match in a finalized round only accepts scores that still decide a winner,
/// and only while the next round has not begun; the round is then finalized again so the new
/// winner is the one who advances.
pub fn score_match(
    tournament: &Tournament,
    match_id: MatchId,
    score_1: i64,
    score_2: i64,
) -> Result<Tournament, TournamentError> {
    let game = tournament
        .match_by_id(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if !game.is_full() {
        return Ok(tournament.clone());
    }
    let winner = determine_winner(
        tournament.scoring_mode,
        tournament.target_score,
        game,
        score_1,
        score_2,
    );
    let round = game.round;
    let finalized = tournament.is_round_finalized(round);
    if finalized && (winner.is_none() || next_round_started(tournament, round)) {
        log::debug!("Match {} is in locked round {}; scores ignored", match_id, round);
        return Ok(tournament.clone());
    }
    let (first, second) = (game.participant_1, game.participant_2);

    let mut next = tournament.clone();
    if let Some(m) = next.matches.iter_mut().find(|m| m.id == match_id) {
        m.score_1 = score_1;
        m.score_2 = score_2;
        m.winner = winner;
    }
    for (occupant, score) in [(first, score_1), (second, score_2)] {
        if let Some(p) = occupant.and_then(|id| next.participant_mut(id)) {
            p.score = score;
        }
    }
    next.touch();
    if finalized && round < next.total_rounds {
        next = finalize_round(&next, round);
    }
    Ok(next)
}

/// Back to the unstarted state with the same roster: no matches, no finalized rounds, scores zeroed.
pub fn reset_tournament(tournament: &Tournament) -> Tournament {
    let mut next = tournament.clone();
    next.matches.clear();
    next.finalized_rounds = BTreeSet::new();
    next.started = false;
    next.current_round = 0;
    next.total_rounds = total_rounds(next.participants.len());
    for p in &mut next.participants {
        p.score = 0;
    }
    next.touch();
    log::info!("Reset tournament {}", next.id);
    next
}
