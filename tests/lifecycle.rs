//! Integration tests for tournament setup, roster edits, start and reset.

mod common;

use bracket_tournament_web::{
    add_participant, create_tournament, finalize_round, remove_participant, rename_participant,
    reset_tournament, score_match, start_tournament, update_settings, ScoringMode, SeedingMode,
    TournamentError, TournamentSettings,
};
use common::{round, started, tournament};
use uuid::Uuid;

#[test]
fn create_validates_names_and_target() {
    let ok = create_tournament(&TournamentSettings::new("  Spring Open ", "Chess", ScoringMode::HigherScore))
        .unwrap();
    assert_eq!(ok.name, "Spring Open");
    assert!(!ok.started);
    assert!(ok.participants.is_empty() && ok.matches.is_empty());
    assert_eq!(ok.total_rounds, 0);

    let short = TournamentSettings::new("X", "Chess", ScoringMode::HigherScore);
    assert!(matches!(
        create_tournament(&short),
        Err(TournamentError::InvalidName { .. })
    ));

    let mut bad_target = TournamentSettings::new("Spring Open", "Chess", ScoringMode::BestOf);
    bad_target.target_score = Some(0);
    assert_eq!(
        create_tournament(&bad_target),
        Err(TournamentError::InvalidTargetScore)
    );
}

#[test]
fn participant_names_are_validated_and_unique() {
    let t = tournament(0, ScoringMode::HigherScore, SeedingMode::Random);
    let t = add_participant(&t, " Alice ").unwrap();
    assert_eq!(t.participants[0].name, "Alice");
    assert_eq!(
        add_participant(&t, "alice"),
        Err(TournamentError::DuplicateParticipantName)
    );
    assert!(matches!(
        add_participant(&t, "A"),
        Err(TournamentError::InvalidName { .. })
    ));
    assert!(add_participant(&t, &"z".repeat(51)).is_err());
}

#[test]
fn add_and_remove_track_total_rounds() {
    let t = tournament(4, ScoringMode::HigherScore, SeedingMode::Random);
    assert_eq!(t.total_rounds, 2);
    let t = add_participant(&t, "Fifth").unwrap();
    assert_eq!(t.total_rounds, 3);
    let id = t.participants[0].id;
    let t = remove_participant(&t, id).unwrap();
    assert_eq!(t.participants.len(), 4);
    assert_eq!(t.total_rounds, 2);
    assert_eq!(
        remove_participant(&t, id),
        Err(TournamentError::ParticipantNotFound(id))
    );
}

#[test]
fn roster_is_locked_after_start_except_renames() {
    let t = started(4, ScoringMode::HigherScore, SeedingMode::Random);
    assert_eq!(add_participant(&t, "Late"), Err(TournamentError::AlreadyStarted));
    let id = t.participants[1].id;
    assert_eq!(remove_participant(&t, id), Err(TournamentError::AlreadyStarted));
    let renamed = rename_participant(&t, id, "Renamed").unwrap();
    assert_eq!(renamed.participant(id).unwrap().name, "Renamed");
    assert_eq!(
        rename_participant(&t, id, &t.participants[2].name.to_uppercase()),
        Err(TournamentError::DuplicateParticipantName)
    );
}

#[test]
fn scoring_settings_are_locked_after_start() {
    let t = started(4, ScoringMode::HigherScore, SeedingMode::Random);
    let mut settings = TournamentSettings::new("Renamed Cup", "Darts", ScoringMode::HigherScore);
    let renamed = update_settings(&t, &settings).unwrap();
    assert_eq!(renamed.name, "Renamed Cup");

    settings.scoring_mode = ScoringMode::LowerScore;
    assert_eq!(update_settings(&t, &settings), Err(TournamentError::AlreadyStarted));

    let fresh = tournament(4, ScoringMode::HigherScore, SeedingMode::Random);
    let updated = update_settings(&fresh, &settings).unwrap();
    assert_eq!(updated.scoring_mode, ScoringMode::LowerScore);
}

#[test]
fn start_requires_two_participants_and_is_not_repeatable() {
    let lonely = tournament(1, ScoringMode::HigherScore, SeedingMode::Random);
    assert_eq!(
        start_tournament(&lonely),
        Err(TournamentError::NotEnoughParticipants)
    );
    let t = started(2, ScoringMode::HigherScore, SeedingMode::Random);
    assert!(t.started);
    assert_eq!(t.current_round, 1);
    assert_eq!(start_tournament(&t), Err(TournamentError::AlreadyStarted));
}

#[test]
fn operations_leave_their_input_untouched() {
    let t = started(4, ScoringMode::HigherScore, SeedingMode::Random);
    let snapshot = t.clone();
    let id = round(&t, 1)[0].id;
    let _ = score_match(&t, id, 3, 1).unwrap();
    let _ = reset_tournament(&t);
    assert_eq!(t, snapshot);
}

#[test]
fn scoring_unknown_match_is_not_found() {
    let t = started(2, ScoringMode::HigherScore, SeedingMode::Random);
    let missing = Uuid::new_v4();
    let err = score_match(&t, missing, 1, 0).unwrap_err();
    assert_eq!(err, TournamentError::MatchNotFound(missing));
    assert!(err.is_not_found());
}

#[test]
fn reset_returns_to_setup_with_same_roster() {
    let t = started(5, ScoringMode::HigherScore, SeedingMode::Random);
    let roster: Vec<_> = t.participants.iter().map(|p| (p.id, p.name.clone())).collect();
    let t = score_match(&t, round(&t, 1)[0].id, 10, 8).unwrap();
    let t = score_match(&t, round(&t, 1)[1].id, 10, 3).unwrap();
    let t = finalize_round(&t, 1);
    assert!(!t.finalized_rounds.is_empty());

    let t = reset_tournament(&t);
    assert!(t.matches.is_empty());
    assert!(t.finalized_rounds.is_empty());
    assert!(!t.started);
    assert_eq!(t.total_rounds, 3);
    assert!(t.participants.iter().all(|p| p.score == 0));
    let after: Vec<_> = t.participants.iter().map(|p| (p.id, p.name.clone())).collect();
    assert_eq!(after, roster);

    let again = start_tournament(&t).unwrap();
    assert_eq!(again.matches.len(), 7);
}

#[test]
fn missing_score_label_defaults_to_score() {
    let settings: TournamentSettings =
        serde_json::from_str(r#"{"name": "Spring Open", "game": "Chess"}"#).unwrap();
    assert_eq!(settings.score_label, "Score");
    let t = create_tournament(&settings).unwrap();
    assert_eq!(t.score_label, "Score");

    let mut record = serde_json::to_value(&t).unwrap();
    record.as_object_mut().unwrap().remove("score_label");
    let restored: bracket_tournament_web::Tournament = serde_json::from_value(record).unwrap();
    assert_eq!(restored.score_label, "Score");
}
