//! Participant data structure and name validation.

use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant (used in match slots and lookups).
pub type ParticipantId = Uuid;

/// Allowed length (in characters, after trimming) of a participant name.
pub const PARTICIPANT_NAME_LEN: (usize, usize) = (2, 50);

/// Allowed length (in characters, after trimming) of a tournament name.
pub const TOURNAMENT_NAME_LEN: (usize, usize) = (2, 100);

/// A participant registered in a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// Last observed score. Used as the ranking signal for seeded brackets.
    #[serde(default)]
    pub score: i64,
}

impl Participant {
    /// Create a new participant with the given name and a zero score.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            score: 0,
        }
    }
}

/// Trim `name` and check its length is within `bounds`. `what` names the field in the error.
pub fn validate_name(name: &str, bounds: (usize, usize), what: &str) -> Result<String, TournamentError> {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if len < bounds.0 || len > bounds.1 {
        return Err(TournamentError::InvalidName {
            reason: format!(
                "{} must be between {} and {} characters",
                what, bounds.0, bounds.1
            ),
        });
    }
    Ok(trimmed.to_string())
}

/// Validate a participant name and check it is unique (case-insensitive) among `existing`.
/// `ignore` excludes one participant from the uniqueness check (used when renaming).
pub fn validate_participant_name(
    name: &str,
    existing: &[Participant],
    ignore: Option<ParticipantId>,
) -> Result<String, TournamentError> {
    let name = validate_name(name, PARTICIPANT_NAME_LEN, "Participant name")?;
    let lowered = name.to_lowercase();
    let is_duplicate = existing
        .iter()
        .filter(|p| Some(p.id) != ignore)
        .any(|p| p.name.to_lowercase() == lowered);
    if is_duplicate {
        return Err(TournamentError::DuplicateParticipantName);
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_bounds_names() {
        assert_eq!(validate_name("  Ann ", PARTICIPANT_NAME_LEN, "Name").unwrap(), "Ann");
        assert!(validate_name(" A ", PARTICIPANT_NAME_LEN, "Name").is_err());
        assert!(validate_name(&"x".repeat(51), PARTICIPANT_NAME_LEN, "Name").is_err());
        assert!(validate_name(&"x".repeat(100), TOURNAMENT_NAME_LEN, "Name").is_ok());
    }

    #[test]
    fn duplicate_check_is_case_insensitive_and_skips_ignored() {
        let existing = vec![Participant::new("Alice")];
        assert_eq!(
            validate_participant_name("ALICE", &existing, None),
            Err(TournamentError::DuplicateParticipantName)
        );
        assert_eq!(
            validate_participant_name("alice", &existing, Some(existing[0].id)).unwrap(),
            "alice"
        );
    }
}
