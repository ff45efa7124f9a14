//! Tournament bracket manager: library with models, bracket logic, persistence and transfer.

pub mod logic;
pub mod models;
pub mod store;
pub mod transfer;

pub use logic::{
    add_participant, add_participants, bracket_size, build_bracket, can_finalize, champion,
    create_tournament, determine_winner, finalize_round, participant_status, ranking_order,
    remove_participant, rename_participant, reset_tournament, score_match, seed_bracket,
    seed_positions, start_tournament, start_tournament_with_rng, total_rounds, update_settings,
    wild_card_queue, winning_slot, ParticipantStatus, TournamentSettings,
};
pub use models::{
    BracketMatch, MatchId, Participant, ParticipantId, ScoringMode, SeedingMode, Slot, Tournament,
    TournamentError, TournamentId,
};
pub use store::{JsonFileStore, MemoryStore, StoreError, TournamentStore};
