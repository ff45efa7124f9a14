//! Bracket business logic: building, seeding, resolving matches, finalizing rounds.

mod bracket;
mod resolver;
mod rounds;
mod seeding;
mod setup;
mod status;

pub use bracket::{bracket_size, build_bracket, total_rounds};
pub use resolver::{determine_winner, winning_slot};
pub use rounds::{can_finalize, champion, finalize_round, wild_card_queue};
pub use seeding::{ranking_order, seed_bracket, seed_positions};
pub use setup::{
    add_participant, add_participants, create_tournament, remove_participant, rename_participant,
    reset_tournament, score_match, start_tournament, start_tournament_with_rng, update_settings,
    TournamentSettings,
};
pub use status::{participant_status, ParticipantStatus};
