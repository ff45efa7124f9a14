//! Seeding: place participants into round 1, randomly or by ranking.

use crate::logic::bracket::{bracket_size, build_bracket, total_rounds};
use crate::models::{Participant, ParticipantId, SeedingMode, Slot, Tournament};
use rand::seq::SliceRandom;
use rand::Rng;

/// Participants ordered by descending last observed score, ties broken by name (ascending).
pub fn ranking_order(participants: &[Participant]) -> Vec<&Participant> {
    let mut ranked: Vec<_> = participants.iter().collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
    ranked
}

/// Seed index for every round-1 slot of a bracket of `size` (a power of two >= 2).
///
/// Slot `i` (match `i / 2`, slot `i % 2`) holds seed `positions[i]`, with seed 0 the strongest.
/// Seeds `s` and `size - 1 - s` always share a match, so the top seeds meet as late as possible.
pub fn seed_positions(size: usize) -> Vec<usize> {
    if size <= 2 {
        return (0..size).collect();
    }
    seed_positions(size / 2)
        .into_iter()
        .flat_map(|s| [s, size - 1 - s])
        .collect()
}

/// Build the bracket and fill round 1 according to the tournament's seeding mode.
///
/// Fewer than 2 participants leaves the tournament with no matches and zero rounds. Slots
/// without a participant stay empty and become byes on finalization.
pub fn seed_bracket<R: Rng + ?Sized>(tournament: &Tournament, rng: &mut R) -> Tournament {
    let mut seeded = tournament.clone();
    let count = seeded.participants.len();
    seeded.matches = build_bracket(count);
    seeded.total_rounds = total_rounds(count);
    if count < 2 {
        return seeded;
    }
    seeded.current_round = 1;

    let slots: Vec<Option<ParticipantId>> = match seeded.seeding_mode {
        SeedingMode::Random => {
            let mut order: Vec<ParticipantId> = seeded.participants.iter().map(|p| p.id).collect();
            order.shuffle(rng);
            let mut slots: Vec<_> = order.into_iter().map(Some).collect();
            slots.resize(bracket_size(count), None);
            slots
        }
        SeedingMode::Seeded => {
            let ranked = ranking_order(&seeded.participants);
            seed_positions(bracket_size(count))
                .into_iter()
                .map(|seed| ranked.get(seed).map(|p| p.id))
                .collect()
        }
    };

    for (i, occupant) in slots.into_iter().enumerate() {
        let Some(participant) = occupant else { continue };
        let position = (i / 2) as u32 + 1;
        let slot = if i % 2 == 0 { Slot::One } else { Slot::Two };
        if let Some(m) = seeded.match_at_mut(1, position) {
            m.set_participant(slot, participant, false);
        }
    }
    log::debug!(
        "Seeded {} participants ({:?}) into a bracket of {}",
        count,
        seeded.seeding_mode,
        bracket_size(count)
    );
    seeded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_positions_pair_each_seed_with_its_complement() {
        assert_eq!(seed_positions(2), vec![0, 1]);
        assert_eq!(seed_positions(4), vec![0, 3, 1, 2]);
        assert_eq!(seed_positions(8), vec![0, 7, 3, 4, 1, 6, 2, 5]);
    }

    #[test]
    fn ranking_breaks_ties_by_name() {
        let mut a = Participant::new("Bea");
        a.score = 5;
        let mut b = Participant::new("Abe");
        b.score = 5;
        let mut c = Participant::new("Cal");
        c.score = 9;
        let participants = [a, b, c];
        let names: Vec<_> = ranking_order(&participants)
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["Cal", "Abe", "Bea"]);
    }
}
