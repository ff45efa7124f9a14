//! Bracket skeleton: rounds and empty match slots for a single-elimination tree.

use crate::models::BracketMatch;

/// Number of rounds needed for `count` participants: ceil(log2(count)), 0 below 2 participants.
pub fn total_rounds(count: usize) -> u32 {
    if count < 2 {
        return 0;
    }
    count.next_power_of_two().trailing_zeros()
}

/// Bracket size: the next power of two >= `count` (0 below 2 participants).
pub fn bracket_size(count: usize) -> usize {
    if count < 2 {
        return 0;
    }
    count.next_power_of_two()
}

/// Build every match of the bracket, all slots empty.
///
/// Round `r` of `rounds` has `2^(rounds - r)` matches at positions `1..=2^(rounds - r)`, so the
/// last round is the single final and the total is `bracket_size - 1`.
pub fn build_bracket(count: usize) -> Vec<BracketMatch> {
    let rounds = total_rounds(count);
    let mut matches = Vec::with_capacity(bracket_size(count).saturating_sub(1));
    for round in 1..=rounds {
        let in_round = 1u32 << (rounds - round);
        matches.extend((1..=in_round).map(|position| BracketMatch::new(round, position)));
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_and_sizes() {
        assert_eq!(total_rounds(0), 0);
        assert_eq!(total_rounds(1), 0);
        assert_eq!(total_rounds(2), 1);
        assert_eq!(total_rounds(3), 2);
        assert_eq!(total_rounds(8), 3);
        assert_eq!(total_rounds(9), 4);
        assert_eq!(bracket_size(5), 8);
        assert_eq!(bracket_size(16), 16);
    }
}
