//! Round-robin schedule generation using the circle method.

use super::models::{Match, Participant};

/// Number of rounds a round-robin over `participants` entrants takes.
///
/// An odd field gains a bye, so it needs as many rounds as entrants.
pub fn round_count(participants: usize) -> usize {
    match participants {
        0 | 1 => 0,
        n if n % 2 == 0 => n - 1,
        n => n,
    }
}

/// Generate a round-robin schedule.
///
/// Slot `i` plays slot `M - 1 - i` each round, then every slot except the
/// first rotates one place to the right. A bye is appended for odd fields
/// and pairings against it are dropped, so no match ever has a missing
/// opponent. The output is fully determined by the input order.
pub fn generate_round_robin(participants: &[Participant]) -> Vec<Match> {
    if participants.len() < 2 {
        return Vec::new();
    }

    // None marks the bye
    let mut slots: Vec<Option<&Participant>> = participants.iter().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }

    let size = slots.len();
    let rounds = size - 1;
    let mut matches = Vec::with_capacity(participants.len() * (participants.len() - 1) / 2);

    for round in 1..=rounds {
        let mut match_number = 0;
        for i in 0..size / 2 {
            if let (Some(a), Some(b)) = (slots[i], slots[size - 1 - i]) {
                match_number += 1;
                matches.push(Match::pending(round as u32, match_number, a.id, b.id));
            }
        }
        slots[1..].rotate_right(1);
    }

    log::debug!(
        "Generated {} matches over {} rounds for {} participants",
        matches.len(),
        rounds,
        participants.len()
    );

    matches
}
