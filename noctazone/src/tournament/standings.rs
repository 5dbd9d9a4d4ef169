//! Leaderboard derivation from participants and match results.

use super::errors::{TournamentError, TournamentResult};
use super::models::{
    Match, MatchWinner, POINTS_PER_DRAW, POINTS_PER_WIN, Participant, ParticipantId, StandingsRow,
};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Check that every match only references listed participants and carries a
/// result consistent with its players.
///
/// Pending and disputed matches are checked structurally; only completed
/// matches must name a winner.
pub fn validate(participants: &[Participant], matches: &[Match]) -> TournamentResult<()> {
    let mut known = HashSet::with_capacity(participants.len());
    for p in participants {
        if !known.insert(p.id) {
            return Err(TournamentError::DuplicateParticipant(p.id));
        }
    }

    for m in matches {
        for player in [m.player_a, m.player_b] {
            if !known.contains(&player) {
                return Err(TournamentError::UnknownParticipant {
                    round: m.round,
                    match_number: m.match_number,
                    participant: player,
                });
            }
        }
        validate_outcome(m, m.winner)?;
        if m.is_completed() && !m.winner.is_decided() {
            return Err(TournamentError::UndecidedResult {
                round: m.round,
                match_number: m.match_number,
            });
        }
    }

    Ok(())
}

/// Check that `winner` is a legal outcome for the pairing in `m`
pub fn validate_outcome(m: &Match, winner: MatchWinner) -> TournamentResult<()> {
    if m.player_a == m.player_b {
        return Err(TournamentError::SelfPairing {
            round: m.round,
            match_number: m.match_number,
            participant: m.player_a,
        });
    }

    match winner {
        MatchWinner::Won(id) if !m.involves(id) => Err(TournamentError::ForeignWinner {
            round: m.round,
            match_number: m.match_number,
            winner,
        }),
        _ => Ok(()),
    }
}

/// Compute ranked standings.
///
/// Rows are ordered by points, aggregate score and wins (all descending),
/// then by earlier join time. Participant id breaks any remaining tie so the
/// order is total.
pub fn compute_standings(
    participants: &[Participant],
    matches: &[Match],
) -> TournamentResult<Vec<StandingsRow>> {
    validate(participants, matches)?;

    let mut rows: Vec<StandingsRow> = participants.iter().cloned().map(StandingsRow::new).collect();
    let index: HashMap<ParticipantId, usize> = participants
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id, i))
        .collect();

    for m in matches.iter().filter(|m| m.is_completed()) {
        for player in [m.player_a, m.player_b] {
            let row = &mut rows[index[&player]];
            row.aggregate_score += i64::from(m.score_of(player).unwrap_or_default());
            row.matches_played += 1;

            match m.winner {
                MatchWinner::Draw => {
                    row.draws += 1;
                    row.points += POINTS_PER_DRAW;
                }
                MatchWinner::Won(id) if id == player => {
                    row.wins += 1;
                    row.points += POINTS_PER_WIN;
                }
                MatchWinner::Won(_) => row.losses += 1,
                // Rejected by validate()
                MatchWinner::Undecided => {}
            }
        }
    }

    rows.sort_by(rank_order);

    log::debug!(
        "Computed standings for {} participants from {} matches",
        rows.len(),
        matches.len()
    );

    Ok(rows)
}

/// Leaderboard ordering: the better-ranked row compares as `Less`
pub fn rank_order(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.aggregate_score.cmp(&a.aggregate_score))
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| a.participant.joined_at.cmp(&b.participant.joined_at))
        .then_with(|| a.participant.id.cmp(&b.participant.id))
}
