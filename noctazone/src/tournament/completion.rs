//! Tournament completion and winner resolution.

use super::models::{Completion, Match, StandingsRow, TournamentPhase};
use super::standings::rank_order;

/// Derive the lifecycle phase from the current match list
pub fn phase(matches: &[Match]) -> TournamentPhase {
    if matches.is_empty() {
        TournamentPhase::NotStarted
    } else if matches.iter().all(Match::is_completed) {
        TournamentPhase::Completed
    } else {
        TournamentPhase::InProgress
    }
}

/// Decide whether the tournament is over and who won it.
///
/// Nothing is declared until every match is completed. The winner is the row
/// that ranks first under [`rank_order`]: most points, then higher aggregate
/// score, more wins and earliest join, so it is always the leaderboard's top
/// row. `standings` does not need to be sorted.
pub fn resolve(matches: &[Match], standings: &[StandingsRow]) -> Completion {
    if phase(matches) != TournamentPhase::Completed {
        return Completion::default();
    }

    let winner = standings.iter().min_by(|a, b| rank_order(a, b)).cloned();

    if let Some(row) = &winner {
        log::debug!(
            "Tournament resolved: {} wins with {} points",
            row.participant.display_name,
            row.points
        );
    }

    Completion {
        completed: true,
        winner,
    }
}
