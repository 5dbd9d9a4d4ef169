//! Tournament manager coordinating the engine with its collaborators.
//!
//! Holds no tournament state of its own: every call re-reads participants
//! and matches from the repository and derives standings from scratch.

use super::{
    bracket::generate_round_robin,
    completion::{phase, resolve},
    errors::{TournamentError, TournamentResult},
    models::{Match, MatchReport, MatchStatus, ParticipantId, TournamentId, TournamentSnapshot},
    standings::{compute_standings, validate_outcome},
};
use crate::db::TournamentRepository;
use crate::wallet::{CashOutGateway, CashOutReceipt, CashOutRequest};
use std::sync::Arc;

/// Smallest field a tournament is started with
pub const DEFAULT_MIN_PARTICIPANTS: usize = 4;

/// Tournament manager
#[derive(Clone)]
pub struct TournamentManager {
    repository: Arc<dyn TournamentRepository>,
    wallet: Arc<dyn CashOutGateway>,
    min_participants: usize,
}

impl TournamentManager {
    /// Create a new tournament manager
    pub fn new(repository: Arc<dyn TournamentRepository>, wallet: Arc<dyn CashOutGateway>) -> Self {
        Self {
            repository,
            wallet,
            min_participants: DEFAULT_MIN_PARTICIPANTS,
        }
    }

    /// Override the minimum field size (never below 2)
    pub fn with_min_participants(mut self, min_participants: usize) -> Self {
        self.min_participants = min_participants.max(2);
        self
    }

    /// Minimum field size required by `ensure_schedule`
    pub fn min_participants(&self) -> usize {
        self.min_participants
    }

    /// Make sure the tournament has its round-robin schedule.
    ///
    /// A stored schedule is returned as is, whatever the current field size.
    /// Otherwise the canonical schedule is generated from the participant
    /// list and handed to the repository, which still keeps any schedule a
    /// concurrent caller stored first.
    pub async fn ensure_schedule(&self, tournament_id: TournamentId) -> TournamentResult<Vec<Match>> {
        let existing = self.repository.list_matches(tournament_id).await?;
        if !existing.is_empty() {
            log::debug!(
                "Tournament {} already scheduled with {} matches",
                tournament_id,
                existing.len()
            );
            return Ok(existing);
        }

        let participants = self.repository.list_participants(tournament_id).await?;

        if participants.len() < self.min_participants {
            return Err(TournamentError::InsufficientParticipants {
                needed: self.min_participants,
                current: participants.len(),
            });
        }

        let schedule = generate_round_robin(&participants);
        let stored = self.repository.ensure_matches(tournament_id, &schedule).await?;

        log::info!(
            "Tournament {} has {} scheduled matches for {} participants",
            tournament_id,
            stored.len(),
            participants.len()
        );

        Ok(stored)
    }

    /// Load everything and derive standings, completion and phase
    pub async fn snapshot(&self, tournament_id: TournamentId) -> TournamentResult<TournamentSnapshot> {
        let tournament = self.repository.get_tournament(tournament_id).await?;
        let participants = self.repository.list_participants(tournament_id).await?;
        let matches = self.repository.list_matches(tournament_id).await?;

        let standings = compute_standings(&participants, &matches)?;
        let completion = resolve(&matches, &standings);
        let phase = phase(&matches);

        Ok(TournamentSnapshot {
            tournament,
            participants,
            matches,
            standings,
            completion,
            phase,
        })
    }

    /// Validate a score report against the stored pairing and persist it
    pub async fn report_result(
        &self,
        tournament_id: TournamentId,
        report: MatchReport,
    ) -> TournamentResult<Match> {
        let matches = self.repository.list_matches(tournament_id).await?;
        let existing = matches
            .iter()
            .find(|m| m.round == report.round && m.match_number == report.match_number)
            .ok_or(TournamentError::MatchNotFound {
                round: report.round,
                match_number: report.match_number,
            })?;

        validate_outcome(existing, report.winner)?;
        if report.status == MatchStatus::Completed && !report.winner.is_decided() {
            return Err(TournamentError::UndecidedResult {
                round: report.round,
                match_number: report.match_number,
            });
        }

        let updated = self
            .repository
            .update_match_result(tournament_id, &report)
            .await?;

        log::info!(
            "Tournament {} match {}.{} reported as {} ({}-{}, winner {})",
            tournament_id,
            updated.round,
            updated.match_number,
            updated.status,
            updated.score_a,
            updated.score_b,
            updated.winner
        );

        Ok(updated)
    }

    /// Pay the prize pool to `caller` if they won the completed tournament.
    ///
    /// The cash-out request carries a key derived from tournament and winner,
    /// so calling this again after a success cannot pay twice.
    pub async fn claim_winnings(
        &self,
        tournament_id: TournamentId,
        caller: ParticipantId,
    ) -> TournamentResult<CashOutReceipt> {
        let snapshot = self.snapshot(tournament_id).await?;

        let winner = match snapshot.completion.winner.as_ref() {
            Some(winner) if snapshot.completion.completed => winner,
            _ => return Err(TournamentError::NotCompleted(tournament_id)),
        };

        if winner.participant.id != caller {
            log::warn!(
                "Participant {} tried to claim tournament {} won by {}",
                caller,
                tournament_id,
                winner.participant.id
            );
            return Err(TournamentError::NotWinner(caller));
        }

        let request = CashOutRequest::prize(tournament_id, caller, snapshot.tournament.prize_pool);
        let receipt = self.wallet.cash_out(&request).await?;

        log::info!(
            "Paid {} to {} for winning tournament {}",
            receipt.amount,
            caller,
            tournament_id
        );

        Ok(receipt)
    }
}
