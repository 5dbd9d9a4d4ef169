//! In-process `TournamentRepository` backed by a lock-protected map.
//!
//! Used by tests and by offline tooling that has no database.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::repository::TournamentRepository;
use crate::tournament::{
    Match, MatchReport, Participant, TournamentError, TournamentId, TournamentInfo,
    TournamentResult,
};

struct TournamentRecord {
    info: TournamentInfo,
    participants: Vec<Participant>,
    matches: Vec<Match>,
}

/// Memory-backed tournament store
#[derive(Default)]
pub struct MemoryTournamentRepository {
    tournaments: RwLock<HashMap<TournamentId, TournamentRecord>>,
}

impl MemoryTournamentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tournament, replacing any previous record with the same id
    pub async fn insert_tournament(&self, info: TournamentInfo) {
        self.tournaments.write().await.insert(
            info.id,
            TournamentRecord {
                info,
                participants: Vec::new(),
                matches: Vec::new(),
            },
        );
    }

    /// Add a participant to an existing tournament
    pub async fn add_participant(
        &self,
        tournament_id: TournamentId,
        participant: Participant,
    ) -> TournamentResult<()> {
        let mut tournaments = self.tournaments.write().await;
        let record = tournaments
            .get_mut(&tournament_id)
            .ok_or(TournamentError::NotFound(tournament_id))?;

        if record.participants.iter().any(|p| p.id == participant.id) {
            return Err(TournamentError::DuplicateParticipant(participant.id));
        }
        record.participants.push(participant);
        Ok(())
    }
}

#[async_trait]
impl TournamentRepository for MemoryTournamentRepository {
    async fn get_tournament(&self, tournament_id: TournamentId) -> TournamentResult<TournamentInfo> {
        self.tournaments
            .read()
            .await
            .get(&tournament_id)
            .map(|record| record.info.clone())
            .ok_or(TournamentError::NotFound(tournament_id))
    }

    async fn list_participants(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<Participant>> {
        let tournaments = self.tournaments.read().await;
        let record = tournaments
            .get(&tournament_id)
            .ok_or(TournamentError::NotFound(tournament_id))?;

        let mut participants = record.participants.clone();
        participants.sort_by(|a, b| a.joined_at.cmp(&b.joined_at).then(a.id.cmp(&b.id)));
        Ok(participants)
    }

    async fn list_matches(&self, tournament_id: TournamentId) -> TournamentResult<Vec<Match>> {
        let tournaments = self.tournaments.read().await;
        let record = tournaments
            .get(&tournament_id)
            .ok_or(TournamentError::NotFound(tournament_id))?;

        let mut matches = record.matches.clone();
        matches.sort_by_key(|m| (m.round, m.match_number));
        Ok(matches)
    }

    async fn ensure_matches(
        &self,
        tournament_id: TournamentId,
        schedule: &[Match],
    ) -> TournamentResult<Vec<Match>> {
        {
            let mut tournaments = self.tournaments.write().await;
            let record = tournaments
                .get_mut(&tournament_id)
                .ok_or(TournamentError::NotFound(tournament_id))?;

            if record.matches.is_empty() {
                record.matches = schedule.to_vec();
            }
        }

        self.list_matches(tournament_id).await
    }

    async fn update_match_result(
        &self,
        tournament_id: TournamentId,
        report: &MatchReport,
    ) -> TournamentResult<Match> {
        let mut tournaments = self.tournaments.write().await;
        let record = tournaments
            .get_mut(&tournament_id)
            .ok_or(TournamentError::NotFound(tournament_id))?;

        let m = record
            .matches
            .iter_mut()
            .find(|m| m.round == report.round && m.match_number == report.match_number)
            .ok_or(TournamentError::MatchNotFound {
                round: report.round,
                match_number: report.match_number,
            })?;

        m.score_a = report.score_a;
        m.score_b = report.score_b;
        m.winner = report.winner;
        m.status = report.status;
        Ok(m.clone())
    }
}
