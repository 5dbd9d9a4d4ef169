//! Repository trait definitions for testability and dependency injection.
//!
//! [`TournamentRepository`] is the narrow data-access interface the
//! tournament manager depends on: two reads, one idempotent schedule write
//! and the result update used by match reporting.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::tournament::{
    Match, MatchReport, MatchStatus, MatchWinner, Participant, TournamentError, TournamentId,
    TournamentInfo, TournamentResult,
};

/// Trait for tournament repository operations
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    /// Get tournament information
    async fn get_tournament(&self, tournament_id: TournamentId) -> TournamentResult<TournamentInfo>;

    /// List participants, earliest joiner first
    async fn list_participants(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<Participant>>;

    /// List matches ordered by round, then match number
    async fn list_matches(&self, tournament_id: TournamentId) -> TournamentResult<Vec<Match>>;

    /// Persist `schedule` unless the tournament already has matches.
    ///
    /// Returns the stored schedule either way; an existing schedule is never
    /// regenerated or duplicated.
    async fn ensure_matches(
        &self,
        tournament_id: TournamentId,
        schedule: &[Match],
    ) -> TournamentResult<Vec<Match>>;

    /// Store a reported score/winner and return the updated match
    async fn update_match_result(
        &self,
        tournament_id: TournamentId,
        report: &MatchReport,
    ) -> TournamentResult<Match>;
}

/// Default PostgreSQL implementation of `TournamentRepository`
#[derive(Clone)]
pub struct PgTournamentRepository {
    pool: PgPool,
}

impl PgTournamentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn to_u32(value: i32, column: &str) -> TournamentResult<u32> {
    u32::try_from(value)
        .map_err(|_| TournamentError::CorruptRecord(format!("negative {column}: {value}")))
}

fn match_from_row(row: &PgRow) -> TournamentResult<Match> {
    let winner = MatchWinner::try_from(row.get::<Option<String>, _>("winner"))
        .map_err(TournamentError::CorruptRecord)?;
    let status = row
        .get::<String, _>("status")
        .parse::<MatchStatus>()
        .map_err(TournamentError::CorruptRecord)?;

    Ok(Match {
        round: to_u32(row.get("round"), "round")?,
        match_number: to_u32(row.get("match_number"), "match_number")?,
        player_a: row.get("player_a"),
        player_b: row.get("player_b"),
        score_a: row.get("score_a"),
        score_b: row.get("score_b"),
        winner,
        status,
    })
}

#[async_trait]
impl TournamentRepository for PgTournamentRepository {
    async fn get_tournament(&self, tournament_id: TournamentId) -> TournamentResult<TournamentInfo> {
        let row = sqlx::query(
            "SELECT id, name, prize_pool, created_at FROM tournaments WHERE id = $1",
        )
        .bind(tournament_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(TournamentError::NotFound(tournament_id))?;

        Ok(TournamentInfo {
            id: row.get("id"),
            name: row.get("name"),
            prize_pool: row.get("prize_pool"),
            created_at: row.get("created_at"),
        })
    }

    async fn list_participants(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<Participant>> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, display_name, joined_at
            FROM tournament_participants
            WHERE tournament_id = $1
            ORDER BY joined_at, user_id
            "#,
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Participant {
                id: row.get("user_id"),
                display_name: row.get("display_name"),
                joined_at: row.get("joined_at"),
            })
            .collect())
    }

    async fn list_matches(&self, tournament_id: TournamentId) -> TournamentResult<Vec<Match>> {
        let rows = sqlx::query(
            r#"
            SELECT round, match_number, player_a, player_b, score_a, score_b, winner, status
            FROM tournament_matches
            WHERE tournament_id = $1
            ORDER BY round, match_number
            "#,
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(match_from_row).collect()
    }

    async fn ensure_matches(
        &self,
        tournament_id: TournamentId,
        schedule: &[Match],
    ) -> TournamentResult<Vec<Match>> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent schedule creation for one tournament
        sqlx::query("SELECT id FROM tournaments WHERE id = $1 FOR UPDATE")
            .bind(tournament_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(TournamentError::NotFound(tournament_id))?;

        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM tournament_matches WHERE tournament_id = $1")
                .bind(tournament_id)
                .fetch_one(&mut *tx)
                .await?;

        if existing == 0 {
            for m in schedule {
                sqlx::query(
                    r#"
                    INSERT INTO tournament_matches
                        (tournament_id, round, match_number, player_a, player_b, score_a, score_b, winner, status)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                    "#,
                )
                .bind(tournament_id)
                .bind(m.round as i32)
                .bind(m.match_number as i32)
                .bind(m.player_a)
                .bind(m.player_b)
                .bind(m.score_a)
                .bind(m.score_b)
                .bind(Option::<String>::from(m.winner))
                .bind(m.status.as_str())
                .execute(&mut *tx)
                .await?;
            }
            log::info!(
                "Stored {} matches for tournament {}",
                schedule.len(),
                tournament_id
            );
        } else {
            log::debug!(
                "Tournament {} already has {} matches, keeping them",
                tournament_id,
                existing
            );
        }

        tx.commit().await?;

        self.list_matches(tournament_id).await
    }

    async fn update_match_result(
        &self,
        tournament_id: TournamentId,
        report: &MatchReport,
    ) -> TournamentResult<Match> {
        let row = sqlx::query(
            r#"
            UPDATE tournament_matches
            SET score_a = $1, score_b = $2, winner = $3, status = $4, updated_at = NOW()
            WHERE tournament_id = $5 AND round = $6 AND match_number = $7
            RETURNING round, match_number, player_a, player_b, score_a, score_b, winner, status
            "#,
        )
        .bind(report.score_a)
        .bind(report.score_b)
        .bind(Option::<String>::from(report.winner))
        .bind(report.status.as_str())
        .bind(tournament_id)
        .bind(report.round as i32)
        .bind(report.match_number as i32)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(TournamentError::MatchNotFound {
            round: report.round,
            match_number: report.match_number,
        })?;

        match_from_row(&row)
    }
}
