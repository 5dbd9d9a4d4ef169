//! Wallet data models.

use crate::tournament::models::{ParticipantId, TournamentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to pay a tournament prize into the winner's wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashOutRequest {
    pub tournament_id: TournamentId,
    pub user_id: ParticipantId,
    pub amount: i64,
    pub idempotency_key: String,
}

impl CashOutRequest {
    /// Build a prize payout request.
    ///
    /// The idempotency key depends only on tournament and winner, so repeated
    /// claims for the same result collapse into one transfer.
    pub fn prize(tournament_id: TournamentId, user_id: ParticipantId, amount: i64) -> Self {
        Self {
            tournament_id,
            user_id,
            amount,
            idempotency_key: format!("tournament_prize:{tournament_id}:{user_id}"),
        }
    }
}

/// Wallet API acknowledgement of a cash-out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashOutReceipt {
    pub transaction_id: String,
    pub user_id: ParticipantId,
    pub amount: i64,
    pub balance_after: i64,
    pub created_at: DateTime<Utc>,
}
