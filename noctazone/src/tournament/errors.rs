//! Tournament error types.

use super::models::{MatchWinner, ParticipantId, TournamentId};
use crate::wallet::WalletError;
use thiserror::Error;

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    /// Tournament not found
    #[error("Tournament not found: {0}")]
    NotFound(TournamentId),

    /// Same participant listed twice
    #[error("Duplicate participant: {0}")]
    DuplicateParticipant(ParticipantId),

    /// Match references someone outside the participant list
    #[error("Match {round}.{match_number} references unknown participant {participant}")]
    UnknownParticipant {
        round: u32,
        match_number: u32,
        participant: ParticipantId,
    },

    /// Match pairs a participant with itself
    #[error("Match {round}.{match_number} pairs participant {participant} with itself")]
    SelfPairing {
        round: u32,
        match_number: u32,
        participant: ParticipantId,
    },

    /// Winner is neither player of the match
    #[error("Match {round}.{match_number} names winner {winner}, who is not playing in it")]
    ForeignWinner {
        round: u32,
        match_number: u32,
        winner: MatchWinner,
    },

    /// Completed match without a result
    #[error("Match {round}.{match_number} is completed but has no winner")]
    UndecidedResult { round: u32, match_number: u32 },

    /// No match at the given position
    #[error("Match {round}.{match_number} not found")]
    MatchNotFound { round: u32, match_number: u32 },

    /// Too few participants to start
    #[error("Insufficient participants: need {needed}, have {current}")]
    InsufficientParticipants { needed: usize, current: usize },

    /// Matches still outstanding
    #[error("Tournament {0} is not completed")]
    NotCompleted(TournamentId),

    /// Caller is not the resolved winner
    #[error("Participant {0} did not win this tournament")]
    NotWinner(ParticipantId),

    /// Stored row could not be decoded
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Wallet error
    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),
}

impl TournamentError {
    /// Whether the error comes from malformed tournament data rather than
    /// infrastructure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TournamentError::DuplicateParticipant(_)
                | TournamentError::UnknownParticipant { .. }
                | TournamentError::SelfPairing { .. }
                | TournamentError::ForeignWinner { .. }
                | TournamentError::UndecidedResult { .. }
        )
    }

    /// Get a client-safe error message that doesn't leak internals
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::Database(_) | TournamentError::CorruptRecord(_) => {
                "Internal server error".to_string()
            }
            TournamentError::Wallet(e) => e.client_message(),
            _ => self.to_string(),
        }
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;
