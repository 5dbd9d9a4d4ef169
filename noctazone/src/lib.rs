//! # NoctaZone
//!
//! Round-robin tournament engine for the NoctaZone gaming platform.
//!
//! The engine is three pure functions over participants and matches:
//!
//! - **Bracket generation**: circle-method round-robin schedule, with a bye
//!   for odd fields
//! - **Standings**: 3 points per win, 1 per draw, ranked by points, aggregate
//!   score, wins and join time
//! - **Completion**: tournament phase and the single winner once every match
//!   is completed
//!
//! Around it sit the seams to the outside world: a data-access trait for
//! participants and matches, and a wallet gateway for paying the winner.
//!
//! ## Core Modules
//!
//! - [`tournament`]: engine, models and the [`TournamentManager`]
//! - [`db`]: connection pool and [`db::TournamentRepository`] implementations
//! - [`wallet`]: cash-out gateway and its HTTP client
//!
//! ## Example
//!
//! ```
//! use noctazone::tournament::{round_count, generate_round_robin};
//!
//! assert_eq!(round_count(5), 5);
//! assert!(generate_round_robin(&[]).is_empty());
//! ```

/// Database pool and tournament repositories.
pub mod db;

/// Bracket, standings and completion engine.
pub mod tournament;

/// Prize payouts through the wallet service.
pub mod wallet;

pub use tournament::{
    Completion, Match, MatchStatus, MatchWinner, Participant, StandingsRow, TournamentError,
    TournamentManager, TournamentResult, compute_standings, generate_round_robin, resolve,
};
