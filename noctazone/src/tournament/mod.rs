//! Tournament module for round-robin tournaments.
//!
//! This module provides:
//! - Round-robin schedule generation with byes for odd fields
//! - Standings with win/draw/loss points and deterministic tie-breaks
//! - Completion and winner resolution
//! - A manager that ties these to the data store and the wallet
//!
//! The three engine pieces are pure functions of their inputs.
//!
//! ## Example
//!
//! ```
//! use chrono::{Duration, Utc};
//! use noctazone::tournament::{Participant, compute_standings, generate_round_robin, resolve};
//! use uuid::Uuid;
//!
//! let start = Utc::now();
//! let field: Vec<Participant> = ["ava", "bo", "cy", "di"]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, name)| Participant::new(Uuid::new_v4(), *name, start + Duration::seconds(i as i64)))
//!     .collect();
//!
//! let schedule = generate_round_robin(&field);
//! assert_eq!(schedule.len(), 6);
//!
//! let standings = compute_standings(&field, &schedule).unwrap();
//! let completion = resolve(&schedule, &standings);
//! assert!(!completion.completed);
//! ```

pub mod bracket;
pub mod completion;
pub mod errors;
pub mod manager;
pub mod models;
pub mod standings;

pub use bracket::{generate_round_robin, round_count};
pub use completion::{phase, resolve};
pub use errors::{TournamentError, TournamentResult};
pub use manager::{DEFAULT_MIN_PARTICIPANTS, TournamentManager};
pub use models::{
    Completion, Match, MatchReport, MatchStatus, MatchWinner, Participant, ParticipantId,
    StandingsRow, TournamentId, TournamentInfo, TournamentPhase, TournamentSnapshot,
};
pub use standings::{compute_standings, rank_order};
