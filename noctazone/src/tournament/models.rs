//! Tournament data models for round-robin brackets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Tournament ID type
pub type TournamentId = Uuid;

/// Participant ID type (the member's user id in the backend)
pub type ParticipantId = Uuid;

/// Points awarded for a win
pub const POINTS_PER_WIN: u32 = 3;

/// Points awarded to each side of a draw
pub const POINTS_PER_DRAW: u32 = 1;

/// Wire sentinel for a drawn match
const DRAW_SENTINEL: &str = "draw";

/// A tournament member as loaded for a single computation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Participant ID
    pub id: ParticipantId,
    /// Display name
    pub display_name: String,
    /// When the participant joined the tournament (last-resort tie-break)
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    /// Create a participant
    pub fn new(id: ParticipantId, display_name: impl Into<String>, joined_at: DateTime<Utc>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            joined_at,
        }
    }
}

/// Outcome recorded on a match.
///
/// Serialized the way the backend stores it: `null` while undecided, the
/// string `"draw"`, or the winning participant's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Option<String>", into = "Option<String>")]
pub enum MatchWinner {
    /// No result yet
    #[default]
    Undecided,
    /// Both players split the points
    Draw,
    /// The given participant won
    Won(ParticipantId),
}

impl MatchWinner {
    /// Whether a result has been decided
    pub fn is_decided(&self) -> bool {
        !matches!(self, MatchWinner::Undecided)
    }
}

impl From<MatchWinner> for Option<String> {
    fn from(winner: MatchWinner) -> Self {
        match winner {
            MatchWinner::Undecided => None,
            MatchWinner::Draw => Some(DRAW_SENTINEL.to_string()),
            MatchWinner::Won(id) => Some(id.to_string()),
        }
    }
}

impl TryFrom<Option<String>> for MatchWinner {
    type Error = String;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        match value.as_deref() {
            None | Some("") => Ok(MatchWinner::Undecided),
            Some(DRAW_SENTINEL) => Ok(MatchWinner::Draw),
            Some(raw) => Uuid::parse_str(raw)
                .map(MatchWinner::Won)
                .map_err(|e| format!("invalid match winner {raw:?}: {e}")),
        }
    }
}

impl fmt::Display for MatchWinner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchWinner::Undecided => write!(f, "undecided"),
            MatchWinner::Draw => write!(f, "{DRAW_SENTINEL}"),
            MatchWinner::Won(id) => write!(f, "{id}"),
        }
    }
}

/// Match status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// Not played or not reported yet
    #[default]
    Pending,
    /// Result reported and accepted
    Completed,
    /// Result contested by a player
    Disputed,
}

impl MatchStatus {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Completed => "completed",
            MatchStatus::Disputed => "disputed",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MatchStatus::Pending),
            "completed" => Ok(MatchStatus::Completed),
            "disputed" => Ok(MatchStatus::Disputed),
            other => Err(format!("unknown match status: {other}")),
        }
    }
}

/// A single pairing in the schedule.
///
/// Identified within its tournament by `(round, match_number)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Round number (1-indexed)
    pub round: u32,
    /// Match number within the round (1-indexed)
    pub match_number: u32,
    /// First player
    pub player_a: ParticipantId,
    /// Second player
    pub player_b: ParticipantId,
    /// Score reported for player A
    #[serde(default)]
    pub score_a: i32,
    /// Score reported for player B
    #[serde(default)]
    pub score_b: i32,
    /// Recorded outcome
    #[serde(default)]
    pub winner: MatchWinner,
    /// Current status
    #[serde(default)]
    pub status: MatchStatus,
}

impl Match {
    /// Create a pending, unscored match
    pub fn pending(round: u32, match_number: u32, player_a: ParticipantId, player_b: ParticipantId) -> Self {
        Self {
            round,
            match_number,
            player_a,
            player_b,
            score_a: 0,
            score_b: 0,
            winner: MatchWinner::Undecided,
            status: MatchStatus::Pending,
        }
    }

    /// Whether the given participant plays in this match
    pub fn involves(&self, participant: ParticipantId) -> bool {
        self.player_a == participant || self.player_b == participant
    }

    /// Whether the match counts towards standings
    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// The score `participant` put up in this match
    pub fn score_of(&self, participant: ParticipantId) -> Option<i32> {
        if self.player_a == participant {
            Some(self.score_a)
        } else if self.player_b == participant {
            Some(self.score_b)
        } else {
            None
        }
    }
}

/// Derived leaderboard entry for one participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub participant: Participant,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub points: u32,
    /// Sum of the participant's own scores over completed matches
    pub aggregate_score: i64,
    pub matches_played: u32,
}

impl StandingsRow {
    /// Empty row for a participant with no completed matches
    pub fn new(participant: Participant) -> Self {
        Self {
            participant,
            wins: 0,
            losses: 0,
            draws: 0,
            points: 0,
            aggregate_score: 0,
            matches_played: 0,
        }
    }
}

/// Result of resolving a tournament's completion
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Completion {
    /// Every match is completed
    pub completed: bool,
    /// Winner, present only when completed
    pub winner: Option<StandingsRow>,
}

/// Derived lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentPhase {
    /// No schedule exists yet
    NotStarted,
    /// Some matches are pending or disputed
    InProgress,
    /// All matches completed, winner determined
    Completed,
}

/// Tournament information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentInfo {
    /// Tournament ID
    pub id: TournamentId,
    /// Tournament name
    pub name: String,
    /// Amount paid out to the winner
    pub prize_pool: i64,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// A score/winner update submitted for one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub round: u32,
    pub match_number: u32,
    pub score_a: i32,
    pub score_b: i32,
    pub winner: MatchWinner,
    pub status: MatchStatus,
}

/// Everything derived for a tournament in one pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    pub tournament: TournamentInfo,
    pub participants: Vec<Participant>,
    pub matches: Vec<Match>,
    pub standings: Vec<StandingsRow>,
    pub completion: Completion,
    pub phase: TournamentPhase,
}
