//! Subcommand parsing and output formatting.

use noctazone::tournament::{Completion, StandingsRow, TournamentPhase};
use pico_args::Arguments;
use std::fmt::Write;
use std::path::PathBuf;
use uuid::Uuid;

/// Operator commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the schedule for a participants file
    Schedule { participants: PathBuf },
    /// Rank participants from participants and matches files
    Standings { participants: PathBuf, matches: PathBuf },
    /// Ensure the stored schedule and print the snapshot
    Sync { tournament: Uuid },
    /// Pay out the prize to the caller if they won
    Claim { tournament: Uuid, user: Uuid },
}

impl Command {
    /// Subcommand name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Schedule { .. } => "schedule",
            Command::Standings { .. } => "standings",
            Command::Sync { .. } => "sync",
            Command::Claim { .. } => "claim",
        }
    }
}

/// Errors that can occur during command parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// No subcommand given
    #[error("Missing command. Use one of: schedule, standings, sync, claim")]
    MissingCommand,

    /// Unrecognized subcommand
    #[error("Unrecognized command '{0}'. Run with --help to see available commands")]
    UnrecognizedCommand(String),

    /// Missing or malformed option
    #[error("Invalid arguments: {0}")]
    Arguments(#[from] pico_args::Error),

    /// Arguments left over after parsing
    #[error("Unexpected arguments: {0}")]
    Unexpected(String),
}

/// Parse the subcommand and its options
pub fn parse_command(mut pargs: Arguments) -> Result<Command, ParseError> {
    let name = pargs.subcommand()?.ok_or(ParseError::MissingCommand)?;

    let command = match name.as_str() {
        "schedule" => Command::Schedule {
            participants: pargs.value_from_str("--participants")?,
        },
        "standings" => Command::Standings {
            participants: pargs.value_from_str("--participants")?,
            matches: pargs.value_from_str("--matches")?,
        },
        "sync" => Command::Sync {
            tournament: pargs.value_from_str("--tournament")?,
        },
        "claim" => Command::Claim {
            tournament: pargs.value_from_str("--tournament")?,
            user: pargs.value_from_str("--user")?,
        },
        other => return Err(ParseError::UnrecognizedCommand(other.to_string())),
    };

    let rest = pargs.finish();
    if !rest.is_empty() {
        let rest: Vec<String> = rest
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        return Err(ParseError::Unexpected(rest.join(" ")));
    }

    Ok(command)
}

/// Render standings as a fixed-width table
pub fn render_standings(standings: &[StandingsRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<20} {:>3} {:>3} {:>3} {:>4} {:>6} {:>3}",
        "#", "Player", "W", "D", "L", "Pts", "Agg", "P"
    );

    for (i, row) in standings.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:<20} {:>3} {:>3} {:>3} {:>4} {:>6} {:>3}",
            i + 1,
            row.participant.display_name,
            row.wins,
            row.draws,
            row.losses,
            row.points,
            row.aggregate_score,
            row.matches_played
        );
    }

    out
}

/// One-line summary of the tournament state
pub fn render_completion(phase: TournamentPhase, completion: &Completion) -> String {
    match (&completion.winner, phase) {
        (Some(winner), _) => format!(
            "Completed: {} wins with {} points",
            winner.participant.display_name, winner.points
        ),
        (None, TournamentPhase::NotStarted) => "Not started".to_string(),
        (None, _) => "In progress".to_string(),
    }
}
