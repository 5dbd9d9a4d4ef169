//! Operator tool for NoctaZone round-robin tournaments.
//!
//! Works offline on JSON files (`schedule`, `standings`) or against the
//! tournament database and wallet API (`sync`, `claim`).

mod commands;
mod config;
mod logging;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use noctazone::{
    db::{Database, PgTournamentRepository},
    tournament::{
        Match, Participant, TournamentError, TournamentId, TournamentManager,
        TournamentSnapshot, compute_standings, generate_round_robin, phase, resolve,
    },
    wallet::HttpWalletClient,
};
use pico_args::Arguments;
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use commands::{Command, render_completion, render_standings};
use config::CliConfig;

const HELP: &str = "\
Manage NoctaZone round-robin tournaments

USAGE:
  nz_cli [OPTIONS] <COMMAND>

COMMANDS:
  schedule  --participants FILE                Print the round-robin schedule as JSON
  standings --participants FILE --matches FILE Print ranked standings and completion
  sync      --tournament UUID                  Ensure the stored schedule, print the snapshot
  claim     --tournament UUID --user UUID      Pay the prize pool to the winner

OPTIONS:
  --db-url     URL         Database connection string  [default: env DATABASE_URL]
  --wallet-url URL         Wallet API base URL         [default: env WALLET_API_URL or http://127.0.0.1:8081]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  DATABASE_URL                  PostgreSQL connection string
  WALLET_API_URL                Wallet API base URL
  WALLET_API_KEY                Bearer token for the wallet API
  TOURNAMENT_MIN_PARTICIPANTS   Smallest field that gets a schedule [default: 4]
  RUST_LOG                      Log filter [default: info,sqlx=warn,reqwest=warn]
";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let database_url: Option<String> = pargs.opt_value_from_str("--db-url")?;
    let wallet_url: Option<String> = pargs.opt_value_from_str("--wallet-url")?;
    let command = commands::parse_command(pargs)?;

    logging::init();

    let config = CliConfig::from_env(database_url, wallet_url);
    config.validate()?;

    let started = Instant::now();
    let name = command.name();
    run(command, &config).await?;
    logging::log_performance(name, started.elapsed().as_millis() as u64, None);

    Ok(())
}

async fn run(command: Command, config: &CliConfig) -> Result<()> {
    match command {
        Command::Schedule { participants } => {
            let participants: Vec<Participant> = read_json(&participants)?;
            let schedule = generate_round_robin(&participants);
            info!(
                "Generated {} matches for {} participants",
                schedule.len(),
                participants.len()
            );
            println!("{}", serde_json::to_string_pretty(&schedule)?);
        }
        Command::Standings {
            participants,
            matches,
        } => {
            let participants: Vec<Participant> = read_json(&participants)?;
            let matches: Vec<Match> = read_json(&matches)?;

            let standings = compute_standings(&participants, &matches).map_err(rejected)?;
            let completion = resolve(&matches, &standings);
            print!("{}", render_standings(&standings));
            println!("{}", render_completion(phase(&matches), &completion));
        }
        Command::Sync { tournament } => {
            let (db, manager) = connect(config).await?;
            let result = sync(&manager, tournament).await;
            db.close().await;

            let snapshot = result.map_err(rejected)?;
            info!(
                "Tournament {} ({}) is {:?}",
                snapshot.tournament.name, tournament, snapshot.phase
            );
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Command::Claim { tournament, user } => {
            let (db, manager) = connect(config).await?;
            let result = manager.claim_winnings(tournament, user).await;
            db.close().await;

            let receipt = result.map_err(rejected)?;
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }
    }

    Ok(())
}

/// Ensure the stored schedule, then load the snapshot
async fn sync(
    manager: &TournamentManager,
    tournament: TournamentId,
) -> Result<TournamentSnapshot, TournamentError> {
    manager.ensure_schedule(tournament).await?;
    manager.snapshot(tournament).await
}

/// Build a manager over PostgreSQL and the wallet API
async fn connect(config: &CliConfig) -> Result<(Database, TournamentManager)> {
    info!("Connecting to database");
    let db = Database::new(&config.database)
        .await
        .context("Failed to connect to database")?;
    db.health_check()
        .await
        .context("Database health check failed")?;

    let repository = Arc::new(PgTournamentRepository::new(db.pool().clone()));
    let wallet = Arc::new(HttpWalletClient::new(config.wallet.clone())?);
    let manager = TournamentManager::new(repository, wallet)
        .with_min_participants(config.min_participants);

    Ok((db, manager))
}

/// Log the full error and surface only its client-safe message
fn rejected(err: TournamentError) -> anyhow::Error {
    if err.is_validation() {
        warn!("Rejected tournament data: {}", err);
    } else {
        error!("Tournament operation failed: {}", err);
    }
    anyhow::anyhow!(err.client_message())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}
