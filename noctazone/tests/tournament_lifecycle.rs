//! Integration tests for the tournament lifecycle
//!
//! These tests drive the manager from schedule creation through result
//! reporting to the winner's payout, using the in-memory repository and a
//! recording wallet gateway.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use noctazone::db::{MemoryTournamentRepository, TournamentRepository};
use noctazone::tournament::{
    Match, MatchReport, MatchStatus, MatchWinner, Participant, ParticipantId, TournamentError,
    TournamentId, TournamentInfo, TournamentManager, TournamentPhase,
};
use noctazone::wallet::{CashOutGateway, CashOutReceipt, CashOutRequest, WalletResult};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Wallet gateway that records requests and de-duplicates by idempotency key
#[derive(Default)]
struct RecordingWallet {
    requests: Mutex<Vec<CashOutRequest>>,
}

impl RecordingWallet {
    fn paid_keys(&self) -> HashSet<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.idempotency_key.clone())
            .collect()
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CashOutGateway for RecordingWallet {
    async fn cash_out(&self, request: &CashOutRequest) -> WalletResult<CashOutReceipt> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(CashOutReceipt {
            transaction_id: format!("tx-{}", request.idempotency_key),
            user_id: request.user_id,
            amount: request.amount,
            balance_after: request.amount,
            created_at: ts(0),
        })
    }
}

fn ts(offset: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + offset, 0).unwrap()
}

struct Fixture {
    repo: Arc<MemoryTournamentRepository>,
    wallet: Arc<RecordingWallet>,
    manager: TournamentManager,
    tournament_id: TournamentId,
    players: Vec<Participant>,
}

/// Helper to create a tournament with `n` participants joined one minute apart
async fn setup(n: usize) -> Fixture {
    let repo = Arc::new(MemoryTournamentRepository::new());
    let wallet = Arc::new(RecordingWallet::default());
    let tournament_id = Uuid::from_u128(0xC0FFEE);

    repo.insert_tournament(TournamentInfo {
        id: tournament_id,
        name: "Friday Night Frags".to_string(),
        prize_pool: 2_000,
        created_at: ts(0),
    })
    .await;

    let names = ["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"];
    let mut players = Vec::new();
    for (i, name) in names.iter().take(n).enumerate() {
        let p = Participant::new(Uuid::from_u128(i as u128 + 1), *name, ts(60 * (i as i64 + 1)));
        repo.add_participant(tournament_id, p.clone()).await.unwrap();
        players.push(p);
    }

    let manager = TournamentManager::new(repo.clone(), wallet.clone());

    Fixture {
        repo,
        wallet,
        manager,
        tournament_id,
        players,
    }
}

fn report(m: &Match, score_a: i32, score_b: i32, winner: MatchWinner) -> MatchReport {
    MatchReport {
        round: m.round,
        match_number: m.match_number,
        score_a,
        score_b,
        winner,
        status: MatchStatus::Completed,
    }
}

/// Report every match; `favourite` wins each of theirs 3-0, others draw 1-1
async fn play_out(fx: &Fixture, schedule: &[Match], favourite: ParticipantId) {
    for m in schedule {
        let r = if m.player_a == favourite {
            report(m, 3, 0, MatchWinner::Won(favourite))
        } else if m.player_b == favourite {
            report(m, 0, 3, MatchWinner::Won(favourite))
        } else {
            report(m, 1, 1, MatchWinner::Draw)
        };
        fx.manager.report_result(fx.tournament_id, r).await.unwrap();
    }
}

#[tokio::test]
async fn test_schedule_requires_minimum_field() {
    let fx = setup(3).await;

    let err = fx.manager.ensure_schedule(fx.tournament_id).await.unwrap_err();
    assert!(matches!(
        err,
        TournamentError::InsufficientParticipants { needed: 4, current: 3 }
    ));

    // A lowered minimum lets a three-player field start, with a bye each round
    let manager = fx.manager.clone().with_min_participants(3);
    let schedule = manager.ensure_schedule(fx.tournament_id).await.unwrap();
    assert_eq!(schedule.len(), 3);
    assert_eq!(schedule.iter().map(|m| m.round).max(), Some(3));
}

#[tokio::test]
async fn test_ensure_schedule_is_idempotent() {
    let fx = setup(4).await;

    let first = fx.manager.ensure_schedule(fx.tournament_id).await.unwrap();
    assert_eq!(first.len(), 6);

    // A late joiner must not cause the stored schedule to be regenerated
    fx.repo
        .add_participant(fx.tournament_id, Participant::new(Uuid::from_u128(99), "late", ts(9_999)))
        .await
        .unwrap();

    let second = fx.manager.ensure_schedule(fx.tournament_id).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(fx.repo.list_matches(fx.tournament_id).await.unwrap().len(), 6);
}

#[tokio::test]
async fn test_stored_schedule_survives_raised_minimum() {
    let fx = setup(3).await;

    // Scheduled while three players were enough
    let lenient = fx.manager.clone().with_min_participants(3);
    let stored = lenient.ensure_schedule(fx.tournament_id).await.unwrap();
    assert_eq!(stored.len(), 3);

    // The default minimum of 4 must not reject an existing schedule
    assert_eq!(fx.manager.min_participants(), 4);
    let again = fx.manager.ensure_schedule(fx.tournament_id).await.unwrap();
    assert_eq!(again, stored);

    let snapshot = fx.manager.snapshot(fx.tournament_id).await.unwrap();
    assert_eq!(snapshot.phase, TournamentPhase::InProgress);
}

#[tokio::test]
async fn test_snapshot_phases() {
    let fx = setup(4).await;

    let snapshot = fx.manager.snapshot(fx.tournament_id).await.unwrap();
    assert_eq!(snapshot.phase, TournamentPhase::NotStarted);
    assert!(!snapshot.completion.completed);
    assert_eq!(snapshot.standings.len(), 4);

    let schedule = fx.manager.ensure_schedule(fx.tournament_id).await.unwrap();
    fx.manager
        .report_result(fx.tournament_id, report(&schedule[0], 2, 1, MatchWinner::Won(schedule[0].player_a)))
        .await
        .unwrap();

    let snapshot = fx.manager.snapshot(fx.tournament_id).await.unwrap();
    assert_eq!(snapshot.phase, TournamentPhase::InProgress);
    assert!(snapshot.completion.winner.is_none());
}

#[tokio::test]
async fn test_full_tournament_crowns_unbeaten_player() {
    let fx = setup(4).await;
    let alpha = fx.players[0].id;

    let schedule = fx.manager.ensure_schedule(fx.tournament_id).await.unwrap();
    play_out(&fx, &schedule, alpha).await;

    let snapshot = fx.manager.snapshot(fx.tournament_id).await.unwrap();
    assert_eq!(snapshot.phase, TournamentPhase::Completed);

    let top = &snapshot.standings[0];
    assert_eq!(top.participant.id, alpha);
    assert_eq!((top.wins, top.losses, top.draws, top.points), (3, 0, 0, 9));
    assert_eq!(top.aggregate_score, 9);

    assert!(snapshot.completion.completed);
    assert_eq!(snapshot.completion.winner.as_ref().unwrap().participant.id, alpha);

    // Others: one loss to alpha, two draws each
    for row in &snapshot.standings[1..] {
        assert_eq!((row.wins, row.losses, row.draws, row.points), (0, 1, 2, 2));
    }
}

#[tokio::test]
async fn test_claim_winnings() {
    let fx = setup(4).await;
    let alpha = fx.players[0].id;
    let bravo = fx.players[1].id;

    let schedule = fx.manager.ensure_schedule(fx.tournament_id).await.unwrap();

    // Nothing to claim mid-tournament
    let err = fx.manager.claim_winnings(fx.tournament_id, alpha).await.unwrap_err();
    assert!(matches!(err, TournamentError::NotCompleted(_)));

    play_out(&fx, &schedule, alpha).await;

    let err = fx.manager.claim_winnings(fx.tournament_id, bravo).await.unwrap_err();
    assert!(matches!(err, TournamentError::NotWinner(id) if id == bravo));
    assert_eq!(fx.wallet.request_count(), 0);

    let receipt = fx.manager.claim_winnings(fx.tournament_id, alpha).await.unwrap();
    assert_eq!(receipt.user_id, alpha);
    assert_eq!(receipt.amount, 2_000);

    // A repeated claim reuses the same idempotency key
    fx.manager.claim_winnings(fx.tournament_id, alpha).await.unwrap();
    assert_eq!(fx.wallet.request_count(), 2);
    assert_eq!(fx.wallet.paid_keys().len(), 1);
}

#[tokio::test]
async fn test_report_validation() {
    let fx = setup(4).await;
    let schedule = fx.manager.ensure_schedule(fx.tournament_id).await.unwrap();
    let m = &schedule[0];
    let outsider = fx
        .players
        .iter()
        .map(|p| p.id)
        .find(|id| !m.involves(*id))
        .unwrap();

    let err = fx
        .manager
        .report_result(fx.tournament_id, report(m, 1, 0, MatchWinner::Won(outsider)))
        .await
        .unwrap_err();
    assert!(matches!(err, TournamentError::ForeignWinner { .. }));

    let err = fx
        .manager
        .report_result(fx.tournament_id, report(m, 1, 0, MatchWinner::Undecided))
        .await
        .unwrap_err();
    assert!(matches!(err, TournamentError::UndecidedResult { .. }));

    let mut missing = report(m, 1, 0, MatchWinner::Draw);
    missing.round = 42;
    let err = fx
        .manager
        .report_result(fx.tournament_id, missing)
        .await
        .unwrap_err();
    assert!(matches!(err, TournamentError::MatchNotFound { round: 42, .. }));

    // Disputes may be filed without a decided winner and don't count
    let dispute = MatchReport {
        status: MatchStatus::Disputed,
        ..report(m, 1, 0, MatchWinner::Undecided)
    };
    let stored = fx.manager.report_result(fx.tournament_id, dispute).await.unwrap();
    assert_eq!(stored.status, MatchStatus::Disputed);

    let snapshot = fx.manager.snapshot(fx.tournament_id).await.unwrap();
    assert!(snapshot.standings.iter().all(|r| r.matches_played == 0));
}

#[tokio::test]
async fn test_odd_field_with_tied_leaders() {
    let fx = setup(5).await;
    let manager = fx.manager.clone();
    let schedule = manager.ensure_schedule(fx.tournament_id).await.unwrap();
    assert_eq!(schedule.len(), 10);

    // Every match drawn 2-2: everyone on 4 points and 8 aggregate,
    // so the earliest joiner takes it
    for m in &schedule {
        manager
            .report_result(fx.tournament_id, report(m, 2, 2, MatchWinner::Draw))
            .await
            .unwrap();
    }

    let snapshot = manager.snapshot(fx.tournament_id).await.unwrap();
    assert!(snapshot.standings.iter().all(|r| r.points == 4 && r.aggregate_score == 8));
    let winner = snapshot.completion.winner.unwrap();
    assert_eq!(winner.participant.id, fx.players[0].id);
    assert_eq!(snapshot.standings[0].participant.id, fx.players[0].id);
}
