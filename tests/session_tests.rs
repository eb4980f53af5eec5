//! End-to-end session tests: full games, reloads and stale state.

use survivor::core::{ChanceBounds, ScriptedRandom, SessionConfig, SessionRng};
use survivor::session::{OutcomeKind, ParticipantStatus, Presentation, SessionController, SessionPhase};
use survivor::storage::{FileStore, KeyValueStore, MemoryStore, Snapshot, STORAGE_KEY};

const NAMES: [&str; 4] = ["A", "B", "C", "D"];

/// Route engine logs to the test harness. Set `RUST_LOG=survivor=debug` to see them.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn seeded(names: &[&str], store: MemoryStore) -> SessionController<SessionRng, MemoryStore> {
    init_tracing();
    SessionController::open(names.iter().copied(), SessionConfig::default().with_seed(7), store)
}

/// With a denominator of one, a single round leaves exactly one winner.
#[test]
fn test_certain_elimination_game() {
    init_tracing();
    let config = SessionConfig::default().with_chances(ChanceBounds::new(1, 10, 4));
    let mut session = SessionController::start(NAMES, config, SessionRng::new(1), MemoryStore::new());

    let report = session.play_round(1);

    assert_eq!(report.eliminated.len(), 3);
    assert!(report.winner.is_some());
    assert_eq!(session.roster().count_survivors(), 1);
    assert_eq!(session.roster().count_losers(), 3);
    assert!(session.roster().has_winner());
    assert_eq!(session.phase(), SessionPhase::Complete);

    // Further rounds change nothing
    session.play_round(1);
    assert_eq!(session.roster().count_losers(), 3);
    assert_eq!(session.round_number(), 1);
}

/// A seeded game always finishes and keeps the counting invariant.
#[test]
fn test_game_runs_to_completion() {
    let names: Vec<String> = (0..20).map(|i| format!("P{}", i)).collect();
    let mut session = SessionController::open(
        names.clone(),
        SessionConfig::default().with_seed(99),
        MemoryStore::new(),
    );

    let mut rounds = 0;
    while !session.roster().has_winner() && rounds < 1000 {
        let report = session.play_round(3);
        let roster = session.roster();
        assert_eq!(
            roster.count_losers() + roster.count_survivors(),
            roster.count_names()
        );
        if report.winner.is_none() {
            assert_eq!(report.shake.is_some(), report.eliminated.is_empty());
        }
        rounds += 1;
    }

    assert!(session.roster().has_winner());
    assert_eq!(session.round_number(), rounds);

    let view = session.view();
    let winners: Vec<_> = view
        .participants
        .iter()
        .filter(|p| p.status == ParticipantStatus::Winner)
        .collect();
    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0].presentation, Some(Presentation::Winner));
}

/// Reloading with the same names, in any order, resumes the saved game.
#[test]
fn test_reload_resumes() {
    let mut session = SessionController::start(
        NAMES,
        SessionConfig::default(),
        ScriptedRandom::with_trials([true, false, false, false], false),
        MemoryStore::new(),
    );
    session.play_round(6);
    let saved = session.snapshot();
    let store = session.into_store();

    let resumed = seeded(&["D", "C", "B", "A"], store);

    assert_eq!(resumed.phase(), SessionPhase::InProgress);
    assert_eq!(resumed.round_number(), 1);
    assert_eq!(resumed.num_chances(), 6);
    assert_eq!(resumed.snapshot(), saved);
    assert!(resumed.roster().is_loser("A"));
    assert_eq!(
        resumed.view().participant("A").unwrap().status,
        ParticipantStatus::Loser
    );
}

/// A saved game for a different roster is discarded, not merged.
#[test]
fn test_stale_snapshot_discarded() {
    let mut session = seeded(&NAMES, MemoryStore::new());
    session.play_round(2);
    session.play_round(2);
    let store = session.into_store();

    let fresh = seeded(&["A", "B", "C", "E"], store);

    assert_eq!(fresh.phase(), SessionPhase::Fresh);
    assert_eq!(fresh.round_number(), 0);
    assert_eq!(fresh.roster().count_losers(), 0);
    assert!(!fresh.roster().contains("D"));
}

/// Older snapshots without chances or round count still load.
#[test]
fn test_narrow_snapshot_defaults() {
    let mut store = MemoryStore::new();
    store
        .set(STORAGE_KEY, r#"{"names":["B","A","C","D"],"losers":["C"]}"#)
        .unwrap();

    let session = seeded(&NAMES, store);

    assert_eq!(session.num_chances(), 4);
    assert_eq!(session.round_number(), 0);
    assert_eq!(session.roster().names().collect::<Vec<_>>(), vec!["B", "A", "C", "D"]);
    assert_eq!(
        session.presentation_of("C"),
        Some(Presentation::Eliminated(survivor::EliminationStyle::Shrink))
    );
}

/// Out-of-range stored chances are clamped on load.
#[test]
fn test_stored_chances_clamped() {
    let mut store = MemoryStore::new();
    let snapshot = Snapshot {
        names: NAMES.iter().map(|n| n.to_string()).collect(),
        losers: vec![],
        num_chances: Some(999),
        round_number: 4,
    };
    store.set(STORAGE_KEY, &snapshot.to_json().unwrap()).unwrap();

    let session = seeded(&NAMES, store);

    assert_eq!(session.num_chances(), 10);
    assert_eq!(session.round_number(), 4);
}

/// Garbage under the storage key starts a fresh session.
#[test]
fn test_malformed_snapshot_starts_fresh() {
    for raw in ["", "not json", "[]", r#"{"names":["A"]}"#, "null"] {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, raw).unwrap();

        let session = seeded(&NAMES, store);

        assert_eq!(session.phase(), SessionPhase::Fresh);
        assert_eq!(session.roster().count_names(), 4);
    }
}

/// A restored finished game shows its winner straight away.
#[test]
fn test_restored_winner() {
    let mut store = MemoryStore::new();
    store
        .set(STORAGE_KEY, r#"{"names":["A","B","C","D"],"losers":["A","B","D"],"numChances":3,"roundNumber":5}"#)
        .unwrap();

    let mut session = seeded(&NAMES, store);

    assert_eq!(session.phase(), SessionPhase::Complete);
    assert_eq!(session.presentation_of("C"), Some(Presentation::Winner));

    let report = session.play_round(3);
    assert_eq!(report.outcome_for("C"), Some(OutcomeKind::Winner));
    assert_eq!(report.round_number, 5);
}

/// Reset wipes storage, so the next start is fresh even with the same names.
#[test]
fn test_reset_then_reload() {
    let mut session = seeded(&NAMES, MemoryStore::new());
    session.play_round(2);
    session.reset_session();
    let store = session.into_store();

    assert!(store.get(STORAGE_KEY).unwrap().is_none());

    let reloaded = seeded(&NAMES, store);
    assert_eq!(reloaded.phase(), SessionPhase::Fresh);
}

/// Roster edits survive a reload.
#[test]
fn test_edits_persist() {
    let mut session = seeded(&NAMES, MemoryStore::new());
    assert!(session.add_participant("E"));
    assert!(session.remove_participant("A"));
    let store = session.into_store();

    let reloaded = seeded(&["B", "C", "D", "E"], store);

    assert_eq!(reloaded.roster().count_names(), 4);
    assert!(reloaded.roster().contains("E"));
    assert!(!reloaded.roster().contains("A"));
}

/// The file-backed store survives across controller instances.
#[test]
fn test_file_store_reload() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    let mut session =
        SessionController::open(NAMES, SessionConfig::default().with_seed(3), FileStore::new(dir.path()));
    session.close_config(5);
    session.play_round(5);
    let saved = session.snapshot();
    drop(session);

    let reloaded =
        SessionController::open(NAMES, SessionConfig::default().with_seed(4), FileStore::new(dir.path()));

    assert_eq!(reloaded.snapshot(), saved);
    assert!(dir.path().join(format!("{}.json", STORAGE_KEY)).exists());
}
