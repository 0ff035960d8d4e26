//! Whole-game flows through the public API, with scores on disk.

use std::collections::HashMap;

use tempfile::TempDir;
use tui_memory::core::{
    BestScores, GameState, MemoryStore, ScoreRecord, ScoreStore, SelectOutcome, Session,
};
use tui_memory::store::JsonFileStore;
use tui_memory::types::{Difficulty, GameAction, SessionEvent, MATCH_TOAST_MS, MISMATCH_DELAY_MS};

/// Index pairs sharing a symbol, in board order.
fn pairs_of<S: ScoreStore>(session: &Session<S>) -> Vec<(usize, usize)> {
    let mut first_seen: HashMap<char, usize> = HashMap::new();
    let mut pairs = Vec::new();
    for (i, tile) in session.board().tiles().iter().enumerate() {
        match first_seen.remove(&tile.symbol) {
            Some(j) => pairs.push((j, i)),
            None => {
                first_seen.insert(tile.symbol, i);
            }
        }
    }
    pairs
}

/// Two indices holding different symbols.
fn mismatched_pair<S: ScoreStore>(session: &Session<S>) -> (usize, usize) {
    let tiles = session.board().tiles();
    let other = tiles
        .iter()
        .position(|t| t.symbol != tiles[0].symbol)
        .unwrap();
    (0, other)
}

#[test]
fn perfect_play_wins_every_difficulty() {
    for difficulty in Difficulty::ALL {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("scores.json"));
        let mut session = Session::new(difficulty, 2024, store).unwrap();

        for (a, b) in pairs_of(&session) {
            assert_eq!(session.select(a), SelectOutcome::Revealed);
            assert!(matches!(session.select(b), SelectOutcome::Matched { .. }));
        }

        assert!(session.finished());
        assert!(!session.timer_running());
        assert_eq!(session.moves() as usize, difficulty.pairs());
        assert_eq!(
            session.best(),
            Some(ScoreRecord::new(difficulty.pairs() as u32, 0))
        );
    }
}

#[test]
fn mismatch_locks_input_then_counts_a_move() {
    let mut session = Session::new(Difficulty::Medium, 5, MemoryStore::new()).unwrap();
    let (a, b) = mismatched_pair(&session);
    let third = (0..16).find(|&i| i != a && i != b).unwrap();

    session.select(a);
    assert_eq!(session.select(b), SelectOutcome::Mismatched);
    assert!(session.input_locked());
    assert_eq!(session.select(third), SelectOutcome::Ignored);

    session.tick(MISMATCH_DELAY_MS - 1);
    assert!(session.is_revealed(a) && session.is_revealed(b));

    session.tick(1);
    assert!(!session.input_locked());
    assert!(session.selection().is_empty());
    assert_eq!(session.moves(), 1);
    assert_eq!(session.select(third), SelectOutcome::Revealed);
}

#[test]
fn clock_counts_whole_seconds_from_first_selection() {
    let mut session = Session::new(Difficulty::Hard, 8, MemoryStore::new()).unwrap();

    session.tick(5_000);
    assert_eq!(session.elapsed_seconds(), 0);

    session.select(0);
    for _ in 0..50 {
        session.tick(50);
    }
    assert_eq!(session.elapsed_seconds(), 2);
    session.tick(499);
    assert_eq!(session.elapsed_seconds(), 2);
    session.tick(1);
    assert_eq!(session.elapsed_seconds(), 3);
}

#[test]
fn toast_expires_after_its_delay() {
    let mut session = Session::new(Difficulty::Medium, 11, MemoryStore::new()).unwrap();
    let (a, b) = pairs_of(&session)[0];
    session.select(a);
    session.select(b);

    let symbol = session.board().tiles()[a].symbol;
    assert_eq!(session.toast().map(|t| t.symbol), Some(symbol));
    session.tick(MATCH_TOAST_MS);
    assert!(session.toast().is_none());
}

#[test]
fn restart_during_mismatch_cancels_pending_flip() {
    let mut session = Session::new(Difficulty::Medium, 13, MemoryStore::new()).unwrap();
    let (a, b) = mismatched_pair(&session);
    session.select(a);
    session.select(b);
    session.restart().unwrap();
    session.take_events();

    session.select(0);
    session.tick(MISMATCH_DELAY_MS * 2);
    // Only the new selection survives; no stale flip-back fired.
    assert_eq!(session.selection(), &[0]);
    assert_eq!(session.moves(), 0);
    assert!(!session
        .take_events()
        .iter()
        .any(|e| matches!(e, SessionEvent::MismatchResolved)));
}

#[test]
fn best_scores_persist_across_sessions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data").join("best_scores.json");

    // First game: one mismatch, then perfect.
    {
        let mut session = Session::new(Difficulty::Easy, 1, JsonFileStore::new(&path)).unwrap();
        let (a, b) = mismatched_pair(&session);
        session.select(a);
        session.select(b);
        session.tick(MISMATCH_DELAY_MS);
        for (a, b) in pairs_of(&session) {
            session.select(a);
            session.select(b);
        }
        assert!(session.finished());
        assert_eq!(session.best(), Some(ScoreRecord::new(3, 0)));
    }

    let text = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["easy"]["moves"], 3);
    assert_eq!(json["easy"]["time"], 0);

    // Second game loads the record and beats it.
    let mut session = Session::new(Difficulty::Easy, 2, JsonFileStore::new(&path)).unwrap();
    assert_eq!(session.best(), Some(ScoreRecord::new(3, 0)));
    for (a, b) in pairs_of(&session) {
        session.select(a);
        session.select(b);
    }
    assert_eq!(session.best(), Some(ScoreRecord::new(2, 0)));

    let mut reloaded = JsonFileStore::new(&path);
    let scores: BestScores = reloaded.load();
    assert_eq!(scores.get(Difficulty::Easy), Some(ScoreRecord::new(2, 0)));
    assert_eq!(scores.get(Difficulty::Medium), None);
}

#[test]
fn worse_result_keeps_existing_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("best_scores.json");
    std::fs::write(&path, r#"{"easy":{"moves":2,"time":0}}"#).unwrap();

    let mut session = Session::new(Difficulty::Easy, 3, JsonFileStore::new(&path)).unwrap();
    let (a, b) = mismatched_pair(&session);
    session.select(a);
    session.select(b);
    session.tick(MISMATCH_DELAY_MS);
    for (a, b) in pairs_of(&session) {
        session.select(a);
        session.select(b);
    }

    let events = session.take_events();
    assert!(events.contains(&SessionEvent::Won {
        moves: 3,
        seconds: 0,
        new_best: false
    }));
    assert_eq!(session.best(), Some(ScoreRecord::new(2, 0)));
}

#[test]
fn controller_switches_difficulty_and_resets() {
    let session = Session::new(Difficulty::Easy, 17, MemoryStore::new()).unwrap();
    let mut game = GameState::new(session);

    game.apply_action(GameAction::Select).unwrap();
    game.apply_action(GameAction::SetDifficulty(Difficulty::Expert)).unwrap();

    let snap = game.snapshot();
    assert_eq!(snap.difficulty, Difficulty::Expert);
    assert_eq!(snap.side, 8);
    assert_eq!(snap.tiles.len(), 64);
    assert_eq!(snap.moves, 0);
    assert!(!snap.timer_running);
    assert_eq!(snap.episode_id, 1);

    for _ in 0..3 {
        game.apply_action(GameAction::CycleDifficulty).unwrap();
    }
    assert_eq!(game.session().difficulty(), Difficulty::Hard);
}
