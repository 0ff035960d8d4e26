//! Best-score records and the persistence seam.
//!
//! A record is replaced only by a strictly better result: fewer moves wins,
//! and time breaks ties. The session talks to persistence through the
//! [`ScoreStore`] trait so the engine stays free of I/O.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::types::Difficulty;

/// A completed session's result.
///
/// Serialized as `{"moves": n, "time": s}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub moves: u32,
    #[serde(rename = "time")]
    pub seconds: u32,
}

impl ScoreRecord {
    pub fn new(moves: u32, seconds: u32) -> Self {
        Self { moves, seconds }
    }

    /// Lexicographic comparison on `(moves, seconds)`.
    pub fn is_better_than(&self, other: &ScoreRecord) -> bool {
        (self.moves, self.seconds) < (other.moves, other.seconds)
    }
}

/// Best record per difficulty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BestScores {
    records: BTreeMap<Difficulty, ScoreRecord>,
}

impl BestScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, difficulty: Difficulty) -> Option<ScoreRecord> {
        self.records.get(&difficulty).copied()
    }

    /// Record `candidate` if there is no record yet or it beats the stored one.
    ///
    /// Returns whether the record changed.
    pub fn submit(&mut self, difficulty: Difficulty, candidate: ScoreRecord) -> bool {
        match self.records.get(&difficulty) {
            Some(current) if !candidate.is_better_than(current) => false,
            _ => {
                self.records.insert(difficulty, candidate);
                true
            }
        }
    }

    /// Overwrite a record unconditionally (used when loading).
    pub fn insert(&mut self, difficulty: Difficulty, record: ScoreRecord) {
        self.records.insert(difficulty, record);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Difficulty, ScoreRecord)> + '_ {
        self.records.iter().map(|(d, r)| (*d, *r))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Persistence collaborator for best scores.
///
/// `load` never fails: absent or unreadable data means "no records".
pub trait ScoreStore {
    fn load(&mut self) -> BestScores;
    fn save(&mut self, scores: &BestScores) -> Result<()>;
}

/// In-process store; keeps the last saved value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: BestScores,
    saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `scores`, as if loaded from disk.
    pub fn with_scores(scores: BestScores) -> Self {
        Self {
            saved: scores,
            saves: 0,
        }
    }

    pub fn saved(&self) -> &BestScores {
        &self.saved
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> u32 {
        self.saves
    }
}

impl ScoreStore for MemoryStore {
    fn load(&mut self) -> BestScores {
        self.saved.clone()
    }

    fn save(&mut self, scores: &BestScores) -> Result<()> {
        self.saved = scores.clone();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fewer_moves_always_wins() {
        let a = ScoreRecord::new(5, 100);
        let b = ScoreRecord::new(6, 1);
        assert!(a.is_better_than(&b));
        assert!(!b.is_better_than(&a));
    }

    #[test]
    fn time_breaks_move_ties() {
        let a = ScoreRecord::new(5, 10);
        let b = ScoreRecord::new(5, 11);
        assert!(a.is_better_than(&b));
        assert!(!a.is_better_than(&a));
    }

    #[test]
    fn submit_sets_first_record() {
        let mut scores = BestScores::new();
        assert!(scores.submit(Difficulty::Easy, ScoreRecord::new(2, 9)));
        assert_eq!(scores.get(Difficulty::Easy), Some(ScoreRecord::new(2, 9)));
        assert_eq!(scores.get(Difficulty::Hard), None);
    }

    #[test]
    fn submit_keeps_record_on_equal_or_worse() {
        let mut scores = BestScores::new();
        scores.submit(Difficulty::Medium, ScoreRecord::new(10, 30));

        assert!(!scores.submit(Difficulty::Medium, ScoreRecord::new(10, 30)));
        assert!(!scores.submit(Difficulty::Medium, ScoreRecord::new(10, 31)));
        assert!(!scores.submit(Difficulty::Medium, ScoreRecord::new(11, 1)));
        assert_eq!(
            scores.get(Difficulty::Medium),
            Some(ScoreRecord::new(10, 30))
        );

        assert!(scores.submit(Difficulty::Medium, ScoreRecord::new(10, 29)));
        assert!(scores.submit(Difficulty::Medium, ScoreRecord::new(9, 60)));
        assert_eq!(scores.get(Difficulty::Medium), Some(ScoreRecord::new(9, 60)));
    }

    #[test]
    fn records_are_per_difficulty() {
        let mut scores = BestScores::new();
        scores.submit(Difficulty::Easy, ScoreRecord::new(2, 3));
        assert!(scores.submit(Difficulty::Expert, ScoreRecord::new(50, 300)));
        assert_eq!(scores.len(), 2);
    }

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.load().is_empty());

        let mut scores = BestScores::new();
        scores.submit(Difficulty::Hard, ScoreRecord::new(20, 70));
        store.save(&scores).unwrap();

        assert_eq!(store.load(), scores);
        assert_eq!(store.save_count(), 1);
    }
}
