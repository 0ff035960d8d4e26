//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies beyond
//! serde derives, making them usable in any context (core logic, persistence,
//! terminal rendering).
//!
//! # Difficulties
//!
//! | Difficulty | Grid | Tiles | Pairs |
//! |------------|------|-------|-------|
//! | `Easy`     | 2×2  | 4     | 2     |
//! | `Medium`   | 4×4  | 16    | 8     |
//! | `Hard`     | 6×6  | 36    | 18    |
//! | `Expert`   | 8×8  | 64    | 32    |
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 50 | Fixed timestep interval of the runner |
//! | `CLOCK_STEP_MS` | 1000 | One whole second on the session clock |
//! | `MISMATCH_DELAY_MS` | 700 | Both tiles stay revealed before flipping back |
//! | `MATCH_TOAST_MS` | 1400 | Lifetime of the "match found" notification |
//!
//! # Examples
//!
//! ```
//! use tui_memory_types::{Difficulty, GameAction};
//!
//! let difficulty = Difficulty::from_str("hard").unwrap();
//! assert_eq!(difficulty.side(), 6);
//! assert_eq!(difficulty.pairs(), 18);
//!
//! assert_eq!(GameAction::from_str("select"), Some(GameAction::Select));
//! ```

use serde::{Deserialize, Serialize};

/// Fixed timestep interval in milliseconds.
pub const TICK_MS: u32 = 50;

/// Length of one session clock step (whole seconds).
pub const CLOCK_STEP_MS: u32 = 1000;

/// Delay before a mismatched pair flips back and input unlocks.
pub const MISMATCH_DELAY_MS: u32 = 700;

/// How long the "match found" notification stays visible.
pub const MATCH_TOAST_MS: u32 = 1400;

/// Largest supported board side (expert).
pub const MAX_SIDE: u8 = 8;

/// Largest supported tile count (`MAX_SIDE²`).
pub const MAX_TILES: usize = (MAX_SIDE as usize) * (MAX_SIDE as usize);

/// Default symbol pool, large enough for an 8×8 board.
///
/// Every entry is a single Unicode scalar with emoji presentation so it can be
/// stored as a `char` and rendered two terminal columns wide.
pub const SYMBOL_POOL: [char; 32] = [
    '🍎', '⚓', '🍺', '🐱', '🐉', '🌞', '🎲', '🍔', //
    '🚗', '🎵', '🌈', '🔥', '🍕', '🐠', '🌍', '🎁', //
    '🍩', '⚡', '🌹', '🐶', '📚', '🛫', '🏀', '🍇', //
    '🛸', '💡', '🥦', '🎧', '🚀', '🦋', '🌴', '📀',
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(MISMATCH_DELAY_MS, 700);
        assert_eq!(MATCH_TOAST_MS, 1400);
        assert_eq!(CLOCK_STEP_MS, 1000);
    }

    #[test]
    fn default_pool_covers_every_difficulty() {
        for d in Difficulty::ALL {
            assert!(SYMBOL_POOL.len() >= d.pairs());
        }
        let mut sorted = SYMBOL_POOL.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), SYMBOL_POOL.len(), "pool has duplicates");
    }

    #[test]
    fn difficulty_parse_roundtrip_names() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("EXPERT"), Some(Difficulty::Expert));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn difficulty_cycles_through_all_presets() {
        let mut d = Difficulty::Easy;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(d);
            d = d.next();
        }
        assert_eq!(d, Difficulty::Easy);
        assert_eq!(seen, Difficulty::ALL.to_vec());
    }
}

/// Named board-size presets.
///
/// Serialized in lowercase (`"easy"`, `"medium"`, ...), which is also the key
/// format of the persisted best-score document.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 2×2
    Easy,
    /// 4×4
    #[default]
    Medium,
    /// 6×6
    Hard,
    /// 8×8
    Expert,
}

impl Difficulty {
    /// All presets in ascending size.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Board side length for this preset.
    pub fn side(&self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
            Difficulty::Expert => 8,
        }
    }

    /// Number of tiles on the board (`side²`).
    pub fn tiles(&self) -> usize {
        let side = self.side() as usize;
        side * side
    }

    /// Number of distinct symbols drawn from the pool (`side² / 2`).
    pub fn pairs(&self) -> usize {
        self.tiles() / 2
    }

    /// Next preset, wrapping from expert back to easy.
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Expert,
            Difficulty::Expert => Difficulty::Easy,
        }
    }

    /// Parse difficulty from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_memory_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_str("easy"), Some(Difficulty::Easy));
    /// assert_eq!(Difficulty::from_str("Medium"), Some(Difficulty::Medium));
    /// assert_eq!(Difficulty::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "expert" => Some(Difficulty::Expert),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }

    /// Human-facing label, e.g. `"Medium 4×4"`.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy 2×2",
            Difficulty::Medium => "Medium 4×4",
            Difficulty::Hard => "Hard 6×6",
            Difficulty::Expert => "Expert 8×8",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player actions that can be applied to the game controller
///
/// These are produced by the key map and consumed by
/// `GameState::apply_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the cursor one tile up
    CursorUp,
    /// Move the cursor one tile down
    CursorDown,
    /// Move the cursor one tile left
    CursorLeft,
    /// Move the cursor one tile right
    CursorRight,
    /// Select the tile under the cursor
    Select,
    /// Regenerate the board at the current difficulty
    Restart,
    /// Regenerate the board at the given difficulty
    SetDifficulty(Difficulty),
    /// Step to the next difficulty and regenerate
    CycleDifficulty,
    /// Close the win dialog
    DismissWin,
}

impl GameAction {
    /// Parse a parameterless action from its camelCase name.
    ///
    /// Difficulty changes are parsed as `"difficulty:<name>"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_memory_types::{Difficulty, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("cursorLeft"), Some(GameAction::CursorLeft));
    /// assert_eq!(
    ///     GameAction::from_str("difficulty:expert"),
    ///     Some(GameAction::SetDifficulty(Difficulty::Expert))
    /// );
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        if let Some(name) = lower.strip_prefix("difficulty:") {
            return Difficulty::from_str(name).map(GameAction::SetDifficulty);
        }
        match lower.as_str() {
            "cursorup" => Some(GameAction::CursorUp),
            "cursordown" => Some(GameAction::CursorDown),
            "cursorleft" => Some(GameAction::CursorLeft),
            "cursorright" => Some(GameAction::CursorRight),
            "select" => Some(GameAction::Select),
            "restart" => Some(GameAction::Restart),
            "cycledifficulty" => Some(GameAction::CycleDifficulty),
            "dismisswin" => Some(GameAction::DismissWin),
            _ => None,
        }
    }
}

/// Engine-side event emitted by a session transition.
///
/// Drained by the controller after every select/tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new board was generated.
    NewBoard { difficulty: Difficulty, episode_id: u32 },
    /// Two selected tiles matched.
    MatchFound { symbol: char },
    /// A mismatched pair flipped back after the delay.
    MismatchResolved,
    /// Every tile is matched.
    Won {
        moves: u32,
        seconds: u32,
        new_best: bool,
    },
}
