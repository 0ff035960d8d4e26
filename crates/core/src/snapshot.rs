//! Snapshot module - plain data handed to the view each frame

use std::fmt;

use arrayvec::ArrayVec;

use crate::board::Symbol;
use crate::scores::ScoreRecord;
use crate::types::{Difficulty, MAX_TILES};

/// How a tile is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileFace {
    Hidden,
    Revealed,
    Matched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileView {
    pub symbol: Symbol,
    pub face: TileFace,
}

/// One-line status shown under the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusLine {
    #[default]
    Empty,
    NewGame,
    Won {
        moves: u32,
        seconds: u32,
    },
    NewBest,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLine::Empty => Ok(()),
            StatusLine::NewGame => f.write_str("New game started"),
            StatusLine::Won { moves, seconds } => {
                write!(f, "You won in {moves} moves and {seconds} seconds!")
            }
            StatusLine::NewBest => f.write_str("New best score!"),
        }
    }
}

/// Everything the view needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub difficulty: Difficulty,
    pub side: u8,
    pub tiles: ArrayVec<TileView, MAX_TILES>,
    pub cursor: usize,
    pub moves: u32,
    pub elapsed_seconds: u32,
    pub timer_running: bool,
    pub input_locked: bool,
    pub finished: bool,
    pub best: Option<ScoreRecord>,
    pub toast: Option<Symbol>,
    pub win_dialog: bool,
    pub status: StatusLine,
    pub episode_id: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.difficulty = Difficulty::default();
        self.side = 0;
        self.tiles.clear();
        self.cursor = 0;
        self.moves = 0;
        self.elapsed_seconds = 0;
        self.timer_running = false;
        self.input_locked = false;
        self.finished = false;
        self.best = None;
        self.toast = None;
        self.win_dialog = false;
        self.status = StatusLine::Empty;
        self.episode_id = 0;
    }

    /// Tile at grid position (`row`, `col`).
    pub fn tile_at(&self, row: u8, col: u8) -> Option<&TileView> {
        if row >= self.side || col >= self.side {
            return None;
        }
        self.tiles.get(row as usize * self.side as usize + col as usize)
    }

    /// Whether the player can select tiles right now.
    pub fn playable(&self) -> bool {
        !self.finished && !self.input_locked && !self.win_dialog
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            side: 0,
            tiles: ArrayVec::new(),
            cursor: 0,
            moves: 0,
            elapsed_seconds: 0,
            timer_running: false,
            input_locked: false,
            finished: false,
            best: None,
            toast: None,
            win_dialog: false,
            status: StatusLine::Empty,
            episode_id: 0,
        }
    }
}

/// Format whole seconds as `mm:ss`. Minutes are not capped at 59.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
