//! Session engine - the authoritative state of one game
//!
//! The session owns the board, the current selection, the move counter, the
//! clock and the best-score table, and advances them in response to two
//! external triggers:
//!
//! - [`Session::select`]: the player picks a tile
//! - [`Session::tick`]: wall-clock time passes
//!
//! Deferred effects (flipping back a mismatched pair, clearing the match
//! notification) are countdowns stored in the session and advanced by `tick`.
//! Regenerating the board resets them, so a stale effect can never fire into
//! a new board.
//!
//! # Selection state machine
//!
//! ```text
//! Idle --select--> OneChosen --select other--> Resolving
//!  ^                                              |
//!  +---- match: immediately ----------------------+
//!  +---- mismatch: after MISMATCH_DELAY_MS -------+
//! ```
//!
//! A move is one completed two-tile comparison, match or mismatch.

use arrayvec::ArrayVec;
use tracing::{debug, info, warn};

use crate::board::{Board, BoardError, Symbol};
use crate::rng::SimpleRng;
use crate::scores::{BestScores, ScoreRecord, ScoreStore};
use crate::snapshot::{GameSnapshot, TileFace, TileView};
use crate::types::{
    Difficulty, SessionEvent, CLOCK_STEP_MS, MATCH_TOAST_MS, MISMATCH_DELAY_MS, SYMBOL_POOL,
};

/// Where the selection state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// Nothing selected.
    Idle,
    /// One tile face-up, waiting for the second.
    OneChosen,
    /// Two mismatched tiles face-up, input locked until the delay expires.
    Resolving,
}

/// Result of a selection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Request had no effect (matched, already selected, locked, finished, out of range).
    Ignored,
    /// First tile of a pair turned face-up.
    Revealed,
    /// Second tile matched the first; both are now matched.
    Matched { symbol: Symbol },
    /// Second tile differs; both flip back after the mismatch delay.
    Mismatched,
}

/// The transient "match found" notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchToast {
    pub symbol: Symbol,
    pub remaining_ms: u32,
}

/// Complete session state
#[derive(Debug)]
pub struct Session<S: ScoreStore> {
    store: S,
    best: BestScores,
    pool: Vec<Symbol>,
    rng: SimpleRng,
    next_tile_id: u32,
    difficulty: Difficulty,
    board: Board,
    selection: ArrayVec<usize, 2>,
    moves: u32,
    elapsed_seconds: u32,
    /// Sub-second remainder of the running clock.
    clock_ms: u32,
    timer_running: bool,
    finished: bool,
    /// Remaining delay before a mismatched pair is cleared.
    pending_mismatch_ms: Option<u32>,
    toast: Option<MatchToast>,
    /// Monotonic board generation id (increments on every regeneration).
    episode_id: u32,
    /// Unbounded; the owner drains it with [`Session::take_events`].
    events: Vec<SessionEvent>,
}

impl<S: ScoreStore> Session<S> {
    /// Create a session with the default symbol pool.
    pub fn new(difficulty: Difficulty, seed: u32, store: S) -> Result<Self, BoardError> {
        Self::with_pool(difficulty, &SYMBOL_POOL, seed, store)
    }

    /// Create a session drawing symbols from `pool`.
    ///
    /// Best scores are loaded from `store` once, here.
    pub fn with_pool(
        difficulty: Difficulty,
        pool: &[Symbol],
        seed: u32,
        mut store: S,
    ) -> Result<Self, BoardError> {
        let mut rng = SimpleRng::new(seed);
        let mut next_tile_id = 0;
        let board = Board::generate(difficulty.side(), pool, &mut rng, &mut next_tile_id)?;
        let best = store.load();

        let mut session = Self::assemble(
            store,
            best,
            pool.to_vec(),
            rng,
            next_tile_id,
            difficulty,
            board,
        );
        session.announce_new_board();
        Ok(session)
    }

    /// Create a session whose first board has a fixed row-major layout.
    ///
    /// Later regenerations shuffle from the default pool.
    pub fn from_layout(
        difficulty: Difficulty,
        layout: &[Symbol],
        mut store: S,
    ) -> Result<Self, BoardError> {
        let mut next_tile_id = 0;
        let board = Board::from_layout(difficulty.side(), layout, &mut next_tile_id)?;
        let best = store.load();

        let mut session = Self::assemble(
            store,
            best,
            SYMBOL_POOL.to_vec(),
            SimpleRng::default(),
            next_tile_id,
            difficulty,
            board,
        );
        session.announce_new_board();
        Ok(session)
    }

    fn assemble(
        store: S,
        best: BestScores,
        pool: Vec<Symbol>,
        rng: SimpleRng,
        next_tile_id: u32,
        difficulty: Difficulty,
        board: Board,
    ) -> Self {
        Self {
            store,
            best,
            pool,
            rng,
            next_tile_id,
            difficulty,
            board,
            selection: ArrayVec::new(),
            moves: 0,
            elapsed_seconds: 0,
            clock_ms: 0,
            timer_running: false,
            finished: false,
            pending_mismatch_ms: None,
            toast: None,
            episode_id: 0,
            events: Vec::new(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Board indices currently face-up and unresolved.
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    /// True once every tile is matched.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// True while a mismatched pair is waiting to flip back.
    pub fn input_locked(&self) -> bool {
        self.pending_mismatch_ms.is_some()
    }

    pub fn toast(&self) -> Option<MatchToast> {
        self.toast
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn best_scores(&self) -> &BestScores {
        &self.best
    }

    /// Best record for the current difficulty.
    pub fn best(&self) -> Option<ScoreRecord> {
        self.best.get(self.difficulty)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> SelectionPhase {
        match self.selection.len() {
            0 => SelectionPhase::Idle,
            1 => SelectionPhase::OneChosen,
            _ => SelectionPhase::Resolving,
        }
    }

    /// Whether the tile at `index` is face-up (selected or matched).
    pub fn is_revealed(&self, index: usize) -> bool {
        self.selection.contains(&index) || self.board.get(index).is_some_and(|t| t.matched)
    }

    /// Take and clear the pending events.
    ///
    /// Events accumulate until taken. Callers driving a bare session must
    /// drain them regularly; `GameState` does so after every action and tick.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Regenerate the board at the current difficulty.
    pub fn restart(&mut self) -> Result<(), BoardError> {
        self.regenerate(self.difficulty)
    }

    /// Regenerate the board at `difficulty`.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), BoardError> {
        self.regenerate(difficulty)
    }

    /// Build a fresh board and reset all per-session state.
    ///
    /// On error the current session is left untouched.
    fn regenerate(&mut self, difficulty: Difficulty) -> Result<(), BoardError> {
        let mut next_tile_id = self.next_tile_id;
        let board = Board::generate(
            difficulty.side(),
            &self.pool,
            &mut self.rng,
            &mut next_tile_id,
        )?;

        self.next_tile_id = next_tile_id;
        self.difficulty = difficulty;
        self.board = board;
        self.selection.clear();
        self.moves = 0;
        self.elapsed_seconds = 0;
        self.clock_ms = 0;
        self.timer_running = false;
        self.finished = false;
        // Cancels any outstanding deferred effects.
        self.pending_mismatch_ms = None;
        self.toast = None;
        self.episode_id = self.episode_id.wrapping_add(1);

        self.announce_new_board();
        Ok(())
    }

    fn announce_new_board(&mut self) {
        info!(
            difficulty = %self.difficulty,
            episode = self.episode_id,
            tiles = self.board.len(),
            "new board"
        );
        self.events.push(SessionEvent::NewBoard {
            difficulty: self.difficulty,
            episode_id: self.episode_id,
        });
    }

    /// Select the tile at `index`.
    ///
    /// Invalid requests are ignored, never errors.
    pub fn select(&mut self, index: usize) -> SelectOutcome {
        if self.finished || self.input_locked() {
            return SelectOutcome::Ignored;
        }
        let Some(&tile) = self.board.get(index) else {
            return SelectOutcome::Ignored;
        };
        if tile.matched || self.selection.contains(&index) || self.selection.is_full() {
            return SelectOutcome::Ignored;
        }

        // The clock starts with the first accepted selection of the session.
        self.timer_running = true;
        self.selection.push(index);
        debug!(index, tile = %tile.id, "tile selected");

        if self.selection.len() < 2 {
            return SelectOutcome::Revealed;
        }
        self.compare_selection()
    }

    fn compare_selection(&mut self) -> SelectOutcome {
        let (a, b) = (self.selection[0], self.selection[1]);
        let (Some(first), Some(second)) = (self.board.get(a), self.board.get(b)) else {
            self.selection.clear();
            return SelectOutcome::Ignored;
        };

        if first.symbol != second.symbol {
            self.pending_mismatch_ms = Some(MISMATCH_DELAY_MS);
            return SelectOutcome::Mismatched;
        }

        let symbol = first.symbol;
        self.board.mark_matched(a);
        self.board.mark_matched(b);
        self.moves = self.moves.saturating_add(1);
        self.selection.clear();
        self.toast = Some(MatchToast {
            symbol,
            remaining_ms: MATCH_TOAST_MS,
        });
        self.events.push(SessionEvent::MatchFound { symbol });
        debug!(%symbol, moves = self.moves, "match found");

        self.detect_win();
        SelectOutcome::Matched { symbol }
    }

    fn resolve_mismatch(&mut self) {
        self.pending_mismatch_ms = None;
        self.selection.clear();
        self.moves = self.moves.saturating_add(1);
        self.events.push(SessionEvent::MismatchResolved);
        debug!(moves = self.moves, "mismatch resolved");
    }

    /// Fires once, when the last pair is matched.
    fn detect_win(&mut self) {
        if self.finished || !self.board.all_matched() {
            return;
        }
        self.finished = true;
        self.timer_running = false;

        let result = ScoreRecord::new(self.moves, self.elapsed_seconds);
        let new_best = self.best.submit(self.difficulty, result);
        if new_best {
            if let Err(err) = self.store.save(&self.best) {
                warn!(error = %err, "failed to persist best scores");
            }
        }

        info!(
            difficulty = %self.difficulty,
            moves = result.moves,
            seconds = result.seconds,
            new_best,
            "session won"
        );
        self.events.push(SessionEvent::Won {
            moves: result.moves,
            seconds: result.seconds,
            new_best,
        });
    }

    /// Advance time by `elapsed_ms`.
    ///
    /// Fires the mismatch resolution and clears the match notification when
    /// their delays run out, and advances the clock while it is running.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if let Some(remaining) = self.pending_mismatch_ms {
            let remaining = remaining.saturating_sub(elapsed_ms);
            if remaining == 0 {
                self.resolve_mismatch();
            } else {
                self.pending_mismatch_ms = Some(remaining);
            }
        }

        if let Some(toast) = self.toast.as_mut() {
            toast.remaining_ms = toast.remaining_ms.saturating_sub(elapsed_ms);
            if toast.remaining_ms == 0 {
                self.toast = None;
            }
        }

        if self.timer_running {
            self.clock_ms = self.clock_ms.saturating_add(elapsed_ms);
            while self.clock_ms >= CLOCK_STEP_MS {
                self.clock_ms -= CLOCK_STEP_MS;
                self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
            }
        }
    }

    /// Write the session part of a view snapshot into `out`.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.difficulty = self.difficulty;
        out.side = self.board.side();
        out.tiles.clear();
        for (i, tile) in self.board.tiles().iter().enumerate() {
            let face = if tile.matched {
                TileFace::Matched
            } else if self.selection.contains(&i) {
                TileFace::Revealed
            } else {
                TileFace::Hidden
            };
            out.tiles.push(TileView {
                symbol: tile.symbol,
                face,
            });
        }
        out.moves = self.moves;
        out.elapsed_seconds = self.elapsed_seconds;
        out.timer_running = self.timer_running;
        out.input_locked = self.input_locked();
        out.finished = self.finished;
        out.best = self.best();
        out.toast = self.toast.map(|t| t.symbol);
        out.episode_id = self.episode_id;
    }
}
