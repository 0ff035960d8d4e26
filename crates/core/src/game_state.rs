//! Game state module - the controller between input and the session engine
//!
//! Adds what the player sees and steers but the engine does not care about:
//! the cursor, the win dialog and the status line. Engine events are drained
//! after every action and tick to keep those in sync.

use tracing::debug;

use crate::board::BoardError;
use crate::scores::ScoreStore;
use crate::session::Session;
use crate::snapshot::{GameSnapshot, StatusLine};
use crate::types::{GameAction, SessionEvent};

/// Complete game state
#[derive(Debug)]
pub struct GameState<S: ScoreStore> {
    session: Session<S>,
    /// Board index under the cursor.
    cursor: usize,
    win_dialog_open: bool,
    status: StatusLine,
}

impl<S: ScoreStore> GameState<S> {
    pub fn new(session: Session<S>) -> Self {
        let mut state = Self {
            session,
            cursor: 0,
            win_dialog_open: false,
            status: StatusLine::Empty,
        };
        state.drain_events();
        state
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn win_dialog_open(&self) -> bool {
        self.win_dialog_open
    }

    pub fn status(&self) -> StatusLine {
        self.status
    }

    /// Apply a player action.
    ///
    /// Only board regeneration can fail; on failure the current game is kept.
    pub fn apply_action(&mut self, action: GameAction) -> Result<(), BoardError> {
        debug!(?action, "apply action");
        let result = match action {
            GameAction::Restart => self.session.restart(),
            GameAction::SetDifficulty(difficulty) => {
                if difficulty == self.session.difficulty() {
                    Ok(())
                } else {
                    self.session.set_difficulty(difficulty)
                }
            }
            GameAction::CycleDifficulty => {
                let next = self.session.difficulty().next();
                self.session.set_difficulty(next)
            }
            GameAction::DismissWin => {
                self.win_dialog_open = false;
                Ok(())
            }
            // The win dialog is modal for board interaction.
            _ if self.win_dialog_open => Ok(()),
            GameAction::CursorUp => self.move_cursor(-1, 0),
            GameAction::CursorDown => self.move_cursor(1, 0),
            GameAction::CursorLeft => self.move_cursor(0, -1),
            GameAction::CursorRight => self.move_cursor(0, 1),
            GameAction::Select => {
                self.session.select(self.cursor);
                Ok(())
            }
        };
        self.drain_events();
        result
    }

    /// Advance time by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.session.tick(elapsed_ms);
        self.drain_events();
    }

    fn move_cursor(&mut self, d_row: i32, d_col: i32) -> Result<(), BoardError> {
        let side = self.session.board().side() as i32;
        if side == 0 {
            return Ok(());
        }
        let row = (self.cursor as i32 / side + d_row).clamp(0, side - 1);
        let col = (self.cursor as i32 % side + d_col).clamp(0, side - 1);
        self.cursor = (row * side + col) as usize;
        Ok(())
    }

    fn drain_events(&mut self) {
        for event in self.session.take_events() {
            match event {
                SessionEvent::NewBoard { .. } => {
                    self.cursor = 0;
                    self.win_dialog_open = false;
                    self.status = StatusLine::NewGame;
                }
                SessionEvent::Won {
                    moves,
                    seconds,
                    new_best,
                } => {
                    self.win_dialog_open = true;
                    self.status = if new_best {
                        StatusLine::NewBest
                    } else {
                        StatusLine::Won { moves, seconds }
                    };
                }
                SessionEvent::MatchFound { .. } | SessionEvent::MismatchResolved => {}
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.session.snapshot_into(out);
        out.cursor = self.cursor;
        out.win_dialog = self.win_dialog_open;
        out.status = self.status;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
