//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the rules of the memory game and the session state
//! machine. It has no dependencies on the terminal or the filesystem; best
//! scores are persisted through the injected [`ScoreStore`] trait.
//!
//! - **Deterministic**: the same seed produces the same boards
//! - **Testable**: time only advances through explicit ticks
//! - **Portable**: runs in any environment (terminal, headless, tests)
//!
//! # Module Structure
//!
//! - [`board`]: shuffled grid of paired tiles
//! - [`session`]: selection/comparison state machine, clock, win detection
//! - [`game_state`]: cursor, win dialog and status line on top of a session
//! - [`rng`]: seedable LCG with Fisher-Yates shuffling
//! - [`scores`]: best-score records and the persistence trait
//! - [`snapshot`]: plain data handed to the view
//!
//! # Example
//!
//! ```
//! use tui_memory_core::{MemoryStore, SelectOutcome, Session};
//! use tui_memory_types::Difficulty;
//!
//! let mut session =
//!     Session::from_layout(Difficulty::Easy, &['a', 'b', 'b', 'a'], MemoryStore::new()).unwrap();
//!
//! assert_eq!(session.select(0), SelectOutcome::Revealed);
//! assert_eq!(session.select(3), SelectOutcome::Matched { symbol: 'a' });
//! assert_eq!(session.moves(), 1);
//! ```

pub mod board;
pub mod game_state;
pub mod rng;
pub mod scores;
pub mod session;
pub mod snapshot;

pub use tui_memory_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardError, Symbol, Tile, TileId};
pub use game_state::GameState;
pub use rng::SimpleRng;
pub use scores::{BestScores, MemoryStore, ScoreRecord, ScoreStore};
pub use session::{MatchToast, SelectOutcome, SelectionPhase, Session};
pub use snapshot::{format_time, GameSnapshot, StatusLine, TileFace, TileView};
