//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. The memory
//! game has no held-key repeat, so a plain press mapping is enough.

pub mod map;

pub use tui_memory_types as types;

pub use map::{handle_key_event, should_quit};
