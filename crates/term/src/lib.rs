//! Terminal rendering for the memory board.
//!
//! A small, game-oriented rendering layer: the view writes into a plain
//! framebuffer and the renderer flushes only the cells that changed. No
//! widget toolkit is involved.
//!
//! Emoji are double width; see [`fb::WIDE_TAIL`] for how the second column
//! is tracked.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_memory_core as core;
pub use tui_memory_types as types;

pub use fb::{text_width, Cell, CellStyle, FrameBuffer, Rgb, WIDE_TAIL};
pub use game_view::{best_text, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
