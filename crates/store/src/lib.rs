//! Best-score persistence.
//!
//! Implements [`ScoreStore`](tui_memory_core::ScoreStore) on top of a JSON
//! file. The file is read once when a session is created and rewritten
//! whenever a record improves.
//!
//! # Environment Variables
//!
//! - `MEMORY_SCORES_PATH`: explicit path of the score file
//! - `XDG_DATA_HOME` / `HOME`: used to derive the default location
//!
//! # Example
//!
//! ```no_run
//! use tui_memory_store::{JsonFileStore, StoreConfig};
//! use tui_memory_core::ScoreStore;
//!
//! let mut store = JsonFileStore::from_config(&StoreConfig::from_env());
//! let scores = store.load();
//! println!("{} records", scores.len());
//! ```

pub mod config;
pub mod json;

pub use tui_memory_core as core;
pub use tui_memory_types as types;

pub use config::StoreConfig;
pub use json::{decode_scores, encode_scores, JsonFileStore};
