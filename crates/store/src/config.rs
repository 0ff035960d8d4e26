//! Store configuration from the environment.

use std::env;
use std::path::PathBuf;

/// File name of the best-score document.
pub const SCORES_FILE_NAME: &str = "best_scores.json";

/// Application directory under the user data directory.
pub const APP_DIR_NAME: &str = "tui-memory";

/// Where best scores live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(SCORES_FILE_NAME),
        }
    }
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create from environment variables
    ///
    /// Resolution order:
    /// 1. `MEMORY_SCORES_PATH`
    /// 2. `$XDG_DATA_HOME/tui-memory/best_scores.json`
    /// 3. `$HOME/.local/share/tui-memory/best_scores.json`
    /// 4. `./best_scores.json`
    pub fn from_env() -> Self {
        Self::resolve(
            non_empty_var("MEMORY_SCORES_PATH"),
            non_empty_var("XDG_DATA_HOME"),
            non_empty_var("HOME"),
        )
    }

    fn resolve(explicit: Option<String>, xdg_data: Option<String>, home: Option<String>) -> Self {
        if let Some(path) = explicit {
            return Self::new(path);
        }
        if let Some(dir) = xdg_data {
            return Self::new(PathBuf::from(dir).join(APP_DIR_NAME).join(SCORES_FILE_NAME));
        }
        if let Some(home) = home {
            return Self::new(
                PathBuf::from(home)
                    .join(".local")
                    .join("share")
                    .join(APP_DIR_NAME)
                    .join(SCORES_FILE_NAME),
            );
        }
        Self::default()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
