//! JSON file score store.
//!
//! The document is a single object keyed by difficulty name:
//!
//! ```json
//! { "easy": { "moves": 2, "time": 4 }, "medium": { "moves": 11, "time": 38 } }
//! ```
//!
//! Loading is forgiving: a missing file, unparsable JSON, unknown difficulty
//! keys and malformed entries all read as "no record".

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::core::{BestScores, ScoreRecord, ScoreStore};
use crate::types::Difficulty;

/// Best scores persisted as one JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&mut self) -> BestScores {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no best-score file yet");
                return BestScores::new();
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "cannot read best scores");
                return BestScores::new();
            }
        };

        match decode_scores(&text) {
            Ok(scores) => {
                debug!(path = %self.path.display(), records = scores.len(), "loaded best scores");
                scores
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring malformed best scores");
                BestScores::new()
            }
        }
    }

    fn save(&mut self, scores: &BestScores) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let text = encode_scores(scores)?;
        let tmp = self.temp_path();
        fs::write(&tmp, text).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;

        debug!(path = %self.path.display(), records = scores.len(), "saved best scores");
        Ok(())
    }
}

/// Parse a best-score document.
///
/// Fails only when the text is not a JSON object; bad entries are skipped.
pub fn decode_scores(text: &str) -> Result<BestScores> {
    let raw: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(text).context("best-score document is not a JSON object")?;

    let mut scores = BestScores::new();
    for (key, value) in raw {
        let difficulty =
            match serde_json::from_value::<Difficulty>(serde_json::Value::String(key.clone())) {
                Ok(difficulty) => difficulty,
                Err(_) => {
                    debug!(key = %key, "skipping unknown difficulty");
                    continue;
                }
            };
        match serde_json::from_value::<ScoreRecord>(value) {
            Ok(record) => scores.insert(difficulty, record),
            Err(err) => debug!(key = %key, error = %err, "skipping malformed record"),
        }
    }
    Ok(scores)
}

/// Serialize best scores to the on-disk document format.
pub fn encode_scores(scores: &BestScores) -> Result<String> {
    let doc: BTreeMap<Difficulty, ScoreRecord> = scores.iter().collect();
    Ok(serde_json::to_string_pretty(&doc)?)
}
