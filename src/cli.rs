//! Command-line arguments for the terminal runner.

use std::path::PathBuf;

use clap::Parser;

use crate::store::StoreConfig;
use crate::types::Difficulty;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "tui-memory")]
#[command(about = "Find the matching emoji pairs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Starting board size: easy, medium, hard or expert
    #[arg(
        short,
        long,
        env = "MEMORY_DIFFICULTY",
        default_value = "medium",
        value_parser = parse_difficulty
    )]
    pub difficulty: Difficulty,

    /// Fixed shuffle seed (random when omitted)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Best-score file
    #[arg(long, env = "MEMORY_SCORES_PATH")]
    pub scores_path: Option<PathBuf>,

    /// Write logs to this file; no logging without it
    #[arg(long, env = "MEMORY_LOG_PATH")]
    pub log_path: Option<PathBuf>,
}

impl Cli {
    /// Explicit `--scores-path`, otherwise the data-directory lookup.
    pub fn store_config(&self) -> StoreConfig {
        match &self.scores_path {
            Some(path) => StoreConfig::new(path.clone()),
            None => StoreConfig::from_env(),
        }
    }
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s.trim()).ok_or_else(|| {
        let names: Vec<&str> = Difficulty::ALL.iter().map(|d| d.as_str()).collect();
        format!("unknown difficulty `{s}` (expected one of: {})", names.join(", "))
    })
}
