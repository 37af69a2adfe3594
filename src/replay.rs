//! Replay of recorded game histories.
//!
//! A history is the ordered list of snapshots a game went through. Replaying
//! it evaluates every consecutive pair. Turns are independent, so they run on
//! the rayon pool.
//!
//! The main use is the dice-log audit: replaying the same records under both
//! log orders shows which one the recording client actually used.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::board::BoardTopology;
use crate::config::EngineConfig;
use crate::turn::{evaluate_turn, DiceLogOrder, GameStateSnapshot, SnapshotError, TurnReport};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read history file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse history JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("game {game}, snapshot {index}: {source}")]
    Snapshot {
        game: usize,
        index: usize,
        source: SnapshotError,
    },
}

/// A file of recorded games, each an ordered list of snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryFile {
    pub games: Vec<Vec<GameStateSnapshot>>,
}

impl HistoryFile {
    /// Parses and validates a history file.
    pub fn from_json_str(json: &str) -> Result<Self, ReplayError> {
        let file: HistoryFile = serde_json::from_str(json)?;
        for (game, snapshots) in file.games.iter().enumerate() {
            for (index, snapshot) in snapshots.iter().enumerate() {
                snapshot
                    .validate()
                    .map_err(|source| ReplayError::Snapshot { game, index, source })?;
            }
        }
        Ok(file)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let data = fs::read_to_string(path)?;
        HistoryFile::from_json_str(&data)
    }

    /// Number of evaluated turns across all games (first snapshots excluded).
    pub fn turn_count(&self) -> usize {
        self.games.iter().map(|g| g.len().saturating_sub(1)).sum()
    }
}

/// Evaluates every transition of one game, in order.
///
/// The first snapshot has no predecessor and is not reported.
pub fn replay_history(
    topology: &BoardTopology,
    config: &EngineConfig,
    history: &[GameStateSnapshot],
) -> Vec<TurnReport> {
    history
        .par_windows(2)
        .map(|pair| evaluate_turn(topology, config, Some(&pair[0]), &pair[1]))
        .collect()
}

/// Counts valid turns across all games under one configuration.
pub fn count_valid(topology: &BoardTopology, config: &EngineConfig, history: &HistoryFile) -> usize {
    history
        .games
        .par_iter()
        .map(|game| {
            replay_history(topology, config, game)
                .iter()
                .filter(|r| r.validation.is_valid)
                .count()
        })
        .sum()
}

/// Valid-turn counts of the same records under both dice-log orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogOrderComparison {
    pub turns: usize,
    pub newest_first_valid: usize,
    pub newest_last_valid: usize,
}

impl LogOrderComparison {
    /// The order under which more turns validate, or `None` on a tie.
    pub fn preferred(&self) -> Option<DiceLogOrder> {
        use std::cmp::Ordering;
        match self.newest_first_valid.cmp(&self.newest_last_valid) {
            Ordering::Greater => Some(DiceLogOrder::NewestFirst),
            Ordering::Less => Some(DiceLogOrder::NewestLast),
            Ordering::Equal => None,
        }
    }
}

/// Replays the records under both dice-log orders.
pub fn compare_log_orders(
    topology: &BoardTopology,
    config: &EngineConfig,
    history: &HistoryFile,
) -> LogOrderComparison {
    let under = |order| {
        let config = EngineConfig {
            dice_log_order: order,
            ..config.clone()
        };
        count_valid(topology, &config, history)
    };
    let (newest_first_valid, newest_last_valid) = rayon::join(
        || under(DiceLogOrder::NewestFirst),
        || under(DiceLogOrder::NewestLast),
    );
    let comparison = LogOrderComparison {
        turns: history.turn_count(),
        newest_first_valid,
        newest_last_valid,
    };
    debug!(?comparison, "log order audit");
    if let Some(order) = comparison.preferred() {
        info!(order = order.name(), "dice log order favoured by records");
    }
    comparison
}
