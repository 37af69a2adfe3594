//! Request boundary for turn submissions.
//!
//! A submission carries a game id and the new snapshot as JSON. Malformed
//! input is rejected before any rule runs. Rule violations are not errors:
//! the snapshot is stored anyway and the report flags the turn as invalid.

pub mod store;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::board::BoardTopology;
use crate::config::EngineConfig;
use crate::rules::ValidationOutcome;
use crate::turn::{evaluate_turn, GameStateSnapshot, SnapshotError, TurnReport};

pub use store::{MemoryStore, StateStore, StoreError};

/// Errors that stop a submission. Each maps to a stable code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("invalid game id '{0}'")]
    InvalidGameId(String),

    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(#[from] SnapshotError),

    #[error("game '{0}' not found")]
    GameNotFound(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl SubmitError {
    /// Machine-readable error code.
    pub const fn code(&self) -> &'static str {
        match self {
            SubmitError::InvalidGameId(_) => "INVALID_GAME_ID",
            SubmitError::MalformedSnapshot(_) => "MALFORMED_SNAPSHOT",
            SubmitError::GameNotFound(_) => "GAME_NOT_FOUND",
            SubmitError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<StoreError> for SubmitError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => SubmitError::GameNotFound(id),
            StoreError::Storage(msg) => SubmitError::Storage(msg),
        }
    }
}

/// A non-empty game identifier without whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    pub fn parse(raw: &str) -> Result<GameId, SubmitError> {
        if raw.is_empty() || raw.chars().any(char::is_whitespace) {
            return Err(SubmitError::InvalidGameId(raw.to_string()));
        }
        Ok(GameId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a successful submission returns to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResult {
    pub success: bool,
    pub message: String,
    pub game_id: GameId,
    pub narrative: String,
    pub validation: ValidationOutcome,
}

/// Runs submissions against a topology, a configuration and a store.
pub struct TurnService<S = MemoryStore> {
    pub topology: BoardTopology,
    pub config: EngineConfig,
    pub store: S,
}

impl TurnService<MemoryStore> {
    /// A service on the standard board with an empty in-memory store.
    pub fn standard() -> Self {
        TurnService::new(BoardTopology::standard(), EngineConfig::default(), MemoryStore::new())
    }
}

impl<S: StateStore> TurnService<S> {
    pub fn new(topology: BoardTopology, config: EngineConfig, store: S) -> Self {
        TurnService {
            topology,
            config,
            store,
        }
    }

    /// Evaluates and records one snapshot.
    #[instrument(level = "debug", skip(self, payload))]
    pub fn submit(&mut self, game_id: &str, payload: &str) -> Result<SubmitResult, SubmitError> {
        let (game, current) = match parse_submission(game_id, payload) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(code = e.code(), error = %e, "submission rejected");
                return Err(e);
            }
        };

        let report = self.evaluate(&game, &current)?;
        self.store.store_state(&game, current)?;

        let message = if report.validation.is_valid {
            "Turn recorded."
        } else {
            "Turn recorded with rule violations."
        };
        info!(game = %game, valid = report.validation.is_valid, "turn recorded");

        Ok(SubmitResult {
            success: true,
            message: message.to_string(),
            game_id: game,
            narrative: report.narrative,
            validation: report.validation,
        })
    }

    /// Evaluates a snapshot against the stored previous state without storing it.
    pub fn evaluate(&self, game: &GameId, current: &GameStateSnapshot) -> Result<TurnReport, SubmitError> {
        let previous = self.store.fetch_previous_state(game).map_err(|e| {
            warn!(game = %game, error = %e, "previous state unavailable");
            SubmitError::from(e)
        })?;
        Ok(evaluate_turn(&self.topology, &self.config, previous.as_ref(), current))
    }
}

fn parse_submission(game_id: &str, payload: &str) -> Result<(GameId, GameStateSnapshot), SubmitError> {
    let game = GameId::parse(game_id)?;
    let current = GameStateSnapshot::from_json_str(payload)?;
    Ok((game, current))
}
