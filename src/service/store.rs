//! Persistence of the latest snapshot per game.

use std::collections::HashMap;

use thiserror::Error;

use super::GameId;
use crate::turn::GameStateSnapshot;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("game '{0}' not found")]
    NotFound(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

/// Where the previous snapshot of each game lives.
pub trait StateStore {
    /// Returns the last stored snapshot, or `None` if the game has none yet.
    fn fetch_previous_state(&self, game: &GameId) -> Result<Option<GameStateSnapshot>, StoreError>;

    /// Replaces the stored snapshot of a game.
    fn store_state(&mut self, game: &GameId, state: GameStateSnapshot) -> Result<(), StoreError>;
}

/// In-process store. Games must be registered before they accept snapshots.
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: HashMap<GameId, Option<GameStateSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a game with no snapshot. Re-registering clears its history.
    pub fn register(&mut self, game: GameId) {
        self.games.insert(game, None);
    }

    pub fn contains(&self, game: &GameId) -> bool {
        self.games.contains_key(game)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl StateStore for MemoryStore {
    fn fetch_previous_state(&self, game: &GameId) -> Result<Option<GameStateSnapshot>, StoreError> {
        self.games
            .get(game)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(game.to_string()))
    }

    fn store_state(&mut self, game: &GameId, state: GameStateSnapshot) -> Result<(), StoreError> {
        match self.games.get_mut(game) {
            Some(slot) => {
                *slot = Some(state);
                Ok(())
            }
            None => Err(StoreError::NotFound(game.to_string())),
        }
    }
}
