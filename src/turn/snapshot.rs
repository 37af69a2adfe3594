//! Game-state snapshots.
//!
//! A snapshot is the client's JSON view of a game at one point in time. Every
//! field is optional on the wire; absent fields read as neutral values. The
//! schema is checked once with `validate` at the request boundary so the core
//! can trust dice values and log sums.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Coordinate, Player};

/// Errors for snapshots rejected at the request boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("failed to parse snapshot JSON: {0}")]
    Parse(String),

    #[error("die value {0} is outside 1..=6")]
    DieOutOfRange(u8),

    #[error("dice log entry {index} records sum {recorded} but dice add up to {actual}")]
    InconsistentSum {
        index: usize,
        recorded: u8,
        actual: u8,
    },

    #[error("player {player} has an empty piece id at index {index}")]
    EmptyPieceId { player: Player, index: usize },
}

/// A pair of dice values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceRoll {
    pub dice1: u8,
    pub dice2: u8,
}

impl DiceRoll {
    /// Creates a roll from two die values.
    pub const fn new(dice1: u8, dice2: u8) -> Self {
        DiceRoll { dice1, dice2 }
    }

    /// Returns the sum of both dice.
    pub const fn sum(self) -> u8 {
        self.dice1.saturating_add(self.dice2)
    }

    /// Returns true if either die shows `value`.
    pub const fn shows(self, value: u8) -> bool {
        self.dice1 == value || self.dice2 == value
    }

    /// Returns true for (1,1) and (6,6), which carry extra rules elsewhere.
    pub const fn is_special_double(self) -> bool {
        self.dice1 == self.dice2 && (self.dice1 == 1 || self.dice1 == 6)
    }

    fn check(self) -> Result<(), SnapshotError> {
        for die in [self.dice1, self.dice2] {
            if !(1..=6).contains(&die) {
                return Err(SnapshotError::DieOutOfRange(die));
            }
        }
        Ok(())
    }
}

/// One recorded roll with the context `lastDiceRoll` lacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceLogEntry {
    pub dice1: u8,
    pub dice2: u8,
    pub sum: u8,
    #[serde(default)]
    pub player: Option<Player>,
    #[serde(default)]
    pub color: Option<String>,
}

impl DiceLogEntry {
    /// Returns the dice values as a roll.
    pub const fn roll(&self) -> DiceRoll {
        DiceRoll::new(self.dice1, self.dice2)
    }
}

/// A piece and the cell it stands on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: String,
    pub position: Coordinate,
}

impl Piece {
    /// Creates a piece at a position.
    pub fn new(id: impl Into<String>, position: impl Into<Coordinate>) -> Self {
        Piece {
            id: id.into(),
            position: position.into(),
        }
    }
}

/// An entry in the seating table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub player: Player,
    #[serde(default)]
    pub color: Option<String>,
}

/// Complete client-side game state at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateSnapshot {
    #[serde(default)]
    pub current_player: Option<Player>,
    #[serde(default)]
    pub pieces: BTreeMap<Player, Vec<Piece>>,
    #[serde(default)]
    pub last_dice_roll: Option<DiceRoll>,
    /// Append-ordered roll history.
    #[serde(default)]
    pub dice_log: Vec<DiceLogEntry>,
    #[serde(default)]
    pub phase: Option<String>,
    /// Seating order with display colours.
    #[serde(default)]
    pub players: Vec<PlayerInfo>,
}

impl GameStateSnapshot {
    /// Parses and validates a snapshot from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: GameStateSnapshot =
            serde_json::from_str(json).map_err(|e| SnapshotError::Parse(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Checks dice ranges, log sums, and piece ids.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if let Some(roll) = self.last_dice_roll {
            roll.check()?;
        }
        for (index, entry) in self.dice_log.iter().enumerate() {
            entry.roll().check()?;
            let actual = entry.roll().sum();
            if entry.sum != actual {
                return Err(SnapshotError::InconsistentSum {
                    index,
                    recorded: entry.sum,
                    actual,
                });
            }
        }
        for (&player, pieces) in &self.pieces {
            if let Some(index) = pieces.iter().position(|p| p.id.trim().is_empty()) {
                return Err(SnapshotError::EmptyPieceId { player, index });
            }
        }
        Ok(())
    }

    /// Returns every occupied cell across all players.
    pub fn occupied(&self) -> impl Iterator<Item = &Coordinate> {
        self.pieces.values().flatten().map(|p| &p.position)
    }

    /// Returns the seating-table colour of a player, if recorded.
    pub fn color_of(&self, player: Player) -> Option<&str> {
        self.players
            .iter()
            .find(|info| info.player == player)
            .and_then(|info| info.color.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "currentPlayer": 2,
        "pieces": {
            "1": [{"id": "R1", "position": "D11"}, {"id": "R2", "position": "A10"}],
            "2": [{"id": "B1", "position": "A2"}]
        },
        "lastDiceRoll": {"dice1": 1, "dice2": 4},
        "diceLog": [{"dice1": 1, "dice2": 4, "sum": 5, "player": 1, "color": "red"}],
        "phase": "playing",
        "players": [{"player": 1, "color": "red"}, {"player": 2}]
    }"#;

    #[test]
    fn parses_full_snapshot() {
        let s: GameStateSnapshot = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(s.current_player, Some(Player::Two));
        assert_eq!(s.pieces[&Player::One].len(), 2);
        assert_eq!(s.pieces[&Player::One][0], Piece::new("R1", "D11"));
        assert_eq!(s.last_dice_roll, Some(DiceRoll::new(1, 4)));
        assert_eq!(s.dice_log[0].color.as_deref(), Some("red"));
        assert_eq!(s.phase.as_deref(), Some("playing"));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn empty_object_is_a_neutral_snapshot() {
        let s: GameStateSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(s, GameStateSnapshot::default());
    }

    #[test]
    fn rejects_out_of_range_die() {
        let s: GameStateSnapshot =
            serde_json::from_str(r#"{"lastDiceRoll": {"dice1": 0, "dice2": 4}}"#).unwrap();
        assert_eq!(s.validate(), Err(SnapshotError::DieOutOfRange(0)));
    }

    #[test]
    fn rejects_inconsistent_log_sum() {
        let s: GameStateSnapshot = serde_json::from_str(
            r#"{"diceLog": [{"dice1": 3, "dice2": 4, "sum": 8}]}"#,
        )
        .unwrap();
        assert_eq!(
            s.validate(),
            Err(SnapshotError::InconsistentSum { index: 0, recorded: 8, actual: 7 })
        );
    }

    #[test]
    fn rejects_blank_piece_id() {
        let s: GameStateSnapshot =
            serde_json::from_str(r#"{"pieces": {"3": [{"id": " ", "position": "J1"}]}}"#).unwrap();
        assert_eq!(
            s.validate(),
            Err(SnapshotError::EmptyPieceId { player: Player::Three, index: 0 })
        );
    }

    #[test]
    fn from_json_str_rejects_wrong_types() {
        assert!(GameStateSnapshot::from_json_str(r#"{"currentPlayer": "two"}"#).is_err());
        assert!(GameStateSnapshot::from_json_str(r#"{"pieces": {"9": []}}"#).is_err());
        assert!(GameStateSnapshot::from_json_str(SAMPLE).is_ok());
    }

    #[test]
    fn special_doubles() {
        assert!(DiceRoll::new(1, 1).is_special_double());
        assert!(DiceRoll::new(6, 6).is_special_double());
        assert!(!DiceRoll::new(3, 3).is_special_double());
        assert!(!DiceRoll::new(1, 6).is_special_double());
    }

    #[test]
    fn color_lookup_and_occupancy() {
        let s: GameStateSnapshot = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(s.color_of(Player::One), Some("red"));
        assert_eq!(s.color_of(Player::Two), None);
        assert_eq!(s.color_of(Player::Four), None);
        assert_eq!(s.occupied().count(), 3);
    }
}
