//! State diffing.
//!
//! Compares two snapshots and produces the normalized turn delta: who moved
//! what where, which dice were rolled, and whether the turn or phase passed.
//! Never fails; absent fields compare as neutral values.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::snapshot::{DiceRoll, GameStateSnapshot};
use crate::board::{Coordinate, Player};

/// Which end of the dice log holds the most recent roll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiceLogOrder {
    /// The newest roll is the first entry.
    NewestFirst,
    /// The newest roll is the last entry (append order).
    #[default]
    NewestLast,
}

impl DiceLogOrder {
    /// Returns the kebab-case option value.
    pub const fn name(self) -> &'static str {
        match self {
            DiceLogOrder::NewestFirst => "newest-first",
            DiceLogOrder::NewestLast => "newest-last",
        }
    }

    /// Parses an option value.
    pub fn from_name(name: &str) -> Option<DiceLogOrder> {
        match name {
            "newest-first" => Some(DiceLogOrder::NewestFirst),
            "newest-last" => Some(DiceLogOrder::NewestLast),
            _ => None,
        }
    }
}

/// A single piece that changed cell between snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceMovement {
    pub player: Player,
    pub piece_index: usize,
    pub piece_id: String,
    pub from: Coordinate,
    pub to: Coordinate,
}

/// The dice roll attributed to a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnDice {
    pub dice1: u8,
    pub dice2: u8,
    pub sum: u8,
    /// Acting player, known only when the roll came from the log.
    pub player: Option<Player>,
    pub color: Option<String>,
}

impl TurnDice {
    /// Returns the dice values as a roll.
    pub const fn roll(&self) -> DiceRoll {
        DiceRoll::new(self.dice1, self.dice2)
    }

    fn bare(roll: DiceRoll) -> Self {
        TurnDice {
            dice1: roll.dice1,
            dice2: roll.dice2,
            sum: roll.sum(),
            player: None,
            color: None,
        }
    }
}

/// Everything that changed between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnDelta {
    pub has_changes: bool,
    pub player_changed: bool,
    pub previous_player: Option<Player>,
    pub current_player: Player,
    pub movements: Vec<PieceMovement>,
    pub dice: Option<TurnDice>,
    pub dice_changed: bool,
    pub phase_changed: bool,
    pub phase: Option<String>,
}

/// Picks the turn's roll: the newest log entry if any, else `lastDiceRoll`.
pub fn resolve_dice(snapshot: &GameStateSnapshot, order: DiceLogOrder) -> Option<TurnDice> {
    let newest = match order {
        DiceLogOrder::NewestFirst => snapshot.dice_log.first(),
        DiceLogOrder::NewestLast => snapshot.dice_log.last(),
    };
    match newest {
        Some(entry) => Some(TurnDice {
            dice1: entry.dice1,
            dice2: entry.dice2,
            sum: entry.roll().sum(),
            player: entry.player,
            color: entry.color.clone(),
        }),
        None => snapshot.last_dice_roll.map(TurnDice::bare),
    }
}

/// Lists pieces whose position differs at the same list index.
///
/// Only players present in `current` are compared. Pieces that exist in
/// only one snapshot are ignored.
pub fn piece_movements(previous: &GameStateSnapshot, current: &GameStateSnapshot) -> Vec<PieceMovement> {
    let mut movements = Vec::new();
    for (&player, now) in &current.pieces {
        let before = previous.pieces.get(&player).map(Vec::as_slice).unwrap_or(&[]);
        for index in 0..before.len().max(now.len()) {
            if let (Some(old), Some(new)) = (before.get(index), now.get(index)) {
                if old.position != new.position {
                    movements.push(PieceMovement {
                        player,
                        piece_index: index,
                        piece_id: new.id.clone(),
                        from: old.position.clone(),
                        to: new.position.clone(),
                    });
                }
            }
        }
    }
    movements
}

/// Computes the delta from `previous` (if any) to `current`.
#[instrument(level = "debug", skip_all)]
pub fn diff(previous: Option<&GameStateSnapshot>, current: &GameStateSnapshot, order: DiceLogOrder) -> TurnDelta {
    let Some(previous) = previous else {
        debug!("no previous state, treating snapshot as first observation");
        // First observations read only `lastDiceRoll`.
        let dice = current.last_dice_roll.map(TurnDice::bare);
        return TurnDelta {
            has_changes: true,
            player_changed: false,
            previous_player: None,
            current_player: current.current_player.unwrap_or(Player::One),
            movements: Vec::new(),
            dice_changed: dice.is_some(),
            dice,
            phase_changed: false,
            phase: current.phase.clone(),
        };
    };

    let dice = resolve_dice(current, order);
    let player_changed =
        current.current_player.is_some() && current.current_player != previous.current_player;
    let movements = piece_movements(previous, current);
    let dice_changed = previous.last_dice_roll != current.last_dice_roll
        || previous.dice_log.len() != current.dice_log.len();
    let phase_changed = previous.phase != current.phase;
    let has_changes = player_changed || !movements.is_empty() || dice_changed || phase_changed;

    debug!(
        has_changes,
        player_changed,
        movements = movements.len(),
        dice_changed,
        phase_changed,
        "computed turn delta"
    );

    TurnDelta {
        has_changes,
        player_changed,
        previous_player: previous.current_player,
        current_player: current
            .current_player
            .or(previous.current_player)
            .unwrap_or(Player::One),
        movements,
        dice,
        dice_changed,
        phase_changed,
        phase: current.phase.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::snapshot::{DiceLogEntry, Piece};

    fn entry(dice1: u8, dice2: u8, player: Player, color: &str) -> DiceLogEntry {
        DiceLogEntry {
            dice1,
            dice2,
            sum: dice1 + dice2,
            player: Some(player),
            color: Some(color.to_string()),
        }
    }

    fn snapshot(current: Player, reds: &[(&str, &str)]) -> GameStateSnapshot {
        let mut s = GameStateSnapshot {
            current_player: Some(current),
            ..Default::default()
        };
        s.pieces.insert(
            Player::One,
            reds.iter().map(|(id, pos)| Piece::new(*id, *pos)).collect(),
        );
        s
    }

    #[test]
    fn self_diff_has_no_changes() {
        let s = snapshot(Player::One, &[("R1", "A10"), ("R2", "E8")]);
        let delta = diff(Some(&s), &s, DiceLogOrder::NewestLast);
        assert!(!delta.has_changes);
        assert!(delta.movements.is_empty());
        assert!(!delta.player_changed);
    }

    #[test]
    fn first_observation_is_a_change() {
        let s = GameStateSnapshot::default();
        let delta = diff(None, &s, DiceLogOrder::NewestLast);
        assert!(delta.has_changes);
        assert_eq!(delta.current_player, Player::One);
        assert!(delta.dice.is_none());
    }

    #[test]
    fn first_observation_takes_last_dice_roll() {
        let s = GameStateSnapshot {
            last_dice_roll: Some(DiceRoll::new(3, 5)),
            ..Default::default()
        };
        let delta = diff(None, &s, DiceLogOrder::NewestFirst);
        let dice = delta.dice.unwrap();
        assert_eq!((dice.dice1, dice.dice2, dice.sum), (3, 5, 8));
        assert_eq!(dice.player, None);
    }

    #[test]
    fn first_observation_ignores_dice_log() {
        let mut s = GameStateSnapshot {
            last_dice_roll: Some(DiceRoll::new(2, 2)),
            ..Default::default()
        };
        s.dice_log.push(entry(6, 1, Player::Two, "blue"));
        for order in [DiceLogOrder::NewestFirst, DiceLogOrder::NewestLast] {
            let dice = diff(None, &s, order).dice.unwrap();
            assert_eq!((dice.dice1, dice.dice2, dice.player), (2, 2, None));
        }

        s.last_dice_roll = None;
        let delta = diff(None, &s, DiceLogOrder::NewestLast);
        assert!(delta.dice.is_none());
        assert!(!delta.dice_changed);
    }

    #[test]
    fn records_moved_piece() {
        let before = snapshot(Player::One, &[("R1", "A10"), ("R2", "E8")]);
        let after = snapshot(Player::Two, &[("R1", "D11"), ("R2", "E8")]);
        let delta = diff(Some(&before), &after, DiceLogOrder::NewestLast);
        assert!(delta.has_changes);
        assert!(delta.player_changed);
        assert_eq!(delta.previous_player, Some(Player::One));
        assert_eq!(delta.current_player, Player::Two);
        assert_eq!(
            delta.movements,
            vec![PieceMovement {
                player: Player::One,
                piece_index: 0,
                piece_id: "R1".to_string(),
                from: Coordinate::new("A10"),
                to: Coordinate::new("D11"),
            }]
        );
    }

    #[test]
    fn extra_or_missing_pieces_are_not_movements() {
        let before = snapshot(Player::One, &[("R1", "A10")]);
        let after = snapshot(Player::One, &[("R1", "A10"), ("R2", "E8")]);
        assert!(diff(Some(&before), &after, DiceLogOrder::NewestLast).movements.is_empty());
        assert!(diff(Some(&after), &before, DiceLogOrder::NewestLast).movements.is_empty());
    }

    #[test]
    fn players_missing_from_current_are_skipped() {
        let mut before = snapshot(Player::One, &[("R1", "A10")]);
        before.pieces.insert(Player::Two, vec![Piece::new("B1", "A1")]);
        let after = snapshot(Player::One, &[("R1", "A10")]);
        assert!(diff(Some(&before), &after, DiceLogOrder::NewestLast).movements.is_empty());
    }

    #[test]
    fn log_order_selects_entry() {
        let mut s = GameStateSnapshot::default();
        s.dice_log = vec![entry(1, 2, Player::One, "red"), entry(5, 6, Player::Two, "blue")];
        s.last_dice_roll = Some(DiceRoll::new(4, 4));

        let first = resolve_dice(&s, DiceLogOrder::NewestFirst).unwrap();
        assert_eq!((first.dice1, first.dice2), (1, 2));
        assert_eq!(first.color.as_deref(), Some("red"));

        let last = resolve_dice(&s, DiceLogOrder::NewestLast).unwrap();
        assert_eq!((last.dice1, last.dice2), (5, 6));
        assert_eq!(last.player, Some(Player::Two));
    }

    #[test]
    fn phase_change_is_flagged() {
        let mut before = snapshot(Player::One, &[]);
        before.phase = Some("setup".to_string());
        let mut after = before.clone();
        after.phase = Some("playing".to_string());
        let delta = diff(Some(&before), &after, DiceLogOrder::NewestLast);
        assert!(delta.phase_changed);
        assert!(delta.has_changes);
        assert_eq!(delta.phase.as_deref(), Some("playing"));
    }

    #[test]
    fn new_log_entry_alone_is_a_change() {
        let before = snapshot(Player::One, &[("R1", "A10")]);
        let mut after = before.clone();
        after.dice_log.push(entry(2, 3, Player::One, "red"));
        let delta = diff(Some(&before), &after, DiceLogOrder::NewestLast);
        assert!(delta.has_changes);
        assert!(delta.dice_changed);
        assert!(delta.movements.is_empty());
    }

    #[test]
    fn log_order_names_roundtrip() {
        for order in [DiceLogOrder::NewestFirst, DiceLogOrder::NewestLast] {
            assert_eq!(DiceLogOrder::from_name(order.name()), Some(order));
        }
        assert_eq!(DiceLogOrder::from_name("oldest"), None);
        assert_eq!(DiceLogOrder::default(), DiceLogOrder::NewestLast);
    }
}
