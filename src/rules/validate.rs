//! Move validation against the dice.
//!
//! Each rule is checked independently and every violation is reported, so a
//! single movement can break several rules at once. Captures are exempt: the
//! captured piece was sent home by an opponent, not moved by its owner.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use super::distance::measure;
use crate::board::{BoardTopology, Coordinate, Zone};
use crate::turn::diff::{PieceMovement, TurnDelta};
use crate::turn::snapshot::DiceRoll;

/// A broken movement rule. The display text is shown to players.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("Piece {piece} moved {steps} steps, which matches neither die nor their sum ({dice1}+{dice2}).")]
    DistanceMismatch {
        piece: String,
        steps: u32,
        dice1: u8,
        dice2: u8,
    },

    #[error("Piece {piece} cannot leave the waiting zone without a 1 (rolled {dice1}+{dice2}).")]
    WaitingExitNeedsOne { piece: String, dice1: u8, dice2: u8 },

    #[error("Piece {piece} cannot leave prison without a 6 (rolled {dice1}+{dice2}).")]
    PrisonExitNeedsSix { piece: String, dice1: u8, dice2: u8 },

    #[error("Piece {piece} used teleport {cell}, which belongs to another player.")]
    ForeignTeleport { piece: String, cell: Coordinate },

    #[error("Piece {piece} moved but no dice roll was recorded.")]
    MissingDice { piece: String },
}

/// Overall result of validating a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    /// Builds an outcome from collected violations.
    pub fn from_violations(violations: &[Violation]) -> Self {
        ValidationOutcome {
            is_valid: violations.is_empty(),
            errors: violations.iter().map(ToString::to_string).collect(),
        }
    }

    /// An outcome with no errors.
    pub fn valid() -> Self {
        ValidationOutcome {
            is_valid: true,
            errors: Vec::new(),
        }
    }
}

/// Returns true if the movement sent a piece back to its yard from elsewhere.
pub fn is_capture(topology: &BoardTopology, movement: &PieceMovement) -> bool {
    topology.classify(&movement.to, movement.player) == Zone::Waiting
        && topology.classify(&movement.from, movement.player) != Zone::Waiting
}

/// Checks one movement against the dice, returning every broken rule.
#[instrument(level = "debug", skip(topology), fields(piece = %movement.piece_id))]
pub fn validate_movement(topology: &BoardTopology, movement: &PieceMovement, dice: DiceRoll) -> Vec<Violation> {
    if is_capture(topology, movement) {
        debug!("capture, rules skipped");
        return Vec::new();
    }

    let player = movement.player;
    let origin = topology.classify(&movement.from, player);
    let destination = topology.classify(&movement.to, player);
    let piece = || movement.piece_id.clone();
    let DiceRoll { dice1, dice2 } = dice;
    let mut violations = Vec::new();

    let steps = measure(topology, &movement.from, &movement.to, player).steps;
    let reachable = [u32::from(dice1), u32::from(dice2), u32::from(dice.sum())];
    if !reachable.contains(&steps) {
        violations.push(Violation::DistanceMismatch {
            piece: piece(),
            steps,
            dice1,
            dice2,
        });
    }

    if origin == Zone::Waiting && destination != Zone::Waiting && !dice.shows(1) {
        violations.push(Violation::WaitingExitNeedsOne {
            piece: piece(),
            dice1,
            dice2,
        });
    }

    if origin == Zone::Prison && !dice.shows(6) {
        violations.push(Violation::PrisonExitNeedsSix {
            piece: piece(),
            dice1,
            dice2,
        });
    }

    if origin == Zone::Teleport && movement.from != topology.layout(player).teleport {
        violations.push(Violation::ForeignTeleport {
            piece: piece(),
            cell: movement.from.clone(),
        });
    }

    violations
}

/// Collects violations for every movement of a turn, in movement order.
pub fn turn_violations(topology: &BoardTopology, delta: &TurnDelta) -> Vec<Violation> {
    let roll = delta.dice.as_ref().map(|d| d.roll());
    let mut violations = Vec::new();
    for movement in &delta.movements {
        match roll {
            Some(dice) => violations.extend(validate_movement(topology, movement, dice)),
            None if !is_capture(topology, movement) => violations.push(Violation::MissingDice {
                piece: movement.piece_id.clone(),
            }),
            None => {}
        }
    }
    violations
}

/// Validates every movement of a turn.
pub fn validate_turn(topology: &BoardTopology, delta: &TurnDelta) -> ValidationOutcome {
    ValidationOutcome::from_violations(&turn_violations(topology, delta))
}
