//! Turn evaluation: snapshot schema, diffing, and the full pipeline.

pub mod diff;
pub mod snapshot;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::board::BoardTopology;
use crate::config::EngineConfig;
use crate::narrate::narrate_with_palette;
use crate::rules::{validate_turn, ValidationOutcome};

pub use diff::{diff, piece_movements, resolve_dice, DiceLogOrder, PieceMovement, TurnDelta, TurnDice};
pub use snapshot::{DiceLogEntry, DiceRoll, GameStateSnapshot, Piece, PlayerInfo, SnapshotError};

/// Everything the engine concluded about one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnReport {
    pub delta: TurnDelta,
    pub validation: ValidationOutcome,
    pub narrative: String,
}

/// Diffs, validates and narrates the step from `previous` to `current`.
#[instrument(level = "debug", skip_all)]
pub fn evaluate_turn(
    topology: &BoardTopology,
    config: &EngineConfig,
    previous: Option<&GameStateSnapshot>,
    current: &GameStateSnapshot,
) -> TurnReport {
    let delta = diff(previous, current, config.dice_log_order);
    let validation = validate_turn(topology, &delta);
    let narrative = narrate_with_palette(topology, &delta, current, &validation.errors, &config.fallback_colors);
    debug!(
        valid = validation.is_valid,
        movements = delta.movements.len(),
        "turn evaluated"
    );
    TurnReport {
        delta,
        validation,
        narrative,
    }
}
