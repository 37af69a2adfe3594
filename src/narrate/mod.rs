//! Turn narration.
//!
//! Renders a turn delta into one deterministic paragraph. Narration is a pure
//! function of the delta, the current snapshot, and the validation errors, so
//! reports can be compared as plain text.

pub mod color;

use std::collections::HashSet;

use crate::board::{BoardTopology, Coordinate, Player, Zone};
use crate::rules::{is_capture, measure};
use crate::turn::diff::{PieceMovement, TurnDelta, TurnDice};
use crate::turn::snapshot::GameStateSnapshot;

pub use color::{resolve_color, ColorContext, Palette};

/// Text returned when two snapshots are identical.
pub const NO_CHANGES: &str = "No changes detected.";

/// Narrates a turn using the default palette.
pub fn narrate(topology: &BoardTopology, delta: &TurnDelta, state: &GameStateSnapshot, errors: &[String]) -> String {
    narrate_with_palette(topology, delta, state, errors, &Palette::default())
}

/// Narrates a turn, falling back to `palette` for unknown colours.
pub fn narrate_with_palette(
    topology: &BoardTopology,
    delta: &TurnDelta,
    state: &GameStateSnapshot,
    errors: &[String],
    palette: &Palette,
) -> String {
    if !delta.has_changes {
        return NO_CHANGES.to_string();
    }

    let actor = acting_player(topology, delta);
    let actor_color = resolve_color(&ColorContext {
        player: actor,
        dice: delta.dice.as_ref(),
        state,
        palette,
    });

    let mut sentences = Vec::new();
    match &delta.dice {
        Some(dice) => sentences.push(format!(
            "{} rolled {} and {} ({}).",
            capitalize(actor_color),
            dice.dice1,
            dice.dice2,
            dice.sum
        )),
        None if !delta.movements.is_empty() => {
            sentences.push(format!("{} moved.", capitalize(actor_color)));
        }
        None => {}
    }

    if !errors.is_empty() {
        sentences.push(format!("Invalid move: {}", errors.join(" ")));
    } else if !delta.movements.is_empty() {
        let clauses: Vec<String> = delta
            .movements
            .iter()
            .map(|m| describe_movement(topology, m, delta.dice.as_ref(), state))
            .collect();
        sentences.push(format!("{}.", join_clauses(&clauses)));
    } else if delta.player_changed {
        sentences.push("No piece moved.".to_string());
    }

    if delta.player_changed {
        let next = resolve_color(&ColorContext {
            player: delta.current_player,
            dice: None,
            state,
            palette,
        });
        sentences.push(format!("Next turn: {}.", capitalize(next)));
    }

    if delta.phase_changed {
        let phase = delta.phase.as_deref().unwrap_or("none");
        sentences.push(format!("Game phase changed to {}.", phase));
    }

    if sentences.is_empty() {
        // The dice record changed but left no roll to report.
        sentences.push(format!("{} updated the game state.", capitalize(actor_color)));
    }
    sentences.join(" ")
}

/// The player the turn belongs to.
///
/// Captured pieces belong to the victim, so they never name the actor.
fn acting_player(topology: &BoardTopology, delta: &TurnDelta) -> Player {
    delta
        .dice
        .as_ref()
        .and_then(|d| d.player)
        .or(delta.previous_player)
        .or_else(|| {
            delta
                .movements
                .iter()
                .find(|m| !is_capture(topology, m))
                .map(|m| m.player)
        })
        .unwrap_or(delta.current_player)
}

/// Describes one movement as a clause starting with the piece id.
pub fn describe_movement(
    topology: &BoardTopology,
    movement: &PieceMovement,
    dice: Option<&TurnDice>,
    state: &GameStateSnapshot,
) -> String {
    let PieceMovement {
        player,
        piece_id: id,
        from,
        to,
        ..
    } = movement;

    if is_capture(topology, movement) {
        return format!("{} was captured on {} and returned to the waiting zone", id, from);
    }

    let origin = topology.classify(from, *player);
    let destination = topology.classify(to, *player);
    let steps = measure(topology, from, to, *player).steps;

    match (origin, destination) {
        (Zone::Waiting, Zone::Starting) => format!("{} left the waiting zone", id),
        (Zone::Starting, d) if d != Zone::Starting => {
            format!("{} left the starting position, travelling {}", id, plural_steps(steps))
        }
        (Zone::Prison, _) if dice.is_some_and(|d| d.sum >= 6) => match topology.source_trigger_for(from) {
            Some(m) => format!(
                "{} left prison on six and moved from {} to {}, {}",
                id,
                m.trigger,
                to,
                plural_steps(steps)
            ),
            None => format!("{} left prison on six and moved to {}, {}", id, to, plural_steps(steps)),
        },
        (Zone::Prison, _) => format!("{} left prison", id),
        (Zone::Temple, _) => match topology.source_trigger_for(from) {
            Some(m) => format!(
                "{} left the temple via {} and moved to {}, {}",
                id,
                m.trigger,
                to,
                plural_steps(steps)
            ),
            None => format!("{} left the temple and moved to {}, {}", id, to, plural_steps(steps)),
        },
        (_, Zone::Prison) => match topology.trigger_for(to) {
            Some(m) => format!("{} landed on {} and was sent to prison at {}", id, m.trigger, to),
            None => format!("{} was sent to prison at {}", id, to),
        },
        (_, Zone::Temple) => match topology.trigger_for(to) {
            Some(m) => format!("{} landed on {} and entered the temple at {}", id, m.trigger, to),
            None => format!("{} entered the temple at {}", id, to),
        },
        (_, Zone::Home) => {
            let how = if home_is_settled(topology, *player, to, state) {
                "settled"
            } else {
                "hidden"
            };
            format!("{} {} in home at {}, {}", id, how, to, plural_steps(steps))
        }
        _ => format!("{} moved from {} to {}, {}", id, from, to, plural_steps(steps)),
    }
}

/// True when every home cell beyond `landing` is already occupied.
///
/// A piece that cannot advance further is settled; one with free cells ahead
/// is only hidden.
pub fn home_is_settled(
    topology: &BoardTopology,
    player: Player,
    landing: &Coordinate,
    state: &GameStateSnapshot,
) -> bool {
    let Some(index) = topology.path_index(landing, player) else {
        return false;
    };
    let home = &topology.layout(player).home.cells;
    let occupied: HashSet<&Coordinate> = state.occupied().collect();
    topology.path(player)[index + 1..]
        .iter()
        .filter(|cell| home.contains(cell))
        .all(|cell| occupied.contains(cell))
}

fn plural_steps(n: u32) -> String {
    if n == 1 {
        "1 step".to_string()
    } else {
        format!("{} steps", n)
    }
}

/// Joins clauses as `a`, `a and b`, or `a, b and c`.
fn join_clauses(clauses: &[String]) -> String {
    match clauses {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
