//! Path distance between two cells for one player.
//!
//! The board path bends around the cross, so coordinate arithmetic cannot
//! count steps. Distance is measured by walking the player's path, with
//! virtual indices for the yard and starting cell and trigger cells standing
//! in for prison and temple. When neither end can be placed on the path the
//! Manhattan estimate is used and the result is flagged as estimated.

use serde::Serialize;
use tracing::warn;

use crate::board::{BoardTopology, Coordinate, Player, Zone};

/// How a distance was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DistanceMethod {
    /// Counted along the player's path.
    Path,
    /// Manhattan estimate; not guaranteed to match any dice roll.
    Estimated,
}

/// A measured step count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Distance {
    pub steps: u32,
    pub method: DistanceMethod,
}

/// Where a move starts, relative to the player's path.
enum Origin {
    /// A real path index.
    Index(usize),
    /// Steps needed before reaching path index 0 (2 from the yard, 1 from the starting cell).
    BeforePath(u32),
}

/// Measures the distance, reporting whether it had to be estimated.
pub fn measure(topology: &BoardTopology, from: &Coordinate, to: &Coordinate, player: Player) -> Distance {
    let distance = walk_path(topology, from, to, player).unwrap_or_else(|| estimate(from, to));
    if distance.method == DistanceMethod::Estimated {
        warn!(%from, %to, %player, steps = distance.steps, "distance estimated from coordinates");
    }
    distance
}

/// Number of steps a piece of `player` travelled from `from` to `to`.
pub fn distance(topology: &BoardTopology, from: &Coordinate, to: &Coordinate, player: Player) -> u32 {
    measure(topology, from, to, player).steps
}

fn trigger_index(
    topology: &BoardTopology,
    coord: &Coordinate,
    player: Player,
    leaving: bool,
) -> Option<usize> {
    let mapping = if leaving {
        topology.source_trigger_for(coord)
    } else {
        topology.trigger_for(coord)
    }?;
    topology.path_index(&mapping.trigger, player)
}

/// Counts steps along the path, resolving off-path ends through zones.
///
/// `None` means one of the ends cannot be placed on the path.
fn walk_path(topology: &BoardTopology, from: &Coordinate, to: &Coordinate, player: Player) -> Option<Distance> {
    let counted = |steps| {
        Some(Distance {
            steps,
            method: DistanceMethod::Path,
        })
    };

    let origin = match topology.path_index(from, player) {
        Some(index) => Origin::Index(index),
        None => match topology.classify(from, player) {
            Zone::Waiting if topology.classify(to, player) == Zone::Starting => return counted(1),
            Zone::Waiting => Origin::BeforePath(2),
            Zone::Starting if topology.classify(to, player) == Zone::Starting => return counted(0),
            Zone::Starting => Origin::BeforePath(1),
            Zone::Prison | Zone::Temple => Origin::Index(trigger_index(topology, from, player, true)?),
            _ => return None,
        },
    };

    // Home cells are path members, so only prison and temple need resolving here.
    let target = match topology.path_index(to, player) {
        Some(index) => index,
        None => match topology.classify(to, player) {
            Zone::Prison | Zone::Temple => trigger_index(topology, to, player, false)?,
            _ => return None,
        },
    };

    let steps = match origin {
        Origin::Index(index) => index.abs_diff(target),
        Origin::BeforePath(offset) => offset as usize + target,
    };
    counted(u32::try_from(steps).unwrap_or(u32::MAX))
}

fn estimate(from: &Coordinate, to: &Coordinate) -> Distance {
    Distance {
        steps: from.manhattan(to),
        method: DistanceMethod::Estimated,
    }
}
