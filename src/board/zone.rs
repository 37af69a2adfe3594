//! Zone classification.
//!
//! Maps a (coordinate, player) pair to exactly one zone. Membership is tested
//! in a fixed priority order, so overlapping data can never yield two zones.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::coord::Coordinate;
use super::player::Player;
use super::topology::{BoardTopology, TeleportKind, TriggerMapping};

/// The zone category of a board cell from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Zone {
    Waiting,
    Starting,
    Field,
    Prison,
    Temple,
    MovementStart,
    Teleport,
    Home,
}

/// All zones in classification priority order (`Field` is the default).
pub const ALL_ZONES: [Zone; 8] = [
    Zone::Waiting,
    Zone::Starting,
    Zone::Prison,
    Zone::Temple,
    Zone::Teleport,
    Zone::MovementStart,
    Zone::Home,
    Zone::Field,
];

impl Zone {
    /// Returns the zone category label.
    pub const fn label(self) -> &'static str {
        match self {
            Zone::Waiting => "waiting",
            Zone::Starting => "starting",
            Zone::Field => "field",
            Zone::Prison => "prison",
            Zone::Temple => "temple",
            Zone::MovementStart => "movementStart",
            Zone::Teleport => "teleport",
            Zone::Home => "home",
        }
    }

    /// Returns true for cells reached only through a trigger.
    pub const fn is_teleport_target(self) -> bool {
        matches!(self, Zone::Prison | Zone::Temple)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<TeleportKind> for Zone {
    fn from(kind: TeleportKind) -> Zone {
        match kind {
            TeleportKind::Prison => Zone::Prison,
            TeleportKind::Temple => Zone::Temple,
        }
    }
}

impl BoardTopology {
    /// Classifies a coordinate for a player. Total: unknown cells are `Field`.
    #[instrument(level = "trace", skip(self))]
    pub fn classify(&self, coord: &Coordinate, player: Player) -> Zone {
        let layout = self.layout(player);
        if layout.waiting.contains(coord) {
            Zone::Waiting
        } else if layout.starting.contains(coord) {
            Zone::Starting
        } else if self.prison.iter().any(|m| m.target == *coord) {
            Zone::Prison
        } else if self.temple.iter().any(|m| m.target == *coord) {
            Zone::Temple
        } else if self.teleports.contains(coord) {
            Zone::Teleport
        } else if layout.movement_start == *coord {
            Zone::MovementStart
        } else if layout.home.cells.contains(coord) {
            Zone::Home
        } else {
            Zone::Field
        }
    }

    /// Finds the mapping for a piece entering prison or temple.
    ///
    /// Matches the prison/temple cell itself, or the trigger cell when a
    /// snapshot records the piece on the trigger.
    pub fn trigger_for(&self, coord: &Coordinate) -> Option<&TriggerMapping> {
        self.all_mappings()
            .find(|m| m.target == *coord)
            .or_else(|| self.all_mappings().find(|m| m.trigger == *coord))
    }

    /// Finds the mapping for a piece leaving the prison or temple cell it occupies.
    pub fn source_trigger_for(&self, coord: &Coordinate) -> Option<&TriggerMapping> {
        self.all_mappings().find(|m| m.target == *coord)
    }

    fn all_mappings(&self) -> impl Iterator<Item = &TriggerMapping> {
        self.prison.iter().chain(self.temple.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::player::ALL_PLAYERS;

    fn c(s: &str) -> Coordinate {
        Coordinate::new(s)
    }

    #[test]
    fn classifies_each_zone_for_player_one() {
        let topo = BoardTopology::standard();
        let p = Player::One;
        assert_eq!(topo.classify(&c("A10"), p), Zone::Waiting);
        assert_eq!(topo.classify(&c("D11"), p), Zone::Starting);
        assert_eq!(topo.classify(&c("C9"), p), Zone::Prison);
        assert_eq!(topo.classify(&c("B9"), p), Zone::Temple);
        assert_eq!(topo.classify(&c("A8"), p), Zone::Teleport);
        assert_eq!(topo.classify(&c("D1"), p), Zone::Teleport);
        assert_eq!(topo.classify(&c("E11"), p), Zone::MovementStart);
        assert_eq!(topo.classify(&c("F8"), p), Zone::Home);
        assert_eq!(topo.classify(&c("E8"), p), Zone::Field);
        assert_eq!(topo.classify(&c("ZZ99"), p), Zone::Field);
    }

    #[test]
    fn zones_are_relative_to_the_player() {
        let topo = BoardTopology::standard();
        // Player 1's yard and home are ordinary cells for player 2.
        assert_eq!(topo.classify(&c("A10"), Player::Two), Zone::Field);
        assert_eq!(topo.classify(&c("F8"), Player::Two), Zone::Field);
        assert_eq!(topo.classify(&c("E11"), Player::Two), Zone::Field);
        assert_eq!(topo.classify(&c("A5"), Player::Two), Zone::MovementStart);
    }

    #[test]
    fn prison_and_temple_are_shared() {
        let topo = BoardTopology::standard();
        for p in ALL_PLAYERS {
            assert_eq!(topo.classify(&c("I3"), p), Zone::Prison);
            assert_eq!(topo.classify(&c("J9"), p), Zone::Temple);
        }
    }

    #[test]
    fn trigger_lookups_are_inverse_on_known_cells() {
        let topo = BoardTopology::standard();
        for kind in [TeleportKind::Prison, TeleportKind::Temple] {
            for m in topo.mappings(kind) {
                let entering = topo.trigger_for(&m.target).unwrap();
                let leaving = topo.source_trigger_for(&m.target).unwrap();
                assert_eq!(entering.trigger, m.trigger);
                assert_eq!(leaving.trigger, m.trigger);
                assert_eq!(entering.kind, kind);
            }
        }
    }

    #[test]
    fn trigger_for_accepts_trigger_cell() {
        let topo = BoardTopology::standard();
        let m = topo.trigger_for(&c("C7")).unwrap();
        assert_eq!(m.target, c("C9"));
        assert!(topo.source_trigger_for(&c("C7")).is_none());
    }

    #[test]
    fn unknown_cells_are_not_found() {
        let topo = BoardTopology::standard();
        assert!(topo.trigger_for(&c("E8")).is_none());
        assert!(topo.source_trigger_for(&c("E8")).is_none());
    }

    #[test]
    fn labels() {
        assert_eq!(Zone::MovementStart.label(), "movementStart");
        assert_eq!(Zone::Waiting.to_string(), "waiting");
        assert_eq!(Zone::from(TeleportKind::Temple), Zone::Temple);
        assert_eq!(ALL_ZONES.len(), 8);
    }
}
