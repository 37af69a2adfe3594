//! Board topology: per-player paths, zones, and teleport tables.
//!
//! A `BoardTopology` is built once (from the compiled-in standard board or a
//! JSON file) and then shared read-only by every component. Path positions are
//! indexed in a hash map per player so lookups are O(1).

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::coord::Coordinate;
use super::player::{Player, ALL_PLAYERS, PLAYER_COUNT};

/// Errors raised while loading or validating a topology.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("failed to read topology file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse topology JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing layout for player {0}")]
    MissingPlayer(Player),

    #[error("player {0} has an empty path")]
    EmptyPath(Player),

    #[error("player {player} path visits '{coord}' more than once")]
    RepeatedPathCell { player: Player, coord: Coordinate },

    #[error("player {player} home cell '{coord}' is not on the path")]
    HomeOffPath { player: Player, coord: Coordinate },

    #[error("player {player} home endpoint '{coord}' is not a home cell")]
    HomeEndpoint { player: Player, coord: Coordinate },

    #[error("{kind} trigger '{coord}' appears more than once")]
    DuplicateTrigger { kind: TeleportKind, coord: Coordinate },

    #[error("{kind} target '{coord}' is reachable from more than one trigger")]
    DuplicateTarget { kind: TeleportKind, coord: Coordinate },
}

/// Which kind of cell a trigger teleports into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeleportKind {
    Prison,
    Temple,
}

impl TeleportKind {
    /// Returns the lowercase label.
    pub const fn label(self) -> &'static str {
        match self {
            TeleportKind::Prison => "prison",
            TeleportKind::Temple => "temple",
        }
    }
}

impl std::fmt::Display for TeleportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A trigger cell and the prison or temple cell it sends pieces to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriggerMapping {
    pub kind: TeleportKind,
    pub trigger: Coordinate,
    pub target: Coordinate,
}

/// A player's home run, with its entry and far-end cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeZone {
    pub cells: Vec<Coordinate>,
    pub entry: Coordinate,
    pub end: Coordinate,
}

/// Static layout for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLayout {
    /// Ordered path from the movement-start cell to the end of the home run.
    pub path: Vec<Coordinate>,
    pub waiting: Vec<Coordinate>,
    pub starting: Vec<Coordinate>,
    pub home: HomeZone,
    pub movement_start: Coordinate,
    pub teleport: Coordinate,
}

/// On-disk topology description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyFile {
    pub players: BTreeMap<Player, PlayerLayout>,
    /// Prison trigger -> prison cell.
    #[serde(default)]
    pub prison: BTreeMap<Coordinate, Coordinate>,
    /// Temple trigger -> temple cell.
    #[serde(default)]
    pub temple: BTreeMap<Coordinate, Coordinate>,
}

/// Immutable board description shared by every component.
#[derive(Debug, Clone)]
pub struct BoardTopology {
    pub(super) layouts: [PlayerLayout; PLAYER_COUNT],
    pub(super) path_index: [HashMap<Coordinate, usize>; PLAYER_COUNT],
    pub(super) prison: Vec<TriggerMapping>,
    pub(super) temple: Vec<TriggerMapping>,
    pub(super) teleports: HashSet<Coordinate>,
}

impl BoardTopology {
    /// Assembles a topology from layouts already known to be consistent.
    pub(super) fn assemble(
        layouts: [PlayerLayout; PLAYER_COUNT],
        prison: Vec<TriggerMapping>,
        temple: Vec<TriggerMapping>,
    ) -> Self {
        let path_index = [0, 1, 2, 3].map(|i| {
            layouts[i]
                .path
                .iter()
                .enumerate()
                .map(|(idx, c)| (c.clone(), idx))
                .collect::<HashMap<_, _>>()
        });
        let teleports = layouts.iter().map(|l| l.teleport.clone()).collect();
        BoardTopology {
            layouts,
            path_index,
            prison,
            temple,
            teleports,
        }
    }

    /// Builds a topology from a parsed file, rejecting inconsistent data.
    pub fn from_file(file: TopologyFile) -> Result<Self, TopologyError> {
        let TopologyFile {
            mut players,
            prison,
            temple,
        } = file;

        let mut layouts = Vec::with_capacity(PLAYER_COUNT);
        for player in ALL_PLAYERS {
            let layout = players
                .remove(&player)
                .ok_or(TopologyError::MissingPlayer(player))?;
            check_layout(player, &layout)?;
            layouts.push(layout);
        }
        let layouts: [PlayerLayout; PLAYER_COUNT] = match layouts.try_into() {
            Ok(l) => l,
            Err(_) => return Err(TopologyError::MissingPlayer(Player::One)),
        };

        let prison = trigger_table(TeleportKind::Prison, prison)?;
        let temple = trigger_table(TeleportKind::Temple, temple)?;
        Ok(BoardTopology::assemble(layouts, prison, temple))
    }

    /// Parses and validates a topology from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, TopologyError> {
        let file: TopologyFile = serde_json::from_str(json)?;
        BoardTopology::from_file(file)
    }

    /// Loads and validates a topology from a JSON file.
    pub fn load(path: &Path) -> Result<Self, TopologyError> {
        let data = fs::read_to_string(path)?;
        BoardTopology::from_json_str(&data)
    }

    /// Converts back to the serializable file form.
    pub fn to_file(&self) -> TopologyFile {
        let players = ALL_PLAYERS
            .iter()
            .map(|&p| (p, self.layouts[p.index()].clone()))
            .collect();
        let table = |mappings: &[TriggerMapping]| {
            mappings
                .iter()
                .map(|m| (m.trigger.clone(), m.target.clone()))
                .collect()
        };
        TopologyFile {
            players,
            prison: table(&self.prison),
            temple: table(&self.temple),
        }
    }

    /// Returns the static layout of a player.
    pub fn layout(&self, player: Player) -> &PlayerLayout {
        &self.layouts[player.index()]
    }

    /// Returns the ordered path of a player.
    pub fn path(&self, player: Player) -> &[Coordinate] {
        &self.layouts[player.index()].path
    }

    /// Returns the index of `coord` on the player's path, if it is a path cell.
    pub fn path_index(&self, coord: &Coordinate, player: Player) -> Option<usize> {
        self.path_index[player.index()].get(coord).copied()
    }

    /// Returns every configured mapping of the given kind.
    pub fn mappings(&self, kind: TeleportKind) -> &[TriggerMapping] {
        match kind {
            TeleportKind::Prison => &self.prison,
            TeleportKind::Temple => &self.temple,
        }
    }
}

fn check_layout(player: Player, layout: &PlayerLayout) -> Result<(), TopologyError> {
    if layout.path.is_empty() {
        return Err(TopologyError::EmptyPath(player));
    }
    let mut seen = HashSet::new();
    for coord in &layout.path {
        if !seen.insert(coord) {
            return Err(TopologyError::RepeatedPathCell {
                player,
                coord: coord.clone(),
            });
        }
    }
    for coord in &layout.home.cells {
        if !seen.contains(coord) {
            return Err(TopologyError::HomeOffPath {
                player,
                coord: coord.clone(),
            });
        }
    }
    for coord in [&layout.home.entry, &layout.home.end] {
        if !layout.home.cells.contains(coord) {
            return Err(TopologyError::HomeEndpoint {
                player,
                coord: coord.clone(),
            });
        }
    }
    Ok(())
}

fn trigger_table(
    kind: TeleportKind,
    table: BTreeMap<Coordinate, Coordinate>,
) -> Result<Vec<TriggerMapping>, TopologyError> {
    let mut targets = HashSet::new();
    let mut mappings = Vec::with_capacity(table.len());
    for (trigger, target) in table {
        if !targets.insert(target.clone()) {
            return Err(TopologyError::DuplicateTarget { kind, coord: target });
        }
        mappings.push(TriggerMapping {
            kind,
            trigger,
            target,
        });
    }
    // A trigger that is also another pair's target would make lookups ambiguous.
    for m in &mappings {
        if targets.contains(&m.trigger) {
            return Err(TopologyError::DuplicateTrigger {
                kind,
                coord: m.trigger.clone(),
            });
        }
    }
    Ok(mappings)
}
