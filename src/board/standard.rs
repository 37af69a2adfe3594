//! The standard 11x11 cross-and-circle board.
//!
//! Columns run `A`..`K`, rows `1`..`11`. The four arms of the cross are three
//! cells wide; their outer cells form a 40-cell ring shared by all players.
//! Each player enters the ring at their own movement-start cell, walks the
//! full ring, and turns into a four-cell home run up the middle of their arm.
//! Waiting yards sit in the corners, together with the starting cell, the
//! player's teleport cell, and the prison and temple cells.

use super::coord::Coordinate;
use super::player::PLAYER_COUNT;
use super::topology::{BoardTopology, HomeZone, PlayerLayout, TeleportKind, TriggerMapping};

/// Number of cells on the shared ring.
pub const RING_LEN: usize = 40;

/// Number of cells in each home run.
pub const HOME_LEN: usize = 4;

/// Offset between consecutive players' entry cells on the ring.
const ENTRY_STRIDE: usize = RING_LEN / PLAYER_COUNT;

/// The shared ring, starting at player 1's movement-start cell.
static RING: [&str; RING_LEN] = [
    "E11", "E10", "E9", "E8", "E7", "D7", "C7", "B7", "A7", "A6", // 0-9
    "A5", "B5", "C5", "D5", "E5", "E4", "E3", "E2", "E1", "F1", // 10-19
    "G1", "G2", "G3", "G4", "G5", "H5", "I5", "J5", "K5", "K6", // 20-29
    "K7", "J7", "I7", "H7", "G7", "G8", "G9", "G10", "G11", "F11", // 30-39
];

/// Static per-player cell sets, indexed by `Player::index()`.
struct PlayerCells {
    waiting: [&'static str; 4],
    starting: &'static str,
    home: [&'static str; HOME_LEN],
    teleport: &'static str,
}

static PLAYER_CELLS: [PlayerCells; PLAYER_COUNT] = [
    // 1: bottom-left yard, home runs up column F from F10
    PlayerCells { waiting: ["A10", "B10", "A11", "B11"], starting: "D11", home: ["F10", "F9", "F8", "F7"], teleport: "A8" },
    // 2: top-left yard, home runs along row 6 from B6
    PlayerCells { waiting: ["A1", "B1", "A2", "B2"], starting: "A4", home: ["B6", "C6", "D6", "E6"], teleport: "D1" },
    // 3: top-right yard, home runs down column F from F2
    PlayerCells { waiting: ["J1", "K1", "J2", "K2"], starting: "H1", home: ["F2", "F3", "F4", "F5"], teleport: "K4" },
    // 4: bottom-right yard, home runs along row 6 from J6
    PlayerCells { waiting: ["J10", "K10", "J11", "K11"], starting: "K8", home: ["J6", "I6", "H6", "G6"], teleport: "H11" },
];

/// Prison trigger (on the ring) -> prison cell.
static PRISON: [(&str, &str); 4] = [("C7", "C9"), ("E3", "C3"), ("I5", "I3"), ("G9", "I9")];

/// Temple trigger (on the ring) -> temple cell.
static TEMPLE: [(&str, &str); 4] = [("B7", "B9"), ("E2", "C2"), ("G2", "I2"), ("J7", "J9")];

fn coords(cells: &[&str]) -> Vec<Coordinate> {
    cells.iter().map(|c| Coordinate::new(*c)).collect()
}

fn layout(index: usize) -> PlayerLayout {
    let cells = &PLAYER_CELLS[index];
    let entry = index * ENTRY_STRIDE;
    let mut path: Vec<Coordinate> = (0..RING_LEN)
        .map(|step| Coordinate::new(RING[(entry + step) % RING_LEN]))
        .collect();
    path.extend(coords(&cells.home));

    PlayerLayout {
        movement_start: Coordinate::new(RING[entry]),
        path,
        waiting: coords(&cells.waiting),
        starting: vec![Coordinate::new(cells.starting)],
        home: HomeZone {
            cells: coords(&cells.home),
            entry: Coordinate::new(cells.home[0]),
            end: Coordinate::new(cells.home[HOME_LEN - 1]),
        },
        teleport: Coordinate::new(cells.teleport),
    }
}

fn table(kind: TeleportKind, pairs: &[(&str, &str)]) -> Vec<TriggerMapping> {
    pairs
        .iter()
        .map(|(trigger, target)| TriggerMapping {
            kind,
            trigger: Coordinate::new(*trigger),
            target: Coordinate::new(*target),
        })
        .collect()
}

impl BoardTopology {
    /// Builds the standard board.
    pub fn standard() -> Self {
        BoardTopology::assemble(
            [0, 1, 2, 3].map(layout),
            table(TeleportKind::Prison, &PRISON),
            table(TeleportKind::Temple, &TEMPLE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::player::{Player, ALL_PLAYERS};
    use std::collections::HashSet;

    #[test]
    fn ring_cells_are_distinct() {
        let set: HashSet<&str> = RING.iter().copied().collect();
        assert_eq!(set.len(), RING_LEN);
    }

    #[test]
    fn ring_is_a_closed_loop() {
        for i in 0..RING_LEN {
            let a = Coordinate::new(RING[i]);
            let b = Coordinate::new(RING[(i + 1) % RING_LEN]);
            assert_eq!(a.manhattan(&b), 1, "{} and {} are not neighbours", a, b);
        }
    }

    #[test]
    fn paths_have_ring_plus_home() {
        let topo = BoardTopology::standard();
        for p in ALL_PLAYERS {
            let path = topo.path(p);
            assert_eq!(path.len(), RING_LEN + HOME_LEN);
            assert_eq!(path[0], topo.layout(p).movement_start);
            assert_eq!(path[RING_LEN], topo.layout(p).home.entry);
            assert_eq!(path[RING_LEN + HOME_LEN - 1], topo.layout(p).home.end);
        }
    }

    #[test]
    fn home_run_enters_next_to_last_ring_cell() {
        let topo = BoardTopology::standard();
        for p in ALL_PLAYERS {
            let path = topo.path(p);
            assert_eq!(path[RING_LEN - 1].manhattan(&path[RING_LEN]), 1);
        }
    }

    #[test]
    fn entry_cells_follow_seating_order() {
        let topo = BoardTopology::standard();
        assert_eq!(topo.layout(Player::One).movement_start.as_str(), "E11");
        assert_eq!(topo.layout(Player::Two).movement_start.as_str(), "A5");
        assert_eq!(topo.layout(Player::Three).movement_start.as_str(), "G1");
        assert_eq!(topo.layout(Player::Four).movement_start.as_str(), "K7");
    }

    #[test]
    fn triggers_are_on_the_ring_and_targets_are_not() {
        let ring: HashSet<&str> = RING.iter().copied().collect();
        for (trigger, target) in PRISON.iter().chain(TEMPLE.iter()) {
            assert!(ring.contains(trigger), "{} should be on the ring", trigger);
            assert!(!ring.contains(target), "{} should be off the ring", target);
        }
    }

    #[test]
    fn special_cells_do_not_overlap() {
        let mut seen = HashSet::new();
        for cells in &PLAYER_CELLS {
            for c in cells.waiting.iter().chain(cells.home.iter()) {
                assert!(seen.insert(*c), "{} used twice", c);
            }
            assert!(seen.insert(cells.starting), "{} used twice", cells.starting);
            assert!(seen.insert(cells.teleport), "{} used twice", cells.teleport);
        }
        for (trigger, target) in PRISON.iter().chain(TEMPLE.iter()) {
            assert!(seen.insert(*target), "{} used twice", target);
            assert!(!seen.contains(trigger));
        }
        for c in RING {
            assert!(!seen.contains(c), "{} is both ring and special", c);
        }
    }
}
