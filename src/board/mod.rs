//! Board representation.
//!
//! Contains coordinates, players, the immutable board topology, the standard
//! board tables, and zone classification.

pub mod coord;
pub mod player;
pub mod standard;
pub mod topology;
pub mod zone;

pub use coord::Coordinate;
pub use player::{InvalidPlayer, Player, ALL_PLAYERS, FALLBACK_COLORS, PLAYER_COUNT};
pub use standard::{HOME_LEN, RING_LEN};
pub use topology::{
    BoardTopology, HomeZone, PlayerLayout, TeleportKind, TopologyError, TopologyFile,
    TriggerMapping,
};
pub use zone::{Zone, ALL_ZONES};
