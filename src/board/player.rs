//! Player identifiers and default colours.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The number of players at the table.
pub const PLAYER_COUNT: usize = 4;

/// One of the four players, numbered 1 to 4.
///
/// Serialized as its number, including when used as a JSON map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Player {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

/// All players in seating order.
pub const ALL_PLAYERS: [Player; PLAYER_COUNT] = [Player::One, Player::Two, Player::Three, Player::Four];

/// Colour names used when neither the dice log nor the player table names one.
pub const FALLBACK_COLORS: [&str; PLAYER_COUNT] = ["red", "blue", "green", "yellow"];

impl Player {
    /// Returns the player number (1-4).
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Returns the zero-based index for per-player tables.
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Parses a player from its number.
    pub fn from_number(n: u8) -> Option<Player> {
        match n {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            3 => Some(Player::Three),
            4 => Some(Player::Four),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Error for a player number outside 1-4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("player number must be between 1 and 4, got {0}")]
pub struct InvalidPlayer(pub u8);

impl TryFrom<u8> for Player {
    type Error = InvalidPlayer;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Player::from_number(n).ok_or(InvalidPlayer(n))
    }
}

impl From<Player> for u8 {
    fn from(p: Player) -> u8 {
        p.number()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn number_roundtrip() {
        for p in ALL_PLAYERS {
            assert_eq!(Player::from_number(p.number()), Some(p));
        }
        assert_eq!(Player::from_number(0), None);
        assert_eq!(Player::from_number(5), None);
    }

    #[test]
    fn indices_are_sequential() {
        for (i, p) in ALL_PLAYERS.iter().enumerate() {
            assert_eq!(p.index(), i);
        }
    }

    #[test]
    fn serializes_as_number() {
        assert_eq!(serde_json::to_string(&Player::Three).unwrap(), "3");
        let p: Player = serde_json::from_str("2").unwrap();
        assert_eq!(p, Player::Two);
        assert!(serde_json::from_str::<Player>("7").is_err());
    }

    #[test]
    fn works_as_map_key() {
        let map: BTreeMap<Player, u32> = serde_json::from_str(r#"{"1": 10, "4": 40}"#).unwrap();
        assert_eq!(map.get(&Player::One), Some(&10));
        assert_eq!(map.get(&Player::Four), Some(&40));
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"1":10,"4":40}"#);
    }
}
