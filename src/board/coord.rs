//! Board coordinates.
//!
//! A coordinate is an opaque cell token such as `K1`: column letters followed
//! by a row number. Only the Manhattan estimate looks inside it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A board cell identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coordinate(String);

impl Coordinate {
    /// Creates a coordinate from any string token.
    pub fn new(token: impl Into<String>) -> Self {
        Coordinate(token.into())
    }

    /// Returns the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the column number: letters read base-26 with `A` = 1.
    ///
    /// Returns 0 when the token has no leading letters.
    pub fn column(&self) -> u32 {
        self.0
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .fold(0u32, |acc, c| {
                let digit = u32::from(c.to_ascii_uppercase() as u8 - b'A') + 1;
                acc.saturating_mul(26).saturating_add(digit)
            })
    }

    /// Returns the row number following the column letters, or 0 if absent.
    pub fn row(&self) -> u32 {
        let digits = self.0.trim_start_matches(|c: char| c.is_ascii_alphabetic());
        digits.parse().unwrap_or(0)
    }

    /// Grid distance `|dcol| + |drow|` between two coordinates.
    pub fn manhattan(&self, other: &Coordinate) -> u32 {
        self.column()
            .abs_diff(other.column())
            .saturating_add(self.row().abs_diff(other.row()))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Coordinate {
    fn from(s: &str) -> Self {
        Coordinate::new(s)
    }
}

impl From<String> for Coordinate {
    fn from(s: String) -> Self {
        Coordinate(s)
    }
}
