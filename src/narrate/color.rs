//! Display colour resolution.
//!
//! A player's colour comes from the first source that knows it: the dice-log
//! entry for the roll, then the seating table in the snapshot, then a fixed
//! palette indexed by player number.

use serde::{Deserialize, Serialize};

use crate::board::{Player, FALLBACK_COLORS, PLAYER_COUNT};
use crate::turn::diff::TurnDice;
use crate::turn::snapshot::GameStateSnapshot;

/// Fixed per-player colours used when no other source names one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(pub [String; PLAYER_COUNT]);

impl Default for Palette {
    fn default() -> Self {
        Palette(FALLBACK_COLORS.map(str::to_string))
    }
}

impl Palette {
    /// Returns the palette colour of a player.
    pub fn color(&self, player: Player) -> &str {
        &self.0[player.index()]
    }
}

/// Everything a colour source may consult.
#[derive(Debug, Clone, Copy)]
pub struct ColorContext<'a> {
    pub player: Player,
    pub dice: Option<&'a TurnDice>,
    pub state: &'a GameStateSnapshot,
    pub palette: &'a Palette,
}

/// A colour source: `None` means it does not know this player's colour.
pub type ColorSource = for<'a> fn(&ColorContext<'a>) -> Option<&'a str>;

/// Sources in priority order; the first answer wins, else the palette.
pub const COLOR_SOURCES: [ColorSource; 2] = [from_dice_log, from_seating_table];

/// The colour embedded in the roll's log entry, if the roll is this player's.
pub fn from_dice_log<'a>(ctx: &ColorContext<'a>) -> Option<&'a str> {
    let dice = ctx.dice?;
    match dice.player {
        Some(p) if p != ctx.player => None,
        _ => dice.color.as_deref().filter(|c| !c.is_empty()),
    }
}

/// The colour recorded in the snapshot's seating table.
pub fn from_seating_table<'a>(ctx: &ColorContext<'a>) -> Option<&'a str> {
    ctx.state.color_of(ctx.player).filter(|c| !c.is_empty())
}

/// Resolves a player's colour through the ordered sources.
pub fn resolve_color<'a>(ctx: &ColorContext<'a>) -> &'a str {
    COLOR_SOURCES
        .iter()
        .find_map(|source| source(ctx))
        .unwrap_or_else(|| ctx.palette.color(ctx.player))
}
