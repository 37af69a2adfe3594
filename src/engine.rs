//! Engine session state.
//!
//! Holds the turn service (topology, configuration and game store) between
//! protocol commands and writes each command's response lines.

use std::io::{self, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::board::{BoardTopology, TopologyError};
use crate::config::{ConfigError, OPT_DICE_LOG_ORDER, OPT_FALLBACK_COLORS};
use crate::replay::{compare_log_orders, HistoryFile};
use crate::service::{GameId, SubmitError, TurnService};

/// Error code written when an audit cannot run.
pub const AUDIT_FAILED: &str = "AUDIT_FAILED";

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub service: TurnService,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine on the standard board with no games.
    pub fn new() -> Self {
        Engine {
            service: TurnService::standard(),
        }
    }

    /// Registers a game, clearing any history it had.
    pub fn new_game(&mut self, game_id: &str) -> Result<(), SubmitError> {
        let game = GameId::parse(game_id)?;
        info!(game = %game, "new game");
        self.service.store.register(game);
        Ok(())
    }

    /// Replaces the board topology. Stored games are kept.
    pub fn load_board(&mut self, path: &Path) -> Result<(), TopologyError> {
        self.service.topology = BoardTopology::load(path)?;
        info!(path = %path.display(), "board loaded");
        Ok(())
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        self.service.config.set_option(name, value)
    }

    /// Handles the handshake: writes id, options, protocol_version, and hellook.
    pub fn handle_hello<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name chaupar")?;
        writeln!(out, "id author chaupar")?;
        writeln!(
            out,
            "option name {} type combo default newest-last var newest-first var newest-last",
            OPT_DICE_LOG_ORDER
        )?;
        writeln!(
            out,
            "option name {} type string default {}",
            OPT_FALLBACK_COLORS,
            self.service.config.fallback_colors.0.join(",")
        )?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "hellook")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles `submit`: writes `report <json>` or `error <code> <message>`.
    pub fn handle_submit<W: Write>(&mut self, game_id: &str, payload: &str, out: &mut W) -> io::Result<()> {
        match self.service.submit(game_id, payload) {
            Ok(result) => {
                let json = serde_json::to_string(&result)?;
                writeln!(out, "report {}", json)?;
            }
            Err(e) => writeln!(out, "error {} {}", e.code(), e)?,
        }
        out.flush()
    }

    /// Handles `audit`: replays a history file under both dice-log orders.
    pub fn handle_audit<W: Write>(&self, path: &Path, out: &mut W) -> io::Result<()> {
        match HistoryFile::load(path) {
            Ok(history) => {
                let cmp = compare_log_orders(&self.service.topology, &self.service.config, &history);
                writeln!(
                    out,
                    "audit newest-first {}/{} newest-last {}/{}",
                    cmp.newest_first_valid, cmp.turns, cmp.newest_last_valid, cmp.turns
                )?;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "audit failed");
                writeln!(out, "error {} {}", AUDIT_FAILED, e)?;
            }
        }
        out.flush()
    }
}
