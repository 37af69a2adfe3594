//! Line protocol command parser.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the main loop can dispatch on.

use tracing::warn;

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the protocol handshake.
    Hello,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Load a board topology file: `board <path>`.
    Board { path: String },

    /// Register a game with no history: `newgame <game_id>`.
    NewGame { game_id: String },

    /// Submit a snapshot for a game: `submit <game_id> <json>`.
    Submit { game_id: String, payload: String },

    /// Audit a history file under both dice-log orders: `audit <path>`.
    Audit { path: String },

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    let mut tokens = trimmed.split_whitespace();
    let keyword = tokens.next()?;

    match keyword {
        "hello" => Some(Command::Hello),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(&tokens.collect::<Vec<_>>()),
        "board" => rest_of_line(trimmed, keyword).map(|path| Command::Board { path }),
        "audit" => rest_of_line(trimmed, keyword).map(|path| Command::Audit { path }),
        "newgame" => match (tokens.next(), tokens.next()) {
            (Some(id), None) => Some(Command::NewGame {
                game_id: id.to_string(),
            }),
            _ => {
                warn!("malformed newgame: expected 'newgame <game_id>'");
                None
            }
        },
        "submit" => parse_submit(trimmed),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Everything after the keyword, trimmed. Paths may contain spaces.
fn rest_of_line(line: &str, keyword: &str) -> Option<String> {
    let rest = line.strip_prefix(keyword).unwrap_or("").trim();
    if rest.is_empty() {
        warn!("malformed {}: expected '{} <path>'", keyword, keyword);
        return None;
    }
    Some(rest.to_string())
}

/// Parses `setoption name <id> [value <x>]` (tokens after the keyword).
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 || tokens[0] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[1..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                warn!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[1..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `submit <game_id> <json>`. The JSON runs to the end of the line.
fn parse_submit(line: &str) -> Option<Command> {
    let rest = line.strip_prefix("submit").unwrap_or("").trim_start();
    let split = rest.split_once(char::is_whitespace);
    match split {
        Some((game_id, payload)) if !payload.trim().is_empty() => Some(Command::Submit {
            game_id: game_id.to_string(),
            payload: payload.trim().to_string(),
        }),
        _ => {
            warn!("malformed submit: expected 'submit <game_id> <json>'");
            None
        }
    }
}
