//! Chaupar -- a turn legality and narration engine speaking a line protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Logs go to stderr and are filtered with `RUST_LOG`.

use std::io::{self, BufRead};
use std::path::Path;

use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use chaupar::engine::Engine;
use chaupar::protocol::parser::{parse_command, Command};

/// Runs the protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        error!(error = %e, "output failed");
        std::process::exit(1);
    }
}

fn run() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Hello => engine.handle_hello(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => {
                if let Err(e) = engine.set_option(&name, value.as_deref()) {
                    warn!(error = %e, "setoption ignored");
                }
            }
            Command::Board { path } => {
                if let Err(e) = engine.load_board(Path::new(&path)) {
                    warn!(error = %e, "board not loaded");
                }
            }
            Command::NewGame { game_id } => {
                if let Err(e) = engine.new_game(&game_id) {
                    warn!(error = %e, "newgame ignored");
                }
            }
            Command::Submit { game_id, payload } => engine.handle_submit(&game_id, &payload, &mut out)?,
            Command::Audit { path } => engine.handle_audit(Path::new(&path), &mut out)?,
            Command::Quit => break,
        }
    }
    Ok(())
}
