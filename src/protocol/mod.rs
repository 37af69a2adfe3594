//! Line protocol handling.
//!
//! The engine speaks a plain text protocol on stdin/stdout: one command per
//! line, one or more response lines per command.

pub mod parser;

pub use parser::{parse_command, Command};
