//! Chaupar turn engine library.
//!
//! Exposes the board topology, movement rules, turn diffing, narration, and
//! protocol modules for use by integration tests and the binary entry point.

pub mod board;
pub mod config;
pub mod engine;
pub mod narrate;
pub mod protocol;
pub mod replay;
pub mod rules;
pub mod service;
pub mod turn;
