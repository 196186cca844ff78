//! Command-line host for `numeric-input`.
//!
//! Stands in for a rendering layer: it forwards keystroke, paste and change
//! events to the engine and prints the answers as JSON.

pub mod cli;
pub mod config;
pub mod events;

pub use cli::{Cli, Commands, ConfigArgs, IntentKind};
