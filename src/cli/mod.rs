//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{Args, Command, KeysAction};
pub use commands::handle_keys_action;
pub use enums::{ModeArg, NicheArg, PlatformArg, RatioArg};
