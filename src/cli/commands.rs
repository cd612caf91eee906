//! Subcommand handlers for key history actions.

use super::args::KeysAction;
use crate::keys::{mask_key, KeyHistory};

/// Handle `keys` subcommand actions.
pub fn handle_keys_action(action: KeysAction, history: &KeyHistory) {
    match action {
        KeysAction::Show => {
            let entries = match history.load() {
                Ok(entries) => entries,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            if entries.is_empty() {
                println!("No saved keys.");
                println!();
                println!("Run 'vidgen validate' to check keys and save the live ones.");
                return;
            }

            println!("Saved keys ({}):", entries.len());
            for (key, entry) in &entries {
                println!(
                    "  {}  {}  last used {}",
                    mask_key(key),
                    entry.model,
                    entry.last_used.format("%Y-%m-%d %H:%M UTC")
                );
            }
        }
        KeysAction::Clear => {
            if let Err(e) = history.delete() {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            println!("Key history cleared: {}", history.path().display());
        }
    }
}
