//! Key management: intake filtering, validation, the rotating pool, and
//! persisted history.

mod history;
mod parse;
mod pool;
mod validator;

pub use history::{HistoryEntry, HistoryError, KeyHistory};
pub use parse::{extract_keys, mask_key};
pub use pool::{KeyPool, PoolEntry};
pub use validator::{select_model, KeyValidator, ValidationOutcome};

/// Explicit session-scoped state: the active pool plus the history handle.
///
/// Created once at startup and passed by reference; there are no globals.
pub struct Session {
    pub pool: KeyPool,
    pub history: KeyHistory,
}

impl Session {
    pub fn new(history: KeyHistory) -> Self {
        Self {
            pool: KeyPool::new(),
            history,
        }
    }
}
