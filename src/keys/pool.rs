//! KeyPool - ordered pool of validated keys with round-robin access.

/// One admitted (key, model) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolEntry {
    /// The raw API key.
    pub key: String,
    /// The model this key unlocks, chosen at validation time.
    pub model: String,
}

/// Ordered pool of validated keys.
///
/// The pool is a pure rotating accessor: it holds no retry logic and no
/// cursor of its own. Callers thread the cursor through `entry_at`, which
/// keeps rotation continuous across an entire batch. Entries are append-only;
/// a key that fails mid-batch stays in the pool and is simply rotated past.
#[derive(Debug, Default)]
pub struct KeyPool {
    entries: Vec<PoolEntry>,
}

impl KeyPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validated entry.
    ///
    /// Idempotent with respect to exact-duplicate raw keys: a duplicate is
    /// not re-admitted. Returns whether the entry was added.
    pub fn admit(&mut self, key: String, model: String) -> bool {
        if self.entries.iter().any(|e| e.key == key) {
            return false;
        }
        self.entries.push(PoolEntry { key, model });
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the entry at `cursor mod len` and the incremented cursor.
    ///
    /// Returns `None` if the pool is empty; callers are expected to fail
    /// fast before starting rotation.
    pub fn entry_at(&self, cursor: usize) -> Option<(&PoolEntry, usize)> {
        if self.entries.is_empty() {
            return None;
        }
        let index = cursor % self.entries.len();
        Some((&self.entries[index], (cursor + 1) % self.entries.len()))
    }

    /// Iterate over the admitted entries in admission order.
    pub fn iter(&self) -> impl Iterator<Item = &PoolEntry> {
        self.entries.iter()
    }
}
