//! Lazily fetched relation views.
//!
//! # Invariants
//! - A cached view is served only while valid; any write that could change
//!   the relation invalidates it, and the next read refetches.
//! - Entries are unique by identity and keep the order the store reported.

use crate::error::ClientResult;
use std::collections::HashSet;
use std::hash::Hash;

/// Entities with a stable identity key.
pub trait Identity {
    type Key: Eq + Hash;

    fn identity(&self) -> ClientResult<Self::Key>;
}

/// Cached collection for one relation of one entity.
#[derive(Debug)]
pub struct RelationCache<T> {
    entries: Vec<T>,
    valid: bool,
}

impl<T> Default for RelationCache<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            valid: false,
        }
    }
}

impl<T: Identity> RelationCache<T> {
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Drops the cached entries; the next read fetches again.
    pub fn invalidate(&mut self) {
        self.entries.clear();
        self.valid = false;
    }

    /// Returns the cached view, running `fetch` first when invalid.
    ///
    /// A failed fetch leaves the cache invalid.
    pub fn get_or_fetch(
        &mut self,
        fetch: impl FnOnce() -> ClientResult<Vec<T>>,
    ) -> ClientResult<&[T]> {
        if !self.valid {
            self.entries = dedupe_by_identity(fetch()?)?;
            self.valid = true;
        }
        Ok(&self.entries)
    }
}

fn dedupe_by_identity<T: Identity>(entries: Vec<T>) -> ClientResult<Vec<T>> {
    let mut seen = HashSet::with_capacity(entries.len());
    let mut unique = Vec::with_capacity(entries.len());
    for entry in entries {
        if seen.insert(entry.identity()?) {
            unique.push(entry);
        }
    }
    Ok(unique)
}
