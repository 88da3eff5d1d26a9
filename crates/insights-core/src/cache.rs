// Per-season load cache with get-or-load semantics.
//
// Each season moves through `unloaded -> loading -> {loaded | missing}` at
// most once. Entries are never evicted or rolled back, so a failed load
// stays failed for the session.

use std::collections::HashMap;

use crate::model::SeasonId;

/// Observable load status of one season's entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Unloaded,
    Loading,
    Loaded,
    Missing,
}

#[derive(Debug)]
enum Slot<T> {
    Pending,
    Ready(T),
    Failed(String),
}

/// Memoized, season-keyed results of an optional document load.
#[derive(Debug)]
pub struct SeasonCache<T> {
    slots: HashMap<SeasonId, Slot<T>>,
}

impl<T> Default for SeasonCache<T> {
    fn default() -> Self {
        SeasonCache {
            slots: HashMap::new(),
        }
    }
}

impl<T> SeasonCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, season: &SeasonId) -> LoadStatus {
        match self.slots.get(season) {
            None => LoadStatus::Unloaded,
            Some(Slot::Pending) => LoadStatus::Loading,
            Some(Slot::Ready(_)) => LoadStatus::Loaded,
            Some(Slot::Failed(_)) => LoadStatus::Missing,
        }
    }

    /// Claim the load for `season`.
    ///
    /// Returns `true` only for the first caller; the entry moves to
    /// `Loading` and that caller is responsible for calling `resolve`.
    /// Every later call (in flight or settled) returns `false`.
    pub fn begin_load(&mut self, season: &SeasonId) -> bool {
        if self.slots.contains_key(season) {
            return false;
        }
        self.slots.insert(season.clone(), Slot::Pending);
        true
    }

    /// Settle a load. A settled entry is never overwritten.
    pub fn resolve<E: ToString>(&mut self, season: &SeasonId, result: Result<T, E>) -> LoadStatus {
        match self.slots.get(season) {
            Some(Slot::Ready(_)) | Some(Slot::Failed(_)) => self.status(season),
            _ => {
                let slot = match result {
                    Ok(value) => Slot::Ready(value),
                    Err(e) => Slot::Failed(e.to_string()),
                };
                self.slots.insert(season.clone(), slot);
                self.status(season)
            }
        }
    }

    pub fn get(&self, season: &SeasonId) -> Option<&T> {
        match self.slots.get(season) {
            Some(Slot::Ready(value)) => Some(value),
            _ => None,
        }
    }

    /// The recorded failure message for a `Missing` entry.
    pub fn failure(&self, season: &SeasonId) -> Option<&str> {
        match self.slots.get(season) {
            Some(Slot::Failed(message)) => Some(message),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
