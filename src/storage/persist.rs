//! Snapshot persistence under a single storage key.
//!
//! Storage failures never reach the caller: they are logged and the
//! in-memory session stays authoritative. A missing, unreadable or
//! malformed value loads as `None`.

use tracing::{debug, warn};

use super::snapshot::Snapshot;
use super::store::KeyValueStore;

/// Key the session snapshot lives under.
pub const STORAGE_KEY: &str = "scooter_state";

/// Saves, loads and clears the session snapshot.
#[derive(Clone, Debug)]
pub struct SnapshotStorage<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SnapshotStorage<S> {
    /// Persist under [`STORAGE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    /// Persist under a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Write `snapshot`. Returns false if the write failed.
    pub fn save(&mut self, snapshot: &Snapshot) -> bool {
        let result = snapshot
            .to_json()
            .and_then(|json| self.store.set(&self.key, &json));

        match result {
            Ok(()) => {
                debug!(
                    key = %self.key,
                    losers = snapshot.losers.len(),
                    num_chances = ?snapshot.num_chances,
                    round = snapshot.round_number,
                    "saved snapshot"
                );
                true
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to save snapshot");
                false
            }
        }
    }

    /// Read the stored snapshot, if there is a usable one.
    #[must_use]
    pub fn load(&self) -> Option<Snapshot> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read snapshot");
                return None;
            }
        };

        match Snapshot::from_json(&raw) {
            Ok(snapshot) => {
                debug!(key = %self.key, names = snapshot.names.len(), "loaded snapshot");
                Some(snapshot)
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "ignoring malformed snapshot");
                None
            }
        }
    }

    /// Delete the stored snapshot. Returns false if the delete failed.
    pub fn clear(&mut self) -> bool {
        match self.store.remove(&self.key) {
            Ok(()) => {
                debug!(key = %self.key, "cleared snapshot");
                true
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to clear snapshot");
                false
            }
        }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Give back the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }
}
