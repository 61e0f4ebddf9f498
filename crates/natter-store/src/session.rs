//! Store plus persistence, glued.
//!
//! [`ChatSession`] owns a [`ChatStore`] and a [`SnapshotStore`], loads the
//! persisted snapshot on construction, and funnels every mutation through
//! [`ChatSession::update`] so a fresh snapshot lands on disk after each
//! change.  The store itself stays free of I/O.

use std::path::PathBuf;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::snapshot::SnapshotStore;
use crate::store::ChatStore;

/// A [`ChatStore`] whose history subset persists across restarts.
pub struct ChatSession {
    store: ChatStore,
    snapshots: SnapshotStore,
}

impl ChatSession {
    /// Open a session backed by the default snapshot location.
    pub fn open_default() -> Result<Self> {
        Ok(Self::with_snapshots(SnapshotStore::open_default()?))
    }

    /// Open a session described by a configuration.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        Ok(Self::with_snapshots(SnapshotStore::from_config(config)?))
    }

    /// Open a session backed by an explicit document path.
    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        Self::with_snapshots(SnapshotStore::open_at(path))
    }

    fn with_snapshots(snapshots: SnapshotStore) -> Self {
        let store = snapshots.load_or_default();
        Self { store, snapshots }
    }

    /// Read access to the current state.
    pub fn store(&self) -> &ChatStore {
        &self.store
    }

    /// The snapshot store backing this session.
    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    /// Apply a mutation and persist the result.
    ///
    /// Every write goes through here; there is deliberately no mutable
    /// accessor that could skip the snapshot write.  The save is
    /// fire-and-forget: failures are logged, never surfaced to the
    /// mutation.
    pub fn update<T>(&mut self, mutate: impl FnOnce(&mut ChatStore) -> T) -> T {
        let out = mutate(&mut self.store);
        self.snapshots.save(&self.store);
        out
    }

    /// Restore the initial empty configuration and persist it.
    pub fn reset(&mut self) {
        self.update(|store| store.reset());
    }
}
