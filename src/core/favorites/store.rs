use crate::core::favorites::snapshot::SnapshotStore;
use crate::core::favorites::{FavoriteId, FavoritesSet};
use crate::core::sync::diagnostics::{Diagnostics, SyncDiagnostic};
use parking_lot::Mutex;
use std::sync::{Arc, OnceLock};
use tracing::{error, warn};

type ChangeListener = Box<dyn Fn() + Send + Sync>;

/// Authoritative client-side favorites set. Every mutation persists the
/// full set through the snapshot store before returning, so the durable
/// record always matches the last completed mutation. Nothing in here
/// touches the network; remote convergence is the coordinator's job.
///
/// Mutations are logically single-writer: concurrent callers serialize
/// through the internal lock, and persistence happens in mutation order.
pub struct LocalFavoritesStore {
    favorites: Mutex<FavoritesSet>,
    snapshot: Box<dyn SnapshotStore>,
    on_change: OnceLock<ChangeListener>,
    diagnostics: Diagnostics,
}

impl LocalFavoritesStore {
    /// Restores the set from the durable snapshot. A missing snapshot
    /// starts empty; an unreadable one is reported and treated as empty
    /// rather than blocking the session.
    pub fn open(snapshot: Box<dyn SnapshotStore>, diagnostics: Diagnostics) -> Arc<Self> {
        let initial = match snapshot.load() {
            Ok(set) => set,
            Err(err) => {
                warn!("Failed to restore favorites snapshot, starting empty: {}", err);
                FavoritesSet::new()
            }
        };

        Arc::new(Self {
            favorites: Mutex::new(initial),
            snapshot,
            on_change: OnceLock::new(),
            diagnostics,
        })
    }

    /// Registers the single change listener, fired after every effective
    /// mutation. Installing a second listener is a wiring bug.
    pub fn on_change(&self, listener: ChangeListener) {
        if self.on_change.set(listener).is_err() {
            error!("Favorites change listener registered twice, ignoring replacement");
        }
    }

    /// Adds an id. No-op when already present.
    pub fn add(&self, id: FavoriteId) -> bool {
        let changed = {
            let mut favorites = self.favorites.lock();
            let changed = favorites.insert(id);
            if changed {
                self.persist(&favorites);
            }
            changed
        };

        if changed {
            self.notify();
        }
        changed
    }

    /// Removes an id. No-op when absent.
    pub fn remove(&self, id: &FavoriteId) -> bool {
        let changed = {
            let mut favorites = self.favorites.lock();
            let changed = favorites.remove(id);
            if changed {
                self.persist(&favorites);
            }
            changed
        };

        if changed {
            self.notify();
        }
        changed
    }

    /// Adds the id when absent, removes it when present. Returns whether
    /// the id is a favorite afterwards.
    pub fn toggle(&self, id: FavoriteId) -> bool {
        let present = {
            let mut favorites = self.favorites.lock();
            let present = if favorites.contains(&id) {
                favorites.remove(&id);
                false
            } else {
                favorites.insert(id);
                true
            };
            self.persist(&favorites);
            present
        };

        self.notify();
        present
    }

    /// Sets membership to exactly the deduplicated input.
    pub fn replace(&self, ids: impl IntoIterator<Item = FavoriteId>) {
        let changed = {
            let mut favorites = self.favorites.lock();
            let next: FavoritesSet = ids.into_iter().collect();
            if next == *favorites {
                false
            } else {
                *favorites = next;
                self.persist(&favorites);
                true
            }
        };

        if changed {
            self.notify();
        }
    }

    /// Drops every favorite. Used by the clear-on-logout policy.
    pub fn clear(&self) {
        self.replace(std::iter::empty());
    }

    pub fn contains(&self, id: &FavoriteId) -> bool {
        self.favorites.lock().contains(id)
    }

    pub fn count(&self) -> usize {
        self.favorites.lock().len()
    }

    /// Copy of the current membership.
    pub fn all(&self) -> FavoritesSet {
        self.favorites.lock().clone()
    }

    /// Persistence failure never rolls back the in-memory set; it costs
    /// only that mutation's durability guarantee.
    fn persist(&self, favorites: &FavoritesSet) {
        if let Err(err) = self.snapshot.save(favorites) {
            error!("Failed to persist favorites snapshot: {}", err);
            self.diagnostics.emit(SyncDiagnostic::SnapshotWriteFailed {
                detail: err.to_string(),
            });
        }
    }

    fn notify(&self) {
        if let Some(listener) = self.on_change.get() {
            listener();
        }
    }
}
