use crate::core::favorites::remote::{RemoteError, RemoteFavoritesRepository};
use crate::core::favorites::{FavoriteId, FavoritesSet};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-memory favorites table for development and tests. Membership per
/// identity is a set, which gives the same duplicate-insert and
/// missing-delete semantics as the hosted table.
#[derive(Default)]
pub struct MemoryFavorites {
    records: Mutex<HashMap<String, FavoritesSet>>,
}

impl MemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the stored set for an identity.
    pub fn seed<I: Into<FavoriteId>>(&self, identity: &str, ids: impl IntoIterator<Item = I>) {
        self.records
            .lock()
            .insert(identity.to_string(), ids.into_iter().map(Into::into).collect());
    }

    /// Current stored set for an identity, empty if none.
    pub fn stored(&self, identity: &str) -> FavoritesSet {
        self.records.lock().get(identity).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl RemoteFavoritesRepository for MemoryFavorites {
    async fn fetch_all(&self, identity: &str) -> Result<FavoritesSet, RemoteError> {
        Ok(self.stored(identity))
    }

    async fn insert_many(&self, identity: &str, ids: &[FavoriteId]) -> Result<(), RemoteError> {
        let mut records = self.records.lock();
        let entry = records.entry(identity.to_string()).or_default();
        for id in ids {
            entry.insert(id.clone());
        }
        Ok(())
    }

    async fn delete_many(&self, identity: &str, ids: &[FavoriteId]) -> Result<(), RemoteError> {
        let mut records = self.records.lock();
        if let Some(entry) = records.get_mut(identity) {
            for id in ids {
                entry.remove(id);
            }
        }
        Ok(())
    }
}
