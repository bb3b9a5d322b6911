pub mod firestore;
pub mod memory;
pub mod remote;
pub mod snapshot;
pub mod store;

pub use memory::MemoryFavorites;
pub use remote::{RemoteError, RemoteFavoritesRepository};
pub use snapshot::{FileSnapshot, MemorySnapshot, SnapshotStore};
pub use store::LocalFavoritesStore;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Opaque product identifier. Two favorites refer to the same product
/// exactly when their identifiers are string-equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteId(String);

impl FavoriteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FavoriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FavoriteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The client-side favorite membership set. Unordered, no duplicates,
/// owned exclusively by ['LocalFavoritesStore'].
pub type FavoritesSet = HashSet<FavoriteId>;
