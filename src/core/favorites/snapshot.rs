use crate::core::favorites::{FavoriteId, FavoritesSet};
use parking_lot::Mutex;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding failure: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Durable local persistence for the favorites set. A single named
/// record holding a deduplicated array of id strings, read once at
/// startup and overwritten wholesale on every mutation. No versioning,
/// the payload is a flat set of strings.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<FavoritesSet, SnapshotError>;
    fn save(&self, favorites: &FavoritesSet) -> Result<(), SnapshotError>;
}

/// File-backed snapshot. Writes go to a sibling temp file first and are
/// renamed into place so a crash mid-write never leaves a torn record.
pub struct FileSnapshot {
    path: PathBuf,
}

impl FileSnapshot {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SnapshotStore for FileSnapshot {
    fn load(&self) -> Result<FavoritesSet, SnapshotError> {
        if !self.path.exists() {
            debug!("No favorites snapshot at {}, starting empty", self.path.display());
            return Ok(FavoritesSet::new());
        }

        let raw = fs::read_to_string(&self.path)?;
        let ids: Vec<String> = serde_json::from_str(&raw)?;

        Ok(ids.into_iter().map(FavoriteId::new).collect())
    }

    fn save(&self, favorites: &FavoritesSet) -> Result<(), SnapshotError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        // sorted so repeated saves of the same set produce identical bytes
        let mut ids: Vec<&str> = favorites.iter().map(|id| id.as_str()).collect();
        ids.sort_unstable();

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec(&ids)?)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}

/// In-memory snapshot for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySnapshot {
    inner: Mutex<FavoritesSet>,
}

impl MemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids<I: Into<FavoriteId>>(ids: impl IntoIterator<Item = I>) -> Self {
        Self {
            inner: Mutex::new(ids.into_iter().map(Into::into).collect()),
        }
    }
}

impl SnapshotStore for MemorySnapshot {
    fn load(&self) -> Result<FavoritesSet, SnapshotError> {
        Ok(self.inner.lock().clone())
    }

    fn save(&self, favorites: &FavoritesSet) -> Result<(), SnapshotError> {
        *self.inner.lock() = favorites.clone();
        Ok(())
    }
}
