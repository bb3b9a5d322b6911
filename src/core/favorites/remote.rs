use crate::core::favorites::{FavoriteId, FavoritesSet};
use async_trait::async_trait;
use thiserror::Error;

/// Failure taxonomy for the remote favorites table. A duplicate insert
/// or a delete of a missing record is not an error at this boundary;
/// implementations convert those into benign no-ops.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// Transient transport failure, recovered by natural retry on the
    /// next mutation or identity event.
    #[error("remote connectivity failure: {0}")]
    Connectivity(String),
    /// The identity is no longer accepted by the remote store. Treated
    /// the same as the identity becoming unavailable.
    #[error("remote auth failure: {0}")]
    Auth(String),
}

impl RemoteError {
    pub fn is_auth(&self) -> bool {
        matches!(self, RemoteError::Auth(_))
    }
}

/// Remote durable favorites table keyed by (identity, product) pairs.
/// At most one record exists per pair; that uniqueness is enforced by
/// the remote store, not by callers. The three operations are
/// independently retriable and impose no ordering on each other.
#[async_trait]
pub trait RemoteFavoritesRepository: Send + Sync {
    /// Returns the stored set for the identity, empty if none.
    async fn fetch_all(&self, identity: &str) -> Result<FavoritesSet, RemoteError>;

    /// Bulk-adds records. Safe to call with ids already present.
    async fn insert_many(&self, identity: &str, ids: &[FavoriteId]) -> Result<(), RemoteError>;

    /// Bulk-removes matching records. Missing records are a no-op.
    async fn delete_many(&self, identity: &str, ids: &[FavoriteId]) -> Result<(), RemoteError>;
}
