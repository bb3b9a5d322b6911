use tokio::sync::broadcast;
use tracing::debug;

/// Structured record of a sync failure that was deliberately swallowed.
/// Favoriting a product must never appear to fail because of a sync
/// problem, so these are reported out-of-band instead of propagated.
#[derive(Debug, Clone)]
pub enum SyncDiagnostic {
    /// The initial fetch of the remote set failed; the session is
    /// running local-only until the next identity event.
    MergeFailed { identity: String, detail: String },
    /// The merge itself succeeded but pushing the local-only ids to the
    /// remote store did not. The local set is already correct.
    MergePushFailed {
        identity: String,
        pending: usize,
        detail: String,
    },
    /// An incremental diff push failed. The baseline was left in place
    /// so the next mutation re-attempts the same delta.
    PushFailed {
        identity: String,
        added: usize,
        removed: usize,
        detail: String,
    },
    /// The in-memory set mutated but the durable snapshot write failed.
    /// Memory remains the source of truth.
    SnapshotWriteFailed { detail: String },
}

/// Fan-out channel for swallowed sync errors. Emitting never blocks and
/// never fails; with no subscribers the event is simply dropped.
#[derive(Clone)]
pub struct Diagnostics {
    tx: broadcast::Sender<SyncDiagnostic>,
}

impl Diagnostics {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncDiagnostic> {
        self.tx.subscribe()
    }

    pub fn emit(&self, diagnostic: SyncDiagnostic) {
        debug!("Sync diagnostic: {:?}", diagnostic);
        let _ = self.tx.send(diagnostic);
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(64)
    }
}
