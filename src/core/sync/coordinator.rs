use crate::core::favorites::remote::{RemoteError, RemoteFavoritesRepository};
use crate::core::favorites::store::LocalFavoritesStore;
use crate::core::favorites::FavoritesSet;
use crate::core::sync::diagnostics::{Diagnostics, SyncDiagnostic};
use crate::core::sync::diff::diff;
use parking_lot::Mutex;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Externally observable coordinator phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Uninitialized,
    Merging,
    Synced,
    LocalOnly,
}

enum SyncState {
    Uninitialized,
    Merging {
        identity: String,
    },
    Synced {
        identity: String,
        /// Favorites as of the last successful round-trip, the sole
        /// input for computing what changed.
        baseline: FavoritesSet,
        /// Generation the merge settled under. Captured with the
        /// baseline so a push can never pair an old baseline with a
        /// newer generation.
        generation: u64,
    },
    /// Merge fetch failed. Local favorites keep working without remote
    /// synchronization until the next identity event.
    LocalOnly {
        identity: String,
    },
}

/// Two-replica set reconciliation between ['LocalFavoritesStore'] and a
/// ['RemoteFavoritesRepository']: a one-time union merge when an
/// identity becomes available, incremental diff pushes afterward.
///
/// Remote failures never reach the caller of a favorite mutation; they
/// are logged and reported on the diagnostics channel. A failed push
/// leaves the baseline untouched, so the next mutation recomputes the
/// same delta and re-attempts it. That recomputation is the only retry
/// mechanism and is best-effort.
///
/// Every identity event bumps a generation counter. Remote results that
/// complete under a stale generation are discarded rather than applied,
/// which keeps rapid login/logout sequences from writing state for an
/// identity that is no longer current. In-flight calls are never
/// cancelled, only ignored.
pub struct SyncCoordinator {
    store: Arc<LocalFavoritesStore>,
    remote: Arc<dyn RemoteFavoritesRepository>,
    state: Mutex<SyncState>,
    generation: AtomicU64,
    /// Serializes diff pushes; the single-writer discipline on the
    /// store extends to baseline advancement.
    push_lock: tokio::sync::Mutex<()>,
    remote_timeout: Duration,
    diagnostics: Diagnostics,
}

impl SyncCoordinator {
    pub fn new(
        store: Arc<LocalFavoritesStore>,
        remote: Arc<dyn RemoteFavoritesRepository>,
        remote_timeout: Duration,
        diagnostics: Diagnostics,
    ) -> Arc<Self> {
        Arc::new(Self {
            store,
            remote,
            state: Mutex::new(SyncState::Uninitialized),
            generation: AtomicU64::new(0),
            push_lock: tokio::sync::Mutex::new(()),
            remote_timeout,
            diagnostics,
        })
    }

    pub fn phase(&self) -> SyncPhase {
        match &*self.state.lock() {
            SyncState::Uninitialized => SyncPhase::Uninitialized,
            SyncState::Merging { .. } => SyncPhase::Merging,
            SyncState::Synced { .. } => SyncPhase::Synced,
            SyncState::LocalOnly { .. } => SyncPhase::LocalOnly,
        }
    }

    /// False until the merge for the current identity settles, success
    /// or failure. Mutation-triggered pushes are gated on this.
    pub fn initialized(&self) -> bool {
        matches!(
            self.phase(),
            SyncPhase::Synced | SyncPhase::LocalOnly
        )
    }

    /// Reacts to the identity becoming available or unavailable. Login
    /// merges local and remote; logout discards the baseline. Pending
    /// remote activity is not awaited, its results go stale by
    /// generation.
    pub async fn identity_changed(&self, identity: Option<String>) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        match identity {
            None => {
                debug!("Identity cleared, favorites sync uninitialized");
                *self.state.lock() = SyncState::Uninitialized;
            }
            Some(identity) => {
                *self.state.lock() = SyncState::Merging {
                    identity: identity.clone(),
                };
                self.merge(identity, generation).await;
            }
        }
    }

    /// Reacts to a local mutation. No-op until the merge settles, and a
    /// no-op in LocalOnly mode. Failures are swallowed here; the caller
    /// already has correct local state.
    pub async fn local_changed(&self) {
        if !self.initialized() {
            debug!("Favorites mutated before merge settled, deferring to merge");
            return;
        }

        let _serialized = self.push_lock.lock().await;

        let (identity, baseline, generation) = match &*self.state.lock() {
            SyncState::Synced {
                identity,
                baseline,
                generation,
            } => (identity.clone(), baseline.clone(), *generation),
            _ => return,
        };

        let current = self.store.all();
        let delta = diff(&current, &baseline);
        if delta.is_empty() {
            return;
        }

        // disjoint key sets, no ordering requirement between the two
        let (inserted, deleted) = tokio::join!(
            async {
                if delta.added.is_empty() {
                    Ok(())
                } else {
                    self.bounded(self.remote.insert_many(&identity, &delta.added))
                        .await
                }
            },
            async {
                if delta.removed.is_empty() {
                    Ok(())
                } else {
                    self.bounded(self.remote.delete_many(&identity, &delta.removed))
                        .await
                }
            },
        );

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding stale favorites push for {}", identity);
            return;
        }

        match (&inserted, &deleted) {
            (Ok(()), Ok(())) => {
                self.advance_baseline(&identity, current);
                debug!(
                    "Pushed favorites delta for {}: +{} -{}",
                    identity,
                    delta.added.len(),
                    delta.removed.len()
                );
            }
            _ => {
                let outcomes = [&inserted, &deleted];
                let detail = outcomes
                    .iter()
                    .filter_map(|r| r.as_ref().err().map(|e| e.to_string()))
                    .collect::<Vec<_>>()
                    .join("; ");
                let auth = outcomes
                    .iter()
                    .any(|r| matches!(r, Err(err) if err.is_auth()));

                warn!(
                    "Favorites push failed for {}, baseline kept for retry: {}",
                    identity, detail
                );
                self.diagnostics.emit(SyncDiagnostic::PushFailed {
                    identity: identity.clone(),
                    added: delta.added.len(),
                    removed: delta.removed.len(),
                    detail,
                });

                if auth {
                    *self.state.lock() = SyncState::Uninitialized;
                }
            }
        }
    }

    /// One-time union merge for a freshly available identity.
    async fn merge(&self, identity: String, generation: u64) {
        let fetched = self.bounded(self.remote.fetch_all(&identity)).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding stale merge result for {}", identity);
            return;
        }

        let remote_set = match fetched {
            Ok(remote_set) => remote_set,
            Err(err) => {
                warn!("Favorites merge fetch failed for {}: {}", identity, err);
                self.diagnostics.emit(SyncDiagnostic::MergeFailed {
                    identity: identity.clone(),
                    detail: err.to_string(),
                });

                *self.state.lock() = if err.is_auth() {
                    SyncState::Uninitialized
                } else {
                    SyncState::LocalOnly { identity }
                };
                return;
            }
        };

        let union: FavoritesSet = self
            .store
            .all()
            .union(&remote_set)
            .cloned()
            .collect();

        self.store.replace(union.clone());

        let to_insert: Vec<_> = union.difference(&remote_set).cloned().collect();

        *self.state.lock() = SyncState::Synced {
            identity: identity.clone(),
            baseline: union.clone(),
            generation,
        };
        info!(
            "Favorites merged for {}: {} local+remote, {} to push",
            identity,
            union.len(),
            to_insert.len()
        );

        if to_insert.is_empty() {
            return;
        }

        // local state is already correct; a failed push is reported but
        // does not revert the merge
        if let Err(err) = self
            .bounded(self.remote.insert_many(&identity, &to_insert))
            .await
        {
            warn!("Favorites merge push failed for {}: {}", identity, err);
            self.diagnostics.emit(SyncDiagnostic::MergePushFailed {
                identity: identity.clone(),
                pending: to_insert.len(),
                detail: err.to_string(),
            });

            if err.is_auth() && self.generation.load(Ordering::SeqCst) == generation {
                *self.state.lock() = SyncState::Uninitialized;
            }
        }
    }

    fn advance_baseline(&self, identity: &str, current: FavoritesSet) {
        let mut state = self.state.lock();
        if let SyncState::Synced {
            identity: active,
            baseline,
            ..
        } = &mut *state
        {
            if active == identity {
                *baseline = current;
            }
        }
    }

    /// Remote calls carry no timeout of their own; expiry is treated as
    /// a connectivity failure.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, RemoteError>>,
    ) -> Result<T, RemoteError> {
        match timeout(self.remote_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(RemoteError::Connectivity(format!(
                "remote call timed out after {:?}",
                self.remote_timeout
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::favorites::memory::MemoryFavorites;
    use crate::core::favorites::snapshot::MemorySnapshot;
    use crate::core::favorites::{FavoriteId, FavoritesSet};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    /// Remote fake: delegates to MemoryFavorites, records every call,
    /// and can be scripted to fail or stall per operation.
    #[derive(Default)]
    struct ScriptedRemote {
        inner: MemoryFavorites,
        fail_fetch: Mutex<Option<RemoteError>>,
        fail_insert: Mutex<Option<RemoteError>>,
        fail_delete: Mutex<Option<RemoteError>>,
        fetch_gate: Mutex<Option<Arc<Notify>>>,
        insert_gate: Mutex<Option<Arc<Notify>>>,
        fetches: AtomicUsize,
        inserts: Mutex<Vec<Vec<FavoriteId>>>,
        deletes: Mutex<Vec<Vec<FavoriteId>>>,
    }

    impl ScriptedRemote {
        fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        fn gate_fetch(&self) -> Arc<Notify> {
            let gate = Arc::new(Notify::new());
            *self.fetch_gate.lock() = Some(gate.clone());
            gate
        }

        fn gate_insert(&self) -> Arc<Notify> {
            let gate = Arc::new(Notify::new());
            *self.insert_gate.lock() = Some(gate.clone());
            gate
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }

        fn insert_calls(&self) -> Vec<Vec<FavoriteId>> {
            self.inserts.lock().clone()
        }

        fn delete_calls(&self) -> Vec<Vec<FavoriteId>> {
            self.deletes.lock().clone()
        }
    }

    #[async_trait]
    impl RemoteFavoritesRepository for ScriptedRemote {
        async fn fetch_all(&self, identity: &str) -> Result<FavoritesSet, RemoteError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);

            let gate = self.fetch_gate.lock().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }

            if let Some(err) = self.fail_fetch.lock().clone() {
                return Err(err);
            }
            self.inner.fetch_all(identity).await
        }

        async fn insert_many(
            &self,
            identity: &str,
            ids: &[FavoriteId],
        ) -> Result<(), RemoteError> {
            self.inserts.lock().push(ids.to_vec());

            let gate = self.insert_gate.lock().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }

            if let Some(err) = self.fail_insert.lock().clone() {
                return Err(err);
            }
            self.inner.insert_many(identity, ids).await
        }

        async fn delete_many(
            &self,
            identity: &str,
            ids: &[FavoriteId],
        ) -> Result<(), RemoteError> {
            self.deletes.lock().push(ids.to_vec());
            if let Some(err) = self.fail_delete.lock().clone() {
                return Err(err);
            }
            self.inner.delete_many(identity, ids).await
        }
    }

    fn set(ids: &[&str]) -> FavoritesSet {
        ids.iter().map(|id| FavoriteId::from(*id)).collect()
    }

    fn store_with(ids: &[&str]) -> Arc<LocalFavoritesStore> {
        LocalFavoritesStore::open(
            Box::new(MemorySnapshot::with_ids(ids.iter().copied())),
            Diagnostics::default(),
        )
    }

    fn coordinator(
        store: &Arc<LocalFavoritesStore>,
        remote: &Arc<ScriptedRemote>,
    ) -> Arc<SyncCoordinator> {
        SyncCoordinator::new(
            store.clone(),
            remote.clone(),
            Duration::from_secs(5),
            Diagnostics::default(),
        )
    }

    #[tokio::test]
    async fn merge_is_a_pure_union() {
        let remote = ScriptedRemote::new();
        remote.inner.seed("u1", ["p2", "p3"]);
        let store = store_with(&["p1", "p2"]);
        let coordinator = coordinator(&store, &remote);

        coordinator.identity_changed(Some("u1".into())).await;

        assert_eq!(coordinator.phase(), SyncPhase::Synced);
        assert_eq!(store.all(), set(&["p1", "p2", "p3"]));
        assert_eq!(remote.inner.stored("u1"), set(&["p1", "p2", "p3"]));

        // only p1 was missing remotely, so only p1 was inserted
        assert_eq!(remote.insert_calls(), vec![vec![FavoriteId::from("p1")]]);
        assert!(remote.delete_calls().is_empty());
    }

    #[tokio::test]
    async fn removal_pushes_exact_delta_and_advances_baseline() {
        let remote = ScriptedRemote::new();
        remote.inner.seed("u1", ["p1", "p2", "p3"]);
        let store = store_with(&["p1", "p2", "p3"]);
        let coordinator = coordinator(&store, &remote);

        coordinator.identity_changed(Some("u1".into())).await;
        let pushes_after_merge = remote.insert_calls().len();

        store.remove(&"p2".into());
        coordinator.local_changed().await;

        assert_eq!(remote.inner.stored("u1"), set(&["p1", "p3"]));
        assert_eq!(remote.delete_calls(), vec![vec![FavoriteId::from("p2")]]);

        // baseline advanced to exactly the current set: a no-change
        // notification produces no further remote traffic
        coordinator.local_changed().await;
        assert_eq!(remote.insert_calls().len(), pushes_after_merge);
        assert_eq!(remote.delete_calls().len(), 1);
    }

    #[tokio::test]
    async fn double_toggle_yields_no_push() {
        let remote = ScriptedRemote::new();
        let store = store_with(&["p1"]);
        let coordinator = coordinator(&store, &remote);

        coordinator.identity_changed(Some("u1".into())).await;
        let inserts_after_merge = remote.insert_calls().len();

        store.toggle("p9".into());
        store.toggle("p9".into());
        coordinator.local_changed().await;

        assert_eq!(remote.insert_calls().len(), inserts_after_merge);
        assert!(remote.delete_calls().is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_degrades_to_local_only() {
        let remote = ScriptedRemote::new();
        *remote.fail_fetch.lock() = Some(RemoteError::Connectivity("down".into()));
        let store = store_with(&["p1"]);
        let diagnostics = Diagnostics::default();
        let mut events = diagnostics.subscribe();
        let coordinator = SyncCoordinator::new(
            store.clone(),
            remote.clone(),
            Duration::from_secs(5),
            diagnostics,
        );

        coordinator.identity_changed(Some("u1".into())).await;

        assert_eq!(coordinator.phase(), SyncPhase::LocalOnly);
        assert!(coordinator.initialized());
        assert!(matches!(
            events.try_recv(),
            Ok(SyncDiagnostic::MergeFailed { .. })
        ));

        // local favorites keep working, but no remote calls are made
        store.add("p2".into());
        coordinator.local_changed().await;
        assert!(remote.insert_calls().is_empty());
        assert_eq!(remote.fetch_count(), 1);
    }

    #[tokio::test]
    async fn auth_failure_resets_to_uninitialized() {
        let remote = ScriptedRemote::new();
        *remote.fail_fetch.lock() = Some(RemoteError::Auth("expired".into()));
        let store = store_with(&[]);
        let coordinator = coordinator(&store, &remote);

        coordinator.identity_changed(Some("u1".into())).await;

        assert_eq!(coordinator.phase(), SyncPhase::Uninitialized);
        assert!(!coordinator.initialized());
    }

    #[tokio::test]
    async fn push_auth_failure_resets_to_uninitialized() {
        let remote = ScriptedRemote::new();
        let store = store_with(&["p1"]);
        let coordinator = coordinator(&store, &remote);

        coordinator.identity_changed(Some("u1".into())).await;
        assert_eq!(coordinator.phase(), SyncPhase::Synced);

        *remote.fail_insert.lock() = Some(RemoteError::Auth("expired".into()));
        store.add("p2".into());
        coordinator.local_changed().await;

        assert_eq!(coordinator.phase(), SyncPhase::Uninitialized);
        assert!(!coordinator.initialized());

        // the dead session pushes nothing further until the next login
        let inserts = remote.insert_calls().len();
        store.add("p3".into());
        coordinator.local_changed().await;
        assert_eq!(remote.insert_calls().len(), inserts);
    }

    #[tokio::test]
    async fn merge_push_auth_failure_resets_to_uninitialized() {
        let remote = ScriptedRemote::new();
        remote.inner.seed("u1", ["p2"]);
        *remote.fail_insert.lock() = Some(RemoteError::Auth("expired".into()));
        let store = store_with(&["p1"]);
        let diagnostics = Diagnostics::default();
        let mut events = diagnostics.subscribe();
        let coordinator = SyncCoordinator::new(
            store.clone(),
            remote.clone(),
            Duration::from_secs(5),
            diagnostics,
        );

        coordinator.identity_changed(Some("u1".into())).await;

        // the union already landed locally, but the session is dead
        assert_eq!(store.all(), set(&["p1", "p2"]));
        assert_eq!(coordinator.phase(), SyncPhase::Uninitialized);
        assert!(matches!(
            events.try_recv(),
            Ok(SyncDiagnostic::MergePushFailed { pending: 1, .. })
        ));
    }

    #[tokio::test]
    async fn stale_push_result_cannot_touch_a_later_session() {
        let remote = ScriptedRemote::new();
        let store = store_with(&[]);
        let coordinator = coordinator(&store, &remote);

        coordinator.identity_changed(Some("u1".into())).await;

        let gate = remote.gate_insert();
        *remote.fail_insert.lock() = Some(RemoteError::Auth("expired".into()));
        store.add("p1".into());

        let pushing = coordinator.clone();
        let push = tokio::spawn(async move {
            pushing.local_changed().await;
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        // identity flips to u2 while the u1 push is still in flight
        coordinator.identity_changed(None).await;
        store.remove(&"p1".into());
        coordinator.identity_changed(Some("u2".into())).await;
        assert_eq!(coordinator.phase(), SyncPhase::Synced);

        gate.notify_one();
        push.await.unwrap();

        // the u1 push failed with an auth error, but under a stale
        // generation: the u2 session must not be reset by it
        assert_eq!(coordinator.phase(), SyncPhase::Synced);
    }

    #[tokio::test]
    async fn push_failure_keeps_baseline_and_retries_on_next_mutation() {
        let remote = ScriptedRemote::new();
        let store = store_with(&[]);
        let diagnostics = Diagnostics::default();
        let mut events = diagnostics.subscribe();
        let coordinator = SyncCoordinator::new(
            store.clone(),
            remote.clone(),
            Duration::from_secs(5),
            diagnostics,
        );

        coordinator.identity_changed(Some("u1".into())).await;

        *remote.fail_insert.lock() = Some(RemoteError::Connectivity("down".into()));
        store.add("p4".into());
        coordinator.local_changed().await;

        assert!(remote.inner.stored("u1").is_empty());
        assert!(matches!(
            events.try_recv(),
            Ok(SyncDiagnostic::PushFailed { added: 1, removed: 0, .. })
        ));

        // baseline still pre-failure: the next mutation re-sends p4 too
        *remote.fail_insert.lock() = None;
        store.add("p5".into());
        coordinator.local_changed().await;

        assert_eq!(remote.inner.stored("u1"), set(&["p4", "p5"]));
        let last = remote.insert_calls().last().unwrap().clone();
        assert_eq!(last.len(), 2);
    }

    #[tokio::test]
    async fn mutations_during_merge_are_gated() {
        let remote = ScriptedRemote::new();
        remote.inner.seed("u1", ["p2", "p3"]);
        let gate = remote.gate_fetch();
        let store = store_with(&["p1", "p2"]);
        let coordinator = coordinator(&store, &remote);

        let merging = coordinator.clone();
        let merge = tokio::spawn(async move {
            merging.identity_changed(Some("u1".into())).await;
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(coordinator.phase(), SyncPhase::Merging);
        assert!(!coordinator.initialized());

        // a mutation arriving mid-merge must not race the merge's push
        store.add("p4".into());
        coordinator.local_changed().await;
        assert!(remote.insert_calls().is_empty());

        gate.notify_one();
        merge.await.unwrap();

        assert_eq!(coordinator.phase(), SyncPhase::Synced);
        // the union was computed after the fetch, so p4 converged anyway
        assert_eq!(remote.inner.stored("u1"), set(&["p1", "p2", "p3", "p4"]));
    }

    #[tokio::test]
    async fn logout_discards_baseline_and_stops_pushes() {
        let remote = ScriptedRemote::new();
        remote.inner.seed("u1", ["p1"]);
        let store = store_with(&[]);
        let coordinator = coordinator(&store, &remote);

        coordinator.identity_changed(Some("u1".into())).await;
        assert_eq!(coordinator.phase(), SyncPhase::Synced);

        coordinator.identity_changed(None).await;
        assert_eq!(coordinator.phase(), SyncPhase::Uninitialized);

        let inserts = remote.insert_calls().len();
        store.add("p2".into());
        coordinator.local_changed().await;
        assert_eq!(remote.insert_calls().len(), inserts);

        // a later login re-merges the local snapshot with the remote set
        coordinator.identity_changed(Some("u2".into())).await;
        assert_eq!(remote.inner.stored("u2"), set(&["p1", "p2"]));
    }

    #[tokio::test]
    async fn stale_merge_result_is_discarded_after_logout() {
        let remote = ScriptedRemote::new();
        remote.inner.seed("u1", ["p7"]);
        let gate = remote.gate_fetch();
        let store = store_with(&["p1"]);
        let coordinator = coordinator(&store, &remote);

        let merging = coordinator.clone();
        let merge = tokio::spawn(async move {
            merging.identity_changed(Some("u1".into())).await;
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        coordinator.identity_changed(None).await;
        gate.notify_one();
        merge.await.unwrap();

        // the fetch completed under a stale generation: no replace, no
        // baseline, no state change
        assert_eq!(coordinator.phase(), SyncPhase::Uninitialized);
        assert_eq!(store.all(), set(&["p1"]));
        assert!(remote.insert_calls().is_empty());
    }

    #[tokio::test]
    async fn slow_fetch_times_out_into_local_only() {
        let remote = ScriptedRemote::new();
        let _gate = remote.gate_fetch(); // never released
        let store = store_with(&["p1"]);
        let coordinator = SyncCoordinator::new(
            store.clone(),
            remote.clone(),
            Duration::from_millis(50),
            Diagnostics::default(),
        );

        coordinator.identity_changed(Some("u1".into())).await;

        assert_eq!(coordinator.phase(), SyncPhase::LocalOnly);
    }

    #[tokio::test]
    async fn merge_push_failure_still_advances_to_synced() {
        let remote = ScriptedRemote::new();
        remote.inner.seed("u1", ["p2"]);
        *remote.fail_insert.lock() = Some(RemoteError::Connectivity("down".into()));
        let store = store_with(&["p1"]);
        let diagnostics = Diagnostics::default();
        let mut events = diagnostics.subscribe();
        let coordinator = SyncCoordinator::new(
            store.clone(),
            remote.clone(),
            Duration::from_secs(5),
            diagnostics,
        );

        coordinator.identity_changed(Some("u1".into())).await;

        // authoritative local state is already correct
        assert_eq!(coordinator.phase(), SyncPhase::Synced);
        assert_eq!(store.all(), set(&["p1", "p2"]));
        assert!(matches!(
            events.try_recv(),
            Ok(SyncDiagnostic::MergePushFailed { pending: 1, .. })
        ));
    }
}
