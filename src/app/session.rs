use crate::app::config::LogoutPolicy;
use crate::core::favorites::remote::RemoteFavoritesRepository;
use crate::core::favorites::snapshot::SnapshotStore;
use crate::core::favorites::store::LocalFavoritesStore;
use crate::core::identity::IdentityProvider;
use crate::core::sync::{Diagnostics, SyncCoordinator};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub remote_timeout: Duration,
    pub logout_policy: LogoutPolicy,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            remote_timeout: Duration::from_secs(10),
            logout_policy: LogoutPolicy::default(),
        }
    }
}

/// Composition root for the favorites subsystem: restores the local
/// store from its snapshot, wires store mutations into the coordinator,
/// and follows the identity provider for merge and teardown. Explicitly
/// constructed and dropped with the session, nothing global.
pub struct Session {
    store: Arc<LocalFavoritesStore>,
    coordinator: Arc<SyncCoordinator>,
    diagnostics: Diagnostics,
    watcher: JoinHandle<()>,
}

impl Session {
    pub fn start(
        snapshot: Box<dyn SnapshotStore>,
        remote: Arc<dyn RemoteFavoritesRepository>,
        identity: &dyn IdentityProvider,
        options: SessionOptions,
    ) -> Session {
        let diagnostics = Diagnostics::default();
        let store = LocalFavoritesStore::open(snapshot, diagnostics.clone());
        let coordinator = SyncCoordinator::new(
            store.clone(),
            remote,
            options.remote_timeout,
            diagnostics.clone(),
        );

        // every effective mutation becomes a fire-and-forget diff push
        {
            let coordinator = coordinator.clone();
            store.on_change(Box::new(move || {
                let coordinator = coordinator.clone();
                tokio::spawn(async move {
                    coordinator.local_changed().await;
                });
            }));
        }

        let watcher = Self::spawn_identity_watcher(
            identity.watch(),
            store.clone(),
            coordinator.clone(),
            options.logout_policy,
        );

        info!("Favorites session started ({} favorites restored)", store.count());

        Session {
            store,
            coordinator,
            diagnostics,
            watcher,
        }
    }

    fn spawn_identity_watcher(
        mut identities: tokio::sync::watch::Receiver<Option<String>>,
        store: Arc<LocalFavoritesStore>,
        coordinator: Arc<SyncCoordinator>,
        logout_policy: LogoutPolicy,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let initial = identities.borrow_and_update().clone();
            if initial.is_some() {
                coordinator.identity_changed(initial).await;
            }

            while identities.changed().await.is_ok() {
                let identity = identities.borrow_and_update().clone();
                let logged_out = identity.is_none();

                // coordinator first: once it is uninitialized, the
                // clear below cannot turn into a remote delete push
                coordinator.identity_changed(identity).await;

                if logged_out && logout_policy == LogoutPolicy::Clear {
                    info!("Identity cleared, wiping local favorites per policy");
                    store.clear();
                }
            }
        })
    }

    pub fn favorites(&self) -> &Arc<LocalFavoritesStore> {
        &self.store
    }

    pub fn coordinator(&self) -> &Arc<SyncCoordinator> {
        &self.coordinator
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}
