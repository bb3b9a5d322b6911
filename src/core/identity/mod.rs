use tokio::sync::watch;

/// Source of the signed-in identity. Absence means logged out. The
/// coordinator reacts only to id changes, nothing else about the
/// account is visible through this seam.
pub trait IdentityProvider: Send + Sync {
    fn current(&self) -> Option<String>;

    /// Change notifications. The receiver always holds the latest id,
    /// so rapid login/logout sequences may coalesce.
    fn watch(&self) -> watch::Receiver<Option<String>>;
}

/// Watch-channel backed identity source, the concrete handle an
/// embedding app (or a test) drives login and logout through.
pub struct IdentityHandle {
    tx: watch::Sender<Option<String>>,
}

impl IdentityHandle {
    pub fn new(initial: Option<String>) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    pub fn login(&self, id: impl Into<String>) {
        let _ = self.tx.send(Some(id.into()));
    }

    pub fn logout(&self) {
        let _ = self.tx.send(None);
    }
}

impl IdentityProvider for IdentityHandle {
    fn current(&self) -> Option<String> {
        self.tx.borrow().clone()
    }

    fn watch(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }
}
