use anyhow::{Context, Error};
use favsync::app::config::FavsyncConfig;
use favsync::app::logging;
use favsync::app::session::{Session, SessionOptions};
use favsync::core::favorites::firestore::{create_client, FirestoreFavorites};
use favsync::core::favorites::snapshot::FileSnapshot;
use favsync::core::identity::{IdentityHandle, IdentityProvider};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cfg_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "favsync.yaml".into());
    let config = FavsyncConfig::load(&PathBuf::from(cfg_path))?;

    logging::init(&config.logging)?;

    let fs_config = config
        .firestore
        .as_ref()
        .context("Firestore must be configured")?;

    info!("Connecting to Firestore project: {}", fs_config.project_id);
    let db = create_client(fs_config).await?;
    info!("Connected to Firestore");

    let remote = Arc::new(FirestoreFavorites::new(
        Arc::new(db),
        config.sync.collection.clone(),
    ));

    let identity = IdentityHandle::new(std::env::var("FAVSYNC_IDENTITY").ok());
    if identity.current().is_some() {
        info!("Starting with identity from FAVSYNC_IDENTITY");
    }

    let session = Session::start(
        Box::new(FileSnapshot::new(config.snapshot_path.clone())),
        remote,
        &identity,
        SessionOptions {
            remote_timeout: Duration::from_secs(config.sync.remote_timeout_secs),
            logout_policy: config.sync.logout,
        },
    );

    info!("favsync running, ctrl-c to stop");
    tokio::signal::ctrl_c().await?;

    drop(session);
    info!("Shutdown complete");

    Ok(())
}
