use config::Config;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
pub struct FirestoreConfig {
    pub project_id: String,
    #[serde(default)]
    pub database_id: Option<String>,
    #[serde(default)]
    pub emulator_host: Option<String>,
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
}

/// What happens to the locally persisted favorites when the identity
/// is cleared. The hosted record is never touched on logout either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoutPolicy {
    /// Offline favorites survive identity switches.
    Retain,
    /// The local snapshot is wiped alongside the session.
    Clear,
}

impl Default for LogoutPolicy {
    fn default() -> Self {
        LogoutPolicy::Retain
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
pub struct SyncSettings {
    /// Firestore collection holding one document per (identity, product)
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Upper bound on any single remote call; expiry is treated as a
    /// connectivity failure
    #[serde(default = "default_remote_timeout_secs")]
    pub remote_timeout_secs: u64,
    #[serde(default)]
    pub logout: LogoutPolicy,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            remote_timeout_secs: default_remote_timeout_secs(),
            logout: LogoutPolicy::default(),
        }
    }
}

impl SyncSettings {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.remote_timeout_secs == 0 {
            anyhow::bail!("remote_timeout_secs must be at least 1 second");
        }

        Ok(())
    }
}

fn default_collection() -> String {
    "favorites".to_string()
}

fn default_remote_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
pub struct FavsyncConfig {
    /// Durable local snapshot file for the favorites set
    pub snapshot_path: PathBuf,
    pub firestore: Option<FirestoreConfig>,
    #[serde(default)]
    pub sync: SyncSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRotation {
    Daily,
    Hourly,
    Never,
}

impl Default for FileRotation {
    fn default() -> Self {
        FileRotation::Daily
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LogSink {
    Stdout {
        #[serde(default = "default_true")]
        color: bool,
        #[serde(default)]
        json: bool,
    },
    File {
        path: PathBuf,
        #[serde(default)]
        json: bool,
        #[serde(default)]
        rotation: FileRotation,
    },
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub sinks: Vec<LogSink>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            sinks: vec![LogSink::Stdout {
                color: true,
                json: false,
            }],
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.sinks.is_empty() {
            anyhow::bail!("At least one logging sink must be configured");
        }

        self.level.parse::<tracing::Level>().map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: trace, debug, info, warn, error",
                self.level
            )
        })?;

        Ok(())
    }
}

impl FavsyncConfig {
    pub fn load(path: &PathBuf) -> Result<FavsyncConfig, anyhow::Error> {
        let cfg = Config::builder()
            .add_source(config::File::from(path.to_path_buf()))
            .build()?;

        let cfg: FavsyncConfig = cfg.try_deserialize()?;
        cfg.sync.validate()?;

        Ok(cfg)
    }
}
