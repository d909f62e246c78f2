//! Application-level configuration loading: scoring policy and runtime limits.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::state::scoring::{DEFAULT_ALL_OUT_WICKETS, ScoringPolicy};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "LIVE_SCORE_BACK_CONFIG_PATH";
/// Environment variable selecting the [`StorageBackend`].
const STORAGE_BACKEND_ENV: &str = "STORAGE_BACKEND";
const DEFAULT_GATE_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_BROADCAST_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Scoring rules applied to every match.
    pub scoring: ScoringPolicy,
    /// Longest wait for the per-match gate before a mutation is refused; `None` waits forever.
    pub gate_timeout: Option<Duration>,
    /// Capacity of each broadcast channel.
    pub broadcast_capacity: usize,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json_str(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        all_out_wickets = app_config.scoring.all_out_wickets,
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a configuration document; absent keys keep their defaults.
    pub fn from_json_str(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    all_out_wickets: u32,
    gate_timeout_ms: u64,
    broadcast_capacity: usize,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            all_out_wickets: DEFAULT_ALL_OUT_WICKETS,
            gate_timeout_ms: DEFAULT_GATE_TIMEOUT_MS,
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
        }
    }
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            scoring: ScoringPolicy {
                all_out_wickets: value.all_out_wickets.max(1),
            },
            // 0 disables the limit.
            gate_timeout: (value.gate_timeout_ms > 0)
                .then(|| Duration::from_millis(value.gate_timeout_ms)),
            broadcast_capacity: value.broadcast_capacity.max(1),
        }
    }
}

/// Persistence layer selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// MongoDB through the background storage supervisor.
    Mongo,
    /// Process-local maps; data is lost on restart.
    Memory,
}

impl StorageBackend {
    /// Read `STORAGE_BACKEND`; unknown values fall back to the default with a warning.
    pub fn from_env() -> Self {
        match env::var(STORAGE_BACKEND_ENV) {
            Ok(value) => Self::parse(&value).unwrap_or_else(|| {
                warn!(value = %value, "unknown storage backend; using default");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Some(Self::Mongo),
            "memory" | "in-memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

impl Default for StorageBackend {
    fn default() -> Self {
        if cfg!(feature = "mongo-store") {
            Self::Mongo
        } else {
            Self::Memory
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
