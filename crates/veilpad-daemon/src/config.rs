//! Configuration file management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "VEILPAD_CONFIG";

/// Config file used when the environment variable is unset.
pub const DEFAULT_CONFIG_FILE: &str = "veilpad.toml";

/// Complete daemon configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// RPC listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Simulated contract deployment.
    #[serde(default)]
    pub deployment: DeploymentConfig,
    /// Change journal settings.
    #[serde(default)]
    pub journal: JournalConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// RPC listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// TCP address for the JSON-RPC listener. Port 0 = OS-assigned.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

/// Store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Populate the store with demo tokens and presales at startup.
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

/// Simulated deployment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// Mark new tokens deployed after `delay_ms`.
    #[serde(default = "default_true")]
    pub simulate: bool,
    #[serde(default = "default_deployment_delay_ms")]
    pub delay_ms: u64,
}

/// Change journal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Quiet period before a batch of changes is summarized.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace" | "debug" | "info" | "warn" | "error".
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default value functions

fn default_listen_addr() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_true() -> bool {
    true
}

fn default_deployment_delay_ms() -> u64 {
    3_000
}

fn default_debounce_ms() -> u64 {
    30_000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
        }
    }
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            simulate: true,
            delay_ms: default_deployment_delay_ms(),
        }
    }
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl DaemonConfig {
    /// Load configuration from `$VEILPAD_CONFIG` or `./veilpad.toml`.
    ///
    /// Falls back to defaults if the file does not exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: DaemonConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Get the config file path.
    fn config_path() -> PathBuf {
        std::env::var(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Filter directives for the daemon's own crates at the configured level.
    pub fn log_directives(&self) -> String {
        let level = &self.logging.log_level;
        format!("veilpad={level},veilpad_store={level}")
    }
}
