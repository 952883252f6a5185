use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable the HTTP server reads its database path from.
pub const DATABASE_PATH_ENV: &str = "DATABASE_PATH";

/// Configuration for attribuitions.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments / `DATABASE_PATH` (highest priority)
/// 2. Environment variables (ATTRIB_* prefix)
/// 3. Config file (~/.config/attribuitions/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite database.
    ///
    /// Can be set via:
    /// - CLI: first positional argument
    /// - ENV: DATABASE_PATH (server) or ATTRIB_DATABASE_PATH
    /// - Config: database_path = "/path/to/db"
    /// - Default: ~/.local/share/attribuitions/attribuitions.db
    #[serde(default = "default_db_path")]
    pub database_path: PathBuf,

    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Grace period for draining HTTP connections on shutdown.
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,

    /// One of trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_db_path(),
            port: default_port(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/attribuitions/config.toml
    /// Reads environment variables with ATTRIB_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("attrib");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration with an explicit database path.
    pub fn load_with_db_path(db_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.database_path = db_path;
        Ok(config)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

/// Returns: ~/.local/share/attribuitions/attribuitions.db (or platform equivalent)
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("attribuitions")
        .join("attribuitions.db")
}

const fn default_port() -> u16 {
    10010
}

const fn default_shutdown_timeout_secs() -> u64 {
    5
}

fn default_log_level() -> String {
    String::from("info")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/attribuitions/config.toml
/// - macOS: ~/Library/Application Support/attribuitions/config.toml
/// - Windows: %APPDATA%\attribuitions\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("attribuitions")
        .join("config.toml")
}
