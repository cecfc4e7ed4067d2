//! # configs
//!
//! Layered settings for the linkboard binary. Sources, lowest priority first:
//! built-in defaults, `config/default.*`, `config/local.*`, then environment
//! variables such as `LINKBOARD__SERVER__PORT=9000`. A `.env` file is read
//! into the environment before any of that.

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Only read by the sqlite backend.
    pub database_url: SecretString,
    pub max_connections: u32,
    /// Deleting a submission also deletes its comments. Off by default.
    pub cascade_comments: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            database_url: SecretString::from(String::from("sqlite://linkboard.db?mode=rwc")),
            max_connections: 5,
            cascade_comments: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// An `EnvFilter` directive, used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl Settings {
    /// Loads `.env`, then every layer under `./config`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config"))
    }

    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(err) if err.not_found() => {}
            Err(err) => return Err(ConfigError::Invalid(format!(".env: {err}"))),
        }

        let layered = Config::builder()
            .add_source(File::with_name(&dir.join("default").to_string_lossy()).required(false))
            .add_source(File::with_name(&dir.join("local").to_string_lossy()).required(false))
            .add_source(
                Environment::with_prefix("LINKBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_config(layered)
    }

    /// Deserializes and validates an already-built `Config`.
    pub fn from_config(layered: Config) -> Result<Self, ConfigError> {
        let settings: Settings = layered.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host must not be empty".into()));
        }
        if self.storage.max_connections == 0 {
            return Err(ConfigError::Invalid("storage.max_connections must be at least 1".into()));
        }
        if self.storage.backend == StorageBackend::Sqlite && !cfg!(feature = "db-sqlite") {
            return Err(ConfigError::Invalid(
                "storage.backend = \"sqlite\" needs the db-sqlite feature".into(),
            ));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
