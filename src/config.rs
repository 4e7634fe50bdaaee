//! Configuration module for Filedrop.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

use crate::{FiledropError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory where uploaded files are kept.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Directory served under `/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_upload_dir() -> String {
    "./uploaded".to_string()
}

fn default_static_dir() -> String {
    "./static".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            static_dir: default_static_dir(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file, written in addition to stdout.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(FiledropError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| FiledropError::Config(format!("parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `FILEDROP_HOST`
    /// - `FILEDROP_PORT`
    /// - `FILEDROP_UPLOAD_DIR`
    /// - `FILEDROP_STATIC_DIR`
    /// - `FILEDROP_LOG_LEVEL`
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(host) = get("FILEDROP_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("FILEDROP_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => eprintln!("Ignoring invalid FILEDROP_PORT: {port}"),
            }
        }
        if let Some(dir) = get("FILEDROP_UPLOAD_DIR") {
            self.storage.upload_dir = dir;
        }
        if let Some(dir) = get("FILEDROP_STATIC_DIR") {
            self.storage.static_dir = dir;
        }
        if let Some(level) = get("FILEDROP_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Address the HTTP server binds to.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| {
                FiledropError::Config(format!(
                    "invalid listen address {}:{}: {e}",
                    self.server.host, self.server.port
                ))
            })
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - either storage directory is empty
    /// - host and port do not form a socket address
    pub fn validate(&self) -> Result<()> {
        if self.storage.upload_dir.trim().is_empty() {
            return Err(FiledropError::Config("upload_dir is empty".to_string()));
        }
        if self.storage.static_dir.trim().is_empty() {
            return Err(FiledropError::Config("static_dir is empty".to_string()));
        }
        self.listen_addr()?;
        Ok(())
    }
}
