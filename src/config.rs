//! Process configuration: where to listen, how long to wait for request
//! data, and how loudly to log.
//!
//! Values come from a YAML file (optional) and are then overridden by
//! environment variables:
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//!   read_timeout_ms: 5000
//! log:
//!   level: debug
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Names the YAML file to load.
pub const CONFIG_ENV: &str = "HEARTH_CONFIG";
/// Loaded from the working directory when `HEARTH_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "hearth.yaml";

pub const HOST_ENV: &str = "HEARTH_HOST";
pub const PORT_ENV: &str = "HEARTH_PORT";
pub const READ_TIMEOUT_ENV: &str = "HEARTH_READ_TIMEOUT_MS";
pub const LOG_ENV: &str = "HEARTH_LOG";

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub read_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            read_timeout_ms: 5000,
        }
    }
}

impl ServerConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LogConfig {
    pub fn level(&self) -> anyhow::Result<tracing::Level> {
        self.level
            .parse::<tracing::Level>()
            .with_context(|| format!("invalid log level {:?}", self.level))
    }
}

impl Config {
    /// Loads the file named by `HEARTH_CONFIG` (or `hearth.yaml` if it
    /// exists), falling back to defaults, then applies `HEARTH_*`
    /// environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        cfg.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Parses YAML; missing sections and fields keep their defaults.
    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Applies overrides from `lookup`, normally the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(HOST_ENV) {
            self.server.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port
                .parse()
                .with_context(|| format!("invalid {PORT_ENV} {port:?}"))?;
        }
        if let Some(timeout) = lookup(READ_TIMEOUT_ENV) {
            self.server.read_timeout_ms = timeout
                .parse()
                .with_context(|| format!("invalid {READ_TIMEOUT_ENV} {timeout:?}"))?;
        }
        if let Some(level) = lookup(LOG_ENV) {
            self.log.level = level;
        }
        Ok(())
    }
}
