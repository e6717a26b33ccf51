use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Environment variable naming a YAML configuration file.
pub const CONFIG_PATH_ENV: &str = "WIRELINE_CONFIG";
/// Overrides `server.port`.
pub const PORT_ENV: &str = "WIRELINE_PORT";
/// Overrides `logging.level`.
pub const LOG_LEVEL_ENV: &str = "WIRELINE_LOG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 42069,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the file in `WIRELINE_CONFIG`, or defaults,
    /// then applies environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(port) = std::env::var(PORT_ENV) {
            cfg.server.port = port
                .parse()
                .with_context(|| format!("Invalid {PORT_ENV} value: {port}"))?;
        }
        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            cfg.logging.level = level;
        }

        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_yaml(contents: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn log_level(&self) -> anyhow::Result<tracing::Level> {
        self.logging
            .level
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid log level: {}", self.logging.level))
    }
}
