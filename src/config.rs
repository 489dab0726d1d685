//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::snapshot::{default_chains, ChainEndpoint, ChainEndpoints, SnapshotClientConfig};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub snapshot: SnapshotConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Snapshot indexer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_chains")]
    pub chains: Vec<ChainEndpoint>,
}

fn default_request_timeout() -> u64 {
    10_000 // 10 seconds
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout(),
            chains: default_chains(),
        }
    }
}

impl SnapshotConfig {
    /// Client configuration for these settings
    pub fn client_config(&self) -> SnapshotClientConfig {
        SnapshotClientConfig {
            endpoints: ChainEndpoints::from_chains(&self.chains),
            request_timeout_ms: self.request_timeout_ms,
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8083
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from `RISEDLE_CONFIG`, default locations, or environment
    pub fn load_default() -> Self {
        let config_paths = [
            std::env::var("RISEDLE_CONFIG").ok().map(PathBuf::from),
            dirs::config_dir().map(|p| p.join("risedle").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Snapshot overrides
        if let Some(timeout) = env_parse("RISEDLE_REQUEST_TIMEOUT_MS") {
            self.snapshot.request_timeout_ms = timeout;
        }

        // API overrides
        if let Ok(host) = std::env::var("RISEDLE_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = env_parse("RISEDLE_API_PORT") {
            self.api.port = port;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("RISEDLE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("RISEDLE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Risedle Configuration
#
# Environment variables override these settings:
# - RISEDLE_REQUEST_TIMEOUT_MS
# - RISEDLE_API_HOST
# - RISEDLE_API_PORT
# - RISEDLE_LOG_LEVEL
# - RISEDLE_LOG_FORMAT

[snapshot]
# Timeout for a single snapshot request (ms)
request_timeout_ms = 10000

# Snapshot indexer per chain
[[snapshot.chains]]
id = 42
name = "kovan"
endpoint = "https://snapshot-kovan.risedle.com"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8083

# Allowed CORS origins (empty = any origin)
cors_origins = []

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
