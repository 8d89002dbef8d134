//! Server configuration loading from file and environment variables.

use podcast_script::ScriptConfig;
use podcast_store::{StorageBackend, StorageConfig};
use podcast_voice::SynthesisConfig;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Speech synthesis settings.
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Where finished podcasts are published.
    #[serde(default)]
    pub storage: StorageConfig,

    /// AI script writer. Disabled unless an API key is configured.
    #[serde(default)]
    pub script: ScriptConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "podcast_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl ServerConfig {
    /// URL the local store directory is reachable at when no public URL is
    /// configured.
    pub fn local_files_url(&self) -> String {
        format!("http://{}:{}/files", self.host, self.port)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `PODCAST_HOST` overrides `server.host`
/// - `PODCAST_PORT` overrides `server.port`
/// - `PODCAST_LOG_LEVEL` overrides `logging.level`
/// - `PODCAST_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `PODCAST_AWS_REGION` overrides `synthesis.region`
/// - `PODCAST_STORAGE_BACKEND` overrides `storage.backend` (`local` or `s3`)
/// - `PODCAST_BUCKET_NAME` overrides `storage.bucket`
/// - `PODCAST_STORAGE_DIR` overrides `storage.local_dir`
/// - `PODCAST_PUBLIC_URL` overrides `storage.public_base_url`
/// - `OPENAI_API_KEY` overrides `script.api_key`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Applies overrides from `lookup`. Unparseable values are ignored.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("PODCAST_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = lookup("PODCAST_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(level) = lookup("PODCAST_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("PODCAST_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Some(region) = lookup("PODCAST_AWS_REGION") {
        config.synthesis.region = region.clone();
        if config.storage.region.is_none() {
            config.storage.region = Some(region);
        }
    }
    if let Some(backend) = lookup("PODCAST_STORAGE_BACKEND") {
        match backend.parse::<StorageBackend>() {
            Ok(parsed) => config.storage.backend = parsed,
            Err(e) => tracing::warn!(error = %e, "ignoring PODCAST_STORAGE_BACKEND"),
        }
    }
    if let Some(bucket) = lookup("PODCAST_BUCKET_NAME") {
        config.storage.bucket = Some(bucket);
    }
    if let Some(dir) = lookup("PODCAST_STORAGE_DIR") {
        config.storage.local_dir = dir;
    }
    if let Some(url) = lookup("PODCAST_PUBLIC_URL") {
        config.storage.public_base_url = Some(url);
    }
    if let Some(key) = lookup("OPENAI_API_KEY") {
        config.script.api_key = Some(key);
    }
}
