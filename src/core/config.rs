//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.gozcu/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GozcuConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub conversation_poll_secs: Option<u64>,
    pub statistics_poll_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BotConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BACKEND_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_BOT_BASE_URL: &str = "http://localhost:5005";
pub const DEFAULT_CONVERSATION_POLL_SECS: u64 = 5;
pub const DEFAULT_STATISTICS_POLL_SECS: u64 = 30;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub backend_base_url: String,
    pub bot_base_url: String,
    pub conversation_poll_secs: u64,
    pub statistics_poll_secs: u64,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.gozcu/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".gozcu").join("config.toml"))
}

/// Load config from `~/.gozcu/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `GozcuConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<GozcuConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(GozcuConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(GozcuConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: GozcuConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Gozcu Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# conversation_poll_secs = 5     # Live-conversation refresh interval
# statistics_poll_secs = 30      # Dashboard refresh interval

# [backend]
# base_url = "http://localhost:5000/api"   # Or set GOZCU_API_URL env var

# [bot]
# base_url = "http://localhost:5005"       # Or set GOZCU_BOT_URL env var
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_api_url` and `cli_bot_url` come from CLI flags (None = not specified).
pub fn resolve(
    config: &GozcuConfig,
    cli_api_url: Option<&str>,
    cli_bot_url: Option<&str>,
) -> ResolvedConfig {
    // Backend base URL: CLI → env → config → default
    let backend_base_url = cli_api_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("GOZCU_API_URL").ok())
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BACKEND_BASE_URL.to_string());

    // Bot base URL: CLI → env → config → default
    let bot_base_url = cli_bot_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("GOZCU_BOT_URL").ok())
        .or_else(|| config.bot.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BOT_BASE_URL.to_string());

    ResolvedConfig {
        backend_base_url,
        bot_base_url,
        conversation_poll_secs: config
            .general
            .conversation_poll_secs
            .unwrap_or(DEFAULT_CONVERSATION_POLL_SECS),
        statistics_poll_secs: config
            .general
            .statistics_poll_secs
            .unwrap_or(DEFAULT_STATISTICS_POLL_SECS),
    }
}
