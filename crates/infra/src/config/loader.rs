//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, when `BEAGLE_API_BASE_URL` is set
//! 2. The first config file found by [`probe_config_paths`]
//! 3. Built-in defaults
//!
//! ## Environment Variables
//! - `BEAGLE_API_BASE_URL`: API base URL (required for this source)
//! - `BEAGLE_HTTP_TIMEOUT_SECS`: request timeout in seconds
//! - `BEAGLE_REFRESH_MODE`: `identity_provider` or `api`
//! - `BEAGLE_REFRESH_URL`: identity provider token endpoint
//! - `BEAGLE_SESSION_BACKEND`: `file`, `keychain` or `memory`
//! - `BEAGLE_SESSION_PATH`: session file location
//! - `BEAGLE_LOG_LEVEL`: default log filter
//! - `BEAGLE_LOG_JSON`: emit JSON log lines (true/false)
//!
//! ## File Locations
//! `config.{json,toml}` and `beagle.{json,toml}` in the working directory,
//! then `<config dir>/beagle/`, then next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use beagle_domain::constants::APP_DIR_NAME;
use beagle_domain::{
    ApiConfig, AuthConfig, BeagleError, Config, LoggingConfig, RefreshMode, Result,
    SessionBackend, StorageConfig,
};

const CONFIG_FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "beagle.json", "beagle.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `BeagleError::Config` when environment values are invalid or a
/// config file exists but cannot be parsed. Missing sources are not errors.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            return Ok(config);
        }
        Err(e) => tracing::debug!(error = %e, "Environment configuration unavailable"),
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::info!("No configuration found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from `BEAGLE_*` environment variables
///
/// # Errors
/// Returns `BeagleError::Config` if `BEAGLE_API_BASE_URL` is missing or any
/// variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("BEAGLE_API_BASE_URL")?;

    let mut api = ApiConfig { base_url, ..ApiConfig::default() };
    if let Some(timeout) = env_opt("BEAGLE_HTTP_TIMEOUT_SECS") {
        api.timeout_seconds = timeout
            .parse::<u64>()
            .map_err(|e| BeagleError::Config(format!("Invalid HTTP timeout: {e}")))?;
    }

    let mut auth = AuthConfig::default();
    if let Some(mode) = env_opt("BEAGLE_REFRESH_MODE") {
        auth.refresh_mode = RefreshMode::from_str(&mode).map_err(BeagleError::Config)?;
    }
    if let Some(url) = env_opt("BEAGLE_REFRESH_URL") {
        auth.refresh_url = url;
    }

    let mut storage = StorageConfig::default();
    if let Some(backend) = env_opt("BEAGLE_SESSION_BACKEND") {
        storage.backend = SessionBackend::from_str(&backend).map_err(BeagleError::Config)?;
    }
    storage.session_path = env_opt("BEAGLE_SESSION_PATH");

    let mut logging = LoggingConfig::default();
    if let Some(level) = env_opt("BEAGLE_LOG_LEVEL") {
        logging.level = level;
    }
    logging.json = env_bool("BEAGLE_LOG_JSON", logging.json);

    Ok(Config { api, auth, storage, logging })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `BeagleError::Config` if the file is missing, unreadable or not
/// valid JSON/TOML.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(BeagleError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            BeagleError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| BeagleError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse by extension; anything other than `.toml` is read as JSON.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| BeagleError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| BeagleError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(BeagleError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file in the standard locations.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs_to_search = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs_to_search.push(cwd);
    }
    if let Some(config_dir) = dirs::config_dir() {
        dirs_to_search.push(config_dir.join(APP_DIR_NAME));
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        dirs_to_search.push(exe_dir);
    }

    dirs_to_search
        .iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    env_opt(key)
        .ok_or_else(|| BeagleError::Config(format!("Missing required environment variable: {key}")))
}

/// Set and non-blank.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Accepts `1`/`true`/`yes`/`on` as true (case-insensitive); any other set
/// value is false.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
