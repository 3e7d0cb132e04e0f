use std::path::PathBuf;

use tracing::warn;

use super::Config;
use crate::error::ConfigError;

/// Returns the config directory: `~/.config/ghostwin/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("ghostwin"))
}

/// Returns the config file path: `~/.config/ghostwin/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse `config.toml`.
pub fn try_load() -> Result<Config, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoHomeDir)?;
    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let mut config: Config =
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })?;
    config.validate();
    Ok(config)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// A missing file silently returns defaults; other errors are logged.
pub fn load() -> Config {
    match try_load() {
        Ok(config) => config,
        Err(e) if e.is_not_found() => Config::default(),
        Err(e) => {
            warn!(event = "core.config.load_failed", error = %e);
            Config::default()
        }
    }
}
