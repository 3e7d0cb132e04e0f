//! Tracing setup with an optional size-rotated log file.
//!
//! When file logging is enabled, events go to
//! `~/.config/ghostwin/logs/ghostwin.log`. A file already over the size
//! limit is rotated to `ghostwin.log.1` (one backup kept) at startup.
//! Otherwise warnings and errors go to stderr.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "ghostwin.log";
const BACKUP_FILE_NAME: &str = "ghostwin.log.1";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false`.
    pub enabled: bool,
    /// Minimum log level: "debug", "info", "warn", or "error".
    pub level: String,
    /// Maximum log file size in megabytes before rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

impl LogConfig {
    /// Filter directive for the configured level. Unknown levels mean `info`.
    pub fn directive(&self) -> &'static str {
        match self.level.to_ascii_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "warn" => "warn",
            "error" => "error",
            _ => "info",
        }
    }
}

/// Returns the log file path: `~/.config/ghostwin/logs/ghostwin.log`.
pub fn log_path() -> Option<PathBuf> {
    crate::config::config_dir().map(|d| d.join("logs").join(LOG_FILE_NAME))
}

/// Installs the global subscriber. Later calls are ignored.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &LogConfig) {
    let file = if config.enabled {
        log_path().and_then(|path| open_log_file(&path, config.max_file_mb))
    } else {
        None
    };

    match file {
        Some(file) => {
            let filter = env_filter(config.directive());
            let _ = tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .with(filter)
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::registry()
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .with(env_filter("warn"))
                .try_init();
        }
    }
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn open_log_file(path: &Path, max_file_mb: u64) -> Option<File> {
    let dir = path.parent()?;
    fs::create_dir_all(dir).ok()?;
    rotate_if_needed(path, max_file_mb.saturating_mul(1024 * 1024));
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Moves `path` to its `.1` backup when it has reached `max_bytes`.
///
/// A limit of zero disables rotation. Returns whether a rotation happened.
fn rotate_if_needed(path: &Path, max_bytes: u64) -> bool {
    if max_bytes == 0 {
        return false;
    }
    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    if size < max_bytes {
        return false;
    }
    fs::rename(path, path.with_file_name(BACKUP_FILE_NAME)).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ghostwin-log-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn directive_defaults_to_info() {
        let mut config = LogConfig::default();
        assert_eq!(config.directive(), "info");

        config.level = "DEBUG".into();
        assert_eq!(config.directive(), "debug");

        config.level = "loud".into();
        assert_eq!(config.directive(), "info");
    }

    #[test]
    fn oversized_file_is_rotated() {
        // Arrange
        let dir = scratch_dir("rotate");
        let path = dir.join(LOG_FILE_NAME);
        fs::write(&path, vec![b'x'; 64]).unwrap();

        // Act
        let rotated = rotate_if_needed(&path, 32);

        // Assert
        assert!(rotated);
        assert!(!path.exists());
        assert_eq!(fs::read(dir.join(BACKUP_FILE_NAME)).unwrap().len(), 64);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn small_file_is_kept() {
        let dir = scratch_dir("keep");
        let path = dir.join(LOG_FILE_NAME);
        fs::write(&path, b"short").unwrap();

        assert!(!rotate_if_needed(&path, 1024));
        assert!(!rotate_if_needed(&path, 0));
        assert!(path.exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn huge_size_limit_does_not_overflow() {
        // Arrange
        let dir = scratch_dir("huge");
        let path = dir.join(LOG_FILE_NAME);
        fs::write(&path, b"existing").unwrap();

        // Act
        let file = open_log_file(&path, u64::MAX);

        // Assert
        assert!(file.is_some());
        assert!(!dir.join(BACKUP_FILE_NAME).exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
