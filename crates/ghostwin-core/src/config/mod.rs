pub mod accelerator;
mod loader;
pub mod template;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub use crate::log::LogConfig;
pub use accelerator::{Accelerator, Modifier};
pub use loader::{config_dir, config_path, load, try_load};

pub const DEFAULT_HIDE_SHORTCUT: &str = "Ctrl+Alt+J";
pub const DEFAULT_RESTORE_SHORTCUT: &str = "Ctrl+Alt+K";

/// Top-level configuration for Ghost Window.
///
/// Loaded from `~/.config/ghostwin/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub shortcuts: ShortcutConfig,
    pub logging: LogConfig,
}

/// Global shortcut accelerators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutConfig {
    /// Hides the focused window.
    #[serde(alias = "hide-shortcut")]
    pub hide: String,
    /// Opens the hidden-window menu.
    #[serde(alias = "restore-shortcut")]
    pub restore: String,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            hide: DEFAULT_HIDE_SHORTCUT.into(),
            restore: DEFAULT_RESTORE_SHORTCUT.into(),
        }
    }
}

impl ShortcutConfig {
    pub fn hide_accelerator(&self) -> Accelerator {
        parse_or_default(&self.hide, DEFAULT_HIDE_SHORTCUT)
    }

    pub fn restore_accelerator(&self) -> Accelerator {
        parse_or_default(&self.restore, DEFAULT_RESTORE_SHORTCUT)
    }
}

impl Config {
    /// Replaces unparsable accelerators with their defaults.
    pub fn validate(&mut self) {
        validate_shortcut(&mut self.shortcuts.hide, DEFAULT_HIDE_SHORTCUT);
        validate_shortcut(&mut self.shortcuts.restore, DEFAULT_RESTORE_SHORTCUT);
    }
}

fn validate_shortcut(value: &mut String, default: &str) {
    if let Err(e) = Accelerator::parse(value) {
        warn!(event = "core.config.shortcut_invalid", error = %e, fallback = default);
        *value = default.to_string();
    }
}

fn parse_or_default(value: &str, default: &str) -> Accelerator {
    Accelerator::parse(value)
        .or_else(|_| Accelerator::parse(default))
        .unwrap_or_else(|_| Accelerator {
            modifiers: Vec::new(),
            key: default.to_string(),
        })
}
