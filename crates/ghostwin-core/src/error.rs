use std::path::PathBuf;

use crate::window::WindowId;

/// Result type for calls into the windowing environment.
pub type WindowResult<T> = Result<T, WindowError>;

/// A failed call into the windowing environment.
///
/// None of these are fatal. Callers log them and carry on as if the
/// call had succeeded, since the usual cause is a window that vanished
/// between the event and the call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WindowError {
    #[error("window {0} no longer exists")]
    Gone(WindowId),

    #[error("{op} failed: {message}")]
    Failed { op: &'static str, message: String },

    #[error("{0} is not supported by this environment")]
    Unsupported(&'static str),
}

impl WindowError {
    /// Shorthand for a [`WindowError::Failed`] with a message.
    pub fn failed(op: &'static str, message: impl Into<String>) -> Self {
        Self::Failed {
            op,
            message: message.into(),
        }
    }
}

/// Rejections from the hidden-window registry.
///
/// Both variants are no-op conditions: the registry state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("window {0} is already hidden")]
    AlreadyHidden(WindowId),

    #[error("window {0} is not hidden")]
    NotFound(WindowId),
}

/// Failures loading or interpreting configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid accelerator {accelerator:?}: {reason}")]
    InvalidAccelerator {
        accelerator: String,
        reason: &'static str,
    },
}

impl ConfigError {
    /// Returns whether the error is just a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
