use serde::{Deserialize, Serialize};

use crate::WindowId;

/// A command sent to the coordinator from another process.
///
/// These are serialized as JSON; the transport belongs to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum Command {
    /// Hide the focused window.
    Hide,
    /// Release one hidden window.
    Release { id: WindowId },
    /// Release every hidden window.
    ReleaseAll,
    /// Close one hidden window.
    Close { id: WindowId },
    /// List the hidden windows in hide order.
    List,
    /// Report whether the coordinator is enabled and how many windows are hidden.
    Status,
}

/// A response sent back for a [`Command`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Whether the command succeeded.
    pub status: ResponseStatus,
    /// Optional human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Hidden windows, present only for [`Command::List`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows: Option<Vec<HiddenWindowInfo>>,
}

/// Status of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

/// Serializable view of one hidden window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiddenWindowInfo {
    pub id: WindowId,
    pub app_name: String,
    pub title: String,
}

impl Response {
    /// Creates a successful response with no message.
    pub fn ok() -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: None,
            windows: None,
        }
    }

    /// Creates a successful response with a message.
    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok()
        }
    }

    /// Creates a successful response carrying a window list.
    pub fn with_windows(windows: Vec<HiddenWindowInfo>) -> Self {
        Self {
            windows: Some(windows),
            ..Self::ok()
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(message.into()),
            windows: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ResponseStatus::Ok
    }
}
