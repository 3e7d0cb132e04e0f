use std::fmt;

use serde::{Deserialize, Serialize};

use crate::WindowResult;
use crate::subscription::Subscription;

/// Stable identity of an on-screen window.
///
/// Equality of ids is the only notion of "same window" the registry
/// and the switcher filter use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// Window type as reported by the window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowType {
    Normal,
    Desktop,
    Dock,
    Dialog,
    ModalDialog,
    Toolbar,
    Menu,
    Utility,
    Splashscreen,
}

impl WindowType {
    /// Window types that are never hidden.
    pub const EXCLUDED: [WindowType; 4] = [
        WindowType::Desktop,
        WindowType::Dock,
        WindowType::Dialog,
        WindowType::ModalDialog,
    ];

    /// Returns whether windows of this type are refused by `hide`.
    pub fn is_excluded(self) -> bool {
        Self::EXCLUDED.contains(&self)
    }
}

/// Per-window notifications a [`Window`] can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowSignal {
    /// The window was destroyed or stopped being managed.
    Unmanaged,
    /// The window left the minimized state.
    Unminimized,
}

/// Handle to a single window supplied by the windowing environment.
///
/// Handles are cheap to clone and compare by [`WindowId`]. Every call
/// may fail if the underlying window is already gone.
pub trait Window: Clone {
    /// Returns the window's identity.
    fn id(&self) -> WindowId;

    /// Returns the window type.
    fn window_type(&self) -> WindowType;

    /// Returns the window title.
    fn title(&self) -> WindowResult<String>;

    /// Returns the window manager class name.
    fn class(&self) -> WindowResult<String>;

    fn minimize(&self) -> WindowResult<()>;

    fn unminimize(&self) -> WindowResult<()>;

    /// Gives the window focus. `timestamp` is the triggering event time.
    fn activate(&self, timestamp: u32) -> WindowResult<()>;

    /// Asks the window to close.
    fn close(&self, timestamp: u32) -> WindowResult<()>;

    /// Connects `handler` to `signal`.
    ///
    /// The returned [`Subscription`] disconnects the handler when it is
    /// released or dropped.
    fn subscribe(&self, signal: WindowSignal, handler: Box<dyn Fn()>)
    -> WindowResult<Subscription>;
}
