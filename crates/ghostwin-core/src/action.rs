use serde::{Deserialize, Serialize};

use crate::WindowId;

/// A user-initiated operation, triggered by a keybinding, a menu item
/// or a command from the host.
///
/// Actions are distinct from [`Event`](crate::Event)s, which come from
/// the windowing environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Hide the currently focused window.
    HideFocused,
    /// Open or close the hidden-window menu.
    ToggleMenu,
    /// Release one hidden window and give it focus.
    Release(WindowId),
    /// Release every hidden window.
    ReleaseAll,
    /// Close a hidden window from the menu.
    Close(WindowId),
    /// Restore every hidden window and turn Ghost Window off.
    Disable,
}
