use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::WindowResult;
use crate::config::Accelerator;
use crate::subscription::Subscription;
use crate::window::{Window, WindowId};

/// Which windows a tab-list query should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TabListKind {
    /// Normal application windows (Alt+Tab).
    Normal,
    /// Normal windows including those on every workspace.
    NormalAll,
    /// Dock and panel windows.
    Docks,
    /// Windows of the focused application only.
    Group,
}

/// Identifies a workspace in a tab-list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkspaceId(pub u32);

/// The window-listing function the switcher and overview call.
pub type TabListFn<W> = Rc<dyn Fn(TabListKind, Option<WorkspaceId>) -> Vec<W>>;

/// Process-wide slot holding the active tab-list function.
///
/// The environment always calls whatever function is currently in the
/// slot, so replacing it changes what the switcher sees.
pub struct TabListHook<W> {
    current: RefCell<TabListFn<W>>,
}

impl<W> TabListHook<W> {
    pub fn new(list: impl Fn(TabListKind, Option<WorkspaceId>) -> Vec<W> + 'static) -> Self {
        Self {
            current: RefCell::new(Rc::new(list)),
        }
    }

    /// Returns the function currently in the slot.
    pub fn get(&self) -> TabListFn<W> {
        Rc::clone(&self.current.borrow())
    }

    /// Puts `list` in the slot and returns the function it replaced.
    pub fn replace(&self, list: TabListFn<W>) -> TabListFn<W> {
        self.current.replace(list)
    }

    /// Runs the active function.
    ///
    /// The slot is not borrowed while the function runs, so a listing
    /// function may itself read the hook.
    pub fn query(&self, kind: TabListKind, workspace: Option<WorkspaceId>) -> Vec<W> {
        let list = self.get();
        list(kind, workspace)
    }

    /// Returns whether `list` is the function currently in the slot.
    pub fn is_current(&self, list: &TabListFn<W>) -> bool {
        same_fn(&self.current.borrow(), list)
    }
}

/// Compares two listing functions by allocation, ignoring vtables.
pub(crate) fn same_fn<W>(a: &TabListFn<W>, b: &TabListFn<W>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Capabilities of the desktop shell the coordinator runs inside.
///
/// Implemented by the host environment; `testing::FakeShell`
/// provides an in-memory version.
pub trait Shell {
    type Window: Window + 'static;

    /// Returns the window that currently has keyboard focus.
    fn focus_window(&self) -> Option<Self::Window>;

    /// Returns the timestamp of the event being processed.
    fn current_time(&self) -> u32;

    /// Returns the switcher's window-listing slot.
    fn tab_list(&self) -> &TabListHook<Self::Window>;

    /// Resolves the display name of the application owning `window`.
    fn app_name(&self, window: &Self::Window) -> Option<String>;

    /// Connects `handler` to the global "window demands attention" signal.
    fn on_demands_attention(&self, handler: Box<dyn Fn(WindowId)>) -> WindowResult<Subscription>;

    /// Registers a global keybinding named `name`.
    fn add_keybinding(
        &self,
        name: &str,
        accelerator: &Accelerator,
        handler: Box<dyn Fn()>,
    ) -> WindowResult<()>;

    /// Removes a keybinding registered with [`Shell::add_keybinding`].
    fn remove_keybinding(&self, name: &str) -> WindowResult<()>;
}
