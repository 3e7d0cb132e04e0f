//! Switcher filter: keeps hidden windows out of the tab list.
//!
//! The filter owns the original listing function for as long as it is
//! installed and puts it back on uninstall. Repeated installs never
//! wrap the wrapper.

use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::registry::HiddenSet;
use crate::shell::{TabListFn, TabListHook};
use crate::window::Window;

struct Installed<W> {
    original: TabListFn<W>,
    wrapper: TabListFn<W>,
}

pub struct SwitcherFilter<W> {
    installed: Option<Installed<W>>,
}

impl<W: Window + 'static> SwitcherFilter<W> {
    pub fn new() -> Self {
        Self { installed: None }
    }

    pub fn is_installed(&self) -> bool {
        self.installed.is_some()
    }

    /// Replaces the hook's function with one that drops windows in `hidden`.
    ///
    /// Returns `false` without touching the hook if already installed.
    pub fn install(&mut self, hook: &TabListHook<W>, hidden: HiddenSet) -> bool {
        if self.installed.is_some() {
            debug!(event = "core.filter.install_skipped", reason = "already installed");
            return false;
        }

        let original = hook.get();
        let inner = Rc::clone(&original);
        let wrapper: TabListFn<W> = Rc::new(move |kind, workspace| {
            inner(kind, workspace)
                .into_iter()
                .filter(|w| !hidden.contains(w.id()))
                .collect::<Vec<W>>()
        });

        hook.replace(Rc::clone(&wrapper));
        self.installed = Some(Installed { original, wrapper });
        info!(event = "core.filter.installed");
        true
    }

    /// Puts the original function back.
    ///
    /// Returns `false` if the filter was not installed.
    pub fn uninstall(&mut self, hook: &TabListHook<W>) -> bool {
        let Some(installed) = self.installed.take() else {
            return false;
        };
        if !hook.is_current(&installed.wrapper) {
            warn!(
                event = "core.filter.hook_rewrapped",
                "tab list was replaced after install; restoring the original anyway"
            );
        }
        hook.replace(installed.original);
        info!(event = "core.filter.uninstalled");
        true
    }
}

impl<W: Window + 'static> Default for SwitcherFilter<W> {
    fn default() -> Self {
        Self::new()
    }
}
