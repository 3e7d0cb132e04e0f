//! The hidden-window registry.
//!
//! Records are kept in hide order (the menu shows them that way) and
//! mirrored into a [`HiddenSet`] so membership checks from the switcher
//! filter stay O(1).

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::error::RegistryError;
use crate::event::{Event, EventSink};
use crate::subscription::Subscription;
use crate::window::{Window, WindowId, WindowSignal, WindowType};

/// Label used when neither the app resolver nor the class name yield one.
pub const FALLBACK_APP_NAME: &str = "Window";

/// Shared, read-only view of the ids currently hidden.
#[derive(Debug, Clone, Default)]
pub struct HiddenSet(Rc<RefCell<HashSet<WindowId>>>);

impl HiddenSet {
    pub fn contains(&self, id: WindowId) -> bool {
        self.0.borrow().contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    fn insert(&self, id: WindowId) {
        self.0.borrow_mut().insert(id);
    }

    fn remove(&self, id: WindowId) {
        self.0.borrow_mut().remove(&id);
    }

    fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Public snapshot of one hidden window.
#[derive(Debug, Clone)]
pub struct HiddenWindow<W> {
    pub window: W,
    pub app_name: String,
    pub title: String,
}

/// Result of a successful call to [`HiddenRegistry::hide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideOutcome {
    /// The window was minimized and is now tracked.
    Hidden,
    /// The window type is on the denylist; nothing happened.
    Skipped(WindowType),
}

/// Identifies one hide of one window.
///
/// Signal events carry the token of the record that subscribed, so an
/// event queued before a release cannot act on a later hide of the
/// same window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HideToken {
    pub window: WindowId,
    pub generation: u64,
}

struct HideRecord<W> {
    window: W,
    generation: u64,
    app_name: String,
    title: String,
    on_unmanaged: Option<Subscription>,
    on_unminimized: Option<Subscription>,
}

impl<W: Window> HideRecord<W> {
    fn id(&self) -> WindowId {
        self.window.id()
    }

    fn snapshot(&self) -> HiddenWindow<W> {
        HiddenWindow {
            window: self.window.clone(),
            app_name: self.app_name.clone(),
            title: self.title.clone(),
        }
    }

    /// Disconnects both handlers and returns the public view.
    fn release(mut self) -> HiddenWindow<W> {
        for sub in [self.on_unmanaged.take(), self.on_unminimized.take()]
            .into_iter()
            .flatten()
        {
            sub.release();
        }
        self.into_snapshot()
    }

    /// Drops both handlers without disconnecting; the window is gone.
    fn forget(mut self) -> HiddenWindow<W> {
        for sub in [self.on_unmanaged.take(), self.on_unminimized.take()]
            .into_iter()
            .flatten()
        {
            sub.forget();
        }
        self.into_snapshot()
    }

    fn into_snapshot(self) -> HiddenWindow<W> {
        HiddenWindow {
            window: self.window,
            app_name: self.app_name,
            title: self.title,
        }
    }
}

/// Ordered collection of hidden windows.
pub struct HiddenRegistry<W> {
    records: Vec<HideRecord<W>>,
    hidden: HiddenSet,
    next_generation: u64,
}

impl<W: Window> HiddenRegistry<W> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            hidden: HiddenSet::default(),
            next_generation: 1,
        }
    }

    /// Minimizes `window` and starts tracking it.
    ///
    /// `resolve_app` supplies the application name; when it returns
    /// `None` the window class is used, then [`FALLBACK_APP_NAME`].
    /// Unmanage and unminimize notifications are routed into `sink`.
    pub fn hide(
        &mut self,
        window: W,
        resolve_app: impl FnOnce(&W) -> Option<String>,
        sink: &EventSink,
    ) -> Result<HideOutcome, RegistryError> {
        let id = window.id();
        let kind = window.window_type();
        if kind.is_excluded() {
            debug!(event = "core.registry.hide_skipped", window = %id, kind = ?kind);
            return Ok(HideOutcome::Skipped(kind));
        }
        if self.hidden.contains(id) {
            return Err(RegistryError::AlreadyHidden(id));
        }

        let app_name = app_name_for(&window, resolve_app);
        let title = window.title().unwrap_or_else(|e| {
            warn!(event = "core.registry.title_failed", window = %id, error = %e);
            String::new()
        });

        if let Err(e) = window.minimize() {
            warn!(event = "core.registry.minimize_failed", window = %id, error = %e);
        }

        let generation = self.next_generation;
        self.next_generation += 1;
        let token = HideToken { window: id, generation };
        let on_unmanaged = subscribe(
            &window,
            WindowSignal::Unmanaged,
            sink.handler(Event::Unmanaged(token)),
        );
        let on_unminimized = subscribe(
            &window,
            WindowSignal::Unminimized,
            sink.handler(Event::Unminimized(token)),
        );

        info!(event = "core.registry.hidden", window = %id, app = %app_name);
        self.hidden.insert(id);
        self.records.push(HideRecord {
            window,
            generation,
            app_name,
            title,
            on_unmanaged,
            on_unminimized,
        });
        Ok(HideOutcome::Hidden)
    }

    /// Stops tracking `id`, then unminimizes and focuses the window.
    pub fn restore(&mut self, id: WindowId, timestamp: u32) -> Result<HiddenWindow<W>, RegistryError> {
        let record = self.take(id).ok_or(RegistryError::NotFound(id))?;
        let restored = record.release();

        // Activation only sticks once the window is back on screen.
        if let Err(e) = restored.window.unminimize() {
            warn!(event = "core.registry.unminimize_failed", window = %id, error = %e);
        }
        if let Err(e) = restored.window.activate(timestamp) {
            warn!(event = "core.registry.activate_failed", window = %id, error = %e);
        }

        info!(event = "core.registry.released", window = %id, app = %restored.app_name);
        Ok(restored)
    }

    /// Restores every hidden window. Returns how many were restored.
    pub fn restore_all(&mut self, timestamp: u32) -> usize {
        let ids: Vec<WindowId> = self.records.iter().map(HideRecord::id).collect();
        ids.into_iter()
            .filter(|&id| self.restore(id, timestamp).is_ok())
            .count()
    }

    /// Drops the record of a window that destroyed itself.
    ///
    /// No window calls are made. Returns `None` for untracked windows.
    pub fn on_external_destroy(&mut self, id: WindowId) -> Option<HiddenWindow<W>> {
        let record = self.take(id)?;
        info!(event = "core.registry.destroyed", window = %id, app = %record.app_name);
        Some(record.forget())
    }

    /// Drops the record of a window that was unminimized by someone else.
    pub fn on_external_unminimize(&mut self, id: WindowId) -> Option<HiddenWindow<W>> {
        let record = self.take(id)?;
        info!(event = "core.registry.shown_externally", window = %id, app = %record.app_name);
        Some(record.release())
    }

    /// Stops tracking `id` and asks the window to close.
    pub fn close(&mut self, id: WindowId, timestamp: u32) -> Result<HiddenWindow<W>, RegistryError> {
        let record = self.take(id).ok_or(RegistryError::NotFound(id))?;
        let closed = record.release();
        if let Err(e) = closed.window.close(timestamp) {
            warn!(event = "core.registry.close_failed", window = %id, error = %e);
        }
        info!(event = "core.registry.closed", window = %id, app = %closed.app_name);
        Ok(closed)
    }

    /// Disconnects and drops every remaining record without touching windows.
    pub fn clear(&mut self) {
        for record in self.records.drain(..) {
            record.release();
        }
        self.hidden.clear();
    }

    /// Returns the hidden windows in hide order.
    pub fn query(&self) -> Vec<HiddenWindow<W>> {
        self.records.iter().map(HideRecord::snapshot).collect()
    }

    /// Returns a snapshot of one hidden window.
    pub fn get(&self, id: WindowId) -> Option<HiddenWindow<W>> {
        self.records.iter().find(|r| r.id() == id).map(HideRecord::snapshot)
    }

    /// Returns the window handle for a hidden id.
    pub fn window(&self, id: WindowId) -> Option<&W> {
        self.records.iter().find(|r| r.id() == id).map(|r| &r.window)
    }

    /// Returns whether `token` belongs to the record currently tracking its window.
    pub fn is_current(&self, token: HideToken) -> bool {
        self.records
            .iter()
            .any(|r| r.id() == token.window && r.generation == token.generation)
    }

    pub fn is_hidden(&self, id: WindowId) -> bool {
        self.hidden.contains(id)
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the membership view shared with the switcher filter.
    pub fn hidden_set(&self) -> HiddenSet {
        self.hidden.clone()
    }

    /// Removes a record by identity, keeping the order of the rest.
    fn take(&mut self, id: WindowId) -> Option<HideRecord<W>> {
        let pos = self.records.iter().position(|r| r.id() == id)?;
        self.hidden.remove(id);
        Some(self.records.remove(pos))
    }
}

impl<W: Window> Default for HiddenRegistry<W> {
    fn default() -> Self {
        Self::new()
    }
}

fn app_name_for<W: Window>(window: &W, resolve_app: impl FnOnce(&W) -> Option<String>) -> String {
    resolve_app(window)
        .filter(|name| !name.is_empty())
        .or_else(|| window.class().ok().filter(|class| !class.is_empty()))
        .unwrap_or_else(|| FALLBACK_APP_NAME.to_string())
}

fn subscribe<W: Window>(window: &W, signal: WindowSignal, handler: Box<dyn Fn()>) -> Option<Subscription> {
    match window.subscribe(signal, handler) {
        Ok(sub) => Some(sub),
        Err(e) => {
            warn!(
                event = "core.registry.subscribe_failed",
                window = %window.id(),
                signal = ?signal,
                error = %e
            );
            None
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
