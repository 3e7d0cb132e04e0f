//! The lifecycle coordinator.
//!
//! [`GhostWindow`] ties the registry, the switcher filter, keybindings
//! and the presenter together. Environment notifications arrive through
//! the event queue and are applied by [`GhostWindow::dispatch_pending`],
//! so no handler ever runs while the registry is mid-operation.

use std::sync::mpsc::{self, Receiver};

use tracing::{debug, error, info, warn};

use crate::action::Action;
use crate::config::{Accelerator, ShortcutConfig};
use crate::error::RegistryError;
use crate::event::{Event, EventSink};
use crate::filter::SwitcherFilter;
use crate::ipc::{Command, HiddenWindowInfo, Response};
use crate::presenter::{MenuModel, Presenter};
use crate::registry::{HiddenRegistry, HiddenWindow, HideOutcome};
use crate::shell::Shell;
use crate::subscription::Subscription;
use crate::window::{Window, WindowId};

/// Keybinding name for hiding the focused window.
pub const HIDE_KEYBINDING: &str = "hide-shortcut";
/// Keybinding name for opening the hidden-window menu.
pub const RESTORE_KEYBINDING: &str = "restore-shortcut";

pub struct GhostWindow<S: Shell, P: Presenter> {
    shell: S,
    presenter: P,
    hide_key: Accelerator,
    restore_key: Accelerator,
    registry: HiddenRegistry<S::Window>,
    filter: SwitcherFilter<S::Window>,
    attention: Option<Subscription>,
    keybindings: Vec<&'static str>,
    sink: EventSink,
    events: Receiver<Event>,
    enabled: bool,
    attached: bool,
}

impl<S: Shell, P: Presenter> GhostWindow<S, P> {
    /// Creates a disabled coordinator. Call [`GhostWindow::enable`] to start.
    pub fn new(shell: S, presenter: P, shortcuts: &ShortcutConfig) -> Self {
        let (tx, events) = mpsc::channel();
        Self {
            shell,
            presenter,
            hide_key: shortcuts.hide_accelerator(),
            restore_key: shortcuts.restore_accelerator(),
            registry: HiddenRegistry::new(),
            filter: SwitcherFilter::new(),
            attention: None,
            keybindings: Vec::new(),
            sink: EventSink::new(tx),
            events,
            enabled: false,
            attached: false,
        }
    }

    /// Attaches the presenter, binds keys and patches the switcher.
    ///
    /// Keybinding failures are logged and the rest of enable proceeds.
    /// Calling this while enabled does nothing.
    pub fn enable(&mut self) {
        if self.enabled {
            debug!(event = "core.ghost.enable_skipped", reason = "already enabled");
            return;
        }

        self.presenter.attach();
        self.attached = true;
        self.bind_keys();

        self.filter
            .install(self.shell.tab_list(), self.registry.hidden_set());

        let sink = self.sink.clone();
        match self
            .shell
            .on_demands_attention(Box::new(move |id| sink.send(Event::DemandsAttention(id))))
        {
            Ok(sub) => self.attention = Some(sub),
            Err(e) => warn!(event = "core.ghost.attention_subscribe_failed", error = %e),
        }

        self.enabled = true;
        info!(
            event = "core.ghost.enabled",
            hide = %self.hide_key,
            restore = %self.restore_key,
            keybindings = self.keybindings.len()
        );
    }

    /// Reverts everything [`GhostWindow::enable`] did and restores every
    /// hidden window.
    ///
    /// Safe to call when not enabled. Windows hidden without enabling
    /// are still restored.
    pub fn disable(&mut self) {
        if !self.enabled && self.registry.is_empty() {
            return;
        }

        if self.enabled {
            self.unbind_keys();
            self.filter.uninstall(self.shell.tab_list());
            if let Some(sub) = self.attention.take() {
                sub.release();
            }

            self.presenter.close_menu();
            self.presenter.detach();
            self.attached = false;
        }

        let restored = self.registry.restore_all(self.shell.current_time());
        self.registry.clear();

        // Anything still queued refers to windows we no longer track.
        let dropped = self.events.try_iter().count();

        self.enabled = false;
        info!(event = "core.ghost.disabled", restored, dropped);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Applies every queued event. Returns how many were handled.
    pub fn dispatch_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    pub fn handle_event(&mut self, event: Event) {
        debug!(event = "core.ghost.event", received = ?event);
        match event {
            Event::Action(action) => self.handle_action(action),
            Event::Unmanaged(token) => {
                if !self.registry.is_current(token) {
                    debug!(event = "core.ghost.stale_event", window = %token.window);
                } else if self.registry.on_external_destroy(token.window).is_some() {
                    self.badge_changed();
                }
            }
            Event::Unminimized(token) => {
                if !self.registry.is_current(token) {
                    debug!(event = "core.ghost.stale_event", window = %token.window);
                } else if self.registry.on_external_unminimize(token.window).is_some() {
                    self.badge_changed();
                }
            }
            Event::DemandsAttention(id) => self.keep_minimized(id),
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::HideFocused => {
                self.hide_focused();
            }
            Action::ToggleMenu => self.toggle_menu(),
            Action::Release(id) => {
                if let Err(e) = self.release(id) {
                    debug!(event = "core.ghost.release_skipped", reason = %e);
                }
            }
            Action::ReleaseAll => {
                self.release_all();
            }
            Action::Close(id) => {
                if let Err(e) = self.close(id) {
                    debug!(event = "core.ghost.close_skipped", reason = %e);
                }
            }
            Action::Disable => self.disable(),
        }
    }

    /// Hides the focused window. Returns whether a window was hidden.
    pub fn hide_focused(&mut self) -> bool {
        let Some(window) = self.shell.focus_window() else {
            debug!(event = "core.ghost.hide_skipped", reason = "no focused window");
            return false;
        };
        self.hide(window)
    }

    /// Hides `window`. Returns whether it is newly hidden.
    pub fn hide(&mut self, window: S::Window) -> bool {
        let id = window.id();
        let shell = &self.shell;
        match self.registry.hide(window, |w| shell.app_name(w), &self.sink) {
            Ok(HideOutcome::Hidden) => {
                self.badge_changed();
                self.notify_hidden(id);
                true
            }
            Ok(HideOutcome::Skipped(_)) => false,
            Err(e) => {
                debug!(event = "core.ghost.hide_skipped", reason = %e);
                false
            }
        }
    }

    /// Restores one hidden window and gives it focus.
    pub fn release(&mut self, id: WindowId) -> Result<HiddenWindow<S::Window>, RegistryError> {
        let restored = self.registry.restore(id, self.shell.current_time())?;
        self.badge_changed();
        Ok(restored)
    }

    /// Restores every hidden window. Returns how many were restored.
    pub fn release_all(&mut self) -> usize {
        let restored = self.registry.restore_all(self.shell.current_time());
        if restored > 0 {
            self.badge_changed();
        }
        restored
    }

    /// Closes a hidden window.
    pub fn close(&mut self, id: WindowId) -> Result<HiddenWindow<S::Window>, RegistryError> {
        let closed = self.registry.close(id, self.shell.current_time())?;
        self.badge_changed();
        Ok(closed)
    }

    pub fn toggle_menu(&mut self) {
        if self.attached {
            self.presenter.toggle_menu();
        }
    }

    /// Builds the current menu contents.
    pub fn menu(&self) -> MenuModel {
        MenuModel::build(
            &self.registry.query(),
            &self.hide_key.to_string(),
            &self.restore_key.to_string(),
        )
    }

    /// Hidden windows in hide order.
    pub fn hidden_windows(&self) -> Vec<HiddenWindow<S::Window>> {
        self.registry.query()
    }

    pub fn hidden_count(&self) -> usize {
        self.registry.count()
    }

    pub fn is_hidden(&self, id: WindowId) -> bool {
        self.registry.is_hidden(id)
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Runs a command from another process and describes the outcome.
    pub fn handle_command(&mut self, command: Command) -> Response {
        info!(event = "core.ghost.command", command = ?command);
        match command {
            Command::Hide => {
                if self.hide_focused() {
                    Response::ok_with_message("hidden")
                } else {
                    Response::error("no hideable window has focus")
                }
            }
            Command::Release { id } => match self.release(id) {
                Ok(w) => Response::ok_with_message(format!("released {}", w.app_name)),
                Err(e) => Response::error(e.to_string()),
            },
            Command::ReleaseAll => {
                let restored = self.release_all();
                Response::ok_with_message(format!("released {restored} window(s)"))
            }
            Command::Close { id } => match self.close(id) {
                Ok(w) => Response::ok_with_message(format!("closed {}", w.app_name)),
                Err(e) => Response::error(e.to_string()),
            },
            Command::List => Response::with_windows(
                self.registry
                    .query()
                    .into_iter()
                    .map(|h| HiddenWindowInfo {
                        id: h.window.id(),
                        app_name: h.app_name,
                        title: h.title,
                    })
                    .collect(),
            ),
            Command::Status => {
                let state = if self.enabled { "enabled" } else { "disabled" };
                Response::ok_with_message(format!("{state}, {} hidden", self.registry.count()))
            }
        }
    }

    fn bind_keys(&mut self) {
        let bindings = [
            (HIDE_KEYBINDING, self.hide_key.clone(), Action::HideFocused),
            (RESTORE_KEYBINDING, self.restore_key.clone(), Action::ToggleMenu),
        ];
        for (name, accelerator, action) in bindings {
            let handler = self.sink.handler(Event::Action(action));
            match self.shell.add_keybinding(name, &accelerator, handler) {
                Ok(()) => {
                    info!(event = "core.ghost.keybinding_added", name, accelerator = %accelerator);
                    self.keybindings.push(name);
                }
                Err(e) => {
                    error!(event = "core.ghost.keybinding_failed", name, error = %e);
                }
            }
        }
    }

    fn unbind_keys(&mut self) {
        for name in self.keybindings.drain(..) {
            if let Err(e) = self.shell.remove_keybinding(name) {
                warn!(event = "core.ghost.keybinding_remove_failed", name, error = %e);
            }
        }
    }

    /// Pushes a hidden window back down when it asks for attention.
    fn keep_minimized(&self, id: WindowId) {
        let Some(window) = self.registry.window(id) else {
            return;
        };
        debug!(event = "core.ghost.attention_suppressed", window = %id);
        if let Err(e) = window.minimize() {
            warn!(event = "core.ghost.reminimize_failed", window = %id, error = %e);
        }
    }

    fn badge_changed(&mut self) {
        if self.attached {
            self.presenter.update_badge(self.registry.count());
        }
    }

    fn notify_hidden(&mut self, id: WindowId) {
        if !self.attached {
            return;
        }
        let Some(hidden) = self.registry.get(id) else {
            return;
        };
        let title = format!("👻 {}", hidden.app_name);
        let body = format!("Hidden. {} to release", self.restore_key);
        self.presenter.notify(&title, &body);
    }
}

impl<S: Shell, P: Presenter> Drop for GhostWindow<S, P> {
    fn drop(&mut self) {
        self.disable();
    }
}

#[cfg(test)]
#[path = "ghost_tests.rs"]
mod tests;
