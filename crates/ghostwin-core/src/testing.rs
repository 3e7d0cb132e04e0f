//! In-memory shell, window and presenter doubles.
//!
//! These stand in for the desktop environment so the registry, filter
//! and coordinator can be exercised without a running window manager.
//! Signals fire synchronously, the way a real compositor delivers them
//! on its dispatch thread.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::{WindowError, WindowResult};
use crate::config::Accelerator;
use crate::presenter::Presenter;
use crate::shell::{Shell, TabListHook, TabListKind};
use crate::subscription::Subscription;
use crate::window::{Window, WindowId, WindowSignal, WindowType};

type Handlers = RefCell<Vec<(u64, WindowSignal, Rc<dyn Fn()>)>>;

struct WindowState {
    id: WindowId,
    kind: WindowType,
    title: RefCell<String>,
    class: RefCell<String>,
    minimized: Cell<bool>,
    activated_at: Cell<Option<u32>>,
    closed: Cell<bool>,
    failing: Cell<bool>,
    calls: RefCell<Vec<&'static str>>,
    handlers: Handlers,
    next_handler: Cell<u64>,
}

/// A scripted window.
#[derive(Clone)]
pub struct FakeWindow {
    state: Rc<WindowState>,
}

impl FakeWindow {
    /// Creates a normal, unminimized window.
    pub fn new(id: u64) -> Self {
        Self::with_type(id, WindowType::Normal)
    }

    pub fn with_type(id: u64, kind: WindowType) -> Self {
        Self {
            state: Rc::new(WindowState {
                id: WindowId(id),
                kind,
                title: RefCell::new(String::new()),
                class: RefCell::new(String::new()),
                minimized: Cell::new(false),
                activated_at: Cell::new(None),
                closed: Cell::new(false),
                failing: Cell::new(false),
                calls: RefCell::new(Vec::new()),
                handlers: RefCell::new(Vec::new()),
                next_handler: Cell::new(1),
            }),
        }
    }

    pub fn titled(self, title: &str) -> Self {
        *self.state.title.borrow_mut() = title.to_string();
        self
    }

    pub fn classed(self, class: &str) -> Self {
        *self.state.class.borrow_mut() = class.to_string();
        self
    }

    /// Makes every window call fail as if the window had vanished.
    pub fn set_failing(&self, failing: bool) {
        self.state.failing.set(failing);
    }

    pub fn is_minimized(&self) -> bool {
        self.state.minimized.get()
    }

    pub fn activated_at(&self) -> Option<u32> {
        self.state.activated_at.get()
    }

    pub fn is_closed(&self) -> bool {
        self.state.closed.get()
    }

    /// Names of the window operations called so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.state.calls.borrow().clone()
    }

    /// Number of connected handlers for `signal`.
    pub fn handler_count(&self, signal: WindowSignal) -> usize {
        self.state
            .handlers
            .borrow()
            .iter()
            .filter(|(_, s, _)| *s == signal)
            .count()
    }

    /// Fires `signal`, running every connected handler.
    pub fn emit(&self, signal: WindowSignal) {
        let handlers: Vec<Rc<dyn Fn()>> = self
            .state
            .handlers
            .borrow()
            .iter()
            .filter(|(_, s, _)| *s == signal)
            .map(|(_, _, h)| Rc::clone(h))
            .collect();
        for handler in handlers {
            handler();
        }
    }

    /// Unminimizes the window the way another program would.
    pub fn unminimize_externally(&self) {
        self.state.minimized.set(false);
        self.emit(WindowSignal::Unminimized);
    }

    /// Destroys the window, firing its unmanaged signal.
    pub fn destroy(&self) {
        self.state.closed.set(true);
        self.emit(WindowSignal::Unmanaged);
    }

    fn record(&self, call: &'static str) -> WindowResult<()> {
        self.state.calls.borrow_mut().push(call);
        if self.state.failing.get() {
            return Err(WindowError::Gone(self.state.id));
        }
        Ok(())
    }
}

impl fmt::Debug for FakeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeWindow")
            .field("id", &self.state.id)
            .field("kind", &self.state.kind)
            .field("minimized", &self.state.minimized.get())
            .finish()
    }
}

impl Window for FakeWindow {
    fn id(&self) -> WindowId {
        self.state.id
    }

    fn window_type(&self) -> WindowType {
        self.state.kind
    }

    fn title(&self) -> WindowResult<String> {
        self.record("title")?;
        Ok(self.state.title.borrow().clone())
    }

    fn class(&self) -> WindowResult<String> {
        self.record("class")?;
        Ok(self.state.class.borrow().clone())
    }

    fn minimize(&self) -> WindowResult<()> {
        self.record("minimize")?;
        self.state.minimized.set(true);
        Ok(())
    }

    fn unminimize(&self) -> WindowResult<()> {
        self.record("unminimize")?;
        let was_minimized = self.state.minimized.replace(false);
        if was_minimized {
            self.emit(WindowSignal::Unminimized);
        }
        Ok(())
    }

    fn activate(&self, timestamp: u32) -> WindowResult<()> {
        self.record("activate")?;
        self.state.activated_at.set(Some(timestamp));
        Ok(())
    }

    fn close(&self, _timestamp: u32) -> WindowResult<()> {
        self.record("close")?;
        self.destroy();
        Ok(())
    }

    fn subscribe(
        &self,
        signal: WindowSignal,
        handler: Box<dyn Fn()>,
    ) -> WindowResult<Subscription> {
        self.record("subscribe")?;
        let handler_id = self.state.next_handler.get();
        self.state.next_handler.set(handler_id + 1);
        self.state
            .handlers
            .borrow_mut()
            .push((handler_id, signal, Rc::from(handler)));

        let weak: Weak<WindowState> = Rc::downgrade(&self.state);
        let id = self.state.id;
        Ok(Subscription::new("window-signal", move || {
            let state = weak.upgrade().ok_or(WindowError::Gone(id))?;
            state.calls.borrow_mut().push("disconnect");
            if state.failing.get() {
                return Err(WindowError::Gone(id));
            }
            state.handlers.borrow_mut().retain(|(h, _, _)| *h != handler_id);
            Ok(())
        }))
    }
}

type AttentionHandlers = RefCell<Vec<(u64, Rc<dyn Fn(WindowId)>)>>;

struct ShellState {
    windows: RefCell<Vec<FakeWindow>>,
    attention: AttentionHandlers,
    next_handler: Cell<u64>,
}

/// A scripted desktop shell.
///
/// Its original tab-list function returns every window added with
/// [`FakeShell::add_window`] that has not been destroyed.
pub struct FakeShell {
    state: Rc<ShellState>,
    tab_list: TabListHook<FakeWindow>,
    focus: RefCell<Option<FakeWindow>>,
    time: Cell<u32>,
    apps: RefCell<HashMap<WindowId, String>>,
    keybindings: RefCell<Vec<(String, Accelerator, Rc<dyn Fn()>)>>,
    failing_keybindings: RefCell<HashSet<String>>,
}

impl FakeShell {
    pub fn new() -> Self {
        let state = Rc::new(ShellState {
            windows: RefCell::new(Vec::new()),
            attention: RefCell::new(Vec::new()),
            next_handler: Cell::new(1),
        });
        let listed = Rc::clone(&state);
        let tab_list = TabListHook::new(move |_kind, _workspace| {
            listed
                .windows
                .borrow()
                .iter()
                .filter(|w| !w.is_closed())
                .cloned()
                .collect()
        });
        Self {
            state,
            tab_list,
            focus: RefCell::new(None),
            time: Cell::new(1000),
            apps: RefCell::new(HashMap::new()),
            keybindings: RefCell::new(Vec::new()),
            failing_keybindings: RefCell::new(HashSet::new()),
        }
    }

    /// Adds a window to the shell and returns it.
    pub fn add_window(&self, window: FakeWindow) -> FakeWindow {
        self.state.windows.borrow_mut().push(window.clone());
        window
    }

    pub fn set_focus(&self, window: Option<&FakeWindow>) {
        *self.focus.borrow_mut() = window.cloned();
    }

    pub fn set_time(&self, time: u32) {
        self.time.set(time);
    }

    pub fn set_app_name(&self, window: &FakeWindow, name: &str) {
        self.apps.borrow_mut().insert(window.id(), name.to_string());
    }

    /// Makes registration of keybinding `name` fail.
    pub fn fail_keybinding(&self, name: &str) {
        self.failing_keybindings.borrow_mut().insert(name.to_string());
    }

    /// Fires the global demands-attention signal for `window`.
    pub fn demand_attention(&self, window: &FakeWindow) {
        let handlers: Vec<Rc<dyn Fn(WindowId)>> = self
            .state
            .attention
            .borrow()
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in handlers {
            handler(window.id());
        }
    }

    /// Triggers keybinding `name`. Returns `false` if it is not bound.
    pub fn press(&self, name: &str) -> bool {
        let handler = self
            .keybindings
            .borrow()
            .iter()
            .find(|(n, _, _)| n == name)
            .map(|(_, _, h)| Rc::clone(h));
        match handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    /// Names and accelerators of the bound keybindings.
    pub fn keybindings(&self) -> Vec<(String, Accelerator)> {
        self.keybindings
            .borrow()
            .iter()
            .map(|(n, a, _)| (n.clone(), a.clone()))
            .collect()
    }

    pub fn attention_handler_count(&self) -> usize {
        self.state.attention.borrow().len()
    }

    /// Ids the switcher would show for a normal Alt+Tab query.
    pub fn switcher_ids(&self) -> Vec<WindowId> {
        self.tab_list
            .query(TabListKind::Normal, None)
            .iter()
            .map(|w| w.id())
            .collect()
    }
}

impl Default for FakeShell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell for FakeShell {
    type Window = FakeWindow;

    fn focus_window(&self) -> Option<FakeWindow> {
        self.focus.borrow().clone()
    }

    fn current_time(&self) -> u32 {
        self.time.get()
    }

    fn tab_list(&self) -> &TabListHook<FakeWindow> {
        &self.tab_list
    }

    fn app_name(&self, window: &FakeWindow) -> Option<String> {
        self.apps.borrow().get(&window.id()).cloned()
    }

    fn on_demands_attention(&self, handler: Box<dyn Fn(WindowId)>) -> WindowResult<Subscription> {
        let handler_id = self.state.next_handler.get();
        self.state.next_handler.set(handler_id + 1);
        self.state
            .attention
            .borrow_mut()
            .push((handler_id, Rc::from(handler)));

        let weak = Rc::downgrade(&self.state);
        Ok(Subscription::new("demands-attention", move || {
            if let Some(state) = weak.upgrade() {
                state.attention.borrow_mut().retain(|(h, _)| *h != handler_id);
            }
            Ok(())
        }))
    }

    fn add_keybinding(
        &self,
        name: &str,
        accelerator: &Accelerator,
        handler: Box<dyn Fn()>,
    ) -> WindowResult<()> {
        if self.failing_keybindings.borrow().contains(name) {
            return Err(WindowError::failed("add_keybinding", format!("{name} is taken")));
        }
        self.keybindings
            .borrow_mut()
            .push((name.to_string(), accelerator.clone(), Rc::from(handler)));
        Ok(())
    }

    fn remove_keybinding(&self, name: &str) -> WindowResult<()> {
        let mut bindings = self.keybindings.borrow_mut();
        let before = bindings.len();
        bindings.retain(|(n, _, _)| n != name);
        if bindings.len() == before {
            return Err(WindowError::failed("remove_keybinding", format!("{name} is not bound")));
        }
        Ok(())
    }
}

/// Everything a [`FakePresenter`] has been told.
#[derive(Debug, Default, Clone)]
pub struct PresenterLog {
    pub attached: bool,
    pub badges: Vec<usize>,
    pub notifications: Vec<(String, String)>,
    pub menu_open: bool,
}

/// A presenter that records calls. Clones share the same log.
#[derive(Debug, Default, Clone)]
pub struct FakePresenter {
    log: Rc<RefCell<PresenterLog>>,
}

impl FakePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> PresenterLog {
        self.log.borrow().clone()
    }

    pub fn last_badge(&self) -> Option<usize> {
        self.log.borrow().badges.last().copied()
    }
}

impl Presenter for FakePresenter {
    fn attach(&mut self) {
        self.log.borrow_mut().attached = true;
    }

    fn detach(&mut self) {
        let mut log = self.log.borrow_mut();
        log.attached = false;
        log.menu_open = false;
    }

    fn update_badge(&mut self, count: usize) {
        self.log.borrow_mut().badges.push(count);
    }

    fn notify(&mut self, title: &str, body: &str) {
        self.log
            .borrow_mut()
            .notifications
            .push((title.to_string(), body.to_string()));
    }

    fn toggle_menu(&mut self) {
        let mut log = self.log.borrow_mut();
        log.menu_open = !log.menu_open;
    }

    fn close_menu(&mut self) {
        self.log.borrow_mut().menu_open = false;
    }
}
