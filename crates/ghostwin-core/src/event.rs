use std::sync::mpsc::Sender;

use tracing::debug;

use crate::{Action, WindowId};
use crate::registry::HideToken;

/// A notification queued for the dispatch thread.
///
/// Signal handlers never touch the registry directly; they push one of
/// these and [`GhostWindow::dispatch_pending`](crate::GhostWindow::dispatch_pending)
/// applies it once the current operation has returned.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keybinding fired.
    Action(Action),

    /// A tracked window was destroyed or unmanaged.
    Unmanaged(HideToken),

    /// A tracked window left the minimized state outside the registry.
    Unminimized(HideToken),

    /// The window manager reports that a window wants attention.
    DemandsAttention(WindowId),
}

impl Event {
    /// Returns the window this event refers to, if any.
    pub fn window(&self) -> Option<WindowId> {
        match self {
            Self::Action(Action::Release(id) | Action::Close(id)) => Some(*id),
            Self::Action(_) => None,
            Self::Unmanaged(token) | Self::Unminimized(token) => Some(token.window),
            Self::DemandsAttention(id) => Some(*id),
        }
    }
}

/// Cloneable sending half of the event queue.
#[derive(Debug, Clone)]
pub struct EventSink {
    sender: Sender<Event>,
}

impl EventSink {
    pub fn new(sender: Sender<Event>) -> Self {
        Self { sender }
    }

    /// Queues an event. Events sent after the coordinator is gone are dropped.
    pub fn send(&self, event: Event) {
        if let Err(e) = self.sender.send(event) {
            debug!(event = "core.event.dropped", dropped = ?e.0);
        }
    }

    /// Returns a boxed handler that queues `event` each time it runs.
    pub fn handler(&self, event: Event) -> Box<dyn Fn()> {
        let sink = self.clone();
        Box::new(move || sink.send(event.clone()))
    }
}
