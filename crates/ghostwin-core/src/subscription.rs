//! Owned notification handles.
//!
//! A [`Subscription`] wraps the disconnect call for a signal handler.
//! It is released exactly once: explicitly through [`Subscription::release`],
//! implicitly on drop, or never when [`Subscription::forget`] is used
//! because the signal source has already been destroyed.

use std::fmt;

use tracing::{debug, warn};

use crate::WindowResult;

type ReleaseFn = Box<dyn FnOnce() -> WindowResult<()>>;

pub struct Subscription {
    label: &'static str,
    release: Option<ReleaseFn>,
}

impl Subscription {
    /// Creates a subscription that runs `release` to disconnect.
    pub fn new(label: &'static str, release: impl FnOnce() -> WindowResult<()> + 'static) -> Self {
        Self {
            label,
            release: Some(Box::new(release)),
        }
    }

    /// Returns the label given at creation, used in log lines.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Disconnects the handler now. Failures are logged, not returned.
    pub fn release(mut self) {
        self.disconnect();
    }

    /// Drops the handle without disconnecting.
    ///
    /// Used when the source is gone and the disconnect would touch a
    /// destroyed object.
    pub fn forget(mut self) {
        if self.release.take().is_some() {
            debug!(event = "core.subscription.forgotten", label = self.label);
        }
    }

    fn disconnect(&mut self) {
        let Some(release) = self.release.take() else {
            return;
        };
        if let Err(e) = release() {
            warn!(
                event = "core.subscription.release_failed",
                label = self.label,
                error = %e
            );
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("label", &self.label)
            .field("connected", &self.release.is_some())
            .finish()
    }
}
