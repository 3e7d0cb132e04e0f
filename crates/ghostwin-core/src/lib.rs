pub mod action;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod ghost;
pub mod ipc;
pub mod log;
pub mod presenter;
pub mod registry;
pub mod shell;
pub mod subscription;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod window;

pub use action::Action;
pub use config::{Accelerator, Config};
pub use error::{ConfigError, RegistryError, WindowError, WindowResult};
pub use event::{Event, EventSink};
pub use filter::SwitcherFilter;
pub use ghost::GhostWindow;
pub use ipc::{Command, Response};
pub use presenter::{MenuModel, Presenter};
pub use registry::{HiddenRegistry, HiddenSet, HiddenWindow, HideOutcome, HideToken};
pub use shell::{Shell, TabListHook, TabListKind, WorkspaceId};
pub use subscription::Subscription;
pub use window::{Window, WindowId, WindowSignal, WindowType};
