//! The presentation side: indicator, menu and notifications.
//!
//! Widgets belong to the host. The coordinator only pushes counts and
//! messages through [`Presenter`]; [`MenuModel`] is the plain data a
//! host renders its dropdown from.

use crate::registry::HiddenWindow;
use crate::window::{Window, WindowId};

/// Host-side indicator and menu.
pub trait Presenter {
    /// Puts the indicator on screen.
    fn attach(&mut self);

    /// Removes the indicator and its menu.
    fn detach(&mut self);

    /// Called on every change in the number of hidden windows.
    fn update_badge(&mut self, count: usize);

    /// Shows a transient confirmation.
    fn notify(&mut self, title: &str, body: &str);

    fn toggle_menu(&mut self);

    fn close_menu(&mut self);
}

/// Text shown in the indicator badge. `None` hides the badge.
pub fn badge_text(count: usize) -> Option<String> {
    (count > 0).then(|| count.to_string())
}

/// One row of the hidden-window menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    pub id: WindowId,
    pub app_name: String,
    /// Window title with the trailing app name removed.
    pub title: Option<String>,
}

/// Contents of the hidden-window dropdown.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuModel {
    pub subtitle: String,
    pub entries: Vec<MenuEntry>,
    /// Shown instead of entries when nothing is hidden.
    pub empty_hint: String,
    pub shortcut_hint: String,
}

impl MenuModel {
    /// Builds the menu for the given hidden windows and shortcut labels.
    pub fn build<W: Window>(hidden: &[HiddenWindow<W>], hide_key: &str, restore_key: &str) -> Self {
        Self {
            subtitle: subtitle(hidden.len()),
            entries: hidden
                .iter()
                .map(|h| MenuEntry {
                    id: h.window.id(),
                    app_name: h.app_name.clone(),
                    title: display_title(&h.title, &h.app_name),
                })
                .collect(),
            empty_hint: empty_hint(hide_key),
            shortcut_hint: shortcut_hint(hide_key, restore_key),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Line shown in place of entries when nothing is hidden.
pub fn empty_hint(hide_key: &str) -> String {
    format!("Press {hide_key} to hide a window")
}

/// Footer line naming both shortcuts.
pub fn shortcut_hint(hide_key: &str, restore_key: &str) -> String {
    format!("{hide_key}  hide   ·   {restore_key}  release")
}

fn subtitle(count: usize) -> String {
    match count {
        0 => "No hidden windows".to_string(),
        1 => "1 hidden window".to_string(),
        n => format!("{n} hidden windows"),
    }
}

/// Strips a trailing ` — App` or ` - App` suffix from a window title.
pub fn display_title(title: &str, app_name: &str) -> Option<String> {
    let stripped = title
        .replace(&format!(" — {app_name}"), "")
        .replace(&format!(" - {app_name}"), "");
    let trimmed = stripped.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
