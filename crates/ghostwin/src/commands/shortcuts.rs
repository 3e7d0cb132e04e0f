use ghostwin_core::Config;
use ghostwin_core::ghost::{HIDE_KEYBINDING, RESTORE_KEYBINDING};
use ghostwin_core::presenter;

/// Prints the effective accelerators and the menu hints built from them.
pub fn execute(config: &Config) {
    let hide = config.shortcuts.hide_accelerator().to_string();
    let restore = config.shortcuts.restore_accelerator().to_string();

    println!("{HIDE_KEYBINDING:<18} {hide}");
    println!("{RESTORE_KEYBINDING:<18} {restore}");
    println!();
    println!("{}", presenter::empty_hint(&hide));
    println!("{}", presenter::shortcut_hint(&hide, &restore));
}
