use ghostwin_core::config::{self, Accelerator};
use ghostwin_core::log;

const OK: &str = "\x1b[32m[ok]\x1b[0m";
const WARN: &str = "\x1b[33m[warn]\x1b[0m";
const FAIL: &str = "\x1b[31m[fail]\x1b[0m";

pub fn execute() {
    println!();
    check_config_dir();
    let shortcuts = check_config_file();
    check_accelerator("hide", &shortcuts.hide);
    check_accelerator("restore", &shortcuts.restore);
    check_log_file();
    println!();
}

fn check_config_dir() {
    match config::config_dir() {
        Some(dir) if dir.is_dir() => {
            println!("  {OK} Config directory exists ({})", dir.display());
        }
        Some(dir) => {
            println!(
                "  {WARN} Config directory missing ({}); run `ghostwin init`",
                dir.display()
            );
        }
        None => println!("  {FAIL} Could not determine home directory"),
    }
}

/// Reports on `config.toml` and returns the shortcuts as written in it.
///
/// The raw values are checked before validation swaps in defaults.
fn check_config_file() -> config::ShortcutConfig {
    let Some(path) = config::config_path() else {
        println!("  {FAIL} Could not determine config path");
        return config::ShortcutConfig::default();
    };
    let Ok(content) = std::fs::read_to_string(&path) else {
        println!("  {WARN} config.toml not found (using defaults)");
        return config::ShortcutConfig::default();
    };
    match toml::from_str::<config::Config>(&content) {
        Ok(config) => {
            println!("  {OK} config.toml is valid");
            config.shortcuts
        }
        Err(e) => {
            println!("  {FAIL} config.toml: {e}");
            config::ShortcutConfig::default()
        }
    }
}

fn check_accelerator(name: &str, value: &str) {
    match Accelerator::parse(value) {
        Ok(accel) => println!("  {OK} {name} shortcut: {accel}"),
        Err(e) => println!("  {FAIL} {name} shortcut: {e} (default will be used)"),
    }
}

fn check_log_file() {
    let config = config::load();
    match log::log_path() {
        Some(path) if config.logging.enabled => {
            println!("  {OK} Logging to {}", path.display());
        }
        Some(path) => {
            println!(
                "  {WARN} File logging disabled (would write to {})",
                path.display()
            );
        }
        None => println!("  {FAIL} Could not determine log path"),
    }
}
