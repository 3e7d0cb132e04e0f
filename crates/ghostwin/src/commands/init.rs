use std::path::Path;

use ghostwin_core::config;

/// Creates the default configuration file at `~/.config/ghostwin/`.
///
/// An existing `config.toml` is never overwritten.
pub fn execute() {
    let Some(dir) = config::config_dir() else {
        eprintln!("Error: could not determine home directory.");
        std::process::exit(1);
    };

    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Error: could not create {}: {e}", dir.display());
        std::process::exit(1);
    }

    write_if_missing(&dir.join("config.toml"), &config::template::generate_config());
    println!("\nEdit config.toml to change the hide and restore shortcuts.");
}

fn write_if_missing(path: &Path, content: &str) {
    if path.exists() {
        println!("Already exists: {}", path.display());
        return;
    }

    match std::fs::write(path, content) {
        Ok(()) => {
            tracing::info!(event = "cli.init.config_written", path = %path.display());
            println!("Created {}", path.display());
        }
        Err(e) => eprintln!("Error: could not write {}: {e}", path.display()),
    }
}
