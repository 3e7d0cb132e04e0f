/// Generates the default `config.toml` contents with explanatory comments.
///
/// This is used by `ghostwin init` to create a starter config file that
/// users can immediately edit.
pub fn generate_config() -> String {
    r##"# Ghost Window configuration
# Location: ~/.config/ghostwin/config.toml

[shortcuts]
# Minimize the focused window and keep it out of Alt+Tab.
# Accepts "Ctrl+Alt+J" or the GLib form "<Control><Alt>j".
hide = "Ctrl+Alt+J"
# Open the menu of hidden windows to release one.
restore = "Ctrl+Alt+K"

[logging]
# Enable file logging to ~/.config/ghostwin/logs/ghostwin.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
    .to_string()
}
