mod commands;

use clap::{Parser, Subcommand};

use ghostwin_core::{config, log};

#[derive(Parser)]
#[command(
    name = "ghostwin",
    version,
    about = "Hide windows from the window switcher while they keep running"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Check the configuration and report problems
    Doctor,
    /// Show the effective hide and restore shortcuts
    Shortcuts,
}

fn main() {
    let cli = Cli::parse();

    let config = config::load();
    log::init(&config.logging);
    tracing::debug!(event = "cli.command_started", command = ?cli.command);

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Doctor => commands::doctor::execute(),
        Commands::Shortcuts => commands::shortcuts::execute(&config),
    }
}
