use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod domain;
mod error;
mod services;

use cli::{Cli, Commands, SnifferCommands};

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so table/status output stays scriptable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sniffer {
            command: SnifferCommands::Sdk { command },
        } => commands::handle_sdk_commands(command),
        Commands::Im { command } => commands::handle_im_commands(command),
        Commands::Syslog { command } => commands::handle_syslog_commands(command),
    }
}
