use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mlnxctl", version, about = "Mellanox platform configuration tasks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Utility for managing the Mellanox SDK/PRM sniffer
    Sniffer {
        #[command(subcommand)]
        command: SnifferCommands,
    },
    /// Utility for managing Mellanox module host management mode
    Im {
        #[command(subcommand)]
        command: ImCommands,
    },
    /// Show syslog server configuration
    Syslog {
        #[command(subcommand)]
        command: Option<SyslogCommands>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SnifferCommands {
    /// Enable/disable the SDK sniffer
    Sdk {
        #[command(subcommand)]
        command: SdkCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum SdkCommands {
    /// Enable SDK sniffer
    Enable {
        #[arg(short = 'y', long, help = "Skip the restart confirmation prompt")]
        yes: bool,
        #[arg(
            long,
            help = "Locate the sniffer directive by substring instead of exact key (legacy behavior)"
        )]
        legacy_substring_match: bool,
    },
    /// Disable SDK sniffer
    Disable {
        #[arg(short = 'y', long, help = "Skip the restart confirmation prompt")]
        yes: bool,
        #[arg(
            long,
            help = "Locate the sniffer directive by substring instead of exact key (legacy behavior)"
        )]
        legacy_substring_match: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ImCommands {
    /// Enable module host management mode
    Enabled,
    /// Disable module host management mode
    Disabled,
}

#[derive(Subcommand, Debug)]
pub enum SyslogCommands {
    /// Show syslog rate limit configuration for host
    RateLimitHost,
    /// Show syslog rate limit configuration for containers
    RateLimitContainer { service: Option<String> },
}
