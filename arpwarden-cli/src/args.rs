//! CLI argument parsing

use arpwarden_core::MacAddr;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "arpwarden")]
#[command(version, about = "ARP monitoring and responding engine", long_about = None)]
pub struct Cli {
    /// Network interface to monitor (default: first usable interface)
    #[arg(short = 'I', long)]
    pub interface: Option<String>,

    /// Only process frames to or from this MAC address (test scoping)
    #[arg(short = 's', long, value_name = "MAC")]
    pub scope_mac: Option<MacAddr>,

    /// Scope to the built-in test MAC (4b:54:55:53:45:43)
    #[arg(long, conflicts_with = "scope_mac")]
    pub test_scope: bool,

    /// List available network interfaces and exit
    #[arg(short = 'l', long)]
    pub list_interfaces: bool,

    /// Verbose output (-v, -vv for increasing verbosity)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
