//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use flowguard_core::types::Direction;

/// Flowguard -- block attacker traffic on the switch when Wazuh raises an alert.
///
/// Use `flowguard <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "flowguard", version, about, long_about = None)]
pub struct Cli {
    /// Path to the flowguard.toml configuration file.
    #[arg(short, long, global = true, default_value = "flowguard.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a Wazuh alert from stdin and block the offending IP (active-response mode).
    Respond,

    /// Read a Wazuh alert from stdin and print the enforcement target without contacting the controller.
    Extract,

    /// Install a block flow for an IP.
    Block(FlowArgs),

    /// Remove a previously installed block flow.
    Unblock(FlowArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

impl Commands {
    /// Stable command name for log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Respond => "respond",
            Self::Extract => "extract",
            Self::Block(_) => "block",
            Self::Unblock(_) => "unblock",
            Self::Config(_) => "config",
        }
    }
}

// ---- block / unblock ----

/// Target of a manual block or unblock.
#[derive(Args, Debug)]
pub struct FlowArgs {
    /// IP address to match.
    #[arg(long)]
    pub ip: String,

    /// Match on the source (src) or destination (dst) address.
    #[arg(long, default_value = "src")]
    pub direction: Direction,

    /// Switch node ID (default: controller.default_node_id).
    #[arg(long)]
    pub node: Option<String>,
}

// ---- config ----

/// Manage flowguard configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, controller, alert).
        #[arg(long)]
        section: Option<String>,
    },
}
