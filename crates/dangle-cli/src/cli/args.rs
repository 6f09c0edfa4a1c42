//! Command-line argument definitions using clap.

use clap::{ArgAction, Args, Parser, Subcommand};
use dangle::audit::ReportFormat;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Dangling DNS record auditor
///
/// Walks every A and CNAME record of a hosted zone and sorts each target
/// into a recognized report (the address or name is still yours) and an
/// unknown report (candidates for takeover).
#[derive(Parser, Debug)]
#[command(name = "dangle")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// JSON gateway serving the record-set listing API, required (or set DANGLE_ENDPOINT env var)
    #[arg(long, env = "DANGLE_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// API token sent as a bearer credential (or set DANGLE_API_TOKEN env var)
    #[arg(short = 't', long, env = "DANGLE_API_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format for summaries and settings
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Audit a hosted zone against the inventories
    Audit(AuditArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Audit command
// ============================================================================

#[derive(Args, Debug, Default)]
pub struct AuditArgs {
    /// Hosted zone to walk (or set DANGLE_ZONE_ID env var)
    #[arg(short, long, env = "DANGLE_ZONE_ID")]
    pub zone_id: Option<String>,

    /// Inventory of allocated addresses and names, one per line [default: public.csv]
    #[arg(long, value_name = "PATH")]
    pub ip_inventory: Option<PathBuf>,

    /// Inventory of host names, one per line [default: elbs.txt]
    #[arg(long, value_name = "PATH")]
    pub name_inventory: Option<PathBuf>,

    /// Report for recognized targets [default: rt53-recog-targets.csv]
    #[arg(long, value_name = "PATH")]
    pub recognized: Option<PathBuf>,

    /// Report for unknown targets [default: rt53-unkno-targets.csv]
    #[arg(long, value_name = "PATH")]
    pub unknown: Option<PathBuf>,

    /// Report format: csv or jsonl [default: csv]
    #[arg(short, long)]
    pub format: Option<ReportFormat>,

    /// Extra ripe domain suffix; repeat for more
    #[arg(long = "ripe-domain", value_name = "SUFFIX")]
    pub ripe_domains: Vec<String>,

    /// Record sets requested per page
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (e.g., zone_id, format, timeouts.connect)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}
