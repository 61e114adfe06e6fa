//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Fetch and validate boot-time userdata
///
/// Pulls the machine configuration from a provisioning endpoint, retrying
/// while the endpoint is unreachable or failing, and refuses to hand over
/// anything that does not decode.
#[derive(Parser, Debug)]
#[command(name = "userdatactl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a TOML file with retry defaults
    #[arg(short, long, env = "USERDATA_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch userdata from a provisioning endpoint and validate it
    Fetch(FetchArgs),

    /// Validate a userdata file on local disk
    Validate(ValidateArgs),
}

// ============================================================================
// Fetch command
// ============================================================================

#[derive(Args, Debug, Default)]
pub struct FetchArgs {
    /// Provisioning endpoint URL (falls back to `userdata.endpoint=` on the
    /// kernel command line)
    #[arg(env = "USERDATA_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Write the validated document to this path
    #[arg(short, long)]
    pub save: Option<PathBuf>,

    #[command(flatten)]
    pub retry: RetryArgs,
}

/// Retry flags; each overrides the config file
#[derive(Args, Debug, Default, Clone)]
pub struct RetryArgs {
    /// Maximum number of requests
    #[arg(long, conflicts_with = "forever")]
    pub attempts: Option<u32>,

    /// Overall time limit in seconds
    #[arg(long)]
    pub deadline: Option<u64>,

    /// Pause between attempts in milliseconds
    #[arg(long)]
    pub delay: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Double the pause after every failed attempt
    #[arg(long)]
    pub exponential: bool,

    /// Retry until success; stop with Ctrl-C
    #[arg(long)]
    pub forever: bool,
}

// ============================================================================
// Validate command
// ============================================================================

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Userdata file to decode
    pub path: PathBuf,
}
