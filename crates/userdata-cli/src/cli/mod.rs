//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::config::Config;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    crate::logging::init(cli.verbose);

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    // Create context for commands
    let ctx = commands::Context {
        config,
        output_format: cli.output.unwrap_or(OutputFormat::Pretty),
        no_color: cli.no_color,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Fetch(args) => commands::fetch::execute(ctx, args).await,
        Commands::Validate(args) => commands::validate::execute(&ctx, &args),
    }
}
