//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::config::Config;
use crate::logging;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.no_color);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load()?;

    let ctx = commands::Context {
        output_format: cli.output.unwrap_or_default(),
        endpoint: cli.endpoint,
        token: cli.token,
        verbose: cli.verbose,
        no_color: cli.no_color,
        config,
    };

    match cli.command {
        Commands::Audit(args) => commands::audit::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(&ctx, args),
    }
}
