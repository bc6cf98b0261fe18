//! CLI entry point for gascheck.

mod cli;
mod cmd;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

/// Environment variable holding a tracing filter, e.g. `gascheck=debug`.
const LOG_ENV: &str = "GASCHECK_LOG";

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "gascheck=debug" } else { "gascheck=warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cmd::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Validate {
            sample,
            history,
            format,
            now,
        } => cmd::validate::cmd_validate(
            &config,
            &sample,
            history.as_deref(),
            format,
            now.as_deref(),
        ),
        Commands::Archive { sample, append } => {
            cmd::archive::cmd_archive(&config, &sample, append.as_deref())
        }
        Commands::Properties { sample, format } => {
            cmd::properties::cmd_properties(&config, &sample, format)
        }
    }
}
