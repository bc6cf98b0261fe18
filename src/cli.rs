//! CLI argument definitions for gascheck.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("GIT_SHA"),
    "\nbuilt: ",
    env!("BUILD_DATE")
);

#[derive(Parser)]
#[command(name = "gascheck")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Chromatography bulletin validation", long_about = None)]
#[command(
    after_help = "EXAMPLES:\n    gascheck validate bulletin.yaml --history history.yaml\n    gascheck archive bulletin.yaml --append history.yaml\n    gascheck properties bulletin.yaml"
)]
pub struct Cli {
    /// Configuration file (default: ~/.config/gascheck/config.md merged with .gascheck/config.md)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a bulletin against AGA-8, SPC and deadline rules
    Validate {
        /// Sample file (YAML, or markdown with YAML frontmatter)
        sample: PathBuf,
        /// History file of archived samples (YAML list)
        #[arg(long, value_name = "FILE")]
        history: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Evaluate the re-sampling deadline as of this instant (RFC 3339)
        #[arg(long, value_name = "RFC3339")]
        now: Option<String>,
    },
    /// Build the archived record of a bulletin
    ///
    /// Prints the record as YAML. With --append the record is also added to
    /// the history file.
    Archive {
        /// Sample file (YAML, or markdown with YAML frontmatter)
        sample: PathBuf,
        /// History file to append the record to
        #[arg(long, value_name = "FILE")]
        append: Option<PathBuf>,
    },
    /// Show properties derived from the composition
    Properties {
        /// Sample file (YAML, or markdown with YAML frontmatter)
        sample: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}
