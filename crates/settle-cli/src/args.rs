//! Command-line argument definitions for the Settle CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, simulation overrides and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Settle layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input activity export (JSON)
    #[arg(help = "Path to the input activity export")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Also write rendered frame positions as JSON to this path
    #[arg(long)]
    pub positions: Option<String>,

    /// Override the maximum number of simulation ticks
    #[arg(long)]
    pub max_ticks: Option<usize>,

    /// Record positions every N ticks in addition to the final frame
    #[arg(long)]
    pub render_every: Option<usize>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
