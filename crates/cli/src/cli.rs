//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use contracts::ModeSelection;
use std::path::PathBuf;

/// Photogrammetry pipeline - sequential OpenMVG/OpenMVS driver
#[derive(Parser, Debug)]
#[command(
    name = "photogrammetry",
    author,
    version,
    about = "Sequential OpenMVG/OpenMVS reconstruction pipeline driver",
    long_about = "Drives the external OpenMVG structure-from-motion and OpenMVS \n\
                  dense-reconstruction tools over a configured list of image datasets, \n\
                  one blocking tool invocation at a time, and collects the final mesh \n\
                  artifacts into a shared compiled-outputs folder."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "PHOTOGRAMMETRY_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "PHOTOGRAMMETRY_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the reconstruction pipeline over all configured datasets
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "config.toml",
        env = "PHOTOGRAMMETRY_CONFIG"
    )]
    pub config: PathBuf,

    /// Override reconstruction mode from configuration
    #[arg(long, value_enum, env = "PHOTOGRAMMETRY_MODE")]
    pub mode: Option<ModeArg>,

    /// Restrict the run to the given dataset(s), overriding the configured list
    #[arg(long = "dataset")]
    pub datasets: Vec<String>,

    /// Override the OpenMVS thread cap (0 = all available cores)
    #[arg(long, env = "PHOTOGRAMMETRY_MAX_THREADS")]
    pub max_threads: Option<u32>,

    /// Ignore nonzero tool exit codes (historical behavior)
    #[arg(long)]
    pub ignore_exit_codes: bool,

    /// Validate configuration, print the run plan and exit without running
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Reconstruction mode selector
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    Sequential,
    Global,
    Both,
}

impl From<ModeArg> for ModeSelection {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Sequential => ModeSelection::Sequential,
            ModeArg::Global => ModeSelection::Global,
            ModeArg::Both => ModeSelection::Both,
        }
    }
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
