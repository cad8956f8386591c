//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Immunize using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Immunize - childhood vaccination schedule calculator
#[derive(Parser, Debug)]
#[command(name = "immunize")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply if it does not exist)
    #[arg(short, long, default_value = "immunize.toml", env = "IMMUNIZE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "IMMUNIZE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a child's vaccination schedule
    Schedule(commands::schedule::ScheduleArgs),

    /// Print completion statistics for a child's schedule
    Stats(commands::stats::StatsArgs),

    /// Validate configuration file and catalog
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
