//! Command line interface for rso-status.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rso-status - RSO activation eligibility and cached status.
#[derive(Parser, Debug)]
#[command(name = "rso-status")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file.
    #[arg(short, long, default_value = "rso-status.toml")]
    pub config: PathBuf,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Writes a default configuration file.
    Init {
        /// Target directory (default: current directory).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Evaluates a membership list and records the resulting status.
    Evaluate {
        /// RSO id.
        #[arg(short, long)]
        rso: u64,

        /// JSON file with the membership list.
        #[arg(short, long)]
        members: PathBuf,

        /// Do not write the status to the cache.
        #[arg(long)]
        no_record: bool,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Shows the cached status of an RSO.
    Status {
        /// RSO id.
        rso: u64,
    },

    /// Lists every cached status.
    List {
        /// Print the table as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Overwrites the cached status of an RSO.
    Set {
        /// RSO id.
        rso: u64,

        /// ACTIVE or INACTIVE.
        status: String,
    },

    /// Removes one cached status, or all of them.
    Clear {
        /// RSO id (default: every entry).
        rso: Option<u64>,
    },

    /// Shows version.
    Version,
}
