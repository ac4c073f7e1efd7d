//! Command-line interface for recordkeep.
//!
//! This module provides the CLI structure for the `rkeep` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, DemoArg, DemoCommand, ReplayCommand};

use crate::logging::Verbosity;

/// rkeep - small in-memory record managers
///
/// Runs one of the event, book, inventory or student demos, either with its
/// sample data or by replaying a stream of JSON form submissions.
#[derive(Debug, Parser)]
#[command(name = "rkeep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a demo with its sample data
    Demo(DemoCommand),

    /// Replay form submissions into a demo
    Replay(ReplayCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
