//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::session::Demo;

/// Arguments for `rkeep demo`.
#[derive(Debug, Args)]
pub struct DemoCommand {
    /// Which demo to run
    #[arg(value_enum)]
    pub demo: DemoArg,

    /// Print the final records as JSON instead of rendered lists
    #[arg(short, long)]
    pub json: bool,
}

/// Arguments for `rkeep replay`.
#[derive(Debug, Args)]
pub struct ReplayCommand {
    /// Which demo to replay forms into
    #[arg(value_enum)]
    pub demo: DemoArg,

    /// JSON-lines file of form submissions, or `-` for stdin
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Start from empty lists even if sample data is enabled
    #[arg(long)]
    pub no_seed: bool,

    /// Stop at the first rejected form and exit with an error
    #[arg(long)]
    pub stop_on_error: bool,

    /// Print the final records as JSON instead of rendered lists
    #[arg(short, long)]
    pub json: bool,
}

impl ReplayCommand {
    /// Whether input comes from stdin.
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Demo argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoArg {
    /// Event tracking
    Events,
    /// Title-keyed lending catalog
    Lms,
    /// Member-tracking library
    Library,
    /// Stock counts
    Inventory,
    /// Students with grades
    Roster,
    /// Course registration
    Registration,
}

impl From<DemoArg> for Demo {
    fn from(arg: DemoArg) -> Self {
        match arg {
            DemoArg::Events => Self::Events,
            DemoArg::Lms => Self::Lms,
            DemoArg::Library => Self::Library,
            DemoArg::Inventory => Self::Inventory,
            DemoArg::Roster => Self::Roster,
            DemoArg::Registration => Self::Registration,
        }
    }
}
