//! CLI definitions for kubejobs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// kubejobs CLI.
#[derive(Parser)]
#[command(name = "kubejobs")]
#[command(about = "Kubernetes batch job scheduling service")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: config/kubejobs.toml, optional)
    #[arg(short, long, global = true, env = "KUBEJOBS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub(crate) enum Commands {
    /// Serve the scheduler API until interrupted (default)
    Run,

    /// Check cluster connectivity and exit
    Health,

    /// Print the job kinds this binary can schedule
    Kinds,
}
