// CLI argument parsing and definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "nixtrobed")]
#[command(about = "Generate and drive Vagrant testbeds for different Linux and BSD distros")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generate and initialize a new testbed directory
    Init {
        /// Target directory. This must not exist yet.
        directory: PathBuf,
    },
    /// Start the boxes of the given distributions (wraps "vagrant up")
    Start {
        /// Names of distributions to start; none or "all" starts every box
        distros: Vec<String>,
    },
    /// Stop the boxes of the given distributions (wraps "vagrant halt")
    Stop {
        /// Names of distributions to stop; none or "all" stops every box
        distros: Vec<String>,
    },
    /// Provision the boxes of the given distributions (wraps "vagrant provision")
    Provision {
        /// Names of distributions to provision; none or "all" provisions every box
        distros: Vec<String>,
    },
}
