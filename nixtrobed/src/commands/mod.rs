// Command handlers for testbed operations

use std::env;

use crate::cli::{Args, Command};
use nixtrobed_config::ProjectLayout;
use nixtrobed_core::error::{Result, TestbedError};
use nixtrobed_provider::VagrantAction;
use tracing::debug;

pub mod init;
pub mod lifecycle;
pub mod targets;

/// Main command dispatcher
#[must_use = "command execution results should be handled"]
pub fn execute_command(args: Args) -> Result<()> {
    match args.command {
        Command::Init { directory } => {
            debug!("Handling init command");
            init::handle_init(&directory)
        }
        Command::Start { distros } => {
            debug!("Handling start command");
            lifecycle::handle_lifecycle(&current_layout()?, VagrantAction::Up, &distros)
        }
        Command::Stop { distros } => {
            debug!("Handling stop command");
            lifecycle::handle_lifecycle(&current_layout()?, VagrantAction::Halt, &distros)
        }
        Command::Provision { distros } => {
            debug!("Handling provision command");
            lifecycle::handle_lifecycle(&current_layout()?, VagrantAction::Provision, &distros)
        }
    }
}

/// The testbed rooted at the current working directory.
fn current_layout() -> Result<ProjectLayout> {
    let cwd = env::current_dir()
        .map_err(|e| TestbedError::filesystem("read current directory", ".", e))?;
    Ok(ProjectLayout::new(cwd))
}
