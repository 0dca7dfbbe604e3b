use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use nixtrobed_config::ProjectLayout;
use nixtrobed_core::command_stream::{resolve_tool, run_visible};
use nixtrobed_core::error::Result;
use tracing::debug;

use crate::{Provider, VagrantAction};

// Constants for Vagrant provider
const DEFAULT_VAGRANT_BINARY: &str = "vagrant";
/// Environment variable that overrides the Vagrant binary.
pub const VAGRANT_BINARY_ENV: &str = "NIXTROBED_VAGRANT";

/// Drives the `vagrant` CLI from the testbed root.
#[derive(Debug, Clone)]
pub struct VagrantProvider {
    program: PathBuf,
    project_dir: PathBuf,
}

impl VagrantProvider {
    /// Locate Vagrant (honoring `NIXTROBED_VAGRANT`) for the given testbed.
    pub fn new(layout: &ProjectLayout) -> Result<Self> {
        let program = env::var_os(VAGRANT_BINARY_ENV)
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| OsString::from(DEFAULT_VAGRANT_BINARY));
        Self::with_program(program, layout)
    }

    pub fn with_program(program: impl Into<OsString>, layout: &ProjectLayout) -> Result<Self> {
        let program = resolve_tool(program.into())?;
        debug!(program = %program.display(), "using vagrant binary");
        Ok(Self {
            program,
            project_dir: layout.root().to_path_buf(),
        })
    }

    /// Arguments for one invocation, e.g. `["up", "fedora33"]`.
    pub fn command_args(action: VagrantAction, machine: Option<&str>) -> Vec<String> {
        let mut args = vec![action.subcommand().to_string()];
        if let Some(machine) = machine {
            args.push(machine.to_string());
        }
        args
    }
}

impl Provider for VagrantProvider {
    fn name(&self) -> &'static str {
        "vagrant"
    }

    fn invoke(&self, action: VagrantAction, machine: Option<&str>) -> Result<()> {
        let args = Self::command_args(action, machine);
        run_visible(&self.program, &args, &self.project_dir)
    }
}
