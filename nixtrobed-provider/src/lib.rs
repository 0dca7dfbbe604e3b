//! Virtualization provider abstraction for nixtrobed.
//!
//! Defines the [`Provider`] trait the dispatcher drives, the Vagrant
//! implementation, and the renderer that turns the distro list into a
//! Vagrantfile.

use std::fmt;

use nixtrobed_core::error::Result;

pub mod vagrant;
pub mod vagrantfile;

// When the `test-helpers` feature is enabled, include the mock provider.
#[cfg(any(test, feature = "test-helpers"))]
pub mod mock;

pub use vagrant::VagrantProvider;
pub use vagrantfile::VagrantfileRenderer;

/// Lifecycle operations the external tool offers per machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VagrantAction {
    Up,
    Halt,
    Provision,
}

impl VagrantAction {
    /// Subcommand passed to the external tool.
    pub fn subcommand(self) -> &'static str {
        match self {
            VagrantAction::Up => "up",
            VagrantAction::Halt => "halt",
            VagrantAction::Provision => "provision",
        }
    }
}

impl fmt::Display for VagrantAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subcommand())
    }
}

/// The core trait for virtualization providers.
///
/// `machine` scopes an operation to one declared machine; `None` applies it
/// to every machine in a single invocation.
pub trait Provider {
    /// Get the name of the provider (e.g., "vagrant").
    fn name(&self) -> &'static str;

    /// Run `action`, blocking until the tool exits.
    fn invoke(&self, action: VagrantAction, machine: Option<&str>) -> Result<()>;

    fn up(&self, machine: Option<&str>) -> Result<()> {
        self.invoke(VagrantAction::Up, machine)
    }

    fn halt(&self, machine: Option<&str>) -> Result<()> {
        self.invoke(VagrantAction::Halt, machine)
    }

    fn provision(&self, machine: Option<&str>) -> Result<()> {
        self.invoke(VagrantAction::Provision, machine)
    }
}
