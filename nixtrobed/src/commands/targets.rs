//! Target selection and sequential invocation of the provider.

use nixtrobed_core::error::Result;
use nixtrobed_core::{tb_progress, tb_success};
use nixtrobed_messages::{msg, MESSAGES};
use nixtrobed_provider::{Provider, VagrantAction};
use tracing::debug;

/// Token that selects every declared distro.
pub const ALL_TARGETS: &str = "all";

/// Which machines a command applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    /// One unscoped invocation covering every machine.
    All,
    /// One invocation per name, in the order given.
    Named(Vec<String>),
}

impl Targets {
    /// An empty request or one containing `all` selects everything.
    pub fn from_requested(names: &[String]) -> Self {
        if names.is_empty() || names.iter().any(|n| n == ALL_TARGETS) {
            Targets::All
        } else {
            Targets::Named(names.to_vec())
        }
    }

    pub fn names(&self) -> &[String] {
        match self {
            Targets::All => &[],
            Targets::Named(names) => names,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationState {
    Pending,
    Invoking,
    Succeeded,
    /// Carries the exit code reported for the failure.
    Failed(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub machine: Option<String>,
    pub state: InvocationState,
}

/// The invocations a command will issue, tracked through execution.
#[derive(Debug, Clone)]
pub struct TargetPlan {
    action: VagrantAction,
    invocations: Vec<Invocation>,
}

impl TargetPlan {
    pub fn new(action: VagrantAction, targets: &Targets) -> Self {
        let machines = match targets {
            Targets::All => vec![None],
            Targets::Named(names) => names.iter().cloned().map(Some).collect(),
        };
        let invocations = machines
            .into_iter()
            .map(|machine| Invocation {
                machine,
                state: InvocationState::Pending,
            })
            .collect();
        Self {
            action,
            invocations,
        }
    }

    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    /// Run the invocations in order, stopping at the first failure.
    ///
    /// Invocations after a failure stay `Pending`; the failure is returned.
    pub fn execute<P: Provider + ?Sized>(&mut self, provider: &P) -> Result<()> {
        for invocation in &mut self.invocations {
            invocation.state = InvocationState::Invoking;
            let label = invocation.machine.as_deref().unwrap_or(MESSAGES.target_all);
            tb_progress!("{}", announce(self.action, label));
            debug!(provider = provider.name(), action = %self.action, target = label, "invoking");

            match provider.invoke(self.action, invocation.machine.as_deref()) {
                Ok(()) => {
                    invocation.state = InvocationState::Succeeded;
                    tb_success!(
                        "{}",
                        msg!(
                            MESSAGES.target_succeeded,
                            action = self.action.subcommand(),
                            name = label
                        )
                    );
                }
                Err(e) => {
                    invocation.state = InvocationState::Failed(e.exit_code());
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

fn announce(action: VagrantAction, label: &str) -> String {
    let template = match action {
        VagrantAction::Up => MESSAGES.target_starting,
        VagrantAction::Halt => MESSAGES.target_halting,
        VagrantAction::Provision => MESSAGES.target_provisioning,
    };
    msg!(template, name = label)
}
