use std::cell::RefCell;
use std::collections::HashMap;

use nixtrobed_core::error::{Result, TestbedError};

use crate::{Provider, VagrantAction};

/// Provider that records invocations instead of running a tool.
///
/// Machines registered with [`MockProvider::fail_on`] fail with the given
/// exit code, mimicking a non-zero exit of the real tool.
#[derive(Debug, Default)]
pub struct MockProvider {
    calls: RefCell<Vec<(VagrantAction, Option<String>)>>,
    failures: HashMap<String, i32>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(mut self, machine: &str, code: i32) -> Self {
        self.failures.insert(machine.to_string(), code);
        self
    }

    /// Every invocation so far, in order.
    pub fn calls(&self) -> Vec<(VagrantAction, Option<String>)> {
        self.calls.borrow().clone()
    }
}

impl Provider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn invoke(&self, action: VagrantAction, machine: Option<&str>) -> Result<()> {
        self.calls
            .borrow_mut()
            .push((action, machine.map(str::to_string)));

        match machine.and_then(|m| self.failures.get(m)) {
            Some(&code) => Err(TestbedError::ExternalTool {
                command: format!("mock {} {}", action, machine.unwrap_or_default()),
                code: Some(code),
            }),
            None => Ok(()),
        }
    }
}
