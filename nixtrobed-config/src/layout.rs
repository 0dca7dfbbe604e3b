//! File and directory names of a testbed.

use std::path::{Path, PathBuf};

use nixtrobed_core::error::{Result, TestbedError};
use nixtrobed_core::file_system::first_missing;

pub const DISTRO_CONFIG_FILE: &str = "nixtrobed.distros";
pub const VAGRANTFILE_TEMPLATE: &str = "Vagrantfile.jinja";
pub const VAGRANTFILE: &str = "Vagrantfile";
pub const PROVISIONING_DIR: &str = "provisioning";
pub const PLAYBOOKS_DIR: &str = "playbooks";
pub const ROLES_DIR: &str = "roles";
pub const ANSIBLE_CONFIG_FILE: &str = "ansible.cfg";
pub const DEFAULT_PLAYBOOK_NAME: &str = "default.yml";

/// Immutable description of where a testbed keeps its files.
///
/// Every component takes a `&ProjectLayout` instead of reading
/// global paths, so tests can point the whole pipeline at a temp dir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn distros_file(&self) -> PathBuf {
        self.root.join(DISTRO_CONFIG_FILE)
    }

    pub fn template_file(&self) -> PathBuf {
        self.root.join(VAGRANTFILE_TEMPLATE)
    }

    pub fn vagrantfile(&self) -> PathBuf {
        self.root.join(VAGRANTFILE)
    }

    pub fn provisioning_dir(&self) -> PathBuf {
        self.root.join(PROVISIONING_DIR)
    }

    pub fn playbooks_dir(&self) -> PathBuf {
        self.provisioning_dir().join(PLAYBOOKS_DIR)
    }

    pub fn roles_dir(&self) -> PathBuf {
        self.provisioning_dir().join(ROLES_DIR)
    }

    pub fn ansible_config(&self) -> PathBuf {
        self.provisioning_dir().join(ANSIBLE_CONFIG_FILE)
    }

    pub fn default_playbook(&self) -> PathBuf {
        self.playbooks_dir().join(DEFAULT_PLAYBOOK_NAME)
    }

    /// Fail unless the root holds the template, the distro list and the
    /// provisioning directory, reporting the first missing entry.
    pub fn verify_project_root(&self) -> Result<()> {
        let required = [VAGRANTFILE_TEMPLATE, DISTRO_CONFIG_FILE, PROVISIONING_DIR];
        match first_missing(&self.root, &required) {
            Some(missing) => Err(TestbedError::NotAProjectRoot {
                missing: missing.to_string(),
            }),
            None => Ok(()),
        }
    }
}
