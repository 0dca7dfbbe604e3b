//! Creation of a new testbed directory.
//!
//! The tree is assembled in a hidden staging directory next to the target
//! and renamed into place once complete, so a failed `init` leaves nothing
//! behind at the target path.

use std::fs;
use std::path::Path;

use nixtrobed_core::error::{Result, TestbedError};
use nixtrobed_core::file_system::{create_dir_all, write_file};
use tracing::{debug, info};

use crate::defaults::{
    default_distros, ANSIBLE_CONFIG_TEXT, DEFAULT_PLAYBOOK_TEXT, VAGRANTFILE_TEMPLATE_TEXT,
};
use crate::layout::ProjectLayout;

const STAGING_PREFIX: &str = ".nixtrobed-init-";

/// Create a testbed at `target`, which must not exist yet.
pub fn initialize(target: &Path) -> Result<ProjectLayout> {
    // symlink_metadata also catches dangling symlinks
    if fs::symlink_metadata(target).is_ok() {
        return Err(TestbedError::AlreadyExists(target.to_path_buf()));
    }

    let parent = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut builder = tempfile::Builder::new();
    builder.prefix(STAGING_PREFIX);
    // Request 0777 and let the umask narrow it, like a plain mkdir.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o777));
    }
    let staging = builder
        .tempdir_in(parent)
        .map_err(|e| TestbedError::filesystem("create directory in", parent, e))?;
    debug!(staging = %staging.path().display(), "staging new testbed");

    let staged = ProjectLayout::new(staging.path());
    write_tree(&staged)?;

    fs::rename(staging.path(), target)
        .map_err(|e| TestbedError::filesystem("create", target, e))?;
    // Renamed away; the handle must not try to remove it.
    let _ = staging.keep();

    info!(path = %target.display(), "initialized testbed");
    Ok(ProjectLayout::new(target))
}

/// Write every file and directory of a fresh testbed under `layout.root()`.
pub fn write_tree(layout: &ProjectLayout) -> Result<()> {
    create_dir_all(&layout.playbooks_dir())?;
    create_dir_all(&layout.roles_dir())?;
    write_file(&layout.distros_file(), &default_distros().to_file_contents())?;
    write_file(&layout.template_file(), VAGRANTFILE_TEMPLATE_TEXT)?;
    write_file(&layout.ansible_config(), ANSIBLE_CONFIG_TEXT)?;
    write_file(&layout.default_playbook(), DEFAULT_PLAYBOOK_TEXT)?;
    Ok(())
}
