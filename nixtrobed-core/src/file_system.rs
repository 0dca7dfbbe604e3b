//! File system helpers shared by the scaffolder and the renderer.

use std::fs;
use std::path::Path;

use crate::error::{Result, TestbedError};

/// Check if a file or directory exists in a directory
pub fn has_entry(dir: &Path, name: &str) -> bool {
    dir.join(name).exists()
}

/// Return the first of `names` that does not exist under `dir`.
pub fn first_missing<'a>(dir: &Path, names: &[&'a str]) -> Option<&'a str> {
    names.iter().copied().find(|name| !has_entry(dir, name))
}

/// Write `contents` to `path`, mapping failures to a filesystem error.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| TestbedError::filesystem("write", path, e))
}

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| TestbedError::filesystem("read", path, e))
}

pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| TestbedError::filesystem("create directory", path, e))
}
