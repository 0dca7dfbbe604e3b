//! Testbed configuration for nixtrobed.
//!
//! - [`layout`] names every file and directory of a testbed.
//! - [`distros`] parses the flat `nixtrobed.distros` list.
//! - [`defaults`] holds the built-in distro list and file contents.
//! - [`scaffold`] creates a fresh testbed directory.

pub mod defaults;
pub mod distros;
pub mod layout;
pub mod scaffold;

pub use distros::{DistroConfig, DistroRecord};
pub use layout::ProjectLayout;
