use std::path::Path;

use nixtrobed_config::scaffold::initialize;
use nixtrobed_core::error::Result;
use nixtrobed_core::{tb_println, tb_success};
use nixtrobed_messages::{msg, MESSAGES};

/// Handles the `nixtrobed init DIRECTORY` command.
pub fn handle_init(directory: &Path) -> Result<()> {
    let layout = initialize(directory)?;
    let path = layout.root().display().to_string();

    tb_success!("{}", msg!(MESSAGES.init_created, path = path.as_str()));
    tb_println!("{}", msg!(MESSAGES.init_next_steps, path = path.as_str()));
    Ok(())
}
