// External crates
use clap::Parser;
use tracing::info;

// Internal imports
use nixtrobed_core::error::TestbedError;
use nixtrobed_core::{tb_error, tb_error_hint};
use nixtrobed_logging::{init_subscriber, LoggingOptions};
use nixtrobed_messages::{msg, MESSAGES};

// Local modules
mod cli;
mod commands;

use cli::Args;
use commands::execute_command;

fn main() {
    let args = Args::parse();

    // Tests expect clean stderr output, so logging stays off in test mode
    let log_guard = if std::env::var("NIXTROBED_TEST_MODE").is_err() {
        init_subscriber(&LoggingOptions::from_env().with_debug(args.debug))
    } else {
        None
    };

    info!(command = ?args.command, "starting nixtrobed");

    if let Err(e) = execute_command(args) {
        report_error(&e);
        // Flush file logs before exiting
        drop(log_guard);
        std::process::exit(e.exit_code());
    }
}

fn report_error(error: &TestbedError) {
    match error {
        TestbedError::ExternalTool { .. } => {
            info!("{}", error);
            tb_error!("{}", MESSAGES.error_vagrant_failed);
        }
        TestbedError::NotAProjectRoot { .. } => {
            tb_error!("{}", msg!(MESSAGES.error_generic, error = error.to_string()));
            tb_error_hint!("{}", MESSAGES.project_hint);
        }
        _ => {
            tb_error!("{}", msg!(MESSAGES.error_generic, error = error.to_string()));
        }
    }
}
