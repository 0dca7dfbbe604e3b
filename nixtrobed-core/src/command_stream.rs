// Standard library
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

// External crates
use crate::error::{Result, TestbedError};
use duct::cmd;
use tracing::{debug, info, warn};
use which::which;

/// Render a command line for logs and error messages.
pub fn describe_command<P: AsRef<OsStr>, A: AsRef<OsStr>>(program: P, args: &[A]) -> String {
    let mut parts = vec![program.as_ref().to_string_lossy().into_owned()];
    parts.extend(args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()));
    parts.join(" ")
}

/// Run a command in `dir` with stdio inherited from this process.
///
/// Blocks until the child exits. A non-zero exit (or a failure to spawn)
/// becomes `TestbedError::ExternalTool` carrying the child's exit code.
pub fn run_visible<P: AsRef<OsStr>, A: AsRef<OsStr>>(
    program: P,
    args: &[A],
    dir: &Path,
) -> Result<()> {
    let full_command = describe_command(&program, args);
    info!(command = %full_command, dir = %dir.display(), "running external command");

    let os_args: Vec<OsString> = args.iter().map(|a| a.as_ref().to_os_string()).collect();
    let output = cmd(program.as_ref(), os_args)
        .dir(dir)
        .unchecked()
        .run()
        .map_err(|e| {
            warn!("Failed to start command '{}': {}", full_command, e);
            TestbedError::ExternalTool {
                command: full_command.clone(),
                code: None,
            }
        })?;

    if output.status.success() {
        debug!(command = %full_command, "external command succeeded");
        Ok(())
    } else {
        warn!(
            command = %full_command,
            code = ?output.status.code(),
            "external command failed"
        );
        Err(TestbedError::ExternalTool {
            command: full_command,
            code: output.status.code(),
        })
    }
}

/// Resolve a tool name (or explicit path) to an executable.
pub fn resolve_tool<T: AsRef<OsStr>>(tool: T) -> Result<PathBuf> {
    which(tool.as_ref())
        .map_err(|_| TestbedError::Dependency(tool.as_ref().to_string_lossy().into_owned()))
}
