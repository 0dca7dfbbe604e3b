use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use nixtrobed_messages::{msg, MESSAGES};
use thiserror::Error;

/// Which required field of a distro line was blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Name,
    Box,
}

#[derive(Error, Debug)]
pub enum TestbedError {
    /// A non-comment distro line lacks a name or box.
    MalformedConfig {
        path: PathBuf,
        line: usize,
        field: MissingField,
    },
    /// A distro line opens a quoted field and never closes it.
    UnterminatedQuote { path: PathBuf, line: usize },
    /// Two distro lines declare the same name.
    DuplicateDistro {
        path: PathBuf,
        line: usize,
        first_line: usize,
        name: String,
    },
    /// The working directory lacks a required project entry.
    NotAProjectRoot { missing: String },
    /// `init` was pointed at a path that already exists.
    AlreadyExists(PathBuf),
    Filesystem {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },
    Template { path: PathBuf, message: String },
    /// The external tool binary could not be located.
    Dependency(String),
    /// The external tool ran and failed, or could not be spawned.
    ExternalTool { command: String, code: Option<i32> },
}

impl TestbedError {
    pub fn filesystem(
        operation: &'static str,
        path: impl AsRef<Path>,
        source: std::io::Error,
    ) -> Self {
        TestbedError::Filesystem {
            path: path.as_ref().to_path_buf(),
            operation,
            source,
        }
    }

    /// Process exit status for this error.
    ///
    /// A failed external tool hands back its own code; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            TestbedError::ExternalTool {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

impl Display for TestbedError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            TestbedError::MalformedConfig { path, line, field } => {
                let template = match field {
                    MissingField::Name => MESSAGES.distro_missing_name,
                    MissingField::Box => MESSAGES.distro_missing_box,
                };
                let text = msg!(
                    template,
                    path = path.display().to_string(),
                    line = line.to_string()
                );
                write!(f, "{}", text)
            }
            TestbedError::UnterminatedQuote { path, line } => write!(
                f,
                "{}",
                msg!(
                    MESSAGES.distro_unterminated_quote,
                    path = path.display().to_string(),
                    line = line.to_string()
                )
            ),
            TestbedError::DuplicateDistro {
                path,
                line,
                first_line,
                name,
            } => write!(
                f,
                "{}",
                msg!(
                    MESSAGES.distro_duplicate,
                    path = path.display().to_string(),
                    line = line.to_string(),
                    first_line = first_line.to_string(),
                    name = name.as_str()
                )
            ),
            TestbedError::NotAProjectRoot { missing } => write!(
                f,
                "{}",
                msg!(MESSAGES.project_missing_entry, name = missing.as_str())
            ),
            TestbedError::AlreadyExists(path) => write!(
                f,
                "{}",
                msg!(
                    MESSAGES.init_already_exists,
                    path = path.display().to_string()
                )
            ),
            TestbedError::Filesystem {
                path,
                operation,
                source,
            } => write!(
                f,
                "{}",
                msg!(
                    MESSAGES.error_filesystem,
                    operation = *operation,
                    path = path.display().to_string(),
                    error = source.to_string()
                )
            ),
            TestbedError::Template { path, message } => write!(
                f,
                "{}",
                msg!(
                    MESSAGES.error_template,
                    path = path.display().to_string(),
                    error = message.as_str()
                )
            ),
            TestbedError::Dependency(tool) => {
                write!(f, "{}", msg!(MESSAGES.error_dependency, tool = tool.as_str()))
            }
            TestbedError::ExternalTool { command, code } => {
                let code = code.map_or_else(|| "none".to_string(), |c| c.to_string());
                write!(
                    f,
                    "{}",
                    msg!(
                        MESSAGES.error_external_tool,
                        code = code,
                        command = command.as_str()
                    )
                )
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TestbedError>;
