//! Error conversion helpers for I/O results
//!
//! Provides extension traits for attaching path or command context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// fs.write(&path, &manifest)
    ///     .with_path_context("write manifest", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;

    /// Add command-line context to an I/O error from spawning a process.
    fn with_command_context(self, program: &str, args: &[&str]) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }

    fn with_command_context(self, program: &str, args: &[&str]) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("run {} {}", program, args.join(" ")),
            source: Box::new(e),
        })
    }
}

/// Error for a process that ran but exited unsuccessfully.
pub(crate) fn command_failed(
    program: &str,
    args: &[&str],
    stderr: &str,
    exit_code: Option<i32>,
) -> ApplicationError {
    let message = match stderr.trim() {
        "" => match exit_code {
            Some(code) => format!("exited with status {code}"),
            None => "terminated by signal".to_string(),
        },
        trimmed => trimmed.to_string(),
    };
    ApplicationError::OperationFailed {
        context: format!("{} {}: {}", program, args.join(" "), message),
        source: Box::new(crate::infrastructure::InfraError::Command {
            program: program.to_string(),
            message,
            exit_code,
        }),
    }
}
