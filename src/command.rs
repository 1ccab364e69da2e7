//! External process invocation.
//!
//! Builds never spawn processes directly. They describe the invocation as a
//! [`ResolvedCommand`] and hand it to a [`CommandExecutor`], which the host
//! supplies. [`SystemCommandExecutor`] is the real implementation.

use crate::error::{NativeImageError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fmt;
use std::process::{Command, Output};

/// A fully resolved process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    program: Utf8PathBuf,
    args: Vec<String>,
    working_dir: Utf8PathBuf,
}

impl ResolvedCommand {
    /// Describes running `program` with `args` inside `working_dir`.
    #[must_use]
    pub fn new(
        program: impl Into<Utf8PathBuf>,
        args: Vec<String>,
        working_dir: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: working_dir.into(),
        }
    }

    /// Program to execute.
    #[must_use]
    pub fn program(&self) -> &Utf8Path {
        &self.program
    }

    /// Arguments in order.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Directory the process runs in.
    #[must_use]
    pub fn working_dir(&self) -> &Utf8Path {
        &self.working_dir
    }

    /// Program followed by its arguments.
    #[must_use]
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for ResolvedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}

/// Abstraction for running external commands.
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor {
    /// Runs `command` to completion and returns its captured output.
    ///
    /// A non-zero exit is not an error at this level; callers inspect
    /// [`Output::status`].
    ///
    /// # Errors
    ///
    /// Returns [`NativeImageError::Spawn`] when the process cannot be started.
    fn run(&self, command: &ResolvedCommand) -> Result<Output>;
}

/// Executes commands on the host system.
///
/// # Examples
///
/// ```no_run
/// use graalvm_native_image::command::{CommandExecutor, ResolvedCommand, SystemCommandExecutor};
///
/// let command = ResolvedCommand::new(
///     "/opt/graal/bin/native-image",
///     vec!["--version".to_owned()],
///     "/tmp",
/// );
/// let output = SystemCommandExecutor.run(&command)?;
/// assert!(output.status.success());
/// # Ok::<(), graalvm_native_image::error::NativeImageError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, command: &ResolvedCommand) -> Result<Output> {
        debug!("running {command} in {}", command.working_dir());
        Command::new(command.program())
            .args(command.args())
            .current_dir(command.working_dir())
            .output()
            .map_err(|source| NativeImageError::Spawn {
                program: command.program().to_owned(),
                source,
            })
    }
}

/// Condenses captured output into a one-line diagnostic.
///
/// Standard error is preferred; standard output is used when stderr is
/// blank.
#[must_use]
pub fn failure_message(output: &Output) -> String {
    [&output.stderr, &output.stdout]
        .into_iter()
        .map(|stream| String::from_utf8_lossy(stream).trim().to_owned())
        .find(|text| !text.is_empty())
        .unwrap_or_else(|| "no output captured".to_owned())
}
