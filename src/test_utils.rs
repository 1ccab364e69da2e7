//! Shared test utilities for builds that must not spawn real processes.

use crate::command::{CommandExecutor, ResolvedCommand};
use crate::error::Result;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::process::{ExitStatus, Output};

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

/// Creates a successful command `Output` with empty stdout and stderr.
#[must_use]
pub fn success_output() -> Output {
    Output {
        status: exit_status(0),
        stdout: Vec::new(),
        stderr: Vec::new(),
    }
}

/// Creates a failed command `Output` with the given stderr message.
#[must_use]
pub fn failure_output(stderr: &str) -> Output {
    Output {
        status: exit_status(1),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// An expected invocation and the result handed back for it.
#[derive(Debug)]
pub struct ExpectedCall {
    /// Full argument vector, program first.
    pub argv: Vec<String>,
    /// The result to return when this command is invoked.
    pub result: Result<Output>,
}

impl ExpectedCall {
    /// Expects `argv` and answers with `result`.
    #[must_use]
    pub fn new(argv: &[&str], result: Result<Output>) -> Self {
        Self {
            argv: argv.iter().map(|&arg| arg.to_owned()).collect(),
            result,
        }
    }
}

/// A stub implementation of `CommandExecutor` for testing.
///
/// Calls must arrive in the order they were expected. Every invocation is
/// also recorded so tests can inspect working directories afterwards.
#[derive(Debug)]
pub struct StubExecutor {
    expected: RefCell<VecDeque<ExpectedCall>>,
    received: RefCell<Vec<ResolvedCommand>>,
}

impl StubExecutor {
    /// Creates a new `StubExecutor` with the given expected calls.
    #[must_use]
    pub fn new(expected: Vec<ExpectedCall>) -> Self {
        Self {
            expected: RefCell::new(expected.into()),
            received: RefCell::new(Vec::new()),
        }
    }

    /// Commands received so far.
    #[must_use]
    pub fn received(&self) -> Vec<ResolvedCommand> {
        self.received.borrow().clone()
    }

    /// Asserts that all expected command invocations have been consumed.
    ///
    /// # Panics
    ///
    /// Panics if there are remaining expected calls that were not invoked.
    pub fn assert_finished(&self) {
        assert!(
            self.expected.borrow().is_empty(),
            "expected no further command invocations"
        );
    }
}

impl CommandExecutor for StubExecutor {
    fn run(&self, command: &ResolvedCommand) -> Result<Output> {
        self.received.borrow_mut().push(command.clone());
        let call = self.expected.borrow_mut().pop_front();
        let Some(call) = call else {
            panic!("unexpected command invocation: {command}");
        };

        assert_eq!(call.argv, command.argv());
        call.result
    }
}
