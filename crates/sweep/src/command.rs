//! Running external commands.

use std::process::Command;

use log::debug;

use crate::error::SweepError;

/// Captured result of a finished command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Process exit code, -1 if the process was killed by a signal.
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes shell commands synchronously.
///
/// A command which runs and fails is reported through [CommandOutput::exit_code].
/// `Err` is returned only when the command can't be started at all.
pub trait CommandRunner {
    fn run(&mut self, command: &str) -> Result<CommandOutput, SweepError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn run(&mut self, command: &str) -> Result<CommandOutput, SweepError> {
        (**self).run(command)
    }
}

/// Runs commands with `sh -c` in the caller's environment.
#[derive(Default)]
pub struct ShellCommandRunner {}

impl ShellCommandRunner {
    pub fn new() -> Self {
        Self {}
    }
}

impl CommandRunner for ShellCommandRunner {
    fn run(&mut self, command: &str) -> Result<CommandOutput, SweepError> {
        debug!("running `{}`", command);
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .output()
            .map_err(|source| SweepError::Invocation {
                command: command.to_string(),
                source,
            })?;
        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}
