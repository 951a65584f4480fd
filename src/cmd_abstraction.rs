//! Command execution abstraction for testability.
//!
//! Every ipset operation goes through [`CommandExecutor`], so unit tests can
//! script the utility's stdout, stderr and exit status without running it.

use std::borrow::Cow;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::thread;

#[cfg(test)]
use mockall::automock;

/// Output from command execution
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Standard output from the command, byte for byte
    pub stdout: Vec<u8>,
    /// Standard error from the command
    pub stderr: String,
    /// Whether the command succeeded (exit code 0)
    pub success: bool,
    /// The exit code, if available
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Stdout as text, with invalid UTF-8 replaced.
    pub fn stdout_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Stdout followed by stderr, trimmed. Used for error reporting.
    pub fn combined(&self) -> String {
        let stdout = self.stdout_str();
        let stdout = stdout.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (true, _) => stderr.to_string(),
            (false, true) => stdout.to_string(),
            (false, false) => format!("{}\n{}", stdout, stderr),
        }
    }

    /// Whether either stream contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.stdout_str().contains(needle) || self.stderr.contains(needle)
    }
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Trait for command execution, allowing dependency injection for testing.
#[cfg_attr(test, automock)]
pub trait CommandExecutor: Send + Sync {
    /// Run `program` with `args` and capture both output streams.
    ///
    /// An `Err` means the process could not be started at all; a non-zero
    /// exit is reported through [`CommandOutput::success`].
    fn execute(&self, program: &Path, args: &[String]) -> io::Result<CommandOutput>;

    /// Like [`execute`](Self::execute), with `stdin` piped to the process.
    fn execute_with_stdin(
        &self,
        program: &Path,
        args: &[String],
        stdin: &[u8],
    ) -> io::Result<CommandOutput>;
}

/// Executor backed by `std::process::Command`.
#[derive(Debug, Clone, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for SystemExecutor {
    fn execute(&self, program: &Path, args: &[String]) -> io::Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(output.into())
    }

    fn execute_with_stdin(
        &self,
        program: &Path,
        args: &[String],
        stdin_data: &[u8],
    ) -> io::Result<CommandOutput> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Feed stdin from its own thread so a child blocked on a full stdout
        // pipe can't deadlock against us.
        let writer = child.stdin.take().map(|mut stdin| {
            let data = stdin_data.to_vec();
            thread::spawn(move || stdin.write_all(&data))
        });

        let output = child.wait_with_output()?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                // The child may exit before draining its input
                Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
                Ok(Err(e)) => return Err(e),
                Err(_) => return Err(io::Error::other("stdin writer thread panicked")),
            }
        }

        Ok(output.into())
    }
}

/// Convert a slice of `&str` to `Vec<String>`.
///
/// mockall has trouble with the nested lifetimes of `&[&str]`, so the trait
/// takes `&[String]`.
pub fn args_to_strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}
