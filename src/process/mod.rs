//! External process execution.
//!
//! Both the mimetype classifiers and the dispatched shell commands go through
//! [`ProcessRunner`], so callers can substitute a fake in tests.

use std::ffi::OsStr;
use std::io;
use std::process::{Command, Stdio};


/// Shell used to run dispatched command lines.
pub const SHELL: &str = "/bin/sh";

/// Captured result of a program run to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    pub success: bool,
    pub stdout: String,
}

/// Capability to run external programs.
pub trait ProcessRunner {
    /// Run `program` with `args`, capturing stdout and discarding stderr.
    fn capture(&self, program: &str, args: &[&str]) -> io::Result<Captured>;

    /// Run `line` under `/bin/sh -c` with inherited stdio and wait for it.
    ///
    /// Returns the exit code, or `None` if the shell was killed by a signal.
    fn run_shell(&self, line: &OsStr) -> io::Result<Option<i32>>;
}

/// Runs real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn capture(&self, program: &str, args: &[&str]) -> io::Result<Captured> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()?;

        Ok(Captured {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }

    fn run_shell(&self, line: &OsStr) -> io::Result<Option<i32>> {
        let status = Command::new(SHELL).arg("-c").arg(line).status()?;
        Ok(status.code())
    }
}
