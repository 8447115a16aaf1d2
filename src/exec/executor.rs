//! Running dispatched actions.

use colored::Colorize;
use std::io;
use std::path::PathBuf;
use tracing::debug;

use super::command::plan_invocations;
use crate::dispatch::{Action, ActionMap};
use crate::process::{ProcessRunner, SystemRunner, SHELL};

/// Runs action buckets one shell invocation at a time.
#[derive(Debug, Default)]
pub struct Executor<R = SystemRunner> {
    runner: R,
    echo: bool,
}

impl Executor<SystemRunner> {
    /// Executor that spawns real shells and echoes each command.
    pub fn new() -> Self {
        Self::with_runner(SystemRunner).echo(true)
    }
}

impl<R: ProcessRunner> Executor<R> {
    pub fn with_runner(runner: R) -> Self {
        Self {
            runner,
            echo: false,
        }
    }

    /// Print `Running: <command>` before each invocation.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run `action` over `files`.
    ///
    /// `confirm` is asked before every invocation with the full command; a
    /// `false` answer skips just that invocation. Ignored buckets never run.
    /// Exit codes are not inspected; only a failure to spawn is returned.
    pub fn execute(
        &self,
        action: &Action,
        files: &[PathBuf],
        confirm: Option<&dyn Fn(&str) -> bool>,
    ) -> io::Result<()> {
        let Action::Command(template) = action else {
            return Ok(());
        };

        for line in plan_invocations(template, files) {
            let command_line = format!("{SHELL} -c {}", line.to_string_lossy());

            if let Some(confirm) = confirm {
                if !confirm(&command_line) {
                    debug!("Skipped: {}", command_line);
                    continue;
                }
            }
            if self.echo {
                println!("{} {}", "Running:".cyan(), command_line);
            }

            let status = self.runner.run_shell(&line)?;
            debug!("Exited with {:?}: {}", status, command_line);
        }

        Ok(())
    }

    /// Run every non-ignored bucket in map order.
    pub fn execute_all(
        &self,
        actions: &ActionMap,
        confirm: Option<&dyn Fn(&str) -> bool>,
    ) -> io::Result<()> {
        for (action, files) in actions.iter() {
            self.execute(action, files, confirm)?;
        }
        Ok(())
    }
}
