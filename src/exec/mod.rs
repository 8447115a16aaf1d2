//! Building and running the shell commands for action buckets.

pub mod command;
pub mod executor;

pub use command::{build_command, plan_invocations, quote, runs_per_file};
pub use executor::Executor;
