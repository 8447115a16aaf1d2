//! Integration tests for rifleman
//!
//! These tests drive the library end to end against real files and a real
//! `/bin/sh`, covering classification, rule loading and command execution.

pub mod dispatch_flow;
pub mod execution;
pub mod helpers;
pub mod rule_files;
