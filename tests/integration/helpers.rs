//! Shared fixtures for integration tests

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use rifleman::conditions::{ConditionEvaluator, ExecutableIndex, MimeResolver};
use rifleman::exec::Executor;
use rifleman::process::SystemRunner;
use rifleman::rules::RuleStore;
use rifleman::RifleMan;

/// Write `content` to `dir/name` and return its path.
pub fn write_file(dir: &Path, name: impl AsRef<Path>, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture");
    path
}

/// Create an executable stub named `name` in `dir`.
pub fn install_executable(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, "#!/bin/sh\nexit 0\n").expect("Failed to write executable");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to chmod executable");
    path
}

/// Evaluator that only sees executables in `bin_dir`.
pub fn evaluator_with_bin(bin_dir: &Path) -> ConditionEvaluator<SystemRunner> {
    ConditionEvaluator::with_parts(
        ExecutableIndex::with_dirs(vec![bin_dir.to_path_buf()]),
        MimeResolver::with_runner(SystemRunner),
    )
}

/// RifleMan over `rules` text, with executables limited to `bin_dir` and
/// quiet execution.
pub fn rifleman_from_text(rules: &str, bin_dir: &Path) -> RifleMan<SystemRunner> {
    RifleMan::with_parts(
        RuleStore::from_text(rules).expect("Failed to parse rules"),
        evaluator_with_bin(bin_dir),
        Executor::with_runner(SystemRunner),
    )
}
