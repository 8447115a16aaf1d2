//! Evaluation of rule conditions against a single file.

use regex::Regex;
use std::env;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use super::executables::ExecutableIndex;
use super::mime::MimeResolver;
use super::shebang::{extract_shebang, SHEBANG_LIMIT};
use crate::process::{ProcessRunner, SystemRunner};
use crate::rules::{Condition, PredicateKind, Rule};

/// Evaluates conditions, owning the lookups they share across files.
#[derive(Debug)]
pub struct ConditionEvaluator<R = SystemRunner> {
    executables: ExecutableIndex,
    mime: MimeResolver<R>,
    shebang_limit: usize,
}

impl ConditionEvaluator<SystemRunner> {
    /// Evaluator backed by `$PATH` and the real mimetype classifiers.
    pub fn new() -> Self {
        Self::with_parts(ExecutableIndex::from_env(), MimeResolver::new())
    }
}

impl Default for ConditionEvaluator<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ProcessRunner> ConditionEvaluator<R> {
    pub fn with_parts(executables: ExecutableIndex, mime: MimeResolver<R>) -> Self {
        Self {
            executables,
            mime,
            shebang_limit: SHEBANG_LIMIT,
        }
    }

    /// Override how many lines are scanned for a shebang.
    pub fn with_shebang_limit(mut self, limit: usize) -> Self {
        self.shebang_limit = limit;
        self
    }

    pub fn executables(&self) -> &ExecutableIndex {
        &self.executables
    }

    pub fn mime(&self) -> &MimeResolver<R> {
        &self.mime
    }

    /// True when every condition of `rule` holds for `path`.
    ///
    /// Stops at the first failing condition.
    pub fn matches_rule(&self, rule: &Rule, path: &Path) -> bool {
        rule.conditions.iter().all(|c| self.evaluate(c, path))
    }

    /// Evaluate one condition, applying its negation.
    pub fn evaluate(&self, condition: &Condition, path: &Path) -> bool {
        self.check(condition, path) != condition.negated
    }

    fn check(&self, condition: &Condition, path: &Path) -> bool {
        let pattern = condition.pattern();
        match &condition.predicate {
            PredicateKind::Ext => path.is_file() && ext_matches(pattern, path),
            PredicateKind::Name => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_default();
                search(pattern, &name)
            }
            PredicateKind::Match => search(pattern, &path.to_string_lossy()),
            PredicateKind::Path => search(pattern, &absolute(path).to_string_lossy()),
            PredicateKind::Mime => search(pattern, &self.mime.resolve(path)),
            PredicateKind::Has => self.has_executable(condition.argument()),
            PredicateKind::Shebang => extract_shebang(path, self.shebang_limit)
                .is_some_and(|line| search(pattern, &line)),
            PredicateKind::Terminal => is_terminal(),
            PredicateKind::Env => {
                env::var_os(condition.argument()).is_some_and(|value| !value.is_empty())
            }
            PredicateKind::Else => true,
            PredicateKind::Unknown(_) => false,
        }
    }

    /// `has tool` checks the index directly; `has $VAR` checks the value of
    /// `VAR`, which must be set.
    fn has_executable(&self, argument: &str) -> bool {
        match argument.strip_prefix('$') {
            Some(var) => env::var(var).is_ok_and(|name| self.executables.contains(&name)),
            None => self.executables.contains(argument),
        }
    }
}

fn search(pattern: Option<&Regex>, text: &str) -> bool {
    pattern.is_some_and(|re| re.is_match(text))
}

/// Lowercased text after the last `.` of the basename. Dotfiles such as
/// `.bashrc` have no extension.
fn extension(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => Some(ext.to_lowercase()),
        _ => None,
    }
}

fn ext_matches(pattern: Option<&Regex>, path: &Path) -> bool {
    extension(path).is_some_and(|ext| search(pattern, &ext))
}

/// Canonical path, or the path joined onto the working directory when it
/// cannot be resolved.
fn absolute(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    })
}

fn is_terminal() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal() && io::stderr().is_terminal()
}
