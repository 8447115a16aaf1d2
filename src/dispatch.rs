//! First-match-wins classification of files into action buckets.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::conditions::ConditionEvaluator;
use crate::process::ProcessRunner;
use crate::rules::Rule;

/// Reserved bucket name for files that are not acted on.
pub const IGNORE: &str = "ignore";

/// What to do with a group of files.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Run a shell command template
    Command(String),
    /// Leave the files alone
    Ignore,
}

impl Action {
    /// A rule command of exactly `ignore` maps to [`Action::Ignore`].
    pub fn from_command(command: &str) -> Self {
        if command == IGNORE {
            Action::Ignore
        } else {
            Action::Command(command.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Action::Command(command) => command,
            Action::Ignore => IGNORE,
        }
    }

    pub fn is_ignore(&self) -> bool {
        matches!(self, Action::Ignore)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Files grouped by action, both in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionMap {
    buckets: Vec<(Action, Vec<PathBuf>)>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `file` to the bucket for `action`, creating it if needed.
    pub fn push(&mut self, action: Action, file: impl Into<PathBuf>) {
        let file = file.into();
        match self.buckets.iter_mut().find(|(a, _)| *a == action) {
            Some((_, files)) => files.push(file),
            None => self.buckets.push((action, vec![file])),
        }
    }

    pub fn get(&self, action: &Action) -> Option<&[PathBuf]> {
        self.buckets
            .iter()
            .find(|(a, _)| a == action)
            .map(|(_, files)| files.as_slice())
    }

    /// Look a bucket up by its display key (`ignore` or the command text).
    pub fn get_key(&self, key: &str) -> Option<&[PathBuf]> {
        self.get(&Action::from_command(key))
    }

    pub fn ignored(&self) -> &[PathBuf] {
        self.get(&Action::Ignore).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Action, &[PathBuf])> {
        self.buckets
            .iter()
            .map(|(action, files)| (action, files.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Classify each file under the command of the first rule whose conditions
/// all hold, or under [`Action::Ignore`] when none do.
///
/// Nonexistent paths are reported and skipped. Anything that is not a
/// regular file is skipped silently.
pub fn collect_actions<R, I, S>(
    rules: &[Rule],
    evaluator: &ConditionEvaluator<R>,
    files: I,
) -> ActionMap
where
    R: ProcessRunner,
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    let mut actions = ActionMap::new();

    for file in files {
        let path = file.as_ref();

        if !path.exists() {
            warn!("Path doesn't exist: {}", path.display());
        }
        if !path.is_file() {
            continue;
        }

        let action = rules
            .iter()
            .find(|rule| evaluator.matches_rule(rule, path))
            .map(|rule| Action::from_command(&rule.command))
            .unwrap_or(Action::Ignore);

        debug!("{} -> {}", path.display(), action);
        actions.push(action, path);
    }

    actions
}
