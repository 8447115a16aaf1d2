//! Loading and reloading rule files.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::parser::parse_rules;
use super::types::Rule;
use crate::error::RuleError;

/// Ordered rule set backed by a configuration file.
///
/// Reloading parses the whole file before swapping it in, so a failed reload
/// leaves the previous rules in effect.
#[derive(Debug, Clone)]
pub struct RuleStore {
    path: PathBuf,
    rules: Vec<Rule>,
}

impl RuleStore {
    /// Create a store for `path` without reading it yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            rules: Vec::new(),
        }
    }

    /// Create a store and read its rules immediately.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, RuleError> {
        let mut store = Self::new(path);
        store.reload()?;
        Ok(store)
    }

    /// Build a store from rule text that did not come from a file.
    pub fn from_text(text: &str) -> Result<Self, RuleError> {
        Ok(Self {
            path: PathBuf::new(),
            rules: parse_rules(text)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Re-read the configured file, replacing the current rules.
    pub fn reload(&mut self) -> Result<(), RuleError> {
        let path = self.path.clone();
        self.reload_from(&path)
    }

    /// Replace the current rules with those in `path`, which becomes the
    /// configured file on success.
    pub fn reload_from(&mut self, path: &Path) -> Result<(), RuleError> {
        let text = fs::read_to_string(path).map_err(|source| RuleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let rules = parse_rules(&text)?;

        debug!("Loaded {} rules from {}", rules.len(), path.display());
        self.rules = rules;
        self.path = path.to_path_buf();
        Ok(())
    }
}
