//! Rule store, evaluator and executor wired together.

use std::io;
use std::path::{Path, PathBuf};

use crate::conditions::ConditionEvaluator;
use crate::dispatch::{collect_actions, Action, ActionMap};
use crate::error::RuleError;
use crate::exec::Executor;
use crate::process::{ProcessRunner, SystemRunner};
use crate::rules::{Rule, RuleStore};

/// Classifies files against a rule file and runs the resulting actions.
#[derive(Debug)]
pub struct RifleMan<R = SystemRunner> {
    store: RuleStore,
    evaluator: ConditionEvaluator<R>,
    executor: Executor<R>,
}

impl RifleMan<SystemRunner> {
    /// Load `config_file` with `$PATH`, the real classifiers and real shells.
    pub fn load(config_file: impl Into<PathBuf>) -> Result<Self, RuleError> {
        Ok(Self::with_parts(
            RuleStore::load(config_file)?,
            ConditionEvaluator::new(),
            Executor::new(),
        ))
    }
}

impl<R: ProcessRunner> RifleMan<R> {
    pub fn with_parts(
        store: RuleStore,
        evaluator: ConditionEvaluator<R>,
        executor: Executor<R>,
    ) -> Self {
        Self {
            store,
            evaluator,
            executor,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        self.store.rules()
    }

    pub fn evaluator(&self) -> &ConditionEvaluator<R> {
        &self.evaluator
    }

    /// Re-read the rule file, or switch to `config_file` when given. On error
    /// the previous rules and file stay in effect.
    pub fn reload_config(&mut self, config_file: Option<&Path>) -> Result<(), RuleError> {
        match config_file {
            Some(path) => self.store.reload_from(path),
            None => self.store.reload(),
        }
    }

    pub fn config_file(&self) -> &Path {
        self.store.path()
    }

    pub fn collect_actions<I, S>(&self, files: I) -> ActionMap
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        collect_actions(self.store.rules(), &self.evaluator, files)
    }

    pub fn execute(
        &self,
        action: &Action,
        files: &[PathBuf],
        confirm: Option<&dyn Fn(&str) -> bool>,
    ) -> io::Result<()> {
        self.executor.execute(action, files, confirm)
    }

    pub fn execute_all(
        &self,
        actions: &ActionMap,
        confirm: Option<&dyn Fn(&str) -> bool>,
    ) -> io::Result<()> {
        self.executor.execute_all(actions, confirm)
    }
}
