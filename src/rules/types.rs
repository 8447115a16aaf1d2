//! Rule and condition data model.

use regex::Regex;
use std::fmt;

/// The closed set of predicates a condition can test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateKind {
    /// Lowercased file extension fully matches the pattern
    Ext,
    /// Basename contains a match
    Name,
    /// Raw path string contains a match
    Match,
    /// Absolute path contains a match
    Path,
    /// Resolved mimetype contains a match
    Mime,
    /// Named executable (or `$VAR` value) is on PATH
    Has,
    /// Shebang line contains a match
    Shebang,
    /// stdin, stdout and stderr are all terminals
    Terminal,
    /// Environment variable is set and non-empty
    Env,
    /// Always true
    Else,
    /// Unrecognised predicate name; never matches
    Unknown(String),
}

impl PredicateKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "ext" => PredicateKind::Ext,
            "name" => PredicateKind::Name,
            "match" => PredicateKind::Match,
            "path" => PredicateKind::Path,
            "mime" => PredicateKind::Mime,
            "has" => PredicateKind::Has,
            "shebang" => PredicateKind::Shebang,
            "terminal" => PredicateKind::Terminal,
            "env" => PredicateKind::Env,
            "else" => PredicateKind::Else,
            other => PredicateKind::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PredicateKind::Ext => "ext",
            PredicateKind::Name => "name",
            PredicateKind::Match => "match",
            PredicateKind::Path => "path",
            PredicateKind::Mime => "mime",
            PredicateKind::Has => "has",
            PredicateKind::Shebang => "shebang",
            PredicateKind::Terminal => "terminal",
            PredicateKind::Env => "env",
            PredicateKind::Else => "else",
            PredicateKind::Unknown(name) => name,
        }
    }

    /// Whether the argument of this predicate is compiled as a regex.
    pub fn takes_pattern(&self) -> bool {
        matches!(
            self,
            PredicateKind::Ext
                | PredicateKind::Name
                | PredicateKind::Match
                | PredicateKind::Path
                | PredicateKind::Mime
                | PredicateKind::Shebang
        )
    }
}

/// A single, optionally negated, predicate test.
///
/// The raw argument text is kept alongside the compiled pattern so a rule
/// can be written back out exactly as it was read.
#[derive(Debug, Clone)]
pub struct Condition {
    pub negated: bool,
    pub predicate: PredicateKind,
    pub argument: Option<String>,
    pub(crate) pattern: Option<Regex>,
}

impl Condition {
    /// Argument text, or the empty string when none was given.
    pub fn argument(&self) -> &str {
        self.argument.as_deref().unwrap_or("")
    }

    /// Compiled pattern for regex-valued predicates.
    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }
}

impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        self.negated == other.negated
            && self.predicate == other.predicate
            && self.argument == other.argument
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!")?;
        }
        write!(f, "{}", self.predicate.name())?;
        if let Some(argument) = &self.argument {
            write!(f, " {argument}")?;
        }
        Ok(())
    }
}

/// A command template guarded by an AND-list of conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub command: String,
    pub conditions: Vec<Condition>,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conditions: Vec<String> = self.conditions.iter().map(|c| c.to_string()).collect();
        write!(f, "{} = {}", conditions.join(", "), self.command)
    }
}
