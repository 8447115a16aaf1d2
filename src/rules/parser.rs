//! Line-oriented rule grammar.
//!
//! Each non-blank, non-comment line has the form
//!
//! ```text
//! cond1 [arg], !cond2 [arg], ... = command template
//! ```
//!
//! The first `=` splits conditions from the command, `,` splits conditions,
//! and the first whitespace run splits a predicate name from its argument.

use regex::Regex;
use tracing::warn;

use super::types::{Condition, PredicateKind, Rule};
use crate::error::RuleError;

/// Splits conditions from the command template.
pub const COMMAND_DELIMITER: char = '=';

/// Splits individual conditions.
pub const CONDITION_DELIMITER: char = ',';

/// Parse a complete rule file into rules, in file order.
pub fn parse_rules(text: &str) -> Result<Vec<Rule>, RuleError> {
    let mut rules = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let rule = parse_rule(line).map_err(|e| e.at_line(idx + 1))?;
        for condition in &rule.conditions {
            if let PredicateKind::Unknown(name) = &condition.predicate {
                warn!(
                    "Line {}: unknown condition '{}'; this rule will never match",
                    idx + 1,
                    name
                );
            }
        }
        rules.push(rule);
    }

    Ok(rules)
}

/// Parse a single rule line. Line numbers in errors are zero until attached
/// by [`parse_rules`].
pub fn parse_rule(line: &str) -> Result<Rule, RuleError> {
    let (tests, command) = line
        .split_once(COMMAND_DELIMITER)
        .ok_or_else(|| RuleError::MissingDelimiter {
            line: 0,
            text: line.to_string(),
        })?;

    let mut conditions = Vec::new();
    for spec in tests.split(CONDITION_DELIMITER) {
        if let Some(condition) = parse_condition(spec)? {
            conditions.push(condition);
        }
    }

    Ok(Rule {
        command: command.trim().to_string(),
        conditions,
    })
}

/// Parse one condition spec such as `!ext py|pyi`.
///
/// Returns `None` for an empty slot, which imposes no constraint.
pub fn parse_condition(spec: &str) -> Result<Option<Condition>, RuleError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Ok(None);
    }

    let (name, argument) = match spec.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, Some(rest.trim_start().to_string())),
        None => (spec, None),
    };

    let (negated, name) = match name.strip_prefix('!') {
        Some(stripped) => (true, stripped),
        None => (false, name),
    };

    let predicate = PredicateKind::from_name(name);
    let pattern = compile_pattern(&predicate, argument.as_deref().unwrap_or(""))?;

    Ok(Some(Condition {
        negated,
        predicate,
        argument,
        pattern,
    }))
}

fn compile_pattern(
    predicate: &PredicateKind,
    argument: &str,
) -> Result<Option<Regex>, RuleError> {
    if !predicate.takes_pattern() {
        return Ok(None);
    }

    // `ext` must match the whole extension; everything else is a search.
    let source = match predicate {
        PredicateKind::Ext => format!("^(?:{argument})$"),
        _ => argument.to_string(),
    };

    Regex::new(&source)
        .map(Some)
        .map_err(|source| RuleError::InvalidPattern {
            line: 0,
            predicate: predicate.name().to_string(),
            source,
        })
}
