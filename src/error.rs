//! Error types for rule loading and configuration lookup.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or parsing a rule file.
///
/// All of these are fatal to a load and surface before any dispatch runs.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Failed to read rule file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line}: missing '=' between conditions and command: {text}")]
    MissingDelimiter { line: usize, text: String },

    #[error("Line {line}: invalid pattern for '{predicate}': {source}")]
    InvalidPattern {
        line: usize,
        predicate: String,
        #[source]
        source: regex::Error,
    },
}

impl RuleError {
    /// Attach a line number to an error produced while parsing a single line.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            RuleError::MissingDelimiter { text, .. } => RuleError::MissingDelimiter { line, text },
            RuleError::InvalidPattern {
                predicate, source, ..
            } => RuleError::InvalidPattern {
                line,
                predicate,
                source,
            },
            other => other,
        }
    }
}

/// Errors raised while locating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine home directory; set XDG_CONFIG_HOME")]
    NoHomeDir,

    #[error("Specified configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Specified configuration file is not a file: {0}")]
    NotAFile(PathBuf),

    #[error("Failed to prepare configuration directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
