//! Shebang line extraction.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Number of lines scanned before giving up on a file.
pub const SHEBANG_LIMIT: usize = 50;

/// Return the first trimmed line starting with `#!` within the first `limit`
/// lines of `path`.
///
/// Unreadable files and content that is not valid UTF-8 yield `None`.
pub fn extract_shebang(path: &Path, limit: usize) -> Option<String> {
    let file = File::open(path).ok()?;

    for line in BufReader::new(file).lines().take(limit) {
        let line = line.ok()?;
        let line = line.trim();
        if line.starts_with("#!") {
            return Some(line.to_string());
        }
    }

    None
}
