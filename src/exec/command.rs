//! Shell command construction.
//!
//! Command lines are built as [`OsString`] so file names that are not valid
//! UTF-8 reach the shell byte for byte.

use regex::Regex;
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::sync::OnceLock;

static FIRST_ARG: OnceLock<Regex> = OnceLock::new();
static ALL_ARGS: OnceLock<Regex> = OnceLock::new();

/// Quote `arg` as one single-quoted shell word, closing and reopening the
/// quotes around each embedded `'`.
pub fn quote(arg: &OsStr) -> OsString {
    let bytes = arg.as_bytes();
    let mut quoted = Vec::with_capacity(bytes.len() + 2);
    quoted.push(b'\'');
    for &byte in bytes {
        if byte == b'\'' {
            quoted.extend_from_slice(b"'\\''");
        } else {
            quoted.push(byte);
        }
    }
    quoted.push(b'\'');
    OsString::from_vec(quoted)
}

/// Bind `files` to the positional parameters, then run `template`:
///
/// ```text
/// set -- 'a b.py' 'it'\''s.py'; black "$@"
/// ```
///
/// Files containing a NUL byte cannot be passed to a shell and are dropped.
pub fn build_command<S: AsRef<OsStr>>(files: &[S], template: &str) -> OsString {
    let mut line = OsString::from("set --");
    for file in files.iter().map(AsRef::<OsStr>::as_ref) {
        if file.as_bytes().contains(&0) {
            continue;
        }
        line.push(" ");
        line.push(quote(file));
    }
    line.push("; ");
    line.push(template);
    line
}

/// True when `template` uses `$1` but neither `$@` nor `$*`, so it should
/// run once for each file instead of once for all of them.
pub fn runs_per_file(template: &str) -> bool {
    let first = FIRST_ARG.get_or_init(|| {
        Regex::new(r"\$(?:1|\{1\})(?:[^0-9]|$)").expect("valid first-argument pattern")
    });
    let all = ALL_ARGS
        .get_or_init(|| Regex::new(r"\$(?:[@*]|\{[@*]\})").expect("valid all-arguments pattern"));

    first.is_match(template) && !all.is_match(template)
}

/// Shell lines to run for `template` over `files`, in order.
pub fn plan_invocations<S: AsRef<OsStr>>(template: &str, files: &[S]) -> Vec<OsString> {
    if runs_per_file(template) {
        files
            .iter()
            .map(|file| build_command(std::slice::from_ref(file), template))
            .collect()
    } else {
        vec![build_command(files, template)]
    }
}
