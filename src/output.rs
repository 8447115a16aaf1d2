//! Rendering an [`ActionMap`] for `-l` and `-j`.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::dispatch::ActionMap;

/// Plain listing: each action followed by its tab-indented files.
///
/// Names that are not valid UTF-8 are shown lossily here and in JSON.
pub fn render_list(actions: &ActionMap) -> String {
    let mut buf = String::new();
    for (action, files) in actions.iter() {
        buf.push_str(&format!("{action}:\n"));
        for file in files {
            buf.push_str(&format!("\t{}\n", file.display()));
        }
    }
    buf.trim_end().to_string()
}

/// JSON object of action to files, keys sorted, four-space indent.
pub fn render_json(actions: &ActionMap) -> serde_json::Result<String> {
    let sorted: BTreeMap<&str, Vec<Cow<'_, str>>> = actions
        .iter()
        .map(|(action, files)| (action.as_str(), lossy(files)))
        .collect();

    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    sorted.serialize(&mut serializer)?;

    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn lossy(files: &[PathBuf]) -> Vec<Cow<'_, str>> {
    files.iter().map(|file| file.to_string_lossy()).collect()
}
