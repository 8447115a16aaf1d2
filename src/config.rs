//! Configuration directory discovery and rule file selection.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Directory name under the XDG config home.
pub const APP_DIR: &str = "rifleman";

/// Rule file used when neither `-c` nor `-a` is given.
pub const DEFAULT_CONFIG: &str = "format.conf";

pub const DEFAULT_PAGER: &str = "less";
pub const DEFAULT_EDITOR: &str = "vim";

/// Rule files written into a fresh configuration directory.
pub const BUNDLED_CONFIGS: [(&str, &str); 2] = [
    ("format.conf", include_str!("../config/format.conf")),
    ("lint.conf", include_str!("../config/lint.conf")),
];

/// `$XDG_CONFIG_HOME/rifleman`, or `~/.config/rifleman` when that is unset
/// or empty.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    match env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        Some(base) => Ok(PathBuf::from(base).join(APP_DIR)),
        None => dirs::home_dir()
            .map(|home| home.join(".config").join(APP_DIR))
            .ok_or(ConfigError::NoHomeDir),
    }
}

/// Create `dir` if needed and write any bundled rule file it lacks.
///
/// Returns the files that were written.
pub fn bootstrap(dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: dir.to_path_buf(),
        source,
    };

    fs::create_dir_all(dir).map_err(io_err)?;

    let mut written = Vec::new();
    for (name, content) in BUNDLED_CONFIGS {
        let path = dir.join(name);
        if !path.exists() {
            fs::write(&path, content).map_err(io_err)?;
            written.push(path);
        }
    }
    Ok(written)
}

/// Names of the `*.conf` files in `dir`, without the extension, sorted.
pub fn available_actions(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut actions: Vec<String> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "conf"))
        .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect();
    actions.sort();
    actions
}

/// Pick the rule file to load.
///
/// `action` names `<dir>/<action>.conf` and wins over `explicit`; otherwise
/// `explicit` is used, falling back to `<dir>/format.conf`.
pub fn resolve_config(
    dir: &Path,
    explicit: Option<&Path>,
    action: Option<&str>,
) -> Result<PathBuf, ConfigError> {
    let path = match (action, explicit) {
        (Some(action), _) => {
            let slug = action.strip_suffix(".conf").unwrap_or(action);
            dir.join(format!("{slug}.conf"))
        }
        (None, Some(explicit)) => explicit.to_path_buf(),
        (None, None) => dir.join(DEFAULT_CONFIG),
    };

    if !path.exists() {
        return Err(ConfigError::NotFound(path));
    }
    if !path.is_file() {
        return Err(ConfigError::NotAFile(path));
    }
    Ok(path)
}

/// Default `PAGER` and `EDITOR` for the commands we spawn.
pub fn apply_env_defaults() {
    if env::var_os("PAGER").is_none() {
        env::set_var("PAGER", DEFAULT_PAGER);
    }
    if env::var_os("EDITOR").is_none() {
        let editor = env::var_os("VISUAL").unwrap_or_else(|| DEFAULT_EDITOR.into());
        env::set_var("EDITOR", editor);
    }
}
