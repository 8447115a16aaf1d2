//! Index of executables reachable through a PATH-like search list.

use nix::sys::stat::{stat, Mode, SFlag};
use std::cell::OnceCell;
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directories searched when `PATH` is unset.
pub const DEFAULT_SEARCH_DIRS: [&str; 2] = ["/usr/bin", "/bin"];

/// Set of executable basenames, enumerated once on first lookup.
#[derive(Debug, Default)]
pub struct ExecutableIndex {
    dirs: Vec<PathBuf>,
    names: OnceCell<HashSet<String>>,
}

impl ExecutableIndex {
    /// Index the directories listed in `$PATH`.
    pub fn from_env() -> Self {
        Self::from_search_path(env::var("PATH").ok().as_deref())
    }

    /// Index a colon-separated search list, or the default directories when
    /// `search_path` is `None`.
    pub fn from_search_path(search_path: Option<&str>) -> Self {
        let dirs: Vec<PathBuf> = match search_path {
            Some(value) => value
                .split(':')
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from)
                .collect(),
            None => DEFAULT_SEARCH_DIRS.iter().map(PathBuf::from).collect(),
        };
        Self::with_dirs(dirs)
    }

    /// Index an explicit list of directories. Duplicates are dropped.
    pub fn with_dirs(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut seen = HashSet::new();
        let dirs = dirs
            .into_iter()
            .filter(|dir| seen.insert(dir.clone()))
            .collect();
        Self {
            dirs,
            names: OnceCell::new(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Whether `name` is an executable in one of the indexed directories.
    pub fn contains(&self, name: &str) -> bool {
        self.names().contains(name)
    }

    /// The full set, enumerating the directories on first call.
    pub fn names(&self) -> &HashSet<String> {
        self.names.get_or_init(|| scan(&self.dirs))
    }
}

fn scan(dirs: &[PathBuf]) -> HashSet<String> {
    let mut names = HashSet::new();

    for dir in dirs {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Skipping {}: {}", dir.display(), e);
                continue;
            }
        };

        for entry in entries.flatten() {
            if is_executable_file(&entry.path()) {
                names.insert(entry.file_name().to_string_lossy().into_owned());
            }
        }
    }

    debug!("Indexed {} executables in {} directories", names.len(), dirs.len());
    names
}

/// Regular file (after following symlinks) with the other-execute bit set.
fn is_executable_file(path: &Path) -> bool {
    let Ok(st) = stat(path) else {
        return false;
    };
    let kind = SFlag::from_bits_truncate(st.st_mode) & SFlag::S_IFMT;
    kind == SFlag::S_IFREG && Mode::from_bits_truncate(st.st_mode).contains(Mode::S_IXOTH)
}
