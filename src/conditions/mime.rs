//! Mimetype resolution with a per-path cache.
//!
//! Lookup order:
//! 1. User mime.types tables (`~/.mime.types` and any added files)
//! 2. Built-in extension table (`mime_guess`)
//! 3. `file --mime-type -Lb <path>`
//! 4. `mimetype --output-format %m <path>`, only when step 3 yielded the
//!    generic binary type

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::process::{ProcessRunner, SystemRunner};

/// Type reported when nothing more specific is known.
pub const GENERIC_MIMETYPE: &str = "application/octet-stream";

/// Per-user extension table read by default.
pub const USER_MIME_TYPES: &str = ".mime.types";

/// Resolves file paths to mimetype strings.
///
/// Results are cached for the lifetime of the resolver, including the
/// generic fallback.
#[derive(Debug)]
pub struct MimeResolver<R = SystemRunner> {
    runner: R,
    user_types: HashMap<String, String>,
    cache: RefCell<HashMap<PathBuf, String>>,
}

impl MimeResolver<SystemRunner> {
    /// Resolver using real classifiers and `~/.mime.types` if present.
    pub fn new() -> Self {
        let mut resolver = Self::with_runner(SystemRunner);
        if let Some(home) = dirs::home_dir() {
            resolver.add_mime_types_file(&home.join(USER_MIME_TYPES));
        }
        resolver
    }
}

impl Default for MimeResolver<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ProcessRunner> MimeResolver<R> {
    /// Resolver with no user tables.
    pub fn with_runner(runner: R) -> Self {
        Self {
            runner,
            user_types: HashMap::new(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Merge a mime.types file into the user table. Later files override
    /// earlier ones. Returns false if the file could not be read.
    pub fn add_mime_types_file(&mut self, path: &Path) -> bool {
        match fs::read_to_string(path) {
            Ok(text) => {
                self.user_types.extend(parse_mime_types(&text));
                true
            }
            Err(e) => {
                debug!("No mime.types at {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Mimetype of `path`, consulting the cache first.
    pub fn resolve(&self, path: &Path) -> String {
        if let Some(cached) = self.cache.borrow().get(path) {
            return cached.clone();
        }

        let mimetype = self
            .guess_from_extension(path)
            .unwrap_or_else(|| self.classify(path));

        self.cache
            .borrow_mut()
            .insert(path.to_path_buf(), mimetype.clone());
        mimetype
    }

    fn guess_from_extension(&self, path: &Path) -> Option<String> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        if let Some(mimetype) = self.user_types.get(&ext) {
            return Some(mimetype.clone());
        }
        mime_guess::from_ext(&ext).first_raw().map(str::to_string)
    }

    fn classify(&self, path: &Path) -> String {
        let target = path.to_string_lossy().into_owned();

        let mut mimetype = self
            .run_classifier("file", &["--mime-type", "-Lb", target.as_str()])
            .unwrap_or_else(|| GENERIC_MIMETYPE.to_string());

        if mimetype == GENERIC_MIMETYPE {
            if let Some(refined) =
                self.run_classifier("mimetype", &["--output-format", "%m", target.as_str()])
            {
                mimetype = refined;
            }
        }

        mimetype
    }

    /// Trimmed stdout of a successful classifier run, if non-empty.
    fn run_classifier(&self, program: &str, args: &[&str]) -> Option<String> {
        debug!("Running {} {}", program, args.join(" "));
        match self.runner.capture(program, args) {
            Ok(captured) if captured.success => {
                let out = captured.stdout.trim();
                (!out.is_empty()).then(|| out.to_string())
            }
            Ok(_) => None,
            Err(e) => {
                debug!("{} failed: {}", program, e);
                None
            }
        }
    }
}

/// Parse mime.types content (`type ext1 ext2 ...`) into an extension map.
pub fn parse_mime_types(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in text.lines() {
        let line = line.split('#').next().unwrap_or("");
        let mut fields = line.split_whitespace();
        let Some(mimetype) = fields.next() else {
            continue;
        };
        for ext in fields {
            map.insert(
                ext.trim_start_matches('.').to_lowercase(),
                mimetype.to_string(),
            );
        }
    }
    map
}
