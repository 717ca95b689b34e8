use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One candidate match produced by the ranking engine.
///
/// This is also the wire shape of the engine contract: the engine prints a
/// JSON array of these on stdout. `path` may arrive relative on the wire and
/// is resolved against the working directory before it reaches the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

impl Entry {
    /// Build a directory entry.
    #[must_use]
    pub fn dir(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: true,
        }
    }

    /// Build a file entry.
    #[must_use]
    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: false,
        }
    }

    /// Resolve a relative wire path against the directory the query ran in.
    pub(crate) fn resolve_against(&mut self, dir: &Path) {
        if !self.path.is_absolute() {
            self.path = dir.join(&self.path);
        }
    }
}
