use std::path::{Path, PathBuf};

/// Terminal outcome of a picker session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// The overlay was closed without choosing anything.
    Cancelled,
    /// A file entry was chosen; the host should open it.
    Activated(PathBuf),
}

impl PickOutcome {
    /// The activated path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            PickOutcome::Activated(path) => Some(path),
            PickOutcome::Cancelled => None,
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PickOutcome::Cancelled)
    }
}
