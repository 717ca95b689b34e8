//! Directory navigation for the picker session.
//!
//! Entering a directory and stepping back to the parent both funnel through
//! [`enter`]: the target is validated, the session's browse directory is
//! swapped, and session-local state (query, results, cursor, scroll) resets.

use std::path::Path;

use log::debug;

use crate::session::{PickerSession, RefreshTicket};

/// Move the session into `target`. No-op (returning `None`) unless `target`
/// is an accessible directory.
pub fn enter(session: &mut PickerSession, target: &Path) -> Option<RefreshTicket> {
    if !target.is_dir() {
        debug!("not entering {}: not a directory", target.display());
        return None;
    }
    Some(session.navigate_to(target.to_path_buf()))
}

/// Move the session to the parent of its browse directory. No-op at the
/// filesystem root.
pub fn go_back(session: &mut PickerSession) -> Option<RefreshTicket> {
    let parent = session.working_dir().parent()?.to_path_buf();
    enter(session, &parent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entering_a_missing_path_is_a_noop() {
        let root = tempfile::tempdir().unwrap();
        let mut session = PickerSession::new(root.path(), 5);
        assert!(enter(&mut session, &root.path().join("missing")).is_none());
        assert_eq!(session.working_dir(), root.path());
    }

    #[test]
    fn entering_a_file_is_a_noop() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("notes.txt");
        std::fs::write(&file, "x").unwrap();

        let mut session = PickerSession::new(root.path(), 5);
        assert!(enter(&mut session, &file).is_none());
        assert_eq!(session.working_dir(), root.path());
    }

    #[test]
    fn go_back_moves_to_the_parent() {
        let root = tempfile::tempdir().unwrap();
        let sub = root.path().join("sub");
        std::fs::create_dir(&sub).unwrap();

        let mut session = PickerSession::new(&sub, 5);
        let ticket = go_back(&mut session).expect("parent exists");
        assert_eq!(session.working_dir(), root.path());
        assert_eq!(ticket.dir(), root.path());
        assert_eq!(ticket.query(), "");
    }

    #[test]
    fn go_back_at_the_root_is_a_noop() {
        let mut session = PickerSession::new("/", 5);
        assert!(go_back(&mut session).is_none());
        assert_eq!(session.working_dir(), Path::new("/"));
    }
}
