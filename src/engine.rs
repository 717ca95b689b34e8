//! Gateway to the external ranking engine.
//!
//! The engine is a subprocess: it runs with the session's working directory
//! as its working directory, receives the query as its final argument, and
//! prints a JSON array of entries on stdout. One child per call, waited on
//! before the call returns.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::warn;

use crate::types::Entry;

/// Synchronous source of ranked entries for a directory and query.
///
/// `query_entries` never fails: any engine misbehavior degrades to an empty
/// list so a single bad invocation cannot corrupt or freeze the session.
pub trait EngineClient {
    fn query_entries(&self, dir: &Path, query: &str) -> Vec<Entry>;
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to run ranking engine `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("ranking engine produced undecodable output: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Engine invoked as an external command.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandEngine {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Fixed arguments inserted before the query.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    fn run(&self, dir: &Path, query: &str) -> Result<Vec<Entry>, EngineError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(query)
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| EngineError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        // Exit status is deliberately not interpreted: output that parses is
        // kept even when the engine exits non-zero.
        decode_entries(&output.stdout, dir)
    }
}

impl EngineClient for CommandEngine {
    fn query_entries(&self, dir: &Path, query: &str) -> Vec<Entry> {
        match self.run(dir, query) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("engine query {query:?} in {} failed: {err}", dir.display());
                Vec::new()
            }
        }
    }
}

/// Decode the engine's stdout, resolving relative paths against `dir`.
pub(crate) fn decode_entries(bytes: &[u8], dir: &Path) -> Result<Vec<Entry>, EngineError> {
    let mut entries: Vec<Entry> = serde_json::from_slice(bytes)?;
    for entry in &mut entries {
        entry.resolve_against(dir);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_entries_in_rank_order() {
        let bytes = br#"[
            {"name": "src", "path": "/repo/src", "is_dir": true},
            {"name": "main.rs", "path": "main.rs", "is_dir": false}
        ]"#;
        let entries = decode_entries(bytes, Path::new("/repo")).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "src");
        assert!(entries[0].is_dir);
        assert_eq!(entries[1].path, PathBuf::from("/repo/main.rs"));
    }

    #[test]
    fn rejects_non_array_output() {
        assert!(decode_entries(b"not json", Path::new("/")).is_err());
        assert!(decode_entries(br#"{"name": "x"}"#, Path::new("/")).is_err());
    }

    #[test]
    fn missing_engine_degrades_to_empty() {
        let engine = CommandEngine::new("/nonexistent/fpick-engine-binary");
        let entries = engine.query_entries(Path::new("/"), "query");
        assert!(entries.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn garbage_stdout_degrades_to_empty() {
        let engine = CommandEngine::new("sh").with_args(["-c", "echo definitely-not-json"]);
        let entries = engine.query_entries(Path::new("/"), "");
        assert!(entries.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_keeps_parseable_output() {
        let engine = CommandEngine::new("sh").with_args([
            "-c",
            r#"echo '[{"name":"a","path":"a","is_dir":false}]'; exit 3"#,
        ]);
        let entries = engine.query_entries(Path::new("/tmp"), "a");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, PathBuf::from("/tmp/a"));
    }
}
