//! End-to-end picker flows: key events through the dispatcher into the
//! session, with refreshes serviced by a scripted engine.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use fpick::{
    CommandEngine, EngineClient, Entry, Keymap, Mode, PickOutcome, PickerSession, render,
};

/// Engine stub that answers from a closure and records every invocation.
struct ScriptedEngine<F>
where
    F: Fn(&Path, &str) -> Vec<Entry>,
{
    respond: F,
    calls: RefCell<Vec<(PathBuf, String)>>,
}

impl<F> ScriptedEngine<F>
where
    F: Fn(&Path, &str) -> Vec<Entry>,
{
    fn new(respond: F) -> Self {
        Self {
            respond,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn last_call(&self) -> Option<(PathBuf, String)> {
        self.calls.borrow().last().cloned()
    }
}

impl<F> EngineClient for ScriptedEngine<F>
where
    F: Fn(&Path, &str) -> Vec<Entry>,
{
    fn query_entries(&self, dir: &Path, query: &str) -> Vec<Entry> {
        self.calls
            .borrow_mut()
            .push((dir.to_path_buf(), query.to_string()));
        (self.respond)(dir, query)
    }
}

fn press<E: EngineClient>(
    session: &mut PickerSession,
    keymap: &Keymap,
    engine: &E,
    code: KeyCode,
) -> Option<PickOutcome> {
    let key = KeyEvent::new(code, KeyModifiers::NONE);
    let transition = keymap.dispatch(session.mode(), &key)?;
    session.apply_with(engine, transition)
}

#[test]
fn typing_narrows_results_and_resets_the_cursor() {
    let engine = ScriptedEngine::new(|_: &Path, query: &str| match query {
        "" => vec![
            Entry::dir("src", "/repo/src"),
            Entry::file("main.rs", "/repo/main.rs"),
            Entry::file("map.rs", "/repo/map.rs"),
        ],
        "m" | "ma" => vec![
            Entry::file("main.rs", "/repo/main.rs"),
            Entry::file("map.rs", "/repo/map.rs"),
        ],
        _ => Vec::new(),
    });
    let keymap = Keymap::default();
    let mut session = PickerSession::new("/repo", 10);
    session.refresh_now(&engine);
    assert_eq!(session.results().len(), 3);

    press(&mut session, &keymap, &engine, KeyCode::Down);
    assert_eq!(session.selected(), 1);

    press(&mut session, &keymap, &engine, KeyCode::Char('/'));
    assert!(session.mode().is_text_entry());
    press(&mut session, &keymap, &engine, KeyCode::Char('m'));
    press(&mut session, &keymap, &engine, KeyCode::Char('a'));

    assert_eq!(session.query(), "ma");
    assert_eq!(session.results().len(), 2);
    assert_eq!(session.selected(), 0);
    assert_eq!(engine.last_call().unwrap().1, "ma");
}

#[test]
fn activating_a_directory_enters_it_and_requeries() {
    let root = tempfile::tempdir().unwrap();
    let sub = root.path().join("src");
    std::fs::create_dir(&sub).unwrap();
    let sub_clone = sub.clone();

    let engine = ScriptedEngine::new(move |dir: &Path, _: &str| {
        if dir == sub_clone {
            vec![Entry::file("lib.rs", sub_clone.join("lib.rs"))]
        } else {
            vec![
                Entry::dir("src", &sub_clone),
                Entry::file("main.rs", dir.join("main.rs")),
            ]
        }
    });
    let keymap = Keymap::default();
    let mut session = PickerSession::new(root.path(), 10);
    session.refresh_now(&engine);

    let outcome = press(&mut session, &keymap, &engine, KeyCode::Enter);
    assert!(outcome.is_none());
    assert_eq!(session.working_dir(), sub.as_path());
    assert_eq!(session.query(), "");
    assert_eq!(session.selected(), 0);
    assert_eq!(session.results()[0].name, "lib.rs");
    assert_eq!(engine.last_call().unwrap(), (sub, String::new()));
}

#[test]
fn activating_a_file_ends_the_session_without_further_queries() {
    let engine = ScriptedEngine::new(|dir: &Path, _: &str| {
        vec![
            Entry::dir("src", dir.join("src")),
            Entry::file("main.rs", dir.join("main.rs")),
        ]
    });
    let keymap = Keymap::default();
    let mut session = PickerSession::new("/repo", 10);
    session.refresh_now(&engine);
    let calls_before = engine.call_count();

    press(&mut session, &keymap, &engine, KeyCode::Down);
    let outcome = press(&mut session, &keymap, &engine, KeyCode::Enter);

    assert_eq!(
        outcome,
        Some(PickOutcome::Activated(PathBuf::from("/repo/main.rs")))
    );
    assert!(session.is_terminated());
    assert_eq!(engine.call_count(), calls_before);

    // Terminated sessions swallow everything.
    assert!(press(&mut session, &keymap, &engine, KeyCode::Down).is_none());
    assert_eq!(engine.call_count(), calls_before);
}

#[test]
fn empty_directory_results_make_moves_and_activation_noops() {
    let engine = ScriptedEngine::new(|_: &Path, _: &str| Vec::new());
    let keymap = Keymap::default();
    let mut session = PickerSession::new("/empty", 10);
    session.refresh_now(&engine);

    press(&mut session, &keymap, &engine, KeyCode::Down);
    assert_eq!(session.selected(), 0);
    let outcome = press(&mut session, &keymap, &engine, KeyCode::Enter);
    assert!(outcome.is_none());
    assert!(!session.is_terminated());
}

#[test]
fn a_failing_engine_degrades_to_an_empty_live_session() {
    let engine = ScriptedEngine::new(|_: &Path, query: &str| {
        if query.is_empty() {
            vec![Entry::file("main.rs", "/repo/main.rs")]
        } else {
            Vec::new()
        }
    });
    let keymap = Keymap::default();
    let mut session = PickerSession::new("/repo", 10);
    session.refresh_now(&engine);
    assert_eq!(session.results().len(), 1);

    press(&mut session, &keymap, &engine, KeyCode::Char('i'));
    press(&mut session, &keymap, &engine, KeyCode::Char('x'));

    // No stale rows survive the refresh that came back empty.
    assert!(session.results().is_empty());
    assert!(!session.is_terminated());

    press(&mut session, &keymap, &engine, KeyCode::Backspace);
    assert_eq!(session.results().len(), 1);
}

#[test]
fn escape_cancels_from_navigation_mode() {
    let engine = ScriptedEngine::new(|_: &Path, _: &str| Vec::new());
    let keymap = Keymap::default();
    let mut session = PickerSession::new("/repo", 10);
    session.refresh_now(&engine);

    let outcome = press(&mut session, &keymap, &engine, KeyCode::Esc);
    assert_eq!(outcome, Some(PickOutcome::Cancelled));
    assert_eq!(session.mode(), Mode::Navigation);
}

#[test]
fn rendering_reflects_the_session_after_each_step() {
    let engine = ScriptedEngine::new(|dir: &Path, _: &str| {
        vec![
            Entry::dir("src", dir.join("src")),
            Entry::file("main.rs", dir.join("main.rs")),
        ]
    });
    let keymap = Keymap::default();
    let mut session = PickerSession::new("/repo", 5);
    session.refresh_now(&engine);

    let view = render(&session, 60, session.view_rows());
    assert_eq!(view.lines[0], "/repo");
    assert!(view.lines[3].ends_with("src"));

    press(&mut session, &keymap, &engine, KeyCode::Char('i'));
    press(&mut session, &keymap, &engine, KeyCode::Char('m'));
    let view = render(&session, 60, session.view_rows());
    assert!(view.lines[1].contains('m'));
}

#[test]
fn the_bundled_engine_speaks_the_wire_contract() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("src")).unwrap();
    std::fs::write(root.path().join("main.rs"), "fn main() {}").unwrap();
    std::fs::write(root.path().join("notes.txt"), "notes").unwrap();

    let engine = CommandEngine::new(env!("CARGO_BIN_EXE_fpick-engine"));

    let listing = engine.query_entries(root.path(), "");
    let names: Vec<&str> = listing.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, ["src", "main.rs", "notes.txt"]);
    assert!(listing[0].is_dir);
    assert!(listing.iter().all(|entry| entry.path.is_absolute()));

    let ranked = engine.query_entries(root.path(), "main");
    assert!(!ranked.is_empty());
    assert_eq!(ranked[0].name, "main.rs");
}
