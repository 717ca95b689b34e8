//! Picker session state machine.
//!
//! One `PickerSession` owns everything a picker overlay displays: the query,
//! the browse directory, the ranked results, the selection cursor, and the
//! scroll window. Hosts feed it [`Transition`]s; the session hands back
//! refresh tickets whenever the query or directory changed, and only the
//! newest ticket is allowed to commit its results.

use std::path::{Path, PathBuf};

use log::debug;

use crate::engine::EngineClient;
use crate::nav;
use crate::types::{Entry, Mode, PickOutcome};

/// A state transition requested by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    TypeChar(char),
    DeleteChar,
    ClearQuery,
    MoveUp,
    MoveDown,
    SelectFirst,
    SelectLast,
    HalfPageUp,
    HalfPageDown,
    Activate,
    GoBack,
    SwitchMode(Mode),
    Cancel,
}

/// Permission slip for one refresh: carries the query and directory it was
/// issued for. A ticket commits only while it is still the newest one.
#[derive(Debug)]
pub struct RefreshTicket {
    id: u64,
    query: String,
    dir: PathBuf,
}

impl RefreshTicket {
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// What applying a transition produced.
#[derive(Debug, Default)]
pub struct Applied {
    /// Terminal outcome, when the transition ended the session.
    pub outcome: Option<PickOutcome>,
    /// Refresh to perform, when the transition changed query or directory.
    pub refresh: Option<RefreshTicket>,
}

impl Applied {
    fn refresh(ticket: RefreshTicket) -> Self {
        Self {
            outcome: None,
            refresh: Some(ticket),
        }
    }
}

pub struct PickerSession {
    working_dir: PathBuf,
    query: String,
    results: Vec<Entry>,
    selected: usize,
    scroll_top: usize,
    view_rows: usize,
    mode: Mode,
    outcome: Option<PickOutcome>,
    next_ticket_id: u64,
    live_ticket_id: u64,
}

impl PickerSession {
    /// Open a session browsing `working_dir` with a viewport of `view_rows`
    /// result lines.
    #[must_use]
    pub fn new(working_dir: impl Into<PathBuf>, view_rows: usize) -> Self {
        Self {
            working_dir: working_dir.into(),
            query: String::new(),
            results: Vec::new(),
            selected: 0,
            scroll_top: 0,
            view_rows: view_rows.max(1),
            mode: Mode::Navigation,
            outcome: None,
            next_ticket_id: 0,
            live_ticket_id: 0,
        }
    }

    /// Seed the query shown when the picker opens.
    #[must_use]
    pub fn with_initial_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn results(&self) -> &[Entry] {
        &self.results
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The entry under the cursor, if any.
    #[must_use]
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.results.get(self.selected)
    }

    #[must_use]
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    #[must_use]
    pub fn view_rows(&self) -> usize {
        self.view_rows
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&PickOutcome> {
        self.outcome.as_ref()
    }

    /// Apply one transition. Invalid operations (moving on an empty list,
    /// deleting from an empty query, mode-mismatched input, anything after
    /// termination) are no-ops, never errors.
    pub fn apply(&mut self, transition: Transition) -> Applied {
        if self.outcome.is_some() {
            return Applied::default();
        }

        match transition {
            Transition::TypeChar(c) if self.mode.is_text_entry() => {
                self.query.push(c);
                Applied::refresh(self.begin_refresh())
            }
            Transition::DeleteChar if self.mode.is_text_entry() => {
                if self.query.pop().is_some() {
                    Applied::refresh(self.begin_refresh())
                } else {
                    Applied::default()
                }
            }
            Transition::ClearQuery if self.mode.is_text_entry() => {
                if self.query.is_empty() {
                    Applied::default()
                } else {
                    self.query.clear();
                    Applied::refresh(self.begin_refresh())
                }
            }
            Transition::MoveUp if self.mode.is_navigation() => {
                self.move_selection(-1);
                Applied::default()
            }
            Transition::MoveDown if self.mode.is_navigation() => {
                self.move_selection(1);
                Applied::default()
            }
            Transition::SelectFirst if self.mode.is_navigation() => {
                self.select_index(0);
                Applied::default()
            }
            Transition::SelectLast if self.mode.is_navigation() => {
                self.select_index(self.results.len().saturating_sub(1));
                Applied::default()
            }
            Transition::HalfPageUp if self.mode.is_navigation() => {
                self.move_selection(-self.half_page());
                Applied::default()
            }
            Transition::HalfPageDown if self.mode.is_navigation() => {
                self.move_selection(self.half_page());
                Applied::default()
            }
            Transition::Activate => self.activate(),
            Transition::GoBack => Applied {
                outcome: None,
                refresh: nav::go_back(self),
            },
            Transition::SwitchMode(mode) => {
                self.mode = mode;
                Applied::default()
            }
            Transition::Cancel => {
                self.outcome = Some(PickOutcome::Cancelled);
                Applied {
                    outcome: Some(PickOutcome::Cancelled),
                    refresh: None,
                }
            }
            _ => Applied::default(),
        }
    }

    /// Apply a transition and service any refresh it produced by blocking on
    /// the engine. Returns the terminal outcome when the session ended.
    pub fn apply_with<E>(&mut self, engine: &E, transition: Transition) -> Option<PickOutcome>
    where
        E: EngineClient + ?Sized,
    {
        let applied = self.apply(transition);
        if let Some(ticket) = applied.refresh {
            let entries = engine.query_entries(ticket.dir(), ticket.query());
            self.commit_results(ticket, entries);
        }
        applied.outcome
    }

    /// Block on the engine for the current query and directory. Used for the
    /// initial population when the overlay opens.
    pub fn refresh_now<E>(&mut self, engine: &E)
    where
        E: EngineClient + ?Sized,
    {
        let ticket = self.begin_refresh();
        let entries = engine.query_entries(ticket.dir(), ticket.query());
        self.commit_results(ticket, entries);
    }

    /// Issue a refresh ticket for the current query and directory. Every call
    /// invalidates all previously issued tickets.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.next_ticket_id += 1;
        self.live_ticket_id = self.next_ticket_id;
        RefreshTicket {
            id: self.next_ticket_id,
            query: self.query.clone(),
            dir: self.working_dir.clone(),
        }
    }

    /// Commit the entries for `ticket`. Returns false (and changes nothing)
    /// when the ticket has been superseded or the session already ended.
    pub fn commit_results(&mut self, ticket: RefreshTicket, entries: Vec<Entry>) -> bool {
        if self.outcome.is_some() || ticket.id != self.live_ticket_id {
            debug!(
                "dropping superseded results for query {:?} in {}",
                ticket.query,
                ticket.dir.display()
            );
            return false;
        }
        self.results = entries;
        self.selected = 0;
        self.scroll_top = 0;
        true
    }

    /// Resize the result viewport, keeping the cursor visible.
    pub fn resize(&mut self, view_rows: usize) {
        self.view_rows = view_rows.max(1);
        self.keep_selection_visible();
    }

    /// Replace the browse directory and reset session-local state. The
    /// navigator is the only caller; it has already validated the target.
    pub(crate) fn navigate_to(&mut self, dir: PathBuf) -> RefreshTicket {
        self.working_dir = dir;
        self.query.clear();
        self.results.clear();
        self.selected = 0;
        self.scroll_top = 0;
        self.begin_refresh()
    }

    fn activate(&mut self) -> Applied {
        let Some(entry) = self.results.get(self.selected) else {
            return Applied::default();
        };
        if entry.is_dir {
            let target = entry.path.clone();
            Applied {
                outcome: None,
                refresh: nav::enter(self, &target),
            }
        } else {
            let outcome = PickOutcome::Activated(entry.path.clone());
            self.outcome = Some(outcome.clone());
            Applied {
                outcome: Some(outcome),
                refresh: None,
            }
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.results.is_empty() {
            return;
        }
        let max = self.results.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(max);
        self.keep_selection_visible();
    }

    fn select_index(&mut self, index: usize) {
        if self.results.is_empty() {
            return;
        }
        self.selected = index.min(self.results.len() - 1);
        self.keep_selection_visible();
    }

    fn half_page(&self) -> isize {
        (self.view_rows / 2) as isize
    }

    fn keep_selection_visible(&mut self) {
        if self.selected < self.scroll_top {
            self.scroll_top = self.selected;
        } else if self.selected >= self.scroll_top + self.view_rows {
            self.scroll_top = self.selected + 1 - self.view_rows;
        }
    }
}
