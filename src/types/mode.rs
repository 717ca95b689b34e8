/// Input mode of a picker session.
///
/// `Navigation` keys move the selection or trigger activation/back/cancel;
/// `TextEntry` keys edit the query. Switching modes never touches any other
/// session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigation,
    TextEntry,
}

impl Mode {
    #[must_use]
    pub fn is_navigation(self) -> bool {
        self == Mode::Navigation
    }

    #[must_use]
    pub fn is_text_entry(self) -> bool {
        self == Mode::TextEntry
    }
}
