//! Turns a picker session snapshot into display lines and highlight spans.
//!
//! Rendering is a pure function of the session and the overlay geometry, so
//! hosts can redraw at any time without touching session state.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::session::PickerSession;

/// Lines above the result rows: header, prompt, separator.
pub const RESERVED_ROWS: usize = 3;

const DIR_GLYPH: &str = "\u{1F4C1}"; // 📁
const FILE_GLYPH: &str = "\u{1F4C4}"; // 📄
const CURSOR_MARKER: char = '\u{2588}'; // █

/// Abstract styling applied to a rendered line; hosts map these onto their
/// own highlight machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Header,
    Prompt,
    Selection,
}

/// A renderable snapshot of the overlay contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub lines: Vec<String>,
    pub highlights: Vec<(usize, LineStyle)>,
}

/// Render `session` into an overlay `width` cells wide with `rows` result
/// lines below the header block.
#[must_use]
pub fn render(session: &PickerSession, width: usize, rows: usize) -> View {
    let mut lines = Vec::with_capacity(RESERVED_ROWS + rows);
    let mut highlights = vec![(0, LineStyle::Header), (1, LineStyle::Prompt)];

    lines.push(abbreviate_left(
        &session.working_dir().display().to_string(),
        width,
    ));
    lines.push(abbreviate_left(
        &format!("> {}{CURSOR_MARKER}", session.query()),
        width,
    ));
    lines.push("\u{2500}".repeat(width));

    let start = session.scroll_top();
    let end = (start + rows).min(session.results().len());
    for (row, entry) in session.results()[start..end].iter().enumerate() {
        let glyph = if entry.is_dir { DIR_GLYPH } else { FILE_GLYPH };
        lines.push(truncate_right(&format!("{glyph} {}", entry.name), width));
        if start + row == session.selected() {
            highlights.push((RESERVED_ROWS + row, LineStyle::Selection));
        }
    }

    View { lines, highlights }
}

/// Truncate from the left, keeping the trailing end visible behind an
/// ellipsis. Used for the directory header and the prompt, where the tail
/// carries the information.
fn abbreviate_left(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut budget = max_width - 1;
    let mut kept = Vec::new();
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if w > budget {
            break;
        }
        budget -= w;
        kept.push(c);
    }
    let mut out = String::from("\u{2026}");
    out.extend(kept.iter().rev());
    out
}

/// Truncate from the right with a trailing ellipsis. Used for entry rows.
fn truncate_right(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut budget = max_width - 1;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if w > budget {
            break;
        }
        budget -= w;
        out.push(c);
    }
    out.push('\u{2026}');
    out
}
