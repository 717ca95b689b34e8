//! Maps raw key events to session transitions.
//!
//! Bindings are data: a `(mode, key, modifiers) -> transition` table plus a
//! single fallback that forwards printable characters to the query while in
//! text-entry mode. Unmapped keys in navigation mode are ignored.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::Transition;
use crate::types::Mode;

#[derive(Debug, Clone, Copy)]
struct Binding {
    mode: Mode,
    code: KeyCode,
    modifiers: KeyModifiers,
    transition: Transition,
}

/// The mode-dependent key table.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<Binding>,
}

impl Default for Keymap {
    fn default() -> Self {
        use KeyCode::*;
        use Mode::*;
        use Transition::*;

        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        let bind = |mode, code, modifiers, transition| Binding {
            mode,
            code,
            modifiers,
            transition,
        };

        Self {
            bindings: vec![
                bind(Navigation, Char('q'), none, Cancel),
                bind(Navigation, Esc, none, Cancel),
                bind(Navigation, Char('j'), none, MoveDown),
                bind(Navigation, Down, none, MoveDown),
                bind(Navigation, Char('k'), none, MoveUp),
                bind(Navigation, Up, none, MoveUp),
                bind(Navigation, Char('g'), none, SelectFirst),
                bind(Navigation, Home, none, SelectFirst),
                bind(Navigation, Char('G'), none, SelectLast),
                bind(Navigation, End, none, SelectLast),
                bind(Navigation, Char('d'), ctrl, HalfPageDown),
                bind(Navigation, PageDown, none, HalfPageDown),
                bind(Navigation, Char('u'), ctrl, HalfPageUp),
                bind(Navigation, PageUp, none, HalfPageUp),
                bind(Navigation, Enter, none, Activate),
                bind(Navigation, Char('l'), none, Activate),
                bind(Navigation, Right, none, Activate),
                bind(Navigation, Char('h'), none, GoBack),
                bind(Navigation, Left, none, GoBack),
                bind(Navigation, Backspace, none, GoBack),
                bind(Navigation, Char('i'), none, SwitchMode(TextEntry)),
                bind(Navigation, Char('/'), none, SwitchMode(TextEntry)),
                bind(TextEntry, Esc, none, SwitchMode(Navigation)),
                bind(TextEntry, Enter, none, Activate),
                bind(TextEntry, Backspace, none, DeleteChar),
                bind(TextEntry, Char('u'), ctrl, ClearQuery),
            ],
        }
    }
}

impl Keymap {
    /// Resolve a key event against the current mode.
    #[must_use]
    pub fn dispatch(&self, mode: Mode, key: &KeyEvent) -> Option<Transition> {
        let modifiers = normalized_modifiers(key);
        for binding in &self.bindings {
            if binding.mode == mode && binding.code == key.code && binding.modifiers == modifiers {
                return Some(binding.transition);
            }
        }

        // Anything printable falls through to the query while typing.
        if mode.is_text_entry()
            && let KeyCode::Char(c) = key.code
            && !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return Some(Transition::TypeChar(c));
        }

        None
    }
}

/// Shifted characters already carry the shift in the `char` itself.
fn normalized_modifiers(key: &KeyEvent) -> KeyModifiers {
    match key.code {
        KeyCode::Char(_) => key.modifiers.difference(KeyModifiers::SHIFT),
        _ => key.modifiers,
    }
}
