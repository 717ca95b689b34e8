use ratatui::style::{Color, Modifier, Style};

use crate::render::LineStyle;

/// Styles the terminal host maps the abstract line styles onto.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub header: Style,
    pub prompt: Style,
    pub selection: Style,
    pub base: Style,
}

pub const SLATE: Theme = Theme {
    header: Style::new()
        .fg(Color::Rgb(226, 232, 240))
        .bg(Color::Rgb(15, 23, 42)),
    prompt: Style::new().fg(Color::LightCyan),
    selection: Style::new()
        .bg(Color::Rgb(30, 41, 59))
        .fg(Color::Rgb(250, 204, 21))
        .add_modifier(Modifier::BOLD),
    base: Style::new(),
};

impl Default for Theme {
    fn default() -> Self {
        SLATE
    }
}

impl Theme {
    #[must_use]
    pub fn style_for(&self, style: LineStyle) -> Style {
        match style {
            LineStyle::Header => self.header,
            LineStyle::Prompt => self.prompt,
            LineStyle::Selection => self.selection,
        }
    }
}
