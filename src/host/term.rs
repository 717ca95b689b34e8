//! Reference terminal host backed by ratatui.
//!
//! "Opening" a file from a terminal has no editor to delegate to, so the
//! host records the activated path and the binary reports it to whatever
//! invoked the picker (an editor wrapper captures the printed path).

use std::path::{Path, PathBuf};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::engine::EngineClient;
use crate::host::theme::Theme;
use crate::host::{SurfaceHost, present};
use crate::input::Keymap;
use crate::render::{self, LineStyle, RESERVED_ROWS};
use crate::session::PickerSession;
use crate::types::PickOutcome;

/// Overlay state for the terminal host: the full terminal area.
#[derive(Debug, Default)]
pub struct TermSurface {
    width: u16,
    lines: Vec<String>,
    highlights: Vec<(usize, LineStyle)>,
}

pub struct TermHost<B: Backend> {
    terminal: Terminal<B>,
    theme: Theme,
    opened: Option<PathBuf>,
}

impl<B: Backend> TermHost<B> {
    pub fn new(terminal: Terminal<B>, theme: Theme) -> Self {
        Self {
            terminal,
            theme,
            opened: None,
        }
    }

    /// Path the host was asked to open, if any.
    #[must_use]
    pub fn opened(&self) -> Option<&Path> {
        self.opened.as_deref()
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> SurfaceHost for TermHost<B> {
    type Surface = TermSurface;

    fn create_overlay(&mut self, width: u16, _height: u16) -> Result<Self::Surface> {
        Ok(TermSurface {
            width,
            ..TermSurface::default()
        })
    }

    fn set_surface_lines(&mut self, surface: &mut Self::Surface, lines: &[String]) -> Result<()> {
        surface.lines = lines.to_vec();
        surface.highlights.clear();
        Ok(())
    }

    fn apply_highlight(
        &mut self,
        surface: &mut Self::Surface,
        line: usize,
        style: LineStyle,
    ) -> Result<()> {
        surface.highlights.push((line, style));
        Ok(())
    }

    fn flush(&mut self, surface: &mut Self::Surface) -> Result<()> {
        let theme = self.theme;
        self.terminal.draw(|frame| {
            let lines: Vec<Line> = surface
                .lines
                .iter()
                .enumerate()
                .map(|(index, text)| {
                    let style = surface
                        .highlights
                        .iter()
                        .rev()
                        .find(|(line, _)| *line == index)
                        .map_or(theme.base, |(_, style)| theme.style_for(*style));
                    Line::styled(text.clone(), style)
                })
                .collect();
            frame.render_widget(Paragraph::new(lines), frame.area());
        })?;
        Ok(())
    }

    fn close_overlay(&mut self, _surface: Self::Surface) -> Result<()> {
        Ok(())
    }

    fn open_file(&mut self, path: &Path) -> Result<()> {
        self.opened = Some(path.to_path_buf());
        Ok(())
    }
}

/// Run a picker session interactively on the controlling terminal.
pub fn run(
    engine: &dyn EngineClient,
    keymap: &Keymap,
    session: PickerSession,
) -> Result<PickOutcome> {
    let terminal = ratatui::init();
    let mut host = TermHost::new(terminal, Theme::default());
    let outcome = drive(&mut host, engine, keymap, session);
    ratatui::restore();

    let outcome = outcome?;
    if let PickOutcome::Activated(path) = &outcome {
        host.open_file(path)?;
    }
    Ok(outcome)
}

fn drive<B: Backend>(
    host: &mut TermHost<B>,
    engine: &dyn EngineClient,
    keymap: &Keymap,
    mut session: PickerSession,
) -> Result<PickOutcome> {
    let size = host.terminal.size()?;
    let mut surface = host.create_overlay(size.width, size.height)?;
    session.resize(result_rows(size.height));
    session.refresh_now(engine);

    loop {
        let view = render::render(&session, surface.width as usize, session.view_rows());
        present(host, &mut surface, &view)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(transition) = keymap.dispatch(session.mode(), &key)
                    && let Some(outcome) = session.apply_with(engine, transition)
                {
                    host.close_overlay(surface)?;
                    return Ok(outcome);
                }
            }
            Event::Resize(width, height) => {
                surface.width = width;
                session.resize(result_rows(height));
            }
            _ => {}
        }
    }
}

fn result_rows(height: u16) -> usize {
    (height as usize).saturating_sub(RESERVED_ROWS).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Entry;
    use ratatui::backend::TestBackend;

    fn test_host() -> TermHost<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        TermHost::new(terminal, Theme::default())
    }

    #[test]
    fn presenting_a_view_draws_its_lines() {
        let mut host = test_host();
        let mut surface = host.create_overlay(40, 10).unwrap();

        let mut session = PickerSession::new("/repo", 5);
        let ticket = session.begin_refresh();
        session.commit_results(
            ticket,
            vec![
                Entry::dir("src", "/repo/src"),
                Entry::file("main.rs", "/repo/main.rs"),
            ],
        );

        let view = render::render(&session, 40, 5);
        present(&mut host, &mut surface, &view).unwrap();

        let screen = host.backend().to_string();
        assert!(screen.contains("/repo"));
        assert!(screen.contains("src"));
        assert!(screen.contains("main.rs"));
    }

    #[test]
    fn open_file_records_the_path() {
        let mut host = test_host();
        host.open_file(Path::new("/repo/main.rs")).unwrap();
        assert_eq!(host.opened(), Some(Path::new("/repo/main.rs")));
    }

    #[test]
    fn result_rows_reserves_the_header_block() {
        assert_eq!(result_rows(10), 7);
        assert_eq!(result_rows(3), 1);
        assert_eq!(result_rows(0), 1);
    }
}
