//! Host-editor capability surface.
//!
//! The picker never talks to a window system directly: it renders through
//! [`SurfaceHost`], a small trait an embedding editor implements. The
//! [`term`] module ships a ratatui-backed reference host so the `fpick`
//! binary works in a plain terminal.
//!
//! Key binding is intentionally absent from the trait: hosts feed raw key
//! events through [`crate::input::Keymap::dispatch`] rather than registering
//! per-key callbacks.

pub mod term;
pub mod theme;

use std::path::Path;

use anyhow::Result;

use crate::render::{LineStyle, View};

/// Overlay operations the picker needs from its host.
pub trait SurfaceHost {
    type Surface;

    /// Open an overlay region of the given size.
    fn create_overlay(&mut self, width: u16, height: u16) -> Result<Self::Surface>;

    /// Replace the overlay's visible lines.
    fn set_surface_lines(&mut self, surface: &mut Self::Surface, lines: &[String]) -> Result<()>;

    /// Style one line of the overlay.
    fn apply_highlight(
        &mut self,
        surface: &mut Self::Surface,
        line: usize,
        style: LineStyle,
    ) -> Result<()>;

    /// Push pending lines and highlights to the display. Hosts that apply
    /// changes immediately can keep the default.
    fn flush(&mut self, _surface: &mut Self::Surface) -> Result<()> {
        Ok(())
    }

    /// Tear the overlay down.
    fn close_overlay(&mut self, surface: Self::Surface) -> Result<()>;

    /// Open the activated file in the host editor.
    fn open_file(&mut self, path: &Path) -> Result<()>;
}

/// Push a rendered view onto a surface: lines first, then highlights.
pub fn present<H>(host: &mut H, surface: &mut H::Surface, view: &View) -> Result<()>
where
    H: SurfaceHost + ?Sized,
{
    host.set_surface_lines(surface, &view.lines)?;
    for (line, style) in &view.highlights {
        host.apply_highlight(surface, *line, *style)?;
    }
    host.flush(surface)
}
