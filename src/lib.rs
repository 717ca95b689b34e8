//! Core crate exports for building and embedding the `fpick` file picker.
//!
//! The root module re-exports the session controller, its collaborators, and
//! the host capability trait so that embedders can wire a picker into their
//! editor without digging through the module hierarchy.

pub mod app_dirs;
pub mod engine;
pub mod host;
pub mod input;
pub mod logging;
pub mod nav;
pub mod render;
pub mod session;
pub mod types;

pub use engine::{CommandEngine, EngineClient};
pub use host::{SurfaceHost, present};
pub use input::Keymap;
pub use render::{LineStyle, View, render};
pub use session::{Applied, PickerSession, RefreshTicket, Transition};
pub use types::{Entry, Mode, PickOutcome};
