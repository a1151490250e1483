// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorBuffer)
    clippy::module_name_repetitions
)]

//! # Markedly
//!
//! A two-pane terminal markdown editor with live preview.
//!
//! The left pane is a plain-text editor; the right pane shows the rendered
//! markdown and is refreshed on every edit. A `File` menu offers Open,
//! Save and Save As, driven by an in-terminal file dialog filtered to
//! `.md` files.
//!
//! ## Architecture
//!
//! Markedly uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! File I/O lives outside the update function, in the session command
//! handlers.
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`session`]: The open document, its file and the file commands
//! - [`editor`]: Rope-backed text buffer with a cursor
//! - [`document`]: Markdown rendering for the preview
//! - [`dialog`]: In-terminal Open/Save file dialog
//! - [`menu`]: The `File` menu
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod config;
pub mod dialog;
pub mod document;
pub mod editor;
pub mod menu;
pub mod session;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::Document;
    pub use crate::editor::EditorBuffer;
    pub use crate::session::Session;
}
