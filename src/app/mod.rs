//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! File I/O never happens in [`update`]. Messages that need it (file
//! commands, dialog confirmation) are handled again after the update by a
//! side-effects step that calls into [`crate::session::commands`].

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::session::{TitleMode, WriteMode};
use crate::ui::style::Theme;

/// Main application struct that owns the terminal and runs the event loop.
#[derive(Debug)]
pub struct App {
    initial_file: Option<PathBuf>,
    title_mode: TitleMode,
    write_mode: WriteMode,
    start_dir: PathBuf,
    theme: Theme,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create an application that starts with an untitled document.
    pub fn new() -> Self {
        Self {
            initial_file: None,
            title_mode: TitleMode::default(),
            write_mode: WriteMode::default(),
            start_dir: PathBuf::from("."),
            theme: Theme::default(),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Open `path` on startup, as if chosen from the Open dialog.
    pub fn with_file(mut self, path: Option<PathBuf>) -> Self {
        self.initial_file = path;
        self
    }

    pub const fn with_title_mode(mut self, mode: TitleMode) -> Self {
        self.title_mode = mode;
        self
    }

    /// Write files through a temporary file and rename.
    pub const fn with_atomic_save(mut self, enabled: bool) -> Self {
        self.write_mode = if enabled {
            WriteMode::Atomic
        } else {
            WriteMode::Direct
        };
        self
    }

    /// Directory the file dialog starts in while the document is untitled.
    pub fn with_start_dir(mut self, dir: PathBuf) -> Self {
        self.start_dir = dir;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
