//! The editor session: document text, preview, associated file and title.
//!
//! A [`Session`] is constructed once by the application and handed by
//! reference to the command handlers in [`commands`]. All state the file
//! commands touch lives here.

pub mod commands;
mod error;
mod file;
mod storage;
mod title;

pub use commands::{
    CommandOutcome, Notice, Notifier, OpenSelection, SaveTarget, complete_open,
    complete_save_as, save,
};
pub use error::{DialogError, SessionError};
pub use file::{DEFAULT_FILE_NAME, ExtensionFilter, FileRef};
pub use storage::{FileSink, WriteMode};
pub use title::{APP_NAME, TitleMode, WindowTitle};

use crate::document::{self, DEFAULT_WIDTH, Document};
use crate::editor::EditorBuffer;

/// In-memory state of the single open document.
#[derive(Debug)]
pub struct Session {
    buffer: EditorBuffer,
    preview: Document,
    preview_width: u16,
    rendered_revision: u64,
    file: Option<FileRef>,
    title: WindowTitle,
    write_mode: WriteMode,
    filter: ExtensionFilter,
}

impl Session {
    /// Start an untitled session with an empty document.
    pub fn new(title_mode: TitleMode, write_mode: WriteMode) -> Self {
        let buffer = EditorBuffer::empty();
        Self {
            preview: document::render("", DEFAULT_WIDTH),
            preview_width: DEFAULT_WIDTH,
            rendered_revision: buffer.revision(),
            buffer,
            file: None,
            title: WindowTitle::new(title_mode),
            write_mode,
            filter: ExtensionFilter::markdown(),
        }
    }

    pub const fn buffer(&self) -> &EditorBuffer {
        &self.buffer
    }

    /// The current document text.
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Apply an edit to the buffer and re-render the preview if the text
    /// changed.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut EditorBuffer) -> R) -> R {
        let result = f(&mut self.buffer);
        if self.buffer.revision() != self.rendered_revision {
            self.rerender();
        }
        result
    }

    /// The rendered preview of the current text.
    pub const fn preview(&self) -> &Document {
        &self.preview
    }

    pub const fn preview_width(&self) -> u16 {
        self.preview_width
    }

    /// Lay the preview out again for a new pane width.
    pub fn set_preview_width(&mut self, width: u16) {
        let width = width.max(1);
        if width != self.preview_width {
            self.preview_width = width;
            self.rerender();
        }
    }

    pub const fn current_file(&self) -> Option<&FileRef> {
        self.file.as_ref()
    }

    /// Whether Save can write without asking for a location.
    pub const fn save_enabled(&self) -> bool {
        self.file.is_some()
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub const fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    pub const fn filter(&self) -> &ExtensionFilter {
        &self.filter
    }

    pub const fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// File name offered by the Save-As dialog.
    pub fn suggested_file_name(&self) -> String {
        self.file
            .as_ref()
            .map_or_else(|| DEFAULT_FILE_NAME.to_string(), FileRef::name)
    }

    fn load(&mut self, text: &str) {
        self.buffer.replace_text(text);
        self.rerender();
    }

    fn associate(&mut self, file: FileRef) {
        self.title.associate(&file.name());
        self.file = Some(file);
    }

    fn rerender(&mut self) {
        self.preview = document::render(&self.buffer.text(), self.preview_width);
        self.rendered_revision = self.buffer.revision();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(TitleMode::default(), WriteMode::default())
    }
}
