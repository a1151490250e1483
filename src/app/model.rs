use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::dialog::FileDialog;
use crate::menu::FileMenu;
use crate::session::{Notice, Session};
use crate::ui::style::Theme;
use crate::ui::{ScreenLayout, screen_layout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The document being edited, its file and title
    pub session: Session,
    /// `File` menu dropdown state
    pub menu: FileMenu,
    /// Open/Save dialog, when one is showing
    pub dialog: Option<FileDialog>,
    /// Pending modal messages; the first one is showing
    pub notices: Vec<Notice>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Scroll offset for the editor viewport (line index of first visible line)
    pub editor_scroll_offset: usize,
    /// Scroll offset for the preview pane (rendered line index)
    pub preview_scroll_offset: usize,
    /// Terminal size (columns, rows)
    pub terminal_size: (u16, u16),
    /// Directory dialogs start in when no file is associated
    pub start_dir: PathBuf,
    /// Colors for preview and chrome
    pub theme: Theme,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Set after first quit attempt with unsaved changes; allows second quit to proceed
    pub quit_confirmed: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("session", &self.session)
            .field("menu", &self.menu)
            .field("dialog_open", &self.dialog.is_some())
            .field("notices", &self.notices)
            .field("terminal_size", &self.terminal_size)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model around `session` for a terminal of the given size.
    pub fn new(session: Session, terminal_size: (u16, u16)) -> Self {
        let mut model = Self {
            session,
            terminal_size,
            ..Self::default()
        };
        model.sync_preview_width();
        model
    }

    /// Lay the preview out for the current terminal width.
    pub(super) fn sync_preview_width(&mut self) {
        let width = crate::ui::preview_content_width(self.terminal_size.0);
        self.session.set_preview_width(width);
        self.clamp_preview_scroll();
    }

    pub fn screen(&self) -> ScreenLayout {
        let area = Rect::new(0, 0, self.terminal_size.0, self.terminal_size.1);
        screen_layout(area, self.active_toast().is_some())
    }

    /// Number of text rows in the editor pane.
    pub fn editor_rows(&self) -> usize {
        usize::from(crate::ui::pane_inner(self.screen().editor).height)
    }

    /// Number of text rows in the preview pane.
    pub fn preview_rows(&self) -> usize {
        usize::from(crate::ui::pane_inner(self.screen().preview).height)
    }

    pub fn max_preview_scroll(&self) -> usize {
        self.session
            .preview()
            .line_count()
            .saturating_sub(self.preview_rows())
    }

    pub(super) fn clamp_preview_scroll(&mut self) {
        self.preview_scroll_offset = self.preview_scroll_offset.min(self.max_preview_scroll());
    }

    /// Scroll the editor so the cursor line is visible.
    pub(super) fn ensure_cursor_visible(&mut self) {
        let cursor_line = self.session.buffer().cursor().line;
        let visible_height = self.editor_rows();
        if visible_height == 0 {
            self.editor_scroll_offset = cursor_line;
            return;
        }

        if cursor_line < self.editor_scroll_offset {
            self.editor_scroll_offset = cursor_line;
        } else if cursor_line >= self.editor_scroll_offset + visible_height {
            self.editor_scroll_offset = cursor_line + 1 - visible_height;
        }
    }

    /// The modal message currently showing.
    pub fn active_notice(&self) -> Option<&Notice> {
        self.notices.first()
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Directory the Open/Save dialog starts in.
    pub fn dialog_start_dir(&self) -> PathBuf {
        self.session
            .current_file()
            .and_then(|file| file.parent_dir())
            .map_or_else(|| self.start_dir.clone(), std::path::Path::to_path_buf)
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self {
            session: Session::default(),
            menu: FileMenu::default(),
            dialog: None,
            notices: Vec::new(),
            help_visible: false,
            editor_scroll_offset: 0,
            preview_scroll_offset: 0,
            terminal_size: (80, 24),
            start_dir: PathBuf::from("."),
            theme: Theme::default(),
            config_global_path: None,
            config_local_path: None,
            toast: None,
            should_quit: false,
            quit_confirmed: false,
        }
    }
}
