//! Modal file dialog drawn inside the terminal.
//!
//! The dialog only lists directories and resolves what the user picked. It
//! never reads or writes the chosen file; the caller turns a confirmed path
//! into an [`OpenSelection`](crate::session::OpenSelection) or
//! [`SaveTarget`](crate::session::SaveTarget).

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::session::{DialogError, ExtensionFilter};

/// Which file command the dialog is collecting a location for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Open,
    Save,
}

impl DialogMode {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Open => "Open File",
            Self::Save => "Save File",
        }
    }

    pub const fn confirm_label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Save => "Save",
        }
    }
}

/// A directory entry shown in the dialog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Display name (file name or "..")
    pub name: String,
    /// Full path to the entry
    pub path: PathBuf,
    /// Whether this entry is a directory
    pub is_dir: bool,
}

/// Where Enter takes its target from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogFocus {
    List,
    Input,
}

/// Result of [`FileDialog::activate`].
#[derive(Debug)]
pub enum DialogStep {
    /// The dialog stays open.
    Continue,
    /// The user confirmed this path.
    Confirm(PathBuf),
    /// A directory could not be listed.
    Failed(DialogError),
}

#[derive(Debug, Clone)]
pub struct FileDialog {
    mode: DialogMode,
    dir: PathBuf,
    entries: Vec<DirEntry>,
    selected: usize,
    input: String,
    focus: DialogFocus,
    hint: Option<String>,
    filter: ExtensionFilter,
}

impl FileDialog {
    /// Open a dialog listing `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`DialogError::ReadDir`] when `dir` cannot be listed.
    pub fn new(mode: DialogMode, dir: &Path, filter: ExtensionFilter) -> Result<Self, DialogError> {
        let mut dialog = Self {
            mode,
            dir: dir.to_path_buf(),
            entries: Vec::new(),
            selected: 0,
            input: String::new(),
            focus: DialogFocus::List,
            hint: None,
            filter,
        };
        dialog.load_directory(dir)?;
        Ok(dialog)
    }

    /// Pre-fill the file name field and give it focus.
    #[must_use]
    pub fn with_input(mut self, name: &str) -> Self {
        self.input = name.to_string();
        self.focus = DialogFocus::Input;
        self
    }

    pub const fn mode(&self) -> DialogMode {
        self.mode
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    pub const fn selected(&self) -> usize {
        self.selected
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub const fn focus(&self) -> DialogFocus {
        self.focus
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub const fn filter(&self) -> &ExtensionFilter {
        &self.filter
    }

    pub fn select_next(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1).min(self.entries.len() - 1);
        }
        self.focus = DialogFocus::List;
        self.hint = None;
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.focus = DialogFocus::List;
        self.hint = None;
    }

    /// Select an entry by index, e.g. from a mouse click.
    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.selected = index;
            self.focus = DialogFocus::List;
            self.hint = None;
        }
    }

    pub fn push_char(&mut self, ch: char) {
        self.input.push(ch);
        self.focus = DialogFocus::Input;
        self.hint = None;
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
        self.focus = DialogFocus::Input;
        self.hint = None;
    }

    /// First entry index shown when the listing has `rows` visible rows.
    pub const fn window_start(&self, rows: usize) -> usize {
        if rows == 0 || self.selected < rows {
            0
        } else {
            self.selected + 1 - rows
        }
    }

    /// Act on Enter: navigate into a directory or confirm a file.
    pub fn activate(&mut self) -> DialogStep {
        let typed = self.input.trim();
        if self.focus == DialogFocus::Input && !typed.is_empty() {
            let path = resolve_input(&self.dir, typed, home_dir().as_deref());
            return self.activate_path(path, true);
        }

        let Some(entry) = self.entries.get(self.selected).cloned() else {
            if self.mode == DialogMode::Save {
                self.hint = Some("Type a file name".to_string());
            }
            return DialogStep::Continue;
        };
        self.activate_path(entry.path, false)
    }

    fn activate_path(&mut self, path: PathBuf, typed: bool) -> DialogStep {
        if path.is_dir() {
            return match self.load_directory(&path) {
                Ok(()) => {
                    if typed {
                        self.input.clear();
                        self.focus = DialogFocus::List;
                    }
                    DialogStep::Continue
                }
                Err(err) => DialogStep::Failed(err),
            };
        }

        match self.mode {
            DialogMode::Open if !path.is_file() => {
                self.hint = Some(format!("No such file: {}", path.display()));
                DialogStep::Continue
            }
            DialogMode::Open if !self.filter.matches_path(&path) => {
                self.hint = Some(format!("Not a markdown file ({})", self.filter.describe()));
                DialogStep::Continue
            }
            DialogMode::Open | DialogMode::Save => {
                debug!(path = %path.display(), mode = ?self.mode, "dialog confirmed");
                DialogStep::Confirm(path)
            }
        }
    }

    /// Scan a directory and replace the listing.
    fn load_directory(&mut self, dir: &Path) -> Result<(), DialogError> {
        let dir = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        let read_err = |source| DialogError::ReadDir {
            path: dir.clone(),
            source,
        };

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            let path = entry.path();
            let is_dir = entry.file_type().map_err(read_err)?.is_dir() || path.is_dir();
            if is_dir {
                dirs.push(DirEntry { name, path, is_dir });
            } else if self.filter.matches(&name) {
                files.push(DirEntry {
                    name,
                    path,
                    is_dir: false,
                });
            }
        }
        dirs.sort_by_key(|e| e.name.to_lowercase());
        files.sort_by_key(|e| e.name.to_lowercase());

        self.entries.clear();
        if let Some(parent) = dir.parent() {
            self.entries.push(DirEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
            });
        }
        self.entries.extend(dirs);
        self.entries.extend(files);
        debug!(dir = %dir.display(), entries = self.entries.len(), "dialog listed directory");

        self.selected = 0;
        self.hint = None;
        self.dir = dir;
        Ok(())
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Resolve a typed name against the dialog directory.
///
/// Absolute paths are kept, `~/` expands to `home` when known, anything
/// else is joined onto `dir`.
pub fn resolve_input(dir: &Path, input: &str, home: Option<&Path>) -> PathBuf {
    if let (Some(rest), Some(home)) = (input.strip_prefix("~/"), home) {
        return home.join(rest);
    }
    if input == "~"
        && let Some(home) = home
    {
        return home.to_path_buf();
    }
    let path = Path::new(input);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        dir.join(path)
    }
}
