//! File menu commands.
//!
//! Each handler receives the session, the result of the file dialog it
//! depends on, and a [`Notifier`] for modal messages. Handlers never
//! leave the session half-updated: every check and every I/O step runs
//! before the first mutation.

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use super::storage::{FileSink, read_text};
use super::{DialogError, FileRef, Session, SessionError};

/// Modal message sink, implemented by the UI.
pub trait Notifier {
    /// Show a blocking error message.
    fn error(&mut self, err: &dyn Error);
    /// Show a blocking informational message.
    fn information(&mut self, title: &str, message: &str);
}

/// A modal message, as recorded by the [`Notifier`] impl for `Vec<Notice>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Information { title: String, message: String },
}

impl Notifier for Vec<Notice> {
    fn error(&mut self, err: &dyn Error) {
        self.push(Notice::Error(err.to_string()));
    }

    fn information(&mut self, title: &str, message: &str) {
        self.push(Notice::Information {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

/// A file chosen in the Open dialog, already opened for reading.
pub struct OpenSelection {
    pub location: FileRef,
    pub reader: Box<dyn Read>,
}

impl OpenSelection {
    /// Open `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns [`DialogError::Open`] when the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self, DialogError> {
        let file = File::open(path).map_err(|source| DialogError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            location: FileRef::new(path),
            reader: Box::new(file),
        })
    }
}

impl fmt::Debug for OpenSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenSelection")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

/// A location chosen in the Save-As dialog. Nothing has been created yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTarget {
    pub location: FileRef,
}

impl SaveTarget {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            location: FileRef::new(path),
        }
    }
}

/// What a command handler did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command ran to completion.
    Completed,
    /// The user dismissed the dialog.
    Cancelled,
    /// The selection failed validation; the user was told why.
    Rejected,
    /// A dialog or I/O error was reported.
    Failed,
    /// Save has no location yet; the caller must run Save-As.
    NeedsSaveAs,
}

/// Finish the Open command with the dialog's selection.
pub fn complete_open(
    session: &mut Session,
    selection: Result<Option<OpenSelection>, DialogError>,
    notifier: &mut impl Notifier,
) -> CommandOutcome {
    let selection = match selection {
        Ok(Some(selection)) => selection,
        Ok(None) => {
            debug!("open cancelled");
            return CommandOutcome::Cancelled;
        }
        Err(err) => {
            warn!(error = %err, "open dialog failed");
            notifier.error(&err);
            return CommandOutcome::Failed;
        }
    };

    let OpenSelection {
        location,
        mut reader,
    } = selection;
    let text = match read_text(reader.as_mut()) {
        Ok(Ok(text)) => text,
        Ok(Err(_)) => {
            let err = SessionError::NotUtf8 {
                path: location.path().to_path_buf(),
            };
            warn!(error = %err, "open failed");
            notifier.error(&err);
            return CommandOutcome::Failed;
        }
        Err(source) => {
            let err = SessionError::Read {
                path: location.path().to_path_buf(),
                source,
            };
            warn!(error = %err, "open failed");
            notifier.error(&err);
            return CommandOutcome::Failed;
        }
    };
    drop(reader);

    info!(path = %location, bytes = text.len(), "opened document");
    session.load(&text);
    session.associate(location);
    CommandOutcome::Completed
}

/// Save to the associated file, or ask for Save-As when there is none.
pub fn save(session: &mut Session, notifier: &mut impl Notifier) -> CommandOutcome {
    let Some(location) = session.current_file().cloned() else {
        debug!("save without a file, delegating to save-as");
        return CommandOutcome::NeedsSaveAs;
    };

    match write_document(session, &location) {
        Ok(bytes) => {
            info!(path = %location, bytes, "saved document");
            session.buffer.mark_clean();
            CommandOutcome::Completed
        }
        Err(err) => {
            warn!(error = %err, "save failed");
            notifier.error(&err);
            CommandOutcome::Failed
        }
    }
}

/// Finish the Save-As command with the dialog's selection.
pub fn complete_save_as(
    session: &mut Session,
    selection: Result<Option<SaveTarget>, DialogError>,
    notifier: &mut impl Notifier,
) -> CommandOutcome {
    let (target, dialog_failed) = match selection {
        Ok(target) => (target, false),
        Err(err) => {
            warn!(error = %err, "save dialog failed");
            notifier.error(&err);
            (None, true)
        }
    };
    let Some(SaveTarget { location }) = target else {
        if dialog_failed {
            return CommandOutcome::Failed;
        }
        debug!("save-as cancelled");
        return CommandOutcome::Cancelled;
    };

    if !session.filter().matches(&location.name()) {
        warn!(path = %location, "save-as rejected, not a markdown file name");
        notifier.information("Invalid file name", "File extension must be .md");
        return CommandOutcome::Rejected;
    }

    match write_document(session, &location) {
        Ok(bytes) => {
            info!(path = %location, bytes, "saved document as");
            session.buffer.mark_clean();
            session.associate(location);
            CommandOutcome::Completed
        }
        Err(err) => {
            warn!(error = %err, "save-as failed");
            notifier.error(&err);
            CommandOutcome::Failed
        }
    }
}

fn write_document(session: &Session, location: &FileRef) -> Result<usize, SessionError> {
    let text = session.text();
    let to_error = |source| SessionError::Write {
        path: location.path().to_path_buf(),
        source,
    };
    FileSink::create(location.path(), session.write_mode())
        .map_err(to_error)?
        .commit(&text)
        .map_err(to_error)?;
    Ok(text.len())
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::session::{TitleMode, WriteMode};

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    fn selection_from(name: &str, body: &'static [u8]) -> OpenSelection {
        OpenSelection {
            location: FileRef::new(name),
            reader: Box::new(body),
        }
    }

    #[test]
    fn test_open_replaces_text_and_enables_save() {
        let mut session = Session::default();
        let mut notices = Vec::new();
        let outcome = complete_open(
            &mut session,
            Ok(Some(selection_from("notes.md", b"body text"))),
            &mut notices,
        );
        assert_eq!(outcome, CommandOutcome::Completed);
        assert_eq!(session.text(), "body text");
        assert!(session.save_enabled());
        assert_eq!(session.current_file().unwrap().name(), "notes.md");
        assert_eq!(session.title(), "Markedly - notes.md");
        assert!(!session.is_dirty());
        assert!(notices.is_empty());
    }

    #[test]
    fn test_open_cancel_is_silent_noop() {
        let mut session = Session::default();
        session.edit(|buf| buf.insert_str("keep"));
        let mut notices = Vec::new();
        let outcome = complete_open(&mut session, Ok(None), &mut notices);
        assert_eq!(outcome, CommandOutcome::Cancelled);
        assert_eq!(session.text(), "keep");
        assert!(notices.is_empty());
    }

    #[test]
    fn test_open_read_failure_keeps_state() {
        let mut session = Session::default();
        session.edit(|buf| buf.insert_str("keep"));
        let mut notices = Vec::new();
        let outcome = complete_open(
            &mut session,
            Ok(Some(OpenSelection {
                location: FileRef::new("broken.md"),
                reader: Box::new(FailingReader),
            })),
            &mut notices,
        );
        assert_eq!(outcome, CommandOutcome::Failed);
        assert_eq!(session.text(), "keep");
        assert!(!session.save_enabled());
        assert_eq!(session.title(), "Markedly");
        assert!(matches!(&notices[..], [Notice::Error(msg)] if msg.contains("disk on fire")));
    }

    #[test]
    fn test_open_rejects_invalid_utf8() {
        let mut session = Session::default();
        let mut notices = Vec::new();
        let outcome = complete_open(
            &mut session,
            Ok(Some(selection_from("binary.md", &[0xff, 0x00, 0xfe]))),
            &mut notices,
        );
        assert_eq!(outcome, CommandOutcome::Failed);
        assert!(session.current_file().is_none());
        assert!(matches!(&notices[..], [Notice::Error(msg)] if msg.contains("UTF-8")));
    }

    #[test]
    fn test_open_dialog_error_is_reported() {
        let mut session = Session::default();
        let mut notices = Vec::new();
        let err = DialogError::Open {
            path: "gone.md".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let outcome = complete_open(&mut session, Err(err), &mut notices);
        assert_eq!(outcome, CommandOutcome::Failed);
        assert_eq!(notices.len(), 1);
        assert!(!session.save_enabled());
    }

    #[test]
    fn test_save_without_file_needs_save_as() {
        let mut session = Session::default();
        let mut notices = Vec::new();
        assert_eq!(save(&mut session, &mut notices), CommandOutcome::NeedsSaveAs);
        assert!(notices.is_empty());
    }

    #[test]
    fn test_save_as_rejects_missing_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("untitled");
        let mut session = Session::default();
        session.edit(|buf| buf.insert_str("# Hi"));
        let mut notices = Vec::new();
        let outcome = complete_save_as(
            &mut session,
            Ok(Some(SaveTarget::new(&path))),
            &mut notices,
        );
        assert_eq!(outcome, CommandOutcome::Rejected);
        assert!(!path.exists());
        assert!(!session.save_enabled());
        assert!(matches!(
            &notices[..],
            [Notice::Information { message, .. }] if message.contains(".md")
        ));
    }

    #[test]
    fn test_save_as_accepts_uppercase_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("LOUD.MD");
        let mut session = Session::default();
        session.edit(|buf| buf.insert_str("text"));
        let mut notices = Vec::new();
        let outcome = complete_save_as(
            &mut session,
            Ok(Some(SaveTarget::new(&path))),
            &mut notices,
        );
        assert_eq!(outcome, CommandOutcome::Completed);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "text");
        assert!(session.save_enabled());
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_save_as_dialog_error_reports_and_stops() {
        let mut session = Session::default();
        let mut notices = Vec::new();
        let err = DialogError::ReadDir {
            path: "/nowhere".into(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        let outcome = complete_save_as(&mut session, Err(err), &mut notices);
        assert_eq!(outcome, CommandOutcome::Failed);
        assert_eq!(notices.len(), 1);
        assert!(!session.save_enabled());
    }

    #[test]
    fn test_save_as_write_failure_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("notes.md");
        let mut session = Session::default();
        let mut notices = Vec::new();
        let outcome = complete_save_as(
            &mut session,
            Ok(Some(SaveTarget::new(&path))),
            &mut notices,
        );
        assert_eq!(outcome, CommandOutcome::Failed);
        assert!(!session.save_enabled());
        assert_eq!(session.title(), "Markedly");
        assert!(matches!(&notices[..], [Notice::Error(_)]));
    }

    #[test]
    fn test_save_failure_reports_error_and_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        let mut session = Session::default();
        let mut notices = Vec::new();
        complete_save_as(&mut session, Ok(Some(SaveTarget::new(&path))), &mut notices);
        std::fs::remove_dir_all(dir.path()).unwrap();

        session.edit(|buf| buf.insert_str("more"));
        let outcome = save(&mut session, &mut notices);
        assert_eq!(outcome, CommandOutcome::Failed);
        assert_eq!(session.current_file().unwrap().path(), path.as_path());
        assert!(session.is_dirty());
    }

    #[test]
    fn test_atomic_save_as_writes_through_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        let mut session = Session::new(TitleMode::Replace, WriteMode::Atomic);
        session.edit(|buf| buf.insert_str("atomic"));
        let mut notices = Vec::new();
        let outcome = complete_save_as(
            &mut session,
            Ok(Some(SaveTarget::new(&path))),
            &mut notices,
        );
        assert_eq!(outcome, CommandOutcome::Completed);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "atomic");
    }

    #[test]
    fn test_append_title_mode_accumulates_across_commands() {
        let mut session = Session::new(TitleMode::Append, WriteMode::Direct);
        let mut notices = Vec::new();
        complete_open(
            &mut session,
            Ok(Some(selection_from("a.md", b"a"))),
            &mut notices,
        );
        complete_open(
            &mut session,
            Ok(Some(selection_from("b.md", b"b"))),
            &mut notices,
        );
        assert_eq!(session.title(), "Markedly - a.md - b.md");
    }
}
