//! End-to-end file command scenarios against a real directory.

use std::fs;
use std::path::Path;

use proptest::prelude::*;

use markedly::document::{self, DEFAULT_WIDTH};
use markedly::session::{
    CommandOutcome, Notice, OpenSelection, SaveTarget, Session, TitleMode, WriteMode,
    complete_open, complete_save_as, save,
};

fn open_path(session: &mut Session, path: &Path, notices: &mut Vec<Notice>) -> CommandOutcome {
    complete_open(session, OpenSelection::open(path).map(Some), notices)
}

#[test]
fn test_untitled_save_as_without_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::default();
    let mut notices = Vec::new();

    session.edit(|buf| buf.insert_str("# Hi"));
    assert_eq!(session.preview().headings()[0].text, "Hi");

    let target = dir.path().join("untitled");
    let outcome = complete_save_as(&mut session, Ok(Some(SaveTarget::new(&target))), &mut notices);

    assert_eq!(outcome, CommandOutcome::Rejected);
    assert!(!target.exists());
    assert!(!session.save_enabled());
    assert_eq!(
        notices,
        vec![Notice::Information {
            title: "Invalid file name".to_string(),
            message: "File extension must be .md".to_string(),
        }]
    );
}

#[test]
fn test_open_edit_save_writes_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.md");
    fs::write(&path, "body text").unwrap();
    let mut session = Session::default();
    let mut notices = Vec::new();

    assert_eq!(open_path(&mut session, &path, &mut notices), CommandOutcome::Completed);
    assert_eq!(session.text(), "body text");
    assert!(session.save_enabled());

    session.edit(|buf| {
        buf.move_to_end();
        buf.insert_char('!');
    });
    assert_eq!(save(&mut session, &mut notices), CommandOutcome::Completed);

    assert_eq!(fs::read_to_string(&path).unwrap(), "body text!");
    assert!(notices.is_empty());
}

#[test]
fn test_open_then_save_round_trips_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crlf.md");
    let body = "# Title\r\n\r\nline one\r\nline two\n\n  trailing  \n";
    fs::write(&path, body).unwrap();
    let mut session = Session::default();
    let mut notices = Vec::new();

    open_path(&mut session, &path, &mut notices);
    assert_eq!(save(&mut session, &mut notices), CommandOutcome::Completed);

    assert_eq!(fs::read_to_string(&path).unwrap(), body);
}

#[test]
fn test_save_enabled_is_monotonic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.md");
    fs::write(&path, "a").unwrap();
    let mut session = Session::default();
    let mut notices = Vec::new();

    open_path(&mut session, &path, &mut notices);
    assert!(session.save_enabled());

    // Cancelled, rejected and failed commands leave it on
    complete_open(&mut session, Ok(None), &mut notices);
    complete_save_as(&mut session, Ok(None), &mut notices);
    complete_save_as(
        &mut session,
        Ok(Some(SaveTarget::new(dir.path().join("b.txt")))),
        &mut notices,
    );
    open_path(&mut session, &dir.path().join("missing.md"), &mut notices);
    assert!(session.save_enabled());
    assert_eq!(session.current_file().unwrap().path(), path);
}

#[test]
fn test_save_as_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("existing.md");
    fs::write(&path, "old contents that are longer").unwrap();
    let mut session = Session::default();
    let mut notices = Vec::new();
    session.edit(|buf| buf.insert_str("new"));

    let outcome = complete_save_as(&mut session, Ok(Some(SaveTarget::new(&path))), &mut notices);

    assert_eq!(outcome, CommandOutcome::Completed);
    assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    assert_eq!(session.title(), "Markedly - existing.md");
}

#[test]
fn test_atomic_save_as_leaves_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(TitleMode::Replace, WriteMode::Atomic);
    let mut notices = Vec::new();
    session.edit(|buf| buf.insert_str("atomic"));

    let path = dir.path().join("out.MD");
    let outcome = complete_save_as(&mut session, Ok(Some(SaveTarget::new(&path))), &mut notices);

    assert_eq!(outcome, CommandOutcome::Completed);
    assert_eq!(fs::read_to_string(&path).unwrap(), "atomic");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[cfg(unix)]
#[test]
fn test_atomic_save_keeps_file_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.md");
    fs::write(&path, "body").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
    let mut session = Session::new(TitleMode::Replace, WriteMode::Atomic);
    let mut notices = Vec::new();

    open_path(&mut session, &path, &mut notices);
    session.edit(|buf| {
        buf.move_to_end();
        buf.insert_char('!');
    });
    assert_eq!(save(&mut session, &mut notices), CommandOutcome::Completed);

    assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o644);
    assert_eq!(fs::read_to_string(&path).unwrap(), "body!");
}

#[test]
fn test_save_as_accepts_bare_md_name() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::default();
    let mut notices = Vec::new();
    session.edit(|buf| buf.insert_str("hidden"));

    let path = dir.path().join(".md");
    let outcome = complete_save_as(&mut session, Ok(Some(SaveTarget::new(&path))), &mut notices);

    assert_eq!(outcome, CommandOutcome::Completed);
    assert!(notices.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "hidden");
    assert!(session.save_enabled());
}

#[test]
fn test_append_title_mode_accumulates_names() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.md");
    fs::write(&a, "").unwrap();
    let mut session = Session::new(TitleMode::Append, WriteMode::Direct);
    let mut notices = Vec::new();

    open_path(&mut session, &a, &mut notices);
    complete_save_as(
        &mut session,
        Ok(Some(SaveTarget::new(dir.path().join("b.md")))),
        &mut notices,
    );

    assert_eq!(session.title(), "Markedly - a.md - b.md");
}

proptest! {
    #[test]
    fn preview_always_matches_text(chunks in proptest::collection::vec("[#*_`> a-z\\-\\n]{0,12}", 0..12)) {
        let mut session = Session::default();
        for chunk in &chunks {
            session.edit(|buf| buf.insert_str(chunk));
            prop_assert_eq!(
                session.preview(),
                &document::render(&session.text(), DEFAULT_WIDTH)
            );
        }
    }

    #[test]
    fn invalid_save_as_names_never_write(name in "[a-z]{1,8}(\\.(txt|mdx|m|markdown))?") {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::default();
        let mut notices = Vec::new();
        session.edit(|buf| buf.insert_str("text"));

        let target = dir.path().join(&name);
        let outcome = complete_save_as(&mut session, Ok(Some(SaveTarget::new(&target))), &mut notices);

        prop_assert_eq!(outcome, CommandOutcome::Rejected);
        prop_assert!(!target.exists());
        prop_assert!(session.current_file().is_none());
        prop_assert_eq!(session.title(), "Markedly");
    }
}
