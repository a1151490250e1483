use std::path::PathBuf;

use markedly::config::{ConfigFlags, ThemeMode, load_config_flags, parse_flag_tokens};
use markedly::session::TitleMode;

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".markedlyrc");
    let content = r#"
# comment
--atomic-save

--theme light

--log-file=markedly.log
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.atomic_save);
    assert_eq!(flags.theme, Some(ThemeMode::Light));
    assert_eq!(flags.log_file, Some(PathBuf::from("markedly.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".markedlyrc");
    let content = "--atomic-save\n--theme light\n--dir notes\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "markedly".to_string(),
        "--theme".to_string(),
        "dark".to_string(),
        "--title-mode".to_string(),
        "append".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.atomic_save, "file flags should remain enabled");
    assert_eq!(
        effective.title_mode,
        Some(TitleMode::Append),
        "cli flags should be applied"
    );
    assert_eq!(effective.theme, Some(ThemeMode::Dark), "cli should override theme");
    assert_eq!(
        effective.dir,
        Some(PathBuf::from("notes")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "markedly".to_string(),
        "--title-mode=replace".to_string(),
        "--dir=/srv/notes".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.title_mode, Some(TitleMode::Replace));
    assert_eq!(flags.dir, Some(PathBuf::from("/srv/notes")));
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}
