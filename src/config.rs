use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::session::TitleMode;

#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub atomic_save: bool,
    pub title_mode: Option<TitleMode>,
    pub theme: Option<ThemeMode>,
    pub dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` on top of `self`: booleans OR, valued flags take `other`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            atomic_save: self.atomic_save || other.atomic_save,
            title_mode: other.title_mode.or(self.title_mode),
            theme: other.theme.or(self.theme),
            dir: other.dir.clone().or_else(|| self.dir.clone()),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("markedly").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("markedly")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("markedly").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("markedly")
                .join("config");
        }
    }

    PathBuf::from(".markedlyrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".markedlyrc")
}

/// Read flags from a config file. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Split a config line into the flag and the rest of the line, so values
/// may contain spaces.
fn line_tokens(line: &str) -> Vec<String> {
    match line.split_once(char::is_whitespace) {
        Some((flag, value)) if !flag.contains('=') => {
            vec![flag.to_string(), value.trim().to_string()]
        }
        _ => vec![line.to_string()],
    }
}

/// Write flags to a config file, one per line.
///
/// # Errors
///
/// Returns an error if the parent directory or the file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# markedly defaults (saved with --save)".to_string());
    if flags.atomic_save {
        lines.push("--atomic-save".to_string());
    }
    if let Some(mode) = flags.title_mode {
        let mode_str = match mode {
            TitleMode::Replace => "replace",
            TitleMode::Append => "append",
        };
        lines.push(format!("--title-mode {mode_str}"));
    }
    if let Some(theme) = flags.theme {
        let theme_str = match theme {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        };
        lines.push(format!("--theme {theme_str}"));
    }
    if let Some(dir) = &flags.dir {
        lines.push(format!("--dir {}", dir.display()));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove a config file if it exists.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of a token list. Unknown tokens are ignored.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--atomic-save" {
            flags.atomic_save = true;
        } else if token == "--title-mode" {
            if let Some(next) = tokens.get(i + 1) {
                flags.title_mode = parse_title_mode(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--title-mode=") {
            flags.title_mode = parse_title_mode(value);
        } else if token == "--theme" {
            if let Some(next) = tokens.get(i + 1) {
                flags.theme = parse_theme(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--theme=") {
            flags.theme = parse_theme(value);
        } else if token == "--dir" {
            if let Some(next) = tokens.get(i + 1) {
                flags.dir = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--dir=") {
            flags.dir = Some(PathBuf::from(value));
        } else if token == "--log-file" {
            if let Some(next) = tokens.get(i + 1) {
                flags.log_file = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--log-file=") {
            flags.log_file = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}

fn parse_title_mode(s: &str) -> Option<TitleMode> {
    match s {
        "replace" => Some(TitleMode::Replace),
        "append" => Some(TitleMode::Append),
        _ => None,
    }
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s {
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = vec![
            "markedly".to_string(),
            "--atomic-save".to_string(),
            "--title-mode".to_string(),
            "append".to_string(),
            "--theme=light".to_string(),
            "--dir".to_string(),
            "docs".to_string(),
            "--log-file=markedly.log".to_string(),
            "README.md".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert!(flags.atomic_save);
        assert_eq!(flags.title_mode, Some(TitleMode::Append));
        assert_eq!(flags.theme, Some(ThemeMode::Light));
        assert_eq!(flags.dir, Some(PathBuf::from("docs")));
        assert_eq!(flags.log_file, Some(PathBuf::from("markedly.log")));
    }

    #[test]
    fn test_saved_paths_with_spaces_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config");
        let flags = ConfigFlags {
            dir: Some(PathBuf::from("/home/me/My Notes")),
            log_file: Some(PathBuf::from("/tmp/markedly log.txt")),
            ..ConfigFlags::default()
        };
        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);
    }

    #[test]
    fn test_equals_syntax_line_keeps_spaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config");
        std::fs::write(&path, "--dir=/srv/shared notes\n").unwrap();
        let flags = load_config_flags(&path).unwrap();
        assert_eq!(flags.dir, Some(PathBuf::from("/srv/shared notes")));
    }

    #[test]
    fn test_unknown_values_are_ignored() {
        let args = vec![
            "--title-mode".to_string(),
            "sideways".to_string(),
            "--theme=neon".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags, ConfigFlags::default());
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            atomic_save: true,
            theme: Some(ThemeMode::Light),
            dir: Some(PathBuf::from("notes")),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            title_mode: Some(TitleMode::Append),
            theme: Some(ThemeMode::Dark),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.atomic_save);
        assert_eq!(merged.title_mode, Some(TitleMode::Append));
        assert_eq!(merged.theme, Some(ThemeMode::Dark));
        assert_eq!(merged.dir, Some(PathBuf::from("notes")));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config");
        let flags = ConfigFlags {
            atomic_save: true,
            title_mode: Some(TitleMode::Replace),
            theme: Some(ThemeMode::Dark),
            dir: Some(PathBuf::from("/srv/notes")),
            log_file: Some(PathBuf::from("markedly.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
    }
}
