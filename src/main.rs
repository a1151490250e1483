//! Markedly - A two-pane terminal markdown editor with live preview.
//!
//! # Usage
//!
//! ```bash
//! markedly
//! markedly notes.md
//! markedly --atomic-save --title-mode append notes.md
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use markedly::app::App;
use markedly::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use markedly::session::TitleMode;
use markedly::ui::style::Theme;

/// A two-pane terminal markdown editor with live preview
#[derive(Parser, Debug)]
#[command(name = "markedly", version, about, long_about = None)]
struct Cli {
    /// Markdown file to open at startup
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// How the window title changes when a file is opened or saved
    #[arg(long, value_enum, value_name = "MODE")]
    title_mode: Option<TitleMode>,

    /// Save through a temporary file and rename, so a failed write never
    /// truncates the destination
    #[arg(long)]
    atomic_save: bool,

    /// Directory the file dialog starts in for untitled documents
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Preview color palette
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Write log output to a file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Install the tracing subscriber when a log file is configured.
///
/// The terminal is in raw mode on the alternate screen while the editor
/// runs, so there is no console to log to. Without `--log-file` no
/// subscriber is installed and events are discarded. Returns whether one
/// was installed.
fn init_logging(log_file: Option<&Path>) -> Result<bool> {
    let Some(path) = log_file else {
        return Ok(false);
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(true)
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;
    tracing::info!(?effective, "starting");

    let start_dir = match effective.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    let app = App::new()
        .with_file(cli.file)
        .with_title_mode(effective.title_mode.unwrap_or_default())
        .with_atomic_save(effective.atomic_save)
        .with_start_dir(start_dir)
        .with_theme(Theme::for_mode(effective.theme.unwrap_or_default()))
        .with_config_paths(
            Some(global_path),
            if local_path.exists() {
                Some(local_path)
            } else {
                None
            },
        );

    app.run().context("Application error")
}
