use std::path::{Path, PathBuf};

use tracing::debug;

use crate::app::{App, Message, Model, ToastLevel};
use crate::dialog::{DialogMode, DialogStep, FileDialog};
use crate::menu::FileCommand;
use crate::session::{
    CommandOutcome, DialogError, OpenSelection, SaveTarget, complete_open, complete_save_as, save,
};

impl App {
    /// Run the I/O a message asks for, after [`update`](crate::app::update)
    /// has applied its pure state change.
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        match msg {
            Message::Command(FileCommand::Open) => show_dialog(model, DialogMode::Open),
            Message::Command(FileCommand::Save) => run_save(model),
            Message::Command(FileCommand::SaveAs) => show_dialog(model, DialogMode::Save),
            Message::DialogActivate => activate_dialog(model),
            Message::DialogCancel => {
                if let Some(dialog) = model.dialog.take() {
                    debug!(mode = ?dialog.mode(), "dialog cancelled");
                    finish_dialog(model, dialog.mode(), Ok(None));
                }
            }
            _ => {}
        }
    }

    /// Open `path` at startup through the same path as the Open command.
    pub(super) fn open_initial_file(model: &mut Model, path: &Path) {
        finish_dialog(model, DialogMode::Open, Ok(Some(path.to_path_buf())));
    }
}

fn show_dialog(model: &mut Model, mode: DialogMode) {
    let dir = model.dialog_start_dir();
    let filter = model.session.filter().clone();
    match FileDialog::new(mode, &dir, filter) {
        Ok(dialog) => {
            let dialog = match mode {
                DialogMode::Open => dialog,
                DialogMode::Save => dialog.with_input(&model.session.suggested_file_name()),
            };
            model.dialog = Some(dialog);
        }
        Err(err) => finish_dialog(model, mode, Err(err)),
    }
}

fn activate_dialog(model: &mut Model) {
    let Some(dialog) = model.dialog.as_mut() else {
        return;
    };
    let mode = dialog.mode();
    match dialog.activate() {
        DialogStep::Continue => {}
        DialogStep::Confirm(path) => {
            model.dialog = None;
            finish_dialog(model, mode, Ok(Some(path)));
        }
        DialogStep::Failed(err) => {
            model.dialog = None;
            finish_dialog(model, mode, Err(err));
        }
    }
}

/// Hand the dialog result to the session command that asked for it.
fn finish_dialog(model: &mut Model, mode: DialogMode, result: Result<Option<PathBuf>, DialogError>) {
    match mode {
        DialogMode::Open => {
            let selection = result.and_then(|path| path.map(|p| OpenSelection::open(&p)).transpose());
            let outcome = complete_open(&mut model.session, selection, &mut model.notices);
            if outcome == CommandOutcome::Completed {
                model.editor_scroll_offset = 0;
                model.preview_scroll_offset = 0;
                let name = current_name(model);
                model.show_toast(ToastLevel::Info, format!("Opened {name}"));
            }
        }
        DialogMode::Save => {
            let target = result.map(|path| path.map(SaveTarget::new));
            let outcome = complete_save_as(&mut model.session, target, &mut model.notices);
            if outcome == CommandOutcome::Completed {
                let name = current_name(model);
                model.show_toast(ToastLevel::Info, format!("Saved {name}"));
            }
        }
    }
    model.clamp_preview_scroll();
}

fn run_save(model: &mut Model) {
    match save(&mut model.session, &mut model.notices) {
        CommandOutcome::NeedsSaveAs => show_dialog(model, DialogMode::Save),
        CommandOutcome::Completed => {
            let name = current_name(model);
            model.show_toast(ToastLevel::Info, format!("Saved {name}"));
        }
        CommandOutcome::Cancelled | CommandOutcome::Rejected | CommandOutcome::Failed => {}
    }
}

fn current_name(model: &Model) -> String {
    model
        .session
        .current_file()
        .map_or_else(String::new, crate::session::FileRef::name)
}
