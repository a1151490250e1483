use crate::app::{Model, ToastLevel};
use crate::editor::{Direction, EditorBuffer};
use crate::menu::FileCommand;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // File commands
    /// Run a `File` menu command (from the menu or its shortcut)
    Command(FileCommand),

    // Menu
    /// Open the `File` dropdown
    OpenMenu,
    /// Close the `File` dropdown
    CloseMenu,
    /// Highlight the previous enabled item
    MenuUp,
    /// Highlight the next enabled item
    MenuDown,

    // File dialog
    /// Select the previous entry
    DialogUp,
    /// Select the next entry
    DialogDown,
    /// Select an entry by index (mouse)
    DialogSelect(usize),
    /// Type a character into the file name field
    DialogInput(char),
    /// Delete the last character of the file name field
    DialogBackspace,
    /// Enter: navigate or confirm
    DialogActivate,
    /// Esc: close without a selection
    DialogCancel,

    // Modals
    /// Dismiss the showing error/information message
    DismissNotice,
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Editor
    /// Insert a character at the cursor
    EditorInsertChar(char),
    /// Insert a string at the cursor (Tab, paste)
    EditorInsertStr(String),
    /// Delete character before cursor (Backspace)
    EditorDeleteBack,
    /// Delete character at cursor (Delete)
    EditorDeleteForward,
    /// Split line at cursor (Enter)
    EditorSplitLine,
    /// Move cursor in a direction
    EditorMoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    EditorMoveHome,
    /// Move cursor to end of line (End)
    EditorMoveEnd,
    /// Move cursor one word left (Ctrl+Left)
    EditorMoveWordLeft,
    /// Move cursor one word right (Ctrl+Right)
    EditorMoveWordRight,
    /// Move cursor to start of buffer (Ctrl+Home)
    EditorMoveToStart,
    /// Move cursor to end of buffer (Ctrl+End)
    EditorMoveToEnd,
    /// Move cursor to absolute position (line, col), e.g. from a mouse click
    EditorMoveTo(usize, usize),
    /// Move the cursor up one page
    EditorPageUp,
    /// Move the cursor down one page
    EditorPageDown,
    /// Scroll editor viewport up by n lines
    EditorScrollUp(usize),
    /// Scroll editor viewport down by n lines
    EditorScrollDown(usize),

    // Preview
    /// Scroll preview up by n lines
    PreviewScrollUp(usize),
    /// Scroll preview down by n lines
    PreviewScrollDown(usize),

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function; file commands and dialog
/// completion run in the effects step that follows.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset the quit confirmation on any action other than the confirmed one.
    // Save keeps it so Ctrl+S can complete a pending quit.
    if !matches!(
        msg,
        Message::Quit | Message::Command(FileCommand::Save) | Message::Redraw
    ) {
        model.quit_confirmed = false;
    }

    match msg {
        // Commands close the menu; the command itself runs in effects.
        Message::Command(_) => {
            model.menu.close();
        }

        // Menu
        Message::OpenMenu => {
            if model.menu.is_open() {
                model.menu.close();
            } else {
                model.menu.open();
            }
        }
        Message::CloseMenu => model.menu.close(),
        Message::MenuUp => {
            let save_enabled = model.session.save_enabled();
            model.menu.move_up(save_enabled);
        }
        Message::MenuDown => {
            let save_enabled = model.session.save_enabled();
            model.menu.move_down(save_enabled);
        }

        // Dialog
        Message::DialogUp => {
            if let Some(dialog) = &mut model.dialog {
                dialog.select_prev();
            }
        }
        Message::DialogDown => {
            if let Some(dialog) = &mut model.dialog {
                dialog.select_next();
            }
        }
        Message::DialogSelect(idx) => {
            if let Some(dialog) = &mut model.dialog {
                dialog.select(idx);
            }
        }
        Message::DialogInput(ch) => {
            if let Some(dialog) = &mut model.dialog {
                dialog.push_char(ch);
            }
        }
        Message::DialogBackspace => {
            if let Some(dialog) = &mut model.dialog {
                dialog.pop_char();
            }
        }
        // DialogActivate/DialogCancel: handled in effects (directory reads, file open)
        // Redraw: no state change needed
        Message::DialogActivate | Message::DialogCancel | Message::Redraw => {}

        // Modals
        Message::DismissNotice => {
            if !model.notices.is_empty() {
                model.notices.remove(0);
            }
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        // Editor
        Message::EditorInsertChar(ch) => edit(&mut model, |buf| buf.insert_char(ch)),
        Message::EditorInsertStr(text) => edit(&mut model, |buf| buf.insert_str(&text)),
        Message::EditorDeleteBack => edit(&mut model, |buf| {
            buf.delete_back();
        }),
        Message::EditorDeleteForward => edit(&mut model, |buf| {
            buf.delete_forward();
        }),
        Message::EditorSplitLine => edit(&mut model, EditorBuffer::split_line),
        Message::EditorMoveCursor(dir) => edit(&mut model, |buf| buf.move_cursor(dir)),
        Message::EditorMoveHome => edit(&mut model, EditorBuffer::move_home),
        Message::EditorMoveEnd => edit(&mut model, EditorBuffer::move_end),
        Message::EditorMoveWordLeft => edit(&mut model, EditorBuffer::move_word_left),
        Message::EditorMoveWordRight => edit(&mut model, EditorBuffer::move_word_right),
        Message::EditorMoveToStart => edit(&mut model, EditorBuffer::move_to_start),
        Message::EditorMoveToEnd => edit(&mut model, EditorBuffer::move_to_end),
        Message::EditorMoveTo(line, col) => edit(&mut model, |buf| buf.move_to(line, col)),
        Message::EditorPageUp => {
            let page = model.editor_rows().max(1);
            edit(&mut model, |buf| {
                for _ in 0..page {
                    buf.move_cursor(Direction::Up);
                }
            });
        }
        Message::EditorPageDown => {
            let page = model.editor_rows().max(1);
            edit(&mut model, |buf| {
                for _ in 0..page {
                    buf.move_cursor(Direction::Down);
                }
            });
        }
        Message::EditorScrollUp(n) => {
            model.editor_scroll_offset = model.editor_scroll_offset.saturating_sub(n);
        }
        Message::EditorScrollDown(n) => {
            let max = model.session.buffer().line_count().saturating_sub(1);
            model.editor_scroll_offset = (model.editor_scroll_offset + n).min(max);
        }

        // Preview
        Message::PreviewScrollUp(n) => {
            model.preview_scroll_offset = model.preview_scroll_offset.saturating_sub(n);
        }
        Message::PreviewScrollDown(n) => {
            model.preview_scroll_offset =
                (model.preview_scroll_offset + n).min(model.max_preview_scroll());
        }

        // Window
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            model.sync_preview_width();
            model.ensure_cursor_visible();
        }

        // Application
        Message::Quit => {
            if model.session.is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

/// Apply a buffer operation, then keep the cursor and preview in view.
fn edit(model: &mut Model, f: impl FnOnce(&mut EditorBuffer)) {
    model.session.edit(f);
    model.ensure_cursor_visible();
    model.clamp_preview_scroll();
}
