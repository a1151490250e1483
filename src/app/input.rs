use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::app::{App, Message, Model};
use crate::dialog::DialogFocus;
use crate::editor::Direction;
use crate::menu::{FileCommand, FileMenu};

use super::event_loop::ResizeDebouncer;

const TAB_TEXT: &str = "    ";
const WHEEL_LINES: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            Event::Paste(text) if model.dialog.is_none() && model.active_notice().is_none() => {
                Some(Message::EditorInsertStr(text.replace("\r\n", "\n")))
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        if model.active_notice().is_some() {
            return matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' '))
                .then_some(Message::DismissNotice);
        }

        if model.help_visible {
            return Some(Message::HideHelp);
        }

        if model.dialog.is_some() {
            return match key.code {
                KeyCode::Esc => Some(Message::DialogCancel),
                KeyCode::Enter => Some(Message::DialogActivate),
                KeyCode::Up => Some(Message::DialogUp),
                KeyCode::Down => Some(Message::DialogDown),
                KeyCode::Backspace => Some(Message::DialogBackspace),
                KeyCode::Char(c) if !ctrl && !alt => Some(Message::DialogInput(c)),
                _ => None,
            };
        }

        if model.menu.is_open() {
            let save_enabled = model.session.save_enabled();
            return match key.code {
                KeyCode::Up => Some(Message::MenuUp),
                KeyCode::Down => Some(Message::MenuDown),
                KeyCode::Enter => model.menu.activation(save_enabled).map(Message::Command),
                KeyCode::Esc | KeyCode::F(10) => Some(Message::CloseMenu),
                KeyCode::Char('f') if alt => Some(Message::CloseMenu),
                _ => None,
            };
        }

        match key.code {
            // Application
            KeyCode::Char('q') if ctrl => Some(Message::Quit),
            KeyCode::F(1) => Some(Message::ToggleHelp),

            // File
            KeyCode::Char('o') if ctrl => Some(Message::Command(FileCommand::Open)),
            KeyCode::Char('s') if ctrl => Some(Message::Command(FileCommand::Save)),
            KeyCode::F(12) => Some(Message::Command(FileCommand::SaveAs)),
            KeyCode::F(10) => Some(Message::OpenMenu),
            KeyCode::Char('f') if alt => Some(Message::OpenMenu),

            // Preview
            KeyCode::Up if alt => Some(Message::PreviewScrollUp(1)),
            KeyCode::Down if alt => Some(Message::PreviewScrollDown(1)),

            // Editor navigation
            KeyCode::Left if ctrl => Some(Message::EditorMoveWordLeft),
            KeyCode::Right if ctrl => Some(Message::EditorMoveWordRight),
            KeyCode::Home if ctrl => Some(Message::EditorMoveToStart),
            KeyCode::End if ctrl => Some(Message::EditorMoveToEnd),
            KeyCode::Up => Some(Message::EditorMoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::EditorMoveCursor(Direction::Down)),
            KeyCode::Left => Some(Message::EditorMoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::EditorMoveCursor(Direction::Right)),
            KeyCode::Home => Some(Message::EditorMoveHome),
            KeyCode::End => Some(Message::EditorMoveEnd),
            KeyCode::PageUp => Some(Message::EditorPageUp),
            KeyCode::PageDown => Some(Message::EditorPageDown),

            // Editor text
            KeyCode::Enter => Some(Message::EditorSplitLine),
            KeyCode::Backspace => Some(Message::EditorDeleteBack),
            KeyCode::Delete => Some(Message::EditorDeleteForward),
            KeyCode::Tab => Some(Message::EditorInsertStr(TAB_TEXT.to_string())),
            KeyCode::Char(c) if !ctrl && !alt => Some(Message::EditorInsertChar(c)),

            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        let is_click = matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left));

        if model.active_notice().is_some() {
            return is_click.then_some(Message::DismissNotice);
        }
        if model.help_visible {
            return is_click.then_some(Message::HideHelp);
        }

        if let Some(dialog) = &model.dialog {
            let area = Rect::new(0, 0, model.terminal_size.0, model.terminal_size.1);
            let list = crate::ui::dialog_list_area(crate::ui::file_dialog_rect(area));
            return match mouse.kind {
                MouseEventKind::ScrollUp => Some(Message::DialogUp),
                MouseEventKind::ScrollDown => Some(Message::DialogDown),
                MouseEventKind::Down(MouseButton::Left)
                    if point_in_rect(mouse.column, mouse.row, list) =>
                {
                    let idx = dialog.window_start(usize::from(list.height))
                        + usize::from(mouse.row - list.y);
                    if idx >= dialog.entries().len() {
                        None
                    } else if idx == dialog.selected() && dialog.focus() == DialogFocus::List {
                        Some(Message::DialogActivate)
                    } else {
                        Some(Message::DialogSelect(idx))
                    }
                }
                _ => None,
            };
        }

        let layout = model.screen();

        if model.menu.is_open() {
            if !is_click {
                return None;
            }
            let dropdown = crate::ui::menu_dropdown_rect(layout.menu_bar);
            let items = Rect {
                x: dropdown.x + 1,
                y: dropdown.y + 1,
                width: dropdown.width.saturating_sub(2),
                height: dropdown.height.saturating_sub(2),
            };
            if point_in_rect(mouse.column, mouse.row, items) {
                let idx = usize::from(mouse.row - items.y);
                return FileMenu::item_at(idx, model.session.save_enabled()).map(Message::Command);
            }
            return Some(Message::CloseMenu);
        }

        let editor = crate::ui::pane_inner(layout.editor);
        let preview = crate::ui::pane_inner(layout.preview);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if point_in_rect(
                    mouse.column,
                    mouse.row,
                    crate::ui::file_menu_label_rect(layout.menu_bar),
                ) {
                    return Some(Message::OpenMenu);
                }
                if point_in_rect(mouse.column, mouse.row, editor) {
                    let (line, col) = editor_position(model, editor, mouse.column, mouse.row);
                    return Some(Message::EditorMoveTo(line, col));
                }
                None
            }
            MouseEventKind::ScrollDown => {
                if point_in_rect(mouse.column, mouse.row, preview) {
                    Some(Message::PreviewScrollDown(WHEEL_LINES))
                } else if point_in_rect(mouse.column, mouse.row, editor) {
                    Some(Message::EditorScrollDown(WHEEL_LINES))
                } else {
                    None
                }
            }
            MouseEventKind::ScrollUp => {
                if point_in_rect(mouse.column, mouse.row, preview) {
                    Some(Message::PreviewScrollUp(WHEEL_LINES))
                } else if point_in_rect(mouse.column, mouse.row, editor) {
                    Some(Message::EditorScrollUp(WHEEL_LINES))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

/// Buffer (line, column) under a click inside the editor text area.
fn editor_position(model: &Model, editor: Rect, column: u16, row: u16) -> (usize, usize) {
    let buf = model.session.buffer();
    let gutter = crate::ui::line_number_width(buf.line_count()) + 1;
    let text_x = editor.x + gutter;
    let text_width = usize::from(editor.width.saturating_sub(gutter));
    let hscroll = crate::ui::editor_hscroll(buf.cursor().col, text_width);

    let line = model.editor_scroll_offset + usize::from(row.saturating_sub(editor.y));
    let col = usize::from(column.saturating_sub(text_x)) + hscroll;
    (line, col)
}

const fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
