use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let session = &model.session;
    let filename = session
        .current_file()
        .map_or_else(|| "untitled".to_string(), crate::session::FileRef::name);
    let dirty_indicator = if session.is_dirty() { " [modified]" } else { "" };
    let cursor = session.buffer().cursor();

    let status = format!(
        " {filename}{dirty_indicator}  Ln {}, Col {}  F10:menu  Ctrl+S:save  F1:help",
        cursor.line + 1,
        cursor.col + 1
    );

    let status_bar = Paragraph::new(status).style(model.theme.status());
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
