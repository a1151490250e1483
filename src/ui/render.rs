use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;
use crate::menu::FileMenu;

use super::{EDITOR_WIDTH_PERCENT, PREVIEW_LEFT_PADDING, PREVIEW_WIDTH_PERCENT, overlays, status};

/// Where each part of the screen goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub menu_bar: Rect,
    pub editor: Rect,
    pub preview: Rect,
    pub toast: Option<Rect>,
    pub status: Rect,
}

pub fn screen_layout(area: Rect, toast_active: bool) -> ScreenLayout {
    let footer_rows = 1 + u16::from(toast_active);
    let menu_bar = Rect {
        height: area.height.min(1),
        ..area
    };
    let body = Rect {
        y: area.y + menu_bar.height,
        height: area.height.saturating_sub(menu_bar.height + footer_rows),
        ..area
    };
    let toast = toast_active.then(|| Rect {
        y: area.y + area.height.saturating_sub(2),
        height: 1,
        ..area
    });
    let status = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(EDITOR_WIDTH_PERCENT),
            Constraint::Percentage(PREVIEW_WIDTH_PERCENT),
        ])
        .split(body);

    ScreenLayout {
        menu_bar,
        editor: columns[0],
        preview: columns[1],
        toast,
        status,
    }
}

/// Text area inside a pane border.
pub fn pane_inner(pane: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(pane)
}

/// Width the preview is rendered at for a terminal `total_width` columns wide.
pub fn preview_content_width(total_width: u16) -> u16 {
    let layout = screen_layout(Rect::new(0, 0, total_width, 3), false);
    pane_inner(layout.preview)
        .width
        .saturating_sub(PREVIEW_LEFT_PADDING)
        .max(1)
}

/// The clickable `File` label in the menu bar.
pub fn file_menu_label_rect(menu_bar: Rect) -> Rect {
    // Label is a handful of ASCII characters
    #[allow(clippy::cast_possible_truncation)]
    let width = (FileMenu::LABEL.len() + 2) as u16;
    Rect {
        width: width.min(menu_bar.width),
        ..menu_bar
    }
}

/// First character column shown in the editor, so the cursor stays visible.
pub const fn editor_hscroll(cursor_col: usize, text_width: usize) -> usize {
    if text_width == 0 || cursor_col < text_width {
        0
    } else {
        cursor_col + 1 - text_width
    }
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let layout = screen_layout(area, model.active_toast().is_some());

    render_menu_bar(model, frame, layout.menu_bar);
    render_editor(model, frame, layout.editor);
    render_preview(model, frame, layout.preview);
    if let Some(toast_area) = layout.toast {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, layout.status);

    if model.menu.is_open() {
        overlays::render_menu_dropdown(model, frame, layout.menu_bar);
    }
    if let Some(dialog) = &model.dialog {
        overlays::render_file_dialog(model, dialog, frame, area);
    }
    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
    if let Some(notice) = model.active_notice() {
        overlays::render_notice(model, notice, frame, area);
    }
}

fn render_menu_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let theme = &model.theme;
    frame.render_widget(Paragraph::new("").style(theme.menu), area);

    let label_area = file_menu_label_rect(area);
    let label_style = if model.menu.is_open() {
        theme.menu_highlight
    } else {
        theme.menu
    };
    frame.render_widget(
        Paragraph::new(format!(" {} ", FileMenu::LABEL)).style(label_style),
        label_area,
    );

    let title_area = Rect {
        x: area.x + label_area.width,
        width: area.width.saturating_sub(label_area.width),
        ..area
    };
    let title = Line::from(format!("{} ", model.session.title())).right_aligned();
    frame.render_widget(Paragraph::new(title).style(theme.menu), title_area);
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let buf = model.session.buffer();
    let theme = &model.theme;

    let block = Block::default().title(" Editor ").borders(Borders::ALL);
    let inner = block.inner(area);

    let total_lines = buf.line_count();
    let gutter_width = line_number_width(total_lines);
    let text_width = usize::from(inner.width.saturating_sub(gutter_width + 1));
    let cursor = buf.cursor();
    let hscroll = editor_hscroll(cursor.col, text_width);

    let start = model.editor_scroll_offset;
    let end = (start + usize::from(inner.height)).min(total_lines);

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = buf.line_at(line_idx).unwrap_or_default();
        let chars: Vec<char> = line_text.chars().skip(hscroll).collect();
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter_width as usize);

        let mut spans = vec![Span::styled(line_num, theme.gutter)];

        if line_idx == cursor.line {
            // Split line at cursor position for cursor rendering
            let col = cursor.col.saturating_sub(hscroll).min(chars.len());
            let before: String = chars[..col].iter().collect();
            let cursor_char = chars.get(col).map_or_else(|| " ".to_string(), char::to_string);
            let after: String = chars.get(col + 1..).unwrap_or_default().iter().collect();

            if !before.is_empty() {
                spans.push(Span::raw(before));
            }
            spans.push(Span::styled(cursor_char, theme.cursor));
            if !after.is_empty() {
                spans.push(Span::raw(after));
            }
        } else {
            spans.push(Span::raw(chars.into_iter().collect::<String>()));
        }

        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect) {
    let theme = &model.theme;
    let document = model.session.preview();

    let block = Block::default()
        .title(" Preview ")
        .borders(Borders::ALL)
        .padding(Padding::left(PREVIEW_LEFT_PADDING));
    let rows = usize::from(block.inner(area).height);

    let content: Vec<Line> = document
        .visible_lines(model.preview_scroll_offset, rows)
        .iter()
        .map(|line| {
            let line_style = super::style::style_for_line_type(theme, line.line_type());
            line.spans().map_or_else(
                || Line::from(Span::styled(line.content().to_string(), line_style)),
                |spans| {
                    Line::from(
                        spans
                            .iter()
                            .map(|span| {
                                Span::styled(
                                    span.text().to_string(),
                                    super::style::style_for_inline(theme, line_style, span.style()),
                                )
                            })
                            .collect::<Vec<_>>(),
                    )
                },
            )
        })
        .collect();

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content).block(block), area);
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
