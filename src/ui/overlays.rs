use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::app::Model;
use crate::dialog::{DialogFocus, FileDialog};
use crate::menu::FileCommand;
use crate::session::Notice;

const MENU_WIDTH: u16 = 24;

/// Dropdown under the `File` label; row `i` of the inner area is item `i`.
pub fn menu_dropdown_rect(menu_bar: Rect) -> Rect {
    // Three items plus the border
    #[allow(clippy::cast_possible_truncation)]
    let height = FileCommand::ALL.len() as u16 + 2;
    Rect::new(menu_bar.x, menu_bar.y + 1, MENU_WIDTH, height)
}

pub fn render_menu_dropdown(model: &Model, frame: &mut Frame, menu_bar: Rect) {
    let theme = &model.theme;
    let popup = menu_dropdown_rect(menu_bar).intersection(frame.area());
    let inner_width = usize::from(popup.width.saturating_sub(2));
    let save_enabled = model.session.save_enabled();

    let lines: Vec<Line> = FileCommand::ALL
        .iter()
        .enumerate()
        .map(|(idx, command)| {
            let style = if !command.is_enabled(save_enabled) {
                theme.menu_disabled
            } else if idx == model.menu.highlighted_index() {
                theme.menu_highlight
            } else {
                theme.menu
            };
            let label = command.label();
            let shortcut = command.shortcut();
            let gap = inner_width.saturating_sub(label.len() + shortcut.len() + 2);
            Line::styled(format!(" {label}{}{shortcut} ", " ".repeat(gap)), style)
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).style(theme.menu);
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn file_dialog_rect(area: Rect) -> Rect {
    let popup_width = area.width.saturating_sub(8).clamp(20, 72);
    let popup_height = area.height.saturating_sub(4).clamp(10, 24);
    centered_popup_rect(popup_width, popup_height, area)
}

/// Rows of the directory listing inside the dialog popup.
///
/// Layout inside the border: directory row, listing, blank, name field,
/// hint row, footer.
pub fn dialog_list_area(popup: Rect) -> Rect {
    let inner = Block::default().borders(Borders::ALL).inner(popup);
    Rect {
        y: inner.y + 1,
        height: inner.height.saturating_sub(5),
        ..inner
    }
}

pub fn render_file_dialog(model: &Model, dialog: &FileDialog, frame: &mut Frame, area: Rect) {
    let theme = &model.theme;
    let popup = file_dialog_rect(area);
    let block = Block::default()
        .title(format!(" {} ", dialog.mode().title()))
        .borders(Borders::ALL)
        .style(theme.popup);
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let dim_style = Style::default().fg(Color::Indexed(245));
    let dir_area = Rect { height: 1, ..inner };
    frame.render_widget(
        Paragraph::new(format!("{}", dialog.dir().display())).style(dim_style),
        dir_area,
    );

    let list_area = dialog_list_area(popup);
    let rows = usize::from(list_area.height);
    let start = dialog.window_start(rows);
    let list_focused = dialog.focus() == DialogFocus::List;
    let items: Vec<Line> = dialog
        .entries()
        .iter()
        .enumerate()
        .skip(start)
        .take(rows)
        .map(|(i, entry)| {
            let selected = i == dialog.selected();
            let marker = if selected { ">" } else { " " };
            let display_name = if entry.is_dir && entry.name != ".." {
                format!("{}/", entry.name)
            } else {
                entry.name.clone()
            };
            let style = if entry.is_dir {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let style = if selected && list_focused {
                style.reversed()
            } else {
                style
            };
            Line::styled(format!("{marker} {display_name}"), style)
        })
        .collect();
    frame.render_widget(Paragraph::new(items), list_area);

    let name_area = Rect {
        y: list_area.y + list_area.height + 1,
        height: 1,
        ..inner
    };
    let input_style = if list_focused {
        Style::default()
    } else {
        Style::default().add_modifier(Modifier::UNDERLINED)
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Name: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(dialog.input().to_string(), input_style),
        ])),
        name_area,
    );

    let hint_area = Rect {
        y: name_area.y + 1,
        ..name_area
    };
    let hint = dialog.hint().map_or_else(
        || format!("Filter: {}", dialog.filter().describe()),
        ToString::to_string,
    );
    let hint_style = if dialog.hint().is_some() {
        Style::default().fg(Color::Yellow)
    } else {
        dim_style
    };
    frame.render_widget(Paragraph::new(hint).style(hint_style), hint_area);

    let footer_area = Rect {
        y: hint_area.y + 1,
        ..hint_area
    };
    let footer = format!(
        "Enter: {} \u{2502} Up/Down: select \u{2502} Esc: cancel",
        dialog.mode().confirm_label()
    );
    frame.render_widget(Paragraph::new(footer).style(dim_style), footer_area);
}

pub fn render_notice(model: &Model, notice: &Notice, frame: &mut Frame, area: Rect) {
    let (title, message, border) = match notice {
        Notice::Error(message) => ("Error", message.as_str(), Color::Red),
        Notice::Information { title, message } => (title.as_str(), message.as_str(), Color::Cyan),
    };
    let popup_width = area.width.saturating_sub(8).clamp(24, 60);
    let text_width = usize::from(popup_width.saturating_sub(4)).max(1);
    // Message length over a modest popup width stays small
    #[allow(clippy::cast_possible_truncation)]
    let text_rows = message.chars().count().div_ceil(text_width).max(1) as u16;
    let popup = centered_popup_rect(popup_width, text_rows + 6, area);

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .padding(Padding::uniform(1))
        .style(model.theme.popup);
    let lines = vec![
        Line::raw(message.to_string()),
        Line::raw(""),
        Line::styled("Enter: OK", Style::default().fg(Color::Indexed(245))),
    ];
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        popup,
    );
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut all_lines: Vec<Line> = Vec::new();

    all_lines.push(Line::styled("File", section_style));
    all_lines.push(Line::raw("  F10 / Alt+F         File menu"));
    all_lines.push(Line::raw("  Ctrl+O              Open..."));
    all_lines.push(Line::raw("  Ctrl+S              Save"));
    all_lines.push(Line::raw("  F12                 Save As.."));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Editor", section_style));
    all_lines.push(Line::raw("  Arrows, Home/End    Navigate"));
    all_lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    all_lines.push(Line::raw("  Ctrl+Home/End       Buffer start / end"));
    all_lines.push(Line::raw("  PageUp/PageDown     Page"));
    all_lines.push(Line::raw("  Tab                 Insert four spaces"));
    all_lines.push(Line::raw("  Click               Move cursor"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Preview", section_style));
    all_lines.push(Line::raw("  Alt+Up/Down, wheel  Scroll"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Other", section_style));
    all_lines.push(Line::raw("  F1                  Toggle help"));
    all_lines.push(Line::raw("  Ctrl+Q              Quit"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Config", section_style));
    all_lines.push(Line::raw(format!("  Global: {global_cfg}")));
    all_lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(model.theme.popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(all_lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
