use super::*;
use crate::app::{Message, Model, update};
use crate::dialog::{DialogMode, FileDialog};
use crate::session::{ExtensionFilter, FileRef, Notice, OpenSelection, Session, complete_open};
use crate::ui::style::Theme;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn draw(model: &Model) -> Buffer {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal.backend().buffer().clone()
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect()
}

fn screen_text(buffer: &Buffer) -> String {
    (0..buffer.area.height)
        .map(|y| row_text(buffer, y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn model_with_text(text: &str) -> Model {
    update(
        Model::new(Session::default(), (80, 24)),
        Message::EditorInsertStr(text.to_string()),
    )
}

fn model_with_file(name: &str, body: &'static str) -> Model {
    let mut model = Model::new(Session::default(), (80, 24));
    let selection = OpenSelection {
        location: FileRef::new(name),
        reader: Box::new(body.as_bytes()),
    };
    complete_open(&mut model.session, Ok(Some(selection)), &mut model.notices);
    model
}

#[test]
fn test_menu_bar_shows_file_label_and_title() {
    let buffer = draw(&Model::new(Session::default(), (80, 24)));
    let top = row_text(&buffer, 0);
    assert!(top.starts_with(" File "), "menu bar: {top:?}");
    assert!(top.trim_end().ends_with("Markedly"), "menu bar: {top:?}");
}

#[test]
fn test_title_follows_associated_file() {
    let buffer = draw(&model_with_file("notes.md", "body text"));
    assert!(row_text(&buffer, 0).contains("Markedly - notes.md"));
}

#[test]
fn test_panes_are_side_by_side() {
    let buffer = draw(&model_with_text("# Hi"));
    let pane_top = row_text(&buffer, 1);
    let editor_at = pane_top.find("Editor").unwrap();
    let preview_at = pane_top.find("Preview").unwrap();
    assert!(editor_at < preview_at);
    assert!(preview_at >= 40);
}

#[test]
fn test_preview_shows_rendered_heading() {
    let model = model_with_text("# Hi\n\nsome *body*");
    let buffer = draw(&model);
    let preview = crate::ui::pane_inner(model.screen().preview);
    let first = row_text(&buffer, preview.y);
    let preview_part: String = first.chars().skip(usize::from(preview.x)).collect();
    assert!(preview_part.contains("# Hi"), "preview row: {first:?}");

    let heading_cell = &buffer[(preview.x + PREVIEW_LEFT_PADDING + 2, preview.y)];
    assert_eq!(heading_cell.fg, Theme::dark().h1.fg.unwrap());
}

#[test]
fn test_editor_shows_line_numbers_and_text() {
    let model = model_with_text("alpha\nbeta");
    let buffer = draw(&model);
    let editor = crate::ui::pane_inner(model.screen().editor);
    assert!(row_text(&buffer, editor.y).contains("1 alpha"));
    assert!(row_text(&buffer, editor.y + 1).contains("2 beta"));
}

#[test]
fn test_status_bar_shows_name_dirty_and_cursor() {
    let buffer = draw(&model_with_text("abcd"));
    let status = row_text(&buffer, 23);
    assert!(status.contains("untitled [modified]"), "status: {status:?}");
    assert!(status.contains("Ln 1, Col 5"), "status: {status:?}");
}

#[test]
fn test_status_bar_clean_after_open() {
    let buffer = draw(&model_with_file("notes.md", "body text"));
    let status = row_text(&buffer, 23);
    assert!(status.contains("notes.md"));
    assert!(!status.contains("[modified]"));
}

#[test]
fn test_file_dropdown_greys_out_save_without_file() {
    let model = update(Model::new(Session::default(), (80, 24)), Message::OpenMenu);
    let buffer = draw(&model);
    let dropdown = menu_dropdown_rect(model.screen().menu_bar);

    let open_row = row_text(&buffer, dropdown.y + 1);
    let save_row = row_text(&buffer, dropdown.y + 2);
    let save_as_row = row_text(&buffer, dropdown.y + 3);
    assert!(open_row.contains("Open..."));
    assert!(open_row.contains("Ctrl+O"));
    assert!(save_row.contains("Save"));
    assert!(save_as_row.contains("Save As.."));

    let theme = Theme::dark();
    let save_cell = &buffer[(dropdown.x + 2, dropdown.y + 2)];
    assert_eq!(save_cell.fg, theme.menu_disabled.fg.unwrap());
    let open_cell = &buffer[(dropdown.x + 2, dropdown.y + 1)];
    assert_eq!(open_cell.bg, theme.menu_highlight.bg.unwrap());
}

#[test]
fn test_file_dropdown_enables_save_with_file() {
    let model = update(model_with_file("notes.md", "x"), Message::OpenMenu);
    let buffer = draw(&model);
    let dropdown = menu_dropdown_rect(model.screen().menu_bar);
    let save_cell = &buffer[(dropdown.x + 2, dropdown.y + 2)];
    assert_ne!(save_cell.fg, Theme::dark().menu_disabled.fg.unwrap());
}

#[test]
fn test_dialog_lists_markdown_files_only() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("readme.md"), "").unwrap();
    std::fs::write(dir.path().join("image.png"), "").unwrap();
    std::fs::create_dir(dir.path().join("docs")).unwrap();

    let mut model = Model::new(Session::default(), (80, 24));
    model.dialog = Some(
        FileDialog::new(DialogMode::Open, dir.path(), ExtensionFilter::markdown()).unwrap(),
    );
    let text = screen_text(&draw(&model));
    assert!(text.contains("Open File"));
    assert!(text.contains("docs/"));
    assert!(text.contains("readme.md"));
    assert!(!text.contains("image.png"));
    assert!(text.contains("Filter: .md, .MD"));
}

#[test]
fn test_save_dialog_prefills_name() {
    let dir = tempfile::tempdir().unwrap();
    let mut model = Model::new(Session::default(), (80, 24));
    model.dialog = Some(
        FileDialog::new(DialogMode::Save, dir.path(), ExtensionFilter::markdown())
            .unwrap()
            .with_input("untitled.md"),
    );
    let text = screen_text(&draw(&model));
    assert!(text.contains("Save File"));
    assert!(text.contains("Name: untitled.md"));
    assert!(text.contains("Enter: Save"));
}

#[test]
fn test_notice_popup_shows_message() {
    let mut model = Model::new(Session::default(), (80, 24));
    model.notices.push(Notice::Information {
        title: "Invalid file name".to_string(),
        message: "File extension must be .md".to_string(),
    });
    let text = screen_text(&draw(&model));
    assert!(text.contains("Invalid file name"));
    assert!(text.contains("File extension must be .md"));
    assert!(text.contains("Enter: OK"));
}

#[test]
fn test_error_notice_is_titled_error() {
    let mut model = Model::new(Session::default(), (80, 24));
    model.notices.push(Notice::Error("cannot open x.md".to_string()));
    let text = screen_text(&draw(&model));
    assert!(text.contains("Error"));
    assert!(text.contains("cannot open x.md"));
}

#[test]
fn test_help_overlay_lists_file_commands() {
    let model = update(Model::new(Session::default(), (80, 24)), Message::ToggleHelp);
    let text = screen_text(&draw(&model));
    assert!(text.contains("Help"));
    assert!(text.contains("Save As.."));
    assert!(text.contains("Word movement"));
}

#[test]
fn test_quit_warning_toast_sits_above_status() {
    let model = update(model_with_text("x"), Message::Quit);
    let buffer = draw(&model);
    assert!(row_text(&buffer, 22).contains("[warn] Unsaved changes!"));
    assert!(row_text(&buffer, 23).contains("[modified]"));
}

#[test]
fn test_layout_reserves_toast_row() {
    let area = Rect::new(0, 0, 80, 24);
    let plain = screen_layout(area, false);
    let with_toast = screen_layout(area, true);
    assert_eq!(plain.toast, None);
    assert_eq!(with_toast.toast, Some(Rect::new(0, 22, 80, 1)));
    assert_eq!(plain.editor.height, with_toast.editor.height + 1);
    assert_eq!(plain.status, Rect::new(0, 23, 80, 1));
}

#[test]
fn test_editor_hscroll_keeps_cursor_visible() {
    assert_eq!(editor_hscroll(5, 10), 0);
    assert_eq!(editor_hscroll(10, 10), 1);
    assert_eq!(editor_hscroll(25, 10), 16);
    assert_eq!(editor_hscroll(3, 0), 0);
}

#[test]
fn test_line_number_width() {
    assert_eq!(line_number_width(1), 1);
    assert_eq!(line_number_width(9), 1);
    assert_eq!(line_number_width(10), 2);
    assert_eq!(line_number_width(1_000), 4);
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let model = Model::new(Session::default(), (10, 3));
    let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
    terminal.draw(|frame| render(&model, frame)).unwrap();
}
