//! Markdown rendering with comrak.

use comrak::nodes::{AstNode, ListDelimType, ListType, NodeValue, TableAlignment};
use comrak::{Arena, Options, parse_document};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::types::{Document, HeadingRef, InlineSpan, InlineStyle, LineType, RenderedLine};

/// Width used when no pane width is known yet.
pub const DEFAULT_WIDTH: u16 = 80;

impl Document {
    /// Render markdown source at the default width.
    ///
    /// # Example
    ///
    /// ```
    /// use markedly::document::Document;
    ///
    /// let doc = Document::render("# Hello\n\nWorld");
    /// assert_eq!(doc.headings()[0].text, "Hello");
    /// ```
    pub fn render(source: &str) -> Self {
        render(source, DEFAULT_WIDTH)
    }
}

/// Render markdown source into preview lines wrapped to `width` columns.
///
/// Never fails: comrak accepts any input, and constructs it does not
/// understand fall through to their text content.
pub fn render(source: &str, width: u16) -> Document {
    let arena = Arena::new();
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    let root = parse_document(&arena, source, &options);

    let mut layout = Layout {
        lines: Vec::new(),
        headings: Vec::new(),
        wrap_width: usize::from(width.max(1)),
    };
    layout.block(root, 0, None);

    // Drop the trailing separator so the preview ends on content.
    while layout
        .lines
        .last()
        .is_some_and(|line| matches!(line.line_type(), LineType::Empty))
    {
        layout.lines.pop();
    }

    Document::new(width, layout.lines, layout.headings)
}

struct Layout {
    lines: Vec<RenderedLine>,
    headings: Vec<HeadingRef>,
    wrap_width: usize,
}

impl Layout {
    fn block<'a>(&mut self, node: &'a AstNode<'a>, depth: usize, list_marker: Option<String>) {
        match &node.data.borrow().value {
            NodeValue::Heading(heading) => {
                let text = extract_text(node);
                if !self.lines.is_empty() {
                    self.ensure_trailing_empty_lines(1);
                }
                self.headings.push(HeadingRef {
                    level: heading.level,
                    text: text.clone(),
                    line: self.lines.len(),
                });
                let prefix = "#".repeat(usize::from(heading.level));
                self.push(format!("{prefix} {text}"), LineType::Heading(heading.level));
                self.blank();
            }

            NodeValue::Paragraph => {
                let spans = collect_inline_spans(node);
                self.push_wrapped(&spans, "", "", LineType::Paragraph);
                self.blank();
            }

            NodeValue::CodeBlock(code_block) => {
                self.code_block(&code_block.info, &code_block.literal);
                self.blank();
            }

            NodeValue::HtmlBlock(html) => {
                for raw in html.literal.lines() {
                    self.push(raw.to_string(), LineType::Paragraph);
                }
                self.blank();
            }

            NodeValue::List(list) => {
                let list_depth = depth + 1;
                let delimiter = match list.delimiter {
                    ListDelimType::Paren => ')',
                    ListDelimType::Period => '.',
                };
                let count = node.children().count();
                let number_width = (list.start + count.saturating_sub(1)).to_string().len();
                for (index, child) in node.children().enumerate() {
                    let marker = match list.list_type {
                        ListType::Bullet => "• ".to_string(),
                        ListType::Ordered => {
                            format!("{:>number_width$}{delimiter} ", list.start + index)
                        }
                    };
                    self.block(child, list_depth, Some(marker));
                }
                if depth == 0 {
                    self.blank();
                }
            }

            NodeValue::Item(_) | NodeValue::TaskItem(_) => {
                self.list_item(node, depth, list_marker);
            }

            NodeValue::BlockQuote => {
                self.blockquote(node, 1);
                self.blank();
            }

            NodeValue::ThematicBreak => {
                self.push(
                    "─".repeat(self.wrap_width.min(40)),
                    LineType::HorizontalRule,
                );
                self.blank();
            }

            NodeValue::Table(_) => {
                for line in render_table(node, self.wrap_width) {
                    self.push(line, LineType::Table);
                }
                self.blank();
            }

            NodeValue::FootnoteDefinition(def) => {
                let label = format!("[^{}]: ", def.name);
                let continuation = " ".repeat(label.chars().count());
                let spans = collect_inline_spans(node);
                self.push_wrapped(&spans, &label, &continuation, LineType::Paragraph);
                self.blank();
            }

            _ => {
                for child in node.children() {
                    self.block(child, depth, list_marker.clone());
                }
            }
        }
    }

    fn list_item<'a>(&mut self, node: &'a AstNode<'a>, depth: usize, list_marker: Option<String>) {
        let indent = "  ".repeat(depth.saturating_sub(1));
        let marker = match &node.data.borrow().value {
            NodeValue::TaskItem(symbol) => task_marker(symbol.is_some()),
            _ => list_marker.unwrap_or_else(|| "• ".to_string()),
        };
        let prefix_first = format!("{indent}{marker}");
        let prefix_next = format!("{indent}{}", " ".repeat(marker.chars().count()));
        let mut rendered_any = false;

        for child in node.children() {
            let is_paragraph = matches!(child.data.borrow().value, NodeValue::Paragraph);
            if is_paragraph {
                let spans = collect_inline_spans(child);
                let prefix = if rendered_any {
                    &prefix_next
                } else {
                    &prefix_first
                };
                self.push_wrapped(&spans, prefix, &prefix_next, LineType::ListItem(depth));
                rendered_any = true;
            } else {
                self.block(child, depth, None);
            }
        }

        if !rendered_any {
            self.push(prefix_first, LineType::ListItem(depth));
        }
    }

    fn blockquote<'a>(&mut self, node: &'a AstNode<'a>, quote_depth: usize) {
        let prefix = "│ ".repeat(quote_depth);
        for child in node.children() {
            let is_nested = matches!(child.data.borrow().value, NodeValue::BlockQuote);
            if is_nested {
                self.blockquote(child, quote_depth + 1);
                continue;
            }
            let spans = if matches!(child.data.borrow().value, NodeValue::Paragraph) {
                collect_inline_spans(child)
            } else {
                vec![InlineSpan::new(extract_text(child), InlineStyle::default())]
            };
            self.push_wrapped(&spans, &prefix, &prefix, LineType::BlockQuote);
        }
    }

    fn code_block(&mut self, info: &str, literal: &str) {
        const CODE_RIGHT_PADDING: usize = 1;
        let language = info.split_whitespace().next().unwrap_or("code");
        let content_width = literal
            .lines()
            .map(display_width)
            .max()
            .unwrap_or(0)
            .min(self.wrap_width.saturating_sub(4 + CODE_RIGHT_PADDING).max(1));
        let frame_inner_width = content_width + 2 + CODE_RIGHT_PADDING;
        let label = truncate_text(&format!(" {language} "), frame_inner_width);
        let top = format!(
            "┌{label}{}┐",
            "─".repeat(frame_inner_width.saturating_sub(display_width(&label)))
        );
        self.push(top, LineType::CodeBlock);

        let code_style = InlineStyle {
            code: true,
            ..InlineStyle::default()
        };
        for raw_line in literal.lines() {
            let body = truncate_text(raw_line, content_width);
            let padding =
                " ".repeat(content_width.saturating_sub(display_width(&body)) + CODE_RIGHT_PADDING);
            let spans = vec![
                InlineSpan::new("│ ".to_string(), InlineStyle::default()),
                InlineSpan::new(body, code_style),
                InlineSpan::new(format!("{padding}│"), InlineStyle::default()),
            ];
            self.push_spans(spans, LineType::CodeBlock);
        }

        self.push(
            format!("└{}┘", "─".repeat(frame_inner_width)),
            LineType::CodeBlock,
        );
    }

    fn push(&mut self, content: String, line_type: LineType) {
        self.lines.push(RenderedLine::new(content, line_type));
    }

    fn push_spans(&mut self, spans: Vec<InlineSpan>, line_type: LineType) {
        let content = spans_to_string(&spans);
        self.lines
            .push(RenderedLine::with_spans(content, line_type, spans));
    }

    fn push_wrapped(
        &mut self,
        spans: &[InlineSpan],
        prefix_first: &str,
        prefix_next: &str,
        line_type: LineType,
    ) {
        for line_spans in wrap_spans(spans, self.wrap_width, prefix_first, prefix_next) {
            self.push_spans(line_spans, line_type);
        }
    }

    fn blank(&mut self) {
        self.ensure_trailing_empty_lines(1);
    }

    fn ensure_trailing_empty_lines(&mut self, count: usize) {
        let existing = self
            .lines
            .iter()
            .rev()
            .take_while(|line| matches!(line.line_type(), LineType::Empty))
            .count();
        for _ in existing..count {
            self.push(String::new(), LineType::Empty);
        }
    }
}

fn task_marker(checked: bool) -> String {
    if checked { "✓ " } else { "□ " }.to_string()
}

fn render_table<'a>(table_node: &'a AstNode<'a>, wrap_width: usize) -> Vec<String> {
    let (alignments, mut rows, has_header) = collect_table_rows(table_node);
    let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if num_cols == 0 {
        return Vec::new();
    }

    for row in &mut rows {
        row.resize(num_cols, String::new());
    }

    let mut col_widths = vec![1_usize; num_cols];
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            col_widths[idx] = col_widths[idx].max(display_width(cell));
        }
    }

    // Row width is 1 + sum(col_width + 3); shrink the widest column until it fits.
    let max_table_width = wrap_width.max(4);
    while 1 + col_widths.iter().sum::<usize>() + (3 * num_cols) > max_table_width {
        let Some((widest_idx, widest)) = col_widths
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|(_, w)| *w)
        else {
            break;
        };
        if widest <= 1 {
            break;
        }
        col_widths[widest_idx] -= 1;
    }

    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push(render_table_border(&col_widths, '┌', '┬', '┐'));
    for (idx, row) in rows.iter().enumerate() {
        lines.push(render_table_row(row, &col_widths, &alignments));
        if has_header && idx == 0 {
            lines.push(render_table_border(&col_widths, '├', '┼', '┤'));
        }
    }
    lines.push(render_table_border(&col_widths, '└', '┴', '┘'));
    lines
}

fn collect_table_rows<'a>(
    table_node: &'a AstNode<'a>,
) -> (Vec<TableAlignment>, Vec<Vec<String>>, bool) {
    let alignments = match &table_node.data.borrow().value {
        NodeValue::Table(table) => table.alignments.clone(),
        _ => Vec::new(),
    };

    let mut rows = Vec::new();
    let mut has_header = false;
    for row_node in table_node.children() {
        let is_header = match row_node.data.borrow().value {
            NodeValue::TableRow(header) => header,
            _ => continue,
        };
        has_header |= is_header;

        let cells = row_node
            .children()
            .filter(|cell| matches!(cell.data.borrow().value, NodeValue::TableCell))
            .map(|cell| {
                extract_text(cell)
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        rows.push(cells);
    }

    (alignments, rows, has_header)
}

fn render_table_border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let inner = widths
        .iter()
        .map(|width| "─".repeat(width + 2))
        .collect::<Vec<_>>()
        .join(&middle.to_string());
    format!("{left}{inner}{right}")
}

fn render_table_row(cells: &[String], widths: &[usize], alignments: &[TableAlignment]) -> String {
    let mut out = String::from("│");
    for (idx, width) in widths.iter().copied().enumerate() {
        let content = truncate_text(cells.get(idx).map_or("", String::as_str), width);
        let padding = width.saturating_sub(display_width(&content));
        let (left, right) = match alignments.get(idx).copied().unwrap_or(TableAlignment::None) {
            TableAlignment::Right => (padding, 0),
            TableAlignment::Center => (padding / 2, padding - padding / 2),
            TableAlignment::Left | TableAlignment::None => (0, padding),
        };
        out.push(' ');
        out.push_str(&" ".repeat(left));
        out.push_str(&content);
        out.push_str(&" ".repeat(right));
        out.push_str(" │");
    }
    out
}

fn truncate_text(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out
}

fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_recursive(node, &mut text);
    text
}

fn extract_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(c) => text.push_str(&c.literal),
        NodeValue::CodeBlock(c) => text.push_str(&c.literal),
        NodeValue::HtmlInline(html) => text.push_str(html),
        NodeValue::FootnoteReference(reference) => {
            text.push_str(&format!("[^{}]", reference.name));
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
        _ => {
            for child in node.children() {
                extract_text_recursive(child, text);
            }
        }
    }
}

fn collect_inline_spans<'a>(node: &'a AstNode<'a>) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    collect_inline_spans_recursive(node, InlineStyle::default(), &mut spans);
    spans
}

fn collect_inline_spans_recursive<'a>(
    node: &'a AstNode<'a>,
    style: InlineStyle,
    spans: &mut Vec<InlineSpan>,
) {
    let nested = match &node.data.borrow().value {
        // Nested blocks are laid out by the block renderer.
        NodeValue::List(_) | NodeValue::Item(_) | NodeValue::CodeBlock(_) => return,
        NodeValue::Text(t) => {
            spans.push(InlineSpan::new(t.clone(), style));
            return;
        }
        NodeValue::HtmlInline(html) => {
            spans.push(InlineSpan::new(html.clone(), style));
            return;
        }
        NodeValue::Code(code) => {
            let code_style = InlineStyle {
                code: true,
                link: style.link,
                ..InlineStyle::default()
            };
            spans.push(InlineSpan::new(code.literal.clone(), code_style));
            return;
        }
        NodeValue::Image(image) => {
            let alt = extract_text(node);
            let label = if alt.is_empty() { image.url.clone() } else { alt };
            spans.push(InlineSpan::new(format!("[Image: {label}]"), style));
            return;
        }
        NodeValue::FootnoteReference(reference) => {
            spans.push(InlineSpan::new(format!("[^{}]", reference.name), style));
            return;
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            spans.push(InlineSpan::new(" ".to_string(), style));
            return;
        }
        NodeValue::Emph => InlineStyle {
            emphasis: true,
            ..style
        },
        NodeValue::Strong => InlineStyle {
            strong: true,
            ..style
        },
        NodeValue::Strikethrough => InlineStyle {
            strikethrough: true,
            ..style
        },
        NodeValue::Link(_) => InlineStyle { link: true, ..style },
        _ => style,
    };
    for child in node.children() {
        collect_inline_spans_recursive(child, nested, spans);
    }
}

fn wrap_spans(
    spans: &[InlineSpan],
    width: usize,
    prefix_first: &str,
    prefix_next: &str,
) -> Vec<Vec<InlineSpan>> {
    let tokens: Vec<InlineSpan> = spans.iter().flat_map(split_inline_tokens).collect();

    let mut lines: Vec<Vec<InlineSpan>> = Vec::new();
    let mut current = start_line(prefix_first);
    let mut prefix_spans = current.len();
    let mut current_len = display_width(prefix_first);
    let mut has_word = false;

    for token in tokens {
        let token_len = display_width(token.text());
        let token_is_ws = token.text().chars().all(char::is_whitespace);

        if current_len + token_len > width && has_word {
            let mut done = std::mem::replace(&mut current, start_line(prefix_next));
            trim_trailing_whitespace(&mut done, prefix_spans);
            lines.push(done);
            prefix_spans = current.len();
            current_len = display_width(prefix_next);
            has_word = false;
        }

        // Drop leading whitespace at wrapped line starts.
        if token_is_ws && !has_word {
            continue;
        }

        current_len += token_len;
        current.push(token);
        has_word = true;
    }

    trim_trailing_whitespace(&mut current, prefix_spans);
    lines.push(current);
    lines
}

fn trim_trailing_whitespace(line: &mut Vec<InlineSpan>, keep: usize) {
    while line.len() > keep
        && line
            .last()
            .is_some_and(|span| span.text().chars().all(char::is_whitespace))
    {
        line.pop();
    }
}

fn start_line(prefix: &str) -> Vec<InlineSpan> {
    if prefix.is_empty() {
        Vec::new()
    } else {
        vec![InlineSpan::new(prefix.to_string(), InlineStyle::default())]
    }
}

fn split_inline_tokens(span: &InlineSpan) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut ws_state: Option<bool> = None;

    for ch in span.text().chars() {
        let is_ws = ch.is_whitespace();
        if ws_state.is_some_and(|state| state != is_ws) {
            out.push(InlineSpan::new(std::mem::take(&mut buf), span.style()));
        }
        buf.push(ch);
        ws_state = Some(is_ws);
    }

    if !buf.is_empty() {
        out.push(InlineSpan::new(buf, span.style()));
    }

    out
}

fn spans_to_string(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}
