//! Core preview types.

/// A rendered markdown document, ready to be drawn in the preview pane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Width the lines were wrapped to
    width: u16,
    /// Rendered lines for display
    lines: Vec<RenderedLine>,
    /// Heading references, in document order
    headings: Vec<HeadingRef>,
}

impl Document {
    pub(crate) const fn new(
        width: u16,
        lines: Vec<RenderedLine>,
        headings: Vec<HeadingRef>,
    ) -> Self {
        Self {
            width,
            lines,
            headings,
        }
    }

    /// Get the total number of rendered lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get all headings.
    pub fn headings(&self) -> &[HeadingRef] {
        &self.headings
    }

    /// Get all rendered lines.
    pub fn lines(&self) -> &[RenderedLine] {
        &self.lines
    }

    /// Get the lines starting at `offset`, at most `count` of them.
    pub fn visible_lines(&self, offset: usize, count: usize) -> &[RenderedLine] {
        let start = offset.min(self.lines.len());
        let end = (offset + count).min(self.lines.len());
        &self.lines[start..end]
    }

    pub fn line_at(&self, index: usize) -> Option<&RenderedLine> {
        self.lines.get(index)
    }

    /// Width the document was laid out for.
    pub const fn width(&self) -> u16 {
        self.width
    }
}

/// A single rendered line with styling information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    content: String,
    line_type: LineType,
    spans: Vec<InlineSpan>,
}

impl RenderedLine {
    /// Create a new rendered line.
    pub const fn new(content: String, line_type: LineType) -> Self {
        Self {
            content,
            line_type,
            spans: Vec::new(),
        }
    }

    /// Create a new rendered line with inline spans.
    pub const fn with_spans(content: String, line_type: LineType, spans: Vec<InlineSpan>) -> Self {
        Self {
            content,
            line_type,
            spans,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub const fn line_type(&self) -> &LineType {
        &self.line_type
    }

    /// Get inline spans, if present.
    pub fn spans(&self) -> Option<&[InlineSpan]> {
        if self.spans.is_empty() {
            None
        } else {
            Some(&self.spans)
        }
    }
}

/// Inline style flags for a text span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub emphasis: bool,
    pub strong: bool,
    pub code: bool,
    pub strikethrough: bool,
    pub link: bool,
}

/// A styled inline span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    text: String,
    style: InlineStyle,
}

impl InlineSpan {
    pub const fn new(text: String, style: InlineStyle) -> Self {
        Self { text, style }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> InlineStyle {
        self.style
    }
}

/// Type of a rendered line, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    /// Normal paragraph text
    Paragraph,
    /// Heading with level (1-6)
    Heading(u8),
    /// Code block line
    CodeBlock,
    /// Block quote line
    BlockQuote,
    /// List item with nesting level
    ListItem(usize),
    /// Table row
    Table,
    /// Horizontal rule
    HorizontalRule,
    /// Image placeholder
    Image,
    /// Empty line
    Empty,
}

/// Reference to a heading in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingRef {
    /// Heading level (1-6)
    pub level: u8,
    /// Heading text (plain, no formatting)
    pub text: String,
    /// Line number in rendered document
    pub line: usize,
}
