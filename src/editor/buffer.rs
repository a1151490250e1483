use ropey::Rope;

/// Cursor position in the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column, counted in chars within the line.
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }

    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The document text, backed by a rope.
///
/// Every mutation bumps [`EditorBuffer::revision`], which is how the
/// session notices that the preview has to be rendered again.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
    dirty: bool,
    revision: u64,
}

impl EditorBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            dirty: false,
            revision: 0,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Replace the whole text, moving the cursor to the start.
    ///
    /// The buffer is considered clean afterwards: this is how loaded
    /// file contents enter the editor.
    pub fn replace_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = Cursor::new();
        self.dirty = false;
        self.bump();
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (e.g., after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Monotonic counter of text mutations.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Length of a line in chars (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.chars().count())
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.split_line();
            return;
        }
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, ch);
        self.cursor.set_col(self.cursor.col + 1);
        self.touch();
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let char_idx = self.cursor_char_idx();
        self.rope.insert(char_idx, s);

        let segments: Vec<&str> = s.split('\n').collect();
        if segments.len() > 1 {
            self.cursor.line += segments.len() - 1;
            self.cursor
                .set_col(segments.last().map_or(0, |l| l.chars().count()));
        } else {
            self.cursor.set_col(self.cursor.col + s.chars().count());
        }
        self.touch();
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, '\n');
        self.cursor.line += 1;
        self.cursor.set_col(0);
        self.touch();
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return false;
        }

        let char_idx = self.cursor_char_idx();
        if self.cursor.col == 0 {
            // Join with previous line
            let prev_line_len = self.line_len(self.cursor.line - 1);
            let remove_from = if char_idx >= 2 && self.rope.char(char_idx - 2) == '\r' {
                char_idx - 2
            } else {
                char_idx - 1
            };
            self.rope.remove(remove_from..char_idx);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_line_len);
        } else {
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.set_col(self.cursor.col - 1);
        }
        self.touch();
        true
    }

    /// Delete the character at the cursor (Delete key).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_forward(&mut self) -> bool {
        let char_idx = self.cursor_char_idx();
        if char_idx >= self.rope.len_chars() {
            return false;
        }
        let end = if self.rope.char(char_idx) == '\r'
            && char_idx + 1 < self.rope.len_chars()
            && self.rope.char(char_idx + 1) == '\n'
        {
            char_idx + 2
        } else {
            char_idx + 1
        };
        self.rope.remove(char_idx..end);
        self.touch();
        true
    }

    /// Move the cursor in the given direction.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.cursor.set_col(self.line_len(self.cursor.line));
            }
            return;
        }

        let line: Vec<char> = self
            .line_at(self.cursor.line)
            .unwrap_or_default()
            .chars()
            .collect();
        let mut pos = self.cursor.col.min(line.len());
        while pos > 0 && !is_word_char(line[pos - 1]) {
            pos -= 1;
        }
        while pos > 0 && is_word_char(line[pos - 1]) {
            pos -= 1;
        }
        self.cursor.set_col(pos);
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);

        if self.cursor.col >= line_len {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }

        let line: Vec<char> = self
            .line_at(self.cursor.line)
            .unwrap_or_default()
            .chars()
            .collect();
        let mut pos = self.cursor.col;
        while pos < line.len() && is_word_char(line[pos]) {
            pos += 1;
        }
        while pos < line.len() && !is_word_char(line[pos]) {
            pos += 1;
        }
        self.cursor.set_col(pos);
    }

    /// Move cursor to a specific line and column, clamped to the text.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let max_col = self.line_len(self.cursor.line);
        self.cursor.set_col(col.min(max_col));
    }

    /// Move cursor to the start of the buffer (Ctrl+Home).
    pub const fn move_to_start(&mut self) {
        self.cursor.line = 0;
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self) {
        let last_line = self.line_count().saturating_sub(1);
        self.cursor.line = last_line;
        self.cursor.set_col(self.line_len(last_line));
    }

    // --- Private helpers ---

    const fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    const fn touch(&mut self) {
        self.dirty = true;
        self.bump();
    }

    fn cursor_char_idx(&self) -> usize {
        let line_start = self.rope.line_to_char(self.cursor.line);
        line_start + self.cursor.col.min(self.line_len(self.cursor.line))
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.set_col(self.cursor.col - 1);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        if self.cursor.col < self.line_len(self.cursor.line) {
            self.cursor.set_col(self.cursor.col + 1);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            let max_col = self.line_len(self.cursor.line);
            self.cursor.col = self.cursor.col_memory.min(max_col);
        }
    }

    fn move_down(&mut self) {
        if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            let max_col = self.line_len(self.cursor.line);
            self.cursor.col = self.cursor.col_memory.min(max_col);
        }
    }
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("dirty", &self.dirty)
            .field("revision", &self.revision)
            .finish()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
