//! Search query editing state.

/// Editable search query with a cursor.
///
/// The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    /// Whether the search bar has keyboard focus.
    pub active: bool,
    query: String,
    cursor: usize,
}

impl SearchInput {
    /// Create an empty, inactive search input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Give the search bar focus, keeping the current query.
    pub fn activate(&mut self) {
        self.active = true;
        self.cursor = self.char_len();
    }

    /// Release focus, keeping the current query.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.query.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor. Returns whether the query changed.
    pub fn delete_char_before(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.query.remove(at);
        true
    }

    /// Delete the character at the cursor. Returns whether the query changed.
    pub fn delete_char_at(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.query.remove(at);
        true
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn move_cursor_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Clear the query.
    pub fn clear_query(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }
}
