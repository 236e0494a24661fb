//! Rope-backed document text.
//!
//! The overlay engine addresses text in character offsets (Unicode scalar values), while the
//! external linter reports byte columns. [`Document`] owns the text and provides the line/char
//! addressing both sides need; the byte arithmetic lives in [`crate::position`].

use crate::delta::TextDeltaEdit;
use ropey::Rope;

/// An editable text document addressed by character offsets.
///
/// Ropes give O(log n) line access and editing, so remapping work after a keystroke never scans
/// the whole document.
#[derive(Debug, Clone)]
pub struct Document {
    rope: Rope,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a document from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Total line count. An empty document has one (empty) line.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Character offset of the first character of `line` (0-based).
    ///
    /// Lines past the end clamp to the end of the document.
    pub fn line_to_char(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(line)
    }

    /// Line (0-based) containing the given character offset. Offsets past the end clamp to the
    /// last line.
    pub fn char_to_line(&self, char_offset: usize) -> usize {
        let char_offset = char_offset.min(self.rope.len_chars());
        self.rope.char_to_line(char_offset)
    }

    /// Text of `line` (0-based), without the trailing newline. `None` if the line does not exist.
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }

        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }
        Some(text)
    }

    /// Insert `text` at a character offset (clamped to the document end).
    pub fn insert(&mut self, char_offset: usize, text: &str) {
        let char_offset = char_offset.min(self.rope.len_chars());
        self.rope.insert(char_offset, text);
    }

    /// Delete `len_chars` characters starting at `start_char` (clamped to the document).
    pub fn delete(&mut self, start_char: usize, len_chars: usize) {
        let start_char = start_char.min(self.rope.len_chars());
        let end_char = start_char.saturating_add(len_chars).min(self.rope.len_chars());
        if start_char < end_char {
            self.rope.remove(start_char..end_char);
        }
    }

    /// Apply one structured edit: delete the edit's removed text, then insert its replacement.
    pub fn apply_edit(&mut self, edit: &TextDeltaEdit) {
        self.delete(edit.start, edit.deleted_len());
        if !edit.inserted_text.is_empty() {
            self.insert(edit.start, &edit.inserted_text);
        }
    }

    /// Full document text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
