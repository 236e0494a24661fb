//! Byte-column / character-offset translation.
//!
//! The external prose linter reports positions as line numbers plus **UTF-8 byte** column
//! spans; the editor addresses text in **characters** (Unicode scalar values). These functions
//! bridge the two against the current [`Document`].
//!
//! Lines are 1-based at the linter boundary and 0-based everywhere in this crate; that
//! conversion happens exactly once, in the payload parser of the check-integration crate.
//! Every `line` argument here is 0-based.
//!
//! Out-of-range input never fails: lines clamp to the last line and columns clamp to the line
//! length, so a single malformed finding cannot block the rest of a check result.

use crate::document::Document;

/// Convert a byte column within `line_text` into a character column.
///
/// Walks the line accumulating `char::len_utf8`, stopping at the first character whose starting
/// byte offset reaches `byte_col`. Multi-byte characters advance the byte counter by more than
/// one per character, so the character column is ≤ the byte column. A `byte_col` that lands
/// inside a multi-byte character rounds up to the next character boundary; columns past the end
/// of the line clamp to the line's character count.
pub fn byte_to_char_col(line_text: &str, byte_col: usize) -> usize {
    let mut bytes = 0usize;
    let mut chars = 0usize;
    for ch in line_text.chars() {
        if bytes >= byte_col {
            return chars;
        }
        bytes += ch.len_utf8();
        chars += 1;
    }
    chars
}

/// Convert a character column within `line_text` into a byte column (inverse of
/// [`byte_to_char_col`]). Columns past the end of the line clamp to the line's byte length.
pub fn char_to_byte_col(line_text: &str, char_col: usize) -> usize {
    line_text
        .chars()
        .take(char_col)
        .map(char::len_utf8)
        .sum()
}

/// Resolve a (0-based line, byte column) position into an absolute character offset.
///
/// Out-of-range lines clamp to the last line; out-of-range columns clamp to the line length.
pub fn resolve_offset(doc: &Document, line: usize, byte_col: usize) -> usize {
    let line = line.min(doc.line_count().saturating_sub(1));
    let line_text = doc.line_text(line).unwrap_or_default();
    let char_col = byte_to_char_col(&line_text, byte_col);
    doc.line_to_char(line) + char_col
}

/// Resolve an absolute character offset into a (0-based line, byte column) position
/// (inverse of [`resolve_offset`]). Offsets past the end clamp to the end of the document.
pub fn resolve_position(doc: &Document, char_offset: usize) -> (usize, usize) {
    let char_offset = char_offset.min(doc.char_count());
    let line = doc.char_to_line(char_offset);
    let char_col = char_offset - doc.line_to_char(line);
    let line_text = doc.line_text(line).unwrap_or_default();
    (line, char_to_byte_col(&line_text, char_col))
}
