//! Rope-backed text mirror.
//!
//! The kernel keeps its own copy of the document text so scanning and reconciliation
//! never call back into the host mid-edit. A [`ropey::Rope`] gives O(log N) edits plus
//! the char/line conversions the restart logic needs, all in character offsets.

use crate::edit::TextEdit;
use ropey::Rope;
use std::ops::Range;

/// The kernel's copy of the document text.
pub struct TextMirror {
    rope: Rope,
}

impl TextMirror {
    /// Create an empty mirror.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build a mirror from initial text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Document length in characters.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Apply a replace edit. Out-of-range spans are clamped to the document.
    pub fn apply(&mut self, edit: &TextEdit) {
        let len = self.rope.len_chars();
        debug_assert!(edit.removed_end() <= len, "edit must fit the document");

        let start = edit.offset.min(len);
        let end = edit.removed_end().min(len);
        if start < end {
            self.rope.remove(start..end);
        }
        if !edit.inserted_text.is_empty() {
            self.rope.insert(start, &edit.inserted_text);
        }
    }

    /// Character offset of the first character of the line containing `offset`.
    pub fn line_start_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        self.rope.line_to_char(line)
    }

    /// Iterate characters starting at `offset`.
    pub fn chars_from(&self, offset: usize) -> ropey::iter::Chars<'_> {
        self.rope.chars_at(offset.min(self.rope.len_chars()))
    }

    /// Character at `offset`, if in range.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        (offset < self.rope.len_chars()).then(|| self.rope.char(offset))
    }

    /// The whole document as a `String`.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Text of a character range as a `String`, clamped to the document.
    pub fn span_text(&self, range: Range<usize>) -> String {
        let len = self.rope.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        self.rope.slice(start..end).to_string()
    }
}

impl Default for TextMirror {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_insert_delete_replace() {
        let mut mirror = TextMirror::from_text("hello world");
        mirror.apply(&TextEdit::insert(5, ","));
        assert_eq!(mirror.text(), "hello, world");

        mirror.apply(&TextEdit::delete(5, 1));
        assert_eq!(mirror.text(), "hello world");

        mirror.apply(&TextEdit::replace(6, 5, "there"));
        assert_eq!(mirror.text(), "hello there");
    }

    #[test]
    fn test_char_offsets_with_wide_chars() {
        let mut mirror = TextMirror::from_text("日本語");
        assert_eq!(mirror.len_chars(), 3);

        mirror.apply(&TextEdit::insert(1, "x"));
        assert_eq!(mirror.text(), "日x本語");
        assert_eq!(mirror.char_at(0), Some('日'));
        assert_eq!(mirror.char_at(1), Some('x'));
        assert_eq!(mirror.char_at(4), None);
    }

    #[test]
    fn test_line_start_of() {
        let mirror = TextMirror::from_text("ab\ncde\n\nf");
        assert_eq!(mirror.line_start_of(0), 0);
        assert_eq!(mirror.line_start_of(2), 0); // the newline belongs to line 0
        assert_eq!(mirror.line_start_of(3), 3);
        assert_eq!(mirror.line_start_of(6), 3);
        assert_eq!(mirror.line_start_of(7), 7); // empty line
        assert_eq!(mirror.line_start_of(8), 8);
        // Offsets at or past the end resolve to the last line.
        assert_eq!(mirror.line_start_of(9), 8);
        assert_eq!(mirror.line_start_of(100), 8);
    }

    #[test]
    fn test_chars_from_and_span_text() {
        let mirror = TextMirror::from_text("abc def");
        let tail: String = mirror.chars_from(4).collect();
        assert_eq!(tail, "def");
        assert_eq!(mirror.span_text(1..4), "bc ");
        assert_eq!(mirror.span_text(5..100), "ef");
    }
}
