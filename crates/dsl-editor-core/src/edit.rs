//! Structured buffer edits.
//!
//! Every mutation of a session buffer is a single replace expressed in **character
//! offsets** (Unicode scalar values), never bytes. Consumers that need to chase a
//! position through past edits only ever see the length-only residue of an edit
//! ([`EditRecord`]); the inserted text itself stays with the buffer.

use std::ops::Range;
use thiserror::Error;

/// A single replace edit expressed in character offsets.
///
/// Semantics:
/// - `offset` is a character offset in the document **at the time this edit is applied**.
/// - `removed_len` characters starting at `offset` are removed, then `inserted_text` is
///   inserted in their place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Start character offset of the edit.
    pub offset: usize,
    /// Number of characters removed at `offset` (may be zero).
    pub removed_len: usize,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl TextEdit {
    /// Pure insertion at `offset`.
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            removed_len: 0,
            inserted_text: text.into(),
        }
    }

    /// Pure deletion of `removed_len` characters at `offset`.
    pub fn delete(offset: usize, removed_len: usize) -> Self {
        Self {
            offset,
            removed_len,
            inserted_text: String::new(),
        }
    }

    /// Replacement of `removed_len` characters at `offset` with `text`.
    pub fn replace(offset: usize, removed_len: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            removed_len,
            inserted_text: text.into(),
        }
    }

    /// Length of `inserted_text` in characters.
    pub fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }

    /// Exclusive end character offset of the removed span in the pre-edit document.
    pub fn removed_end(&self) -> usize {
        self.offset.saturating_add(self.removed_len)
    }

    /// Span covered by the inserted text in the post-edit document.
    pub fn inserted_range(&self) -> Range<usize> {
        self.offset..self.offset + self.inserted_len()
    }
}

/// Length-only residue of an applied [`TextEdit`], as kept in the edit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRecord {
    /// Start character offset of the edit, in pre-edit coordinates.
    pub offset: usize,
    /// Number of characters the edit removed.
    pub removed_len: usize,
    /// Number of characters the edit inserted.
    pub inserted_len: usize,
}

impl EditRecord {
    /// Create a record from raw lengths.
    pub fn new(offset: usize, removed_len: usize, inserted_len: usize) -> Self {
        Self {
            offset,
            removed_len,
            inserted_len,
        }
    }

    /// Exclusive end character offset of the removed span, in pre-edit coordinates.
    pub fn removed_end(&self) -> usize {
        self.offset.saturating_add(self.removed_len)
    }
}

impl From<&TextEdit> for EditRecord {
    fn from(edit: &TextEdit) -> Self {
        Self {
            offset: edit.offset,
            removed_len: edit.removed_len,
            inserted_len: edit.inserted_len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors returned by session-level edit application.
pub enum EditError {
    #[error("edit at {offset} removing {removed_len} chars overruns document of {doc_len} chars")]
    /// The removed span does not fit inside the document.
    OutOfBounds {
        /// Requested edit offset.
        offset: usize,
        /// Requested removal length.
        removed_len: usize,
        /// Document length at the time of the request.
        doc_len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_constructors() {
        let insert = TextEdit::insert(3, "abc");
        assert_eq!(insert.removed_len, 0);
        assert_eq!(insert.inserted_len(), 3);
        assert_eq!(insert.removed_end(), 3);
        assert_eq!(insert.inserted_range(), 3..6);

        let delete = TextEdit::delete(3, 2);
        assert_eq!(delete.inserted_len(), 0);
        assert_eq!(delete.removed_end(), 5);
        assert_eq!(delete.inserted_range(), 3..3);

        let replace = TextEdit::replace(1, 4, "xy");
        assert_eq!(replace.removed_end(), 5);
        assert_eq!(replace.inserted_range(), 1..3);
    }

    #[test]
    fn test_inserted_len_counts_chars_not_bytes() {
        let edit = TextEdit::insert(0, "日本語");
        assert_eq!(edit.inserted_text.len(), 9); // bytes
        assert_eq!(edit.inserted_len(), 3); // chars
    }

    #[test]
    fn test_record_from_edit() {
        let edit = TextEdit::replace(10, 5, "hello");
        let record = EditRecord::from(&edit);
        assert_eq!(record, EditRecord::new(10, 5, 5));
        assert_eq!(record.removed_end(), 15);
    }

    #[test]
    fn test_error_message_names_the_numbers() {
        let err = EditError::OutOfBounds {
            offset: 7,
            removed_len: 4,
            doc_len: 9,
        };
        let text = err.to_string();
        assert!(text.contains('7') && text.contains('4') && text.contains('9'));
    }
}
