//! Checkpoint position remapping.
//!
//! Model layers derive data from a snapshot of the buffer and store ranges against
//! it. While the user keeps typing, those stored ranges go stale; rather than
//! re-deriving on every keystroke, the session keeps a log of the edits applied
//! since the last checkpoint and folds stored ranges through it on demand. A range
//! either comes out live at its current position or is reported gone because some
//! edit removed it outright.
//!
//! Folding is oldest-edit-first; each edit applies its deletion before its
//! insertion, so a replace that swallows a range kills it even though new text
//! lands in the same place.

use crate::edit::EditRecord;

/// A `{offset, len}` range recorded at the last checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredRange {
    /// Start character offset at checkpoint time.
    pub offset: usize,
    /// Length in characters; zero marks a caret.
    pub len: usize,
}

impl StoredRange {
    /// Create a range from offset and length.
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Zero-length range marking a single position.
    pub fn caret(offset: usize) -> Self {
        Self { offset, len: 0 }
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Live image of a stored range after the pending edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remap {
    /// The range survives at its current position.
    Live(StoredRange),
    /// An edit removed the range outright.
    Gone,
}

impl Remap {
    /// The surviving range, `None` when gone.
    pub fn live(self) -> Option<StoredRange> {
        match self {
            Self::Live(range) => Some(range),
            Self::Gone => None,
        }
    }
}

/// The edits applied since the last checkpoint, in application order.
#[derive(Debug)]
pub struct EditLog {
    records: Vec<EditRecord>,
}

impl EditLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append one applied edit.
    pub fn record(&mut self, record: EditRecord) {
        self.records.push(record);
    }

    /// Number of pending records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no edits are pending.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The pending records, oldest first.
    pub fn records(&self) -> &[EditRecord] {
        &self.records
    }

    /// Drop the log; stored ranges taken now transform as identity.
    pub fn checkpoint(&mut self) {
        self.records.clear();
    }

    /// Fold a stored range through every pending edit.
    pub fn transform(&self, range: StoredRange) -> Remap {
        let mut current = range;
        for record in &self.records {
            match transform_once(current, record) {
                Remap::Live(next) => current = next,
                Remap::Gone => return Remap::Gone,
            }
        }
        Remap::Live(current)
    }

    /// Fold a single position; `None` when an edit removed it.
    pub fn transform_offset(&self, offset: usize) -> Option<usize> {
        self.transform(StoredRange::caret(offset))
            .live()
            .map(|range| range.offset)
    }
}

impl Default for EditLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply one edit record to a range.
///
/// Cascade: a removal strictly containing the range kills it; a removal the
/// range contains absorbs the whole edit as a resize; everything else runs as a
/// deletion phase followed by an insertion phase.
fn transform_once(range: StoredRange, record: &EditRecord) -> Remap {
    let removed_end = record.removed_end();

    if record.offset < range.offset && range.end() < removed_end {
        // Strictly contained, endpoints excluded; a caret inside dies too.
        return Remap::Gone;
    }
    if record.removed_len > 0 && record.offset >= range.offset && removed_end <= range.end() {
        // Replace inside the range: resize, the replacement text stays covered.
        let len = range.len - record.removed_len + record.inserted_len;
        return Remap::Live(StoredRange::new(range.offset, len));
    }

    let mut offset = range.offset;
    let mut len = range.len;

    if record.removed_len > 0 {
        if record.offset >= offset + len {
            // Entirely behind the range.
        } else if removed_end <= offset {
            offset -= record.removed_len;
        } else if record.offset <= offset {
            // Head clipped away; the survivor lands at the removal start.
            len = (offset + len).saturating_sub(removed_end);
            offset = record.offset;
        } else {
            // Tail clipped away.
            len = record.offset - offset;
        }
    }

    if record.inserted_len > 0 {
        if record.offset >= offset + len {
            // At or past the end, including insertion at a caret.
        } else if record.offset < offset {
            offset += record.inserted_len;
        } else {
            len += record.inserted_len;
        }
    }

    Remap::Live(StoredRange::new(offset, len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_of(records: &[(usize, usize, usize)]) -> EditLog {
        let mut log = EditLog::new();
        for &(offset, removed, inserted) in records {
            log.record(EditRecord::new(offset, removed, inserted));
        }
        log
    }

    #[test]
    fn test_empty_log_is_identity() {
        let log = EditLog::new();
        let range = StoredRange::new(10, 5);
        assert_eq!(log.transform(range), Remap::Live(range));
        assert_eq!(log.transform_offset(7), Some(7));
    }

    #[test]
    fn test_insert_before_shifts() {
        let log = log_of(&[(0, 0, 3)]);
        assert_eq!(
            log.transform(StoredRange::new(10, 5)).live(),
            Some(StoredRange::new(13, 5))
        );
    }

    #[test]
    fn test_delete_swallowing_range_is_gone() {
        let log = log_of(&[(5, 20, 0)]);
        assert_eq!(log.transform(StoredRange::new(10, 5)), Remap::Gone);
    }

    #[test]
    fn test_checkpoint_resets_to_identity() {
        let mut log = log_of(&[(0, 0, 3), (5, 20, 0)]);
        assert_eq!(log.len(), 2);
        log.checkpoint();
        assert!(log.is_empty());
        let range = StoredRange::new(10, 5);
        assert_eq!(log.transform(range), Remap::Live(range));
    }

    #[test]
    fn test_insert_positions_relative_to_range() {
        let range = StoredRange::new(10, 5);
        // Strictly inside: the range grows.
        assert_eq!(
            log_of(&[(12, 0, 2)]).transform(range).live(),
            Some(StoredRange::new(10, 7))
        );
        // At the start: the start is part of the range, so it grows too.
        assert_eq!(
            log_of(&[(10, 0, 2)]).transform(range).live(),
            Some(StoredRange::new(10, 7))
        );
        // At the end: untouched.
        assert_eq!(log_of(&[(15, 0, 2)]).transform(range).live(), Some(range));
    }

    #[test]
    fn test_delete_positions_relative_to_range() {
        let range = StoredRange::new(10, 5);
        // Interior removal shrinks.
        assert_eq!(
            log_of(&[(11, 3, 0)]).transform(range).live(),
            Some(StoredRange::new(10, 2))
        );
        // Removal ending at the start shifts.
        assert_eq!(
            log_of(&[(5, 5, 0)]).transform(range).live(),
            Some(StoredRange::new(5, 5))
        );
        // Head clip: the survivor lands at the removal start.
        assert_eq!(
            log_of(&[(8, 4, 0)]).transform(range).live(),
            Some(StoredRange::new(8, 3))
        );
        // Tail clip.
        assert_eq!(
            log_of(&[(12, 8, 0)]).transform(range).live(),
            Some(StoredRange::new(10, 2))
        );
        // Removing exactly the range leaves a caret, not Gone.
        assert_eq!(
            log_of(&[(10, 5, 0)]).transform(range).live(),
            Some(StoredRange::new(10, 0))
        );
    }

    #[test]
    fn test_caret_behavior() {
        // A deletion starting at the caret leaves it in place.
        assert_eq!(log_of(&[(10, 2, 0)]).transform_offset(10), Some(10));
        // A deletion strictly around the caret kills it.
        assert_eq!(log_of(&[(9, 2, 0)]).transform_offset(10), None);
        // Insertion at the caret lands after it, so the caret stays put.
        assert_eq!(log_of(&[(10, 0, 4)]).transform_offset(10), Some(10));
        // Insertion before the caret pushes it right.
        assert_eq!(log_of(&[(9, 0, 4)]).transform_offset(10), Some(14));
    }

    #[test]
    fn test_replace_swallowing_range_is_gone() {
        // Deletion applies before the record's own insertion.
        let log = log_of(&[(5, 10, 3)]);
        assert_eq!(log.transform(StoredRange::new(7, 2)), Remap::Gone);
    }

    #[test]
    fn test_fold_across_multiple_edits() {
        let log = log_of(&[
            (0, 0, 3),  // shift to {13, 5}
            (13, 1, 0), // shrink head-interior to {13, 4}
            (20, 0, 9), // past the end, no-op
        ]);
        assert_eq!(
            log.transform(StoredRange::new(10, 5)).live(),
            Some(StoredRange::new(13, 4))
        );
    }

    #[test]
    fn test_replace_inside_range_is_absorbed() {
        let range = StoredRange::new(10, 5);
        // Fully interior replace resizes in place.
        assert_eq!(
            log_of(&[(11, 2, 6)]).transform(range).live(),
            Some(StoredRange::new(10, 9))
        );
        // Touching the start: still absorbed, offset stays.
        assert_eq!(
            log_of(&[(10, 2, 1)]).transform(range).live(),
            Some(StoredRange::new(10, 4))
        );
        // Touching the end: the replacement text stays covered.
        assert_eq!(
            log_of(&[(13, 2, 4)]).transform(range).live(),
            Some(StoredRange::new(10, 7))
        );
    }

    #[test]
    fn test_replace_straddling_start_keeps_tail() {
        // Replace [8, 12) with two chars: the old tail relocates to the removal
        // start and the replacement text lands inside the survivor.
        let log = log_of(&[(8, 4, 2)]);
        assert_eq!(
            log.transform(StoredRange::new(10, 5)).live(),
            Some(StoredRange::new(8, 5))
        );
    }
}
