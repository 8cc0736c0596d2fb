//! Host-facing session facade.
//!
//! A [`BufferSession`] owns one buffer's partitioner and edit log and is the
//! single mutation entry point for hosts: `apply_edit` validates bounds,
//! reconciles the partition, appends the edit to the log, and tells every
//! subscriber which span to repaint. `checkpoint` marks the moment model
//! layers snapshot their derived data; stored ranges taken then are folded
//! forward with `transform`.
//!
//! Sessions are plain values. Hosts that edit from several threads hold the
//! session behind their own lock.

use std::ops::Range;

use dsl_editor_core_lang::DslProfile;

use crate::buffer::TextMirror;
use crate::edit::{EditError, EditRecord, TextEdit};
use crate::edit_log::{EditLog, Remap, StoredRange};
use crate::partitioner::DocumentPartitioner;
use crate::region::PartitionSet;

/// Damage notification callback type.
pub type DamageCallback = Box<dyn FnMut(&Range<usize>) + Send>;

/// Editing session for a single DSL buffer.
pub struct BufferSession {
    partitioner: DocumentPartitioner,
    edit_log: EditLog,
    callbacks: Vec<DamageCallback>,
    generation: u64,
}

impl BufferSession {
    /// Create a session over an empty buffer.
    pub fn new(profile: &DslProfile) -> Self {
        Self::with_text(profile, "")
    }

    /// Create a session over initial text, fully scanned.
    pub fn with_text(profile: &DslProfile, text: &str) -> Self {
        Self {
            partitioner: DocumentPartitioner::with_text(profile, text),
            edit_log: EditLog::new(),
            callbacks: Vec::new(),
            generation: 0,
        }
    }

    /// Apply one edit: validate, reconcile the partition, log, notify.
    ///
    /// Returns the damaged span on success. On [`EditError::OutOfBounds`]
    /// nothing is mutated and no callback fires.
    pub fn apply_edit(&mut self, edit: &TextEdit) -> Result<Range<usize>, EditError> {
        let doc_len = self.partitioner.text().len_chars();
        if edit.removed_end() > doc_len {
            return Err(EditError::OutOfBounds {
                offset: edit.offset,
                removed_len: edit.removed_len,
                doc_len,
            });
        }
        let damage = self.partitioner.apply_edit(edit);
        self.edit_log.record(EditRecord::from(edit));
        self.notify_damage(&damage);
        Ok(damage)
    }

    /// Start a new checkpoint: clear the edit log and bump the generation.
    pub fn checkpoint(&mut self) {
        self.edit_log.checkpoint();
        self.generation += 1;
        log::debug!("checkpoint: generation {}", self.generation);
    }

    /// Number of checkpoints taken so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fold a range stored at the last checkpoint through the pending edits.
    pub fn transform(&self, range: StoredRange) -> Remap {
        self.edit_log.transform(range)
    }

    /// Fold a single checkpoint-time position; `None` when it was removed.
    pub fn transform_offset(&self, offset: usize) -> Option<usize> {
        self.edit_log.transform_offset(offset)
    }

    /// The current partition of the buffer.
    pub fn partitions(&self) -> &PartitionSet {
        self.partitioner.partitions()
    }

    /// The buffer text as an owned string.
    pub fn text(&self) -> String {
        self.partitioner.text().text()
    }

    /// The underlying text mirror.
    pub fn text_mirror(&self) -> &TextMirror {
        self.partitioner.text()
    }

    /// The edits pending since the last checkpoint.
    pub fn edit_log(&self) -> &EditLog {
        &self.edit_log
    }

    /// Subscribe to damage notifications.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&Range<usize>) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    fn notify_damage(&mut self, damage: &Range<usize>) {
        for callback in &mut self.callbacks {
            callback(damage);
        }
    }
}
