//! Incremental partition maintenance.
//!
//! After every edit the partitioner re-derives only the part of the partition the
//! edit could have changed:
//!
//! 1. restart scanning at the region owning the start of the edited line, backed
//!    up past every boundary the edit may have invalidated (see `restart_from`),
//! 2. translate the old tail through the edit (boundaries shift, swallowed regions
//!    retire),
//! 3. rescan forward, reusing a translated slot (id included) whenever the fresh
//!    region reproduces it exactly, and
//! 4. stop early once a reused region is back in lockstep and every translated
//!    slot still ahead shifted rigidly (its text sits wholly past the removed
//!    span), splicing those slots back unchanged.
//!
//! The result equals a from-scratch scan of the post-edit text; reuse and early
//! stop only decide how much work and id churn it takes to get there. The one
//! known exception is an option header that failed across a region boundary
//! (its filler, whitespace or comments, spanning lines): an edit on a later
//! line that completes it is picked up only by the next scan that covers the
//! header itself.

use crate::buffer::TextMirror;
use crate::classifier::RegionClassifier;
use crate::edit::TextEdit;
use crate::region::{PartitionSet, RegionKind, Slot};
use dsl_editor_core_lang::DslProfile;
use std::ops::Range;

/// Owns the text mirror, the classifier and the partition table for one document.
pub struct DocumentPartitioner {
    classifier: RegionClassifier,
    text: TextMirror,
    partitions: PartitionSet,
}

impl DocumentPartitioner {
    /// Create a partitioner over an empty document.
    pub fn new(profile: &DslProfile) -> Self {
        Self {
            classifier: RegionClassifier::new(profile),
            text: TextMirror::new(),
            partitions: PartitionSet::new(),
        }
    }

    /// Create a partitioner over initial text, fully scanned.
    pub fn with_text(profile: &DslProfile, text: &str) -> Self {
        let mut partitioner = Self::new(profile);
        partitioner.text = TextMirror::from_text(text);
        partitioner.rescan();
        partitioner
    }

    /// The current document text.
    pub fn text(&self) -> &TextMirror {
        &self.text
    }

    /// The current partition table.
    pub fn partitions(&self) -> &PartitionSet {
        &self.partitions
    }

    /// Throw the partition away and re-derive it from scratch.
    ///
    /// Every slot gets a fresh id; incremental callers only need this for recovery
    /// or as a reference in tests.
    pub fn rescan(&mut self) {
        self.partitions.clear();
        let len = self.text.len_chars();
        let mut pos = 0;
        while pos < len {
            let scanned = self.classifier.scan_region(&self.text, pos);
            debug_assert!(scanned.region.end > pos, "scan must advance");
            pos = scanned.region.end;
            self.partitions.push_new(scanned.region, scanned.closed);
        }
        self.partitions.debug_validate(len);
    }

    /// Apply one edit and reconcile the partition.
    ///
    /// Returns the damaged span in post-edit coordinates: the union of every region
    /// that changed structurally with the span of the inserted text. An empty range
    /// means the partition structure survived the edit untouched. Out-of-range edits
    /// are clamped; the session layer validates before calling.
    pub fn apply_edit(&mut self, edit: &TextEdit) -> Range<usize> {
        let old_len = self.text.len_chars();
        debug_assert!(edit.removed_end() <= old_len, "edit must fit the document");

        let offset = edit.offset.min(old_len);
        let removed_len = edit.removed_end().min(old_len) - offset;
        let inserted_len = edit.inserted_len();
        let inserted_end = offset + inserted_len;

        self.text.apply(edit);
        let new_len = self.text.len_chars();

        // The prefix up to the edit offset is identical in both documents, so the
        // edited line's start and the slot owning it agree with pre-edit coordinates.
        let line_start = self.text.line_start_of(offset);
        let (restart_idx, restart_offset) = self.restart_from(line_start, offset);

        let (translated, rigid_from) =
            self.translate_tail(restart_idx, offset, removed_len, inserted_len);
        let structural = self.reconcile(restart_offset, translated, rigid_from, new_len);
        self.partitions.debug_validate(new_len);

        let mut damage = structural.unwrap_or(offset..offset);
        if inserted_len > 0 {
            damage.start = damage.start.min(offset);
            damage.end = damage.end.max(inserted_end);
        }
        damage.start = damage.start.min(new_len);
        damage.end = damage.end.clamp(damage.start, new_len);

        log::trace!(
            "edit at {offset} (-{removed_len}/+{inserted_len}): restart {restart_offset}, damage {damage:?}"
        );
        damage
    }

    /// Pick the slot scanning restarts from, for an edit at `offset` whose line
    /// begins at `line_start`.
    ///
    /// The base choice is the slot owning the line start. From there it backs up
    /// while the boundary into the current slot cannot be trusted after the edit:
    ///
    /// - the previous slot is open, so its extent depended on text past its end;
    /// - the previous slot is a default run whose end was only anchored by the
    ///   rule match at the boundary, and the edit can unmake that match. That is
    ///   the case when the edit touches the opening chars themselves, and for an
    ///   option block even when it lands further inside, since option blocks
    ///   match all-or-nothing.
    ///
    /// Finally the restart jumps to the first open slot before it, if any is
    /// left: rebalancing an open region can reshape everything between it and
    /// the edit.
    fn restart_from(&self, line_start: usize, offset: usize) -> (usize, usize) {
        let slots = self.partitions.slots();
        let (mut idx, _) = self.partitions.restart_slot(line_start);
        while idx > 0 {
            let prev = &slots[idx - 1];
            let anchor = slots[idx].region;
            let back = if !prev.closed {
                true
            } else if prev.region.kind == RegionKind::Default {
                offset <= anchor.start + 1 || anchor.kind == RegionKind::OptionBlock
            } else {
                false
            };
            if !back {
                break;
            }
            idx -= 1;
        }
        if let Some(open) = slots[..idx].iter().position(|slot| !slot.closed) {
            idx = open;
        }
        match slots.get(idx) {
            Some(slot) => (idx, slot.region.start),
            None => (0, 0),
        }
    }

    /// Detach the slots from `restart_idx` on and map their spans through the edit.
    ///
    /// Boundaries at or past the removed span's end shift by the length delta,
    /// boundaries at or before the edit offset stay, and boundaries strictly inside
    /// the removed span clamp to the offset. Slots that collapse to nothing were
    /// swallowed by the deletion and retire here.
    ///
    /// The second return value indexes the rigid tail: every slot from it on
    /// started at or past the removed span's end before the edit, so its text is
    /// untouched and both boundaries moved by the same delta. Only rigid slots
    /// may be spliced back without rescanning; a slot whose pre-edit start sits
    /// at or inside the removal can land on the same post-edit offset as a rigid
    /// one, which is why rigidity is recorded here and not re-derived later.
    fn translate_tail(
        &mut self,
        restart_idx: usize,
        offset: usize,
        removed_len: usize,
        inserted_len: usize,
    ) -> (Vec<Slot>, usize) {
        let removed_end = offset + removed_len;
        let tail = self.partitions.split_off(restart_idx);
        let mut translated = Vec::with_capacity(tail.len());
        let mut rigid_from = 0;
        for mut slot in tail {
            let rigid = slot.region.start >= removed_end;
            slot.region.start = translate_point(slot.region.start, offset, removed_end, inserted_len);
            slot.region.end = translate_point(slot.region.end, offset, removed_end, inserted_len);
            if slot.region.is_empty() {
                continue;
            }
            if !rigid {
                rigid_from = translated.len() + 1;
            }
            translated.push(slot);
        }
        (translated, rigid_from)
    }

    /// Rescan from `restart_offset` and merge fresh regions with the translated tail.
    ///
    /// Returns the union of structurally changed spans, `None` when every slot was
    /// reused.
    fn reconcile(
        &mut self,
        restart_offset: usize,
        translated: Vec<Slot>,
        rigid_from: usize,
        new_len: usize,
    ) -> Option<Range<usize>> {
        let mut rebuilt: Vec<Slot> = Vec::with_capacity(translated.len());
        let mut damage: Option<Range<usize>> = None;
        let mut ti = 0usize;
        let mut pos = restart_offset;
        let mut spliced = false;

        while pos < new_len {
            let scanned = self.classifier.scan_region(&self.text, pos);
            let region = scanned.region;

            // Translated slots wholly behind the fresh frontier were replaced or
            // absorbed by regions already emitted.
            while ti < translated.len() && translated[ti].region.end <= region.start {
                grow(&mut damage, translated[ti].region.range());
                ti += 1;
            }

            if ti < translated.len() && translated[ti].region == region {
                // Exact reproduction: keep the slot and its id; the closure flag
                // is refreshed, since a rescan can close a formerly open region
                // over the same span.
                let mut slot = translated[ti];
                slot.closed = scanned.closed;
                rebuilt.push(slot);
                ti += 1;
                pos = region.end;
                if ti >= rigid_from {
                    // Back in lockstep with the old partition, and every slot
                    // left shifted rigidly, so splice the rest unverified. A
                    // slot the removal reached into never qualifies, even when
                    // the region before it was reproduced verbatim.
                    rebuilt.extend_from_slice(&translated[ti..]);
                    spliced = true;
                    break;
                }
            } else {
                grow(&mut damage, region.range());
                let id = self.partitions.fresh_id();
                rebuilt.push(Slot {
                    id,
                    region,
                    closed: scanned.closed,
                });
                pos = region.end;
            }
        }

        if !spliced {
            // Whatever the fresh scan never caught up with is gone.
            for slot in &translated[ti..] {
                grow(&mut damage, slot.region.range());
            }
        }

        self.partitions.extend_slots(rebuilt);
        damage
    }
}

fn translate_point(x: usize, offset: usize, removed_end: usize, inserted_len: usize) -> usize {
    if x >= removed_end {
        x - (removed_end - offset) + inserted_len
    } else if x <= offset {
        x
    } else {
        offset
    }
}

fn grow(damage: &mut Option<Range<usize>>, span: Range<usize>) {
    if span.start >= span.end {
        return;
    }
    match damage {
        Some(range) => {
            range.start = range.start.min(span.start);
            range.end = range.end.max(span.end);
        }
        None => *damage = Some(span),
    }
}
