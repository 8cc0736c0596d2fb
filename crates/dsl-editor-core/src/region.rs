//! Typed regions and the partition table.
//!
//! A partition is an ordered run of non-empty, pairwise disjoint regions that tiles the
//! whole document. Every slot carries a [`RegionId`] that stays stable across edits as
//! long as reconciliation can prove the region unchanged, so consumers may key caches
//! and overlays by id instead of by span.

use std::ops::Range;

/// What a region contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// Plain DSL text outside every special construct.
    Default,
    /// `//` comment, newline excluded.
    LineComment,
    /// `/* ... */` comment, fences included.
    BlockComment,
    /// `"..."` literal.
    StringLiteral,
    /// `'...'` literal.
    CharLiteral,
    /// Embedded action code in the profile's plain delimiter shape.
    Action,
    /// Embedded action code in the profile's argument delimiter shape.
    ArgsAction,
    /// `[key = "value"]` option block.
    OptionBlock,
}

impl RegionKind {
    /// Returns `true` for the two comment kinds.
    pub fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }

    /// Returns `true` for the two literal kinds.
    pub fn is_literal(self) -> bool {
        matches!(self, Self::StringLiteral | Self::CharLiteral)
    }

    /// Returns `true` for embedded action code of either shape.
    pub fn is_action(self) -> bool {
        matches!(self, Self::Action | Self::ArgsAction)
    }
}

/// A typed half-open span `[start, end)` in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Region kind.
    pub kind: RegionKind,
    /// Start character offset.
    pub start: usize,
    /// End character offset (exclusive).
    pub end: usize,
}

impl Region {
    /// Create a new region over `[start, end)`.
    pub fn new(kind: RegionKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the region spans no characters.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check if the region contains a specific position.
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }

    /// The span as a `Range`.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Stable handle for one partition slot.
///
/// Ids are unique per partition table for its whole lifetime and are never recycled,
/// so a stale id held by a consumer can never alias a newer region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(u64);

impl RegionId {
    /// Raw numeric value, for logs and diagnostics.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// One partition slot: a region plus its stable id.
///
/// `closed` records whether the scan that produced the region was self-contained.
/// Open regions (a delimiter scan that ended in fallback) took their extent from
/// text past their end, so an edit behind them can change them; the partitioner
/// restarts at or before the first open slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot {
    pub(crate) id: RegionId,
    pub(crate) region: Region,
    pub(crate) closed: bool,
}

/// The partition table: slots sorted by start and pairwise disjoint, tiling `[0, doc_len)`.
///
/// Lookups are binary searches over the sorted slot vector. Mutation is reserved to the
/// partitioner's reconcile pass; consumers only read.
#[derive(Debug)]
pub struct PartitionSet {
    /// Slots, kept sorted by region start.
    slots: Vec<Slot>,
    /// Next id to hand out. Monotonic, never reused.
    next_id: u64,
}

impl PartitionSet {
    /// Create an empty partition table.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 0,
        }
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate regions in document order.
    pub fn regions(&self) -> impl ExactSizeIterator<Item = &Region> {
        self.slots.iter().map(|slot| &slot.region)
    }

    /// Iterate `(id, region)` pairs in document order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = (RegionId, &Region)> {
        self.slots.iter().map(|slot| (slot.id, &slot.region))
    }

    /// Find the region containing `offset`.
    pub fn region_at(&self, offset: usize) -> Option<(RegionId, &Region)> {
        // First slot with start > offset; the containing slot, if any, sits right before it.
        let idx = match self
            .slots
            .binary_search_by_key(&offset.saturating_add(1), |slot| slot.region.start)
        {
            Ok(idx) | Err(idx) => idx,
        };
        let slot = self.slots.get(idx.checked_sub(1)?)?;
        slot.region.contains(offset).then_some((slot.id, &slot.region))
    }

    /// Kind of the region containing `offset`.
    pub fn kind_at(&self, offset: usize) -> Option<RegionKind> {
        self.region_at(offset).map(|(_, region)| region.kind)
    }

    /// Iterate `(id, region)` pairs overlapping `range`, in document order.
    pub fn overlapping(&self, range: Range<usize>) -> impl Iterator<Item = (RegionId, &Region)> {
        let bounds = if range.start >= range.end || self.slots.is_empty() {
            0..0
        } else {
            // First slot with start >= range.end bounds the scan on the right; the slot
            // containing range.start (the last with start <= range.start) bounds it on
            // the left. The partition has no gaps, so nothing before that can overlap.
            let end_idx = match self
                .slots
                .binary_search_by_key(&range.end, |slot| slot.region.start)
            {
                Ok(idx) | Err(idx) => idx,
            };
            let start_idx = match self
                .slots
                .binary_search_by_key(&range.start.saturating_add(1), |slot| slot.region.start)
            {
                Ok(idx) | Err(idx) => idx.saturating_sub(1),
            };
            start_idx..end_idx
        };
        self.slots[bounds]
            .iter()
            .filter(move |slot| slot.region.end > range.start)
            .map(|slot| (slot.id, &slot.region))
    }

    /// Allocate a fresh, never-before-used id.
    pub(crate) fn fresh_id(&mut self) -> RegionId {
        let id = RegionId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Index and start offset of the slot scanning should restart from for an edit whose
    /// line begins at `line_start`: the last slot with `start <= line_start`.
    pub(crate) fn restart_slot(&self, line_start: usize) -> (usize, usize) {
        let idx = match self
            .slots
            .binary_search_by_key(&line_start.saturating_add(1), |slot| slot.region.start)
        {
            Ok(idx) | Err(idx) => idx,
        };
        match idx.checked_sub(1) {
            Some(idx) => (idx, self.slots[idx].region.start),
            None => (0, 0),
        }
    }

    /// All slots in document order.
    pub(crate) fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Detach the tail `slots[from..]`, leaving the prefix in place.
    pub(crate) fn split_off(&mut self, from: usize) -> Vec<Slot> {
        self.slots.split_off(from.min(self.slots.len()))
    }

    /// Append reconciled slots back onto the prefix.
    pub(crate) fn extend_slots(&mut self, slots: Vec<Slot>) {
        self.slots.extend(slots);
    }

    /// Drop every slot.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }

    /// Append a region with a freshly allocated id. Used by full scans; `region.start`
    /// must continue the current tiling.
    pub(crate) fn push_new(&mut self, region: Region, closed: bool) -> RegionId {
        let id = self.fresh_id();
        self.slots.push(Slot { id, region, closed });
        id
    }

    /// Debug-build check of the partition invariants against the document length.
    pub(crate) fn debug_validate(&self, doc_len: usize) {
        if cfg!(debug_assertions) {
            if doc_len == 0 {
                debug_assert!(self.slots.is_empty(), "empty document must have no regions");
                return;
            }
            debug_assert!(!self.slots.is_empty(), "non-empty document must be tiled");
            debug_assert_eq!(self.slots[0].region.start, 0, "tiling must start at 0");
            debug_assert_eq!(
                self.slots[self.slots.len() - 1].region.end,
                doc_len,
                "tiling must end at the document length"
            );
            debug_assert!(
                self.slots.iter().all(|slot| !slot.region.is_empty()),
                "no region may be empty"
            );
            debug_assert!(
                self.slots
                    .windows(2)
                    .all(|pair| pair[0].region.end == pair[1].region.start),
                "regions must be adjacent without gaps or overlaps"
            );
        }
    }
}

impl Default for PartitionSet {
    fn default() -> Self {
        Self::new()
    }
}
