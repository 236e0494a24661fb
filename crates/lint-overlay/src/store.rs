//! Versioned decoration store and its transition effects.
//!
//! The store holds exactly one current [`DecorationSet`] at a time. All transitions are total
//! functions expressed as either a named [`Effect`] (dispatched by user interaction or a check
//! completion) or a document change ([`DecorationStore::apply_delta`], run synchronously on
//! every keystroke-level edit). There is no concurrent writer: the host's transaction model is
//! single-threaded and cooperative, so the store needs no locking.
//!
//! Ordering guarantee: ranges are kept sorted by `from`, ties broken by ascending `to`
//! (shorter span first), then by finding id for determinism when two findings flag the exact
//! same span.

use crate::alerts::FindingId;
use crate::delta::{TextDelta, TextDeltaEdit};
use crate::marks::VisualRange;

/// A named state-transition command accepted by [`DecorationStore`].
///
/// Modeling the transitions as one sum type keeps the state machine exhaustive: the reducer
/// matches every variant, and a new transition kind cannot be added without handling it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the whole set with `ranges` (one check's findings at a time).
    Add(Vec<VisualRange>),
    /// Drop every range.
    ClearAll,
    /// Drop every range overlapping the half-open range `[from, to)`.
    ClearRange {
        /// Start of the cleared span (inclusive).
        from: usize,
        /// End of the cleared span (exclusive).
        to: usize,
    },
    /// Mark the range belonging to the given finding as selected (clearing any previous
    /// selection). `None` clears the selection entirely.
    Select(Option<FindingId>),
    /// Mark the range belonging to the given finding as highlighted. Independent of
    /// selection; `None` clears the highlight.
    Highlight(Option<FindingId>),
}

/// An ordered, versioned collection of visual ranges.
///
/// The set itself is only mutated by [`DecorationStore`]; readers get shared access via
/// [`DecorationStore::set`]. A prefix-maximum-end index over the sorted ranges lets point and
/// range queries prune their scan instead of degrading to a full pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationSet {
    ranges: Vec<VisualRange>,
    /// `prefix_max_end[i] = max(ranges[0..=i].to)`, used to stop backward scans early.
    prefix_max_end: Vec<usize>,
}

impl DecorationSet {
    fn from_ranges(mut ranges: Vec<VisualRange>) -> Self {
        Self::sort(&mut ranges);
        let mut set = Self {
            ranges,
            prefix_max_end: Vec::new(),
        };
        set.rebuild_index();
        set
    }

    fn sort(ranges: &mut [VisualRange]) {
        ranges.sort_by(|a, b| {
            (a.from, a.to, &a.finding).cmp(&(b.from, b.to, &b.finding))
        });
    }

    fn rebuild_index(&mut self) {
        self.prefix_max_end.clear();
        let mut max_end = 0usize;
        for range in &self.ranges {
            max_end = max_end.max(range.to);
            self.prefix_max_end.push(max_end);
        }
    }

    /// The ranges, sorted by `(from, to)`.
    pub fn ranges(&self) -> &[VisualRange] {
        &self.ranges
    }

    /// Number of ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns `true` if the set holds no ranges.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// All ranges covering `offset` (zero-width query), in sort order.
    pub fn at_offset(&self, offset: usize) -> Vec<&VisualRange> {
        if self.ranges.is_empty() {
            return Vec::new();
        }

        // Every candidate has from <= offset, so it sits before this partition point.
        let idx = self.ranges.partition_point(|r| r.from <= offset);
        let mut hits = Vec::new();
        for i in (0..idx).rev() {
            if self.prefix_max_end[i] <= offset {
                break;
            }
            if self.ranges[i].contains(offset) {
                hits.push(&self.ranges[i]);
            }
        }
        hits.reverse();
        hits
    }

    /// All ranges overlapping the half-open range `[from, to)`, in sort order.
    pub fn overlapping(&self, from: usize, to: usize) -> Vec<&VisualRange> {
        if self.ranges.is_empty() || from >= to {
            return Vec::new();
        }

        let end_idx = self.ranges.partition_point(|r| r.from < to);
        let mut start_idx = self.ranges.partition_point(|r| r.from < from).min(end_idx);
        while start_idx > 0 && self.prefix_max_end[start_idx - 1] > from {
            start_idx -= 1;
        }

        self.ranges[start_idx..end_idx]
            .iter()
            .filter(|r| r.overlaps(from, to))
            .collect()
    }

    /// The range currently marked selected, if any.
    pub fn selected(&self) -> Option<&VisualRange> {
        self.ranges.iter().find(|r| r.selected)
    }

    /// The range currently marked highlighted, if any.
    pub fn highlighted(&self) -> Option<&VisualRange> {
        self.ranges.iter().find(|r| r.highlighted)
    }

    /// The range belonging to `finding`, if it is in the visual set.
    pub fn range_for(&self, finding: &FindingId) -> Option<&VisualRange> {
        self.ranges.iter().find(|r| &r.finding == finding)
    }
}

/// The versioned owner of the current [`DecorationSet`].
///
/// Every accepted transition (effect or document change) produces a new version. Initial and
/// post-`ClearAll` state is the empty set.
#[derive(Debug, Default)]
pub struct DecorationStore {
    set: DecorationSet,
    version: u64,
}

impl DecorationStore {
    /// Create a store holding the empty set at version 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current set.
    pub fn set(&self) -> &DecorationSet {
        &self.set
    }

    /// The current version. Incremented once per accepted transition.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply one effect, producing the next version.
    pub fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Add(ranges) => {
                self.set = DecorationSet::from_ranges(ranges);
            }
            Effect::ClearAll => {
                self.set = DecorationSet::default();
            }
            Effect::ClearRange { from, to } => {
                self.set.ranges.retain(|r| !r.overlaps(from, to));
                self.set.rebuild_index();
            }
            Effect::Select(target) => {
                for range in &mut self.set.ranges {
                    range.selected = target.as_ref() == Some(&range.finding);
                }
            }
            Effect::Highlight(target) => {
                for range in &mut self.set.ranges {
                    range.highlighted = target.as_ref() == Some(&range.finding);
                }
            }
        }
        self.version += 1;
    }

    /// Re-map every range through a document change, producing the next version.
    ///
    /// Runs in time proportional to the number of ranges, never to document size, and always
    /// completes synchronously within the update that produced the edit.
    pub fn apply_delta(&mut self, delta: &TextDelta) {
        if delta.is_empty() {
            return;
        }
        for edit in &delta.edits {
            Self::map_through_edit(&mut self.set.ranges, edit);
        }
        DecorationSet::sort(&mut self.set.ranges);
        self.set.rebuild_index();
        self.version += 1;
    }

    /// Interval-mapping rules for a single edit (deletion, then insertion at its start):
    ///
    /// - a range fully inside the deletion collapses and is dropped;
    /// - a range overlapping one side of the deletion is trimmed to the surviving side;
    /// - an insertion strictly interior to a range grows it;
    /// - an insertion at a range's own boundary never grows it (non-sticky ends), so typing
    ///   at the edge of a flagged span does not extend the marker.
    fn map_through_edit(ranges: &mut Vec<VisualRange>, edit: &TextDeltaEdit) {
        let del_start = edit.start;
        let del_end = edit.end();
        let del_len = del_end - del_start;

        if del_len > 0 {
            ranges.retain_mut(|range| {
                if range.to <= del_start {
                    // Entirely before the deletion.
                    true
                } else if range.from >= del_end {
                    range.from -= del_len;
                    range.to -= del_len;
                    true
                } else if range.from >= del_start && range.to <= del_end {
                    // Fully inside the deletion: collapses.
                    false
                } else if range.from < del_start && range.to > del_end {
                    range.to -= del_len;
                    true
                } else if range.from < del_start {
                    // Tail overlaps the deletion.
                    range.to = del_start;
                    true
                } else {
                    // Head overlaps the deletion.
                    range.from = del_start;
                    range.to -= del_len;
                    true
                }
            });
        }

        let ins_len = edit.inserted_len();
        if ins_len > 0 {
            let pos = edit.start;
            for range in ranges.iter_mut() {
                if range.from >= pos {
                    // Includes pos == from: the insertion lands before the range.
                    range.from += ins_len;
                    range.to += ins_len;
                } else if range.to > pos {
                    // Strictly interior: the range absorbs the insertion.
                    range.to += ins_len;
                }
                // pos >= to: insertion at or past the end boundary leaves the range alone.
            }
        }
    }
}
