//! Interval model - a fixed number of slots holding non-overlapping minute ranges
//!
//! Slot indices are internal handles. They stay stable for the duration of a
//! drag but merges and deletions free slots, so anything leaving the widget
//! goes through [`IntervalSet::snapshot_sorted`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::geometry::{Point, RingLayout, MAX_MINUTE, SMOOTH_RANGE};

/// A point on the ring.
///
/// `angle` and `position` are always derived from `minute` through
/// [`RingLayout::anchor_from_minute`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAnchor {
    pub minute: u32,
    pub angle: f32,
    pub position: Point,
}

/// Which end of an interval an anchor is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    Start,
    End,
}

/// A selected range on the dial, `start.minute < end.minute`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeInterval {
    pub start: TimeAnchor,
    pub end: TimeAnchor,
}

impl TimeInterval {
    pub fn new(start_minute: u32, end_minute: u32, layout: &RingLayout) -> Self {
        Self {
            start: layout.anchor_from_minute(start_minute),
            end: layout.anchor_from_minute(end_minute),
        }
    }

    pub fn anchor(&self, kind: AnchorKind) -> &TimeAnchor {
        match kind {
            AnchorKind::Start => &self.start,
            AnchorKind::End => &self.end,
        }
    }

    /// Closed-range membership
    pub fn contains(&self, minute: u32) -> bool {
        minute >= self.start.minute && minute <= self.end.minute
    }

    /// Whether two intervals share or touch at least one minute
    pub fn crosses(&self, other: &TimeInterval) -> bool {
        !(self.end.minute < other.start.minute || self.start.minute > other.end.minute)
    }

    /// Both anchors sit on the same minute
    pub fn is_degenerate(&self) -> bool {
        self.start.minute == self.end.minute
    }

    pub fn part(&self) -> TimePart {
        TimePart {
            start: self.start.minute,
            end: self.end.minute,
        }
    }
}

/// Immutable snapshot of one interval, as handed to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimePart {
    pub start: u32,
    pub end: u32,
}

impl TimePart {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// `start < end <= 60`
    pub fn is_valid(&self) -> bool {
        self.start < self.end && self.end <= MAX_MINUTE
    }

    /// Length in minutes
    pub fn minutes(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Strict overlap; ranges that only touch at an end minute do not overlap
    pub fn overlaps(&self, other: &TimePart) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// What a release did to the interval set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing structural happened
    Unchanged,
    /// The dragged interval collapsed to a point and was removed
    Deleted,
    /// Crossing intervals were combined; the count of freed slots
    Merged(usize),
}

impl Resolution {
    pub fn is_structural(self) -> bool {
        !matches!(self, Resolution::Unchanged)
    }
}

/// Fixed-capacity sparse arena of intervals
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalSet {
    slots: Vec<Option<TimeInterval>>,
}

impl IntervalSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn get(&self, index: usize) -> Option<&TimeInterval> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Occupied slots with their indices, in slot order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &TimeInterval)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|iv| (i, iv)))
    }

    /// First empty slot
    pub fn find_free_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// First interval whose closed range holds `minute`
    pub fn find_interval_containing(&self, minute: u32) -> Option<usize> {
        self.iter().find(|(_, iv)| iv.contains(minute)).map(|(i, _)| i)
    }

    /// Whether either bound of a candidate lands inside an existing interval
    pub fn would_overlap_existing(&self, start: u32, end: u32) -> bool {
        self.iter()
            .any(|(_, iv)| iv.contains(start) || iv.contains(end))
    }

    /// Insert `[start, start + length]` into the first free slot.
    ///
    /// Returns the slot the interval was placed in, or `None` when the
    /// candidate is empty, runs past 60, has a bound inside an existing
    /// interval, or there is no room. A candidate enclosing a shorter interval
    /// absorbs it, so the slot may already be merged away on return.
    pub fn insert(&mut self, start: u32, length: u32, layout: &RingLayout) -> Option<usize> {
        let end = start.checked_add(length)?;
        if length == 0 || end > MAX_MINUTE {
            log::debug!("insert [{start}, {end}] rejected: out of range");
            return None;
        }
        if self.would_overlap_existing(start, end) {
            log::debug!("insert [{start}, {end}] rejected: not a blank area");
            return None;
        }
        let index = self.find_free_slot()?;
        self.slots[index] = Some(TimeInterval::new(start, end, layout));
        log::debug!("inserted [{start}, {end}] into slot {index}");
        // Both bounds were free, but the candidate may still swallow a shorter interval.
        let absorbed = self.merge_crossing();
        if absorbed > 0 {
            log::debug!("insert [{start}, {end}] absorbed {absorbed} interval(s)");
        }
        Some(index)
    }

    /// Move one anchor of a slot to `minute`.
    ///
    /// Returns `false` without touching anything when the slot is empty, the
    /// minute is unchanged, the anchor would pass the other end, or the jump
    /// exceeds [`SMOOTH_RANGE`].
    pub fn drag_anchor(
        &mut self,
        index: usize,
        kind: AnchorKind,
        minute: u32,
        layout: &RingLayout,
    ) -> bool {
        let Some(interval) = self.slots.get_mut(index).and_then(Option::as_mut) else {
            return false;
        };
        let current = interval.anchor(kind).minute;
        if minute == current || minute.abs_diff(current) > SMOOTH_RANGE {
            return false;
        }
        let in_bounds = match kind {
            AnchorKind::Start => minute <= interval.end.minute,
            AnchorKind::End => minute <= MAX_MINUTE && minute >= interval.start.minute,
        };
        if !in_bounds {
            return false;
        }
        let anchor = layout.anchor_from_minute(minute);
        match kind {
            AnchorKind::Start => interval.start = anchor,
            AnchorKind::End => interval.end = anchor,
        }
        true
    }

    /// Quick-cut: move a slot's end anchor straight to `minute`.
    ///
    /// Refused when the cut would leave nothing of the interval or does not
    /// move the end at all.
    pub fn snap_end(&mut self, index: usize, minute: u32, layout: &RingLayout) -> bool {
        let Some(interval) = self.slots.get_mut(index).and_then(Option::as_mut) else {
            return false;
        };
        if minute <= interval.start.minute || minute >= interval.end.minute {
            return false;
        }
        interval.end = layout.anchor_from_minute(minute);
        true
    }

    /// Settle the set once a drag of slot `index` ends.
    ///
    /// A collapsed interval is deleted and nothing else happens. Otherwise
    /// crossing intervals are merged.
    pub fn resolve_after_drag(&mut self, index: usize) -> Resolution {
        if let Some(interval) = self.get(index) {
            if interval.is_degenerate() {
                log::debug!("slot {index} collapsed at {}, deleting", interval.start.minute);
                self.slots[index] = None;
                return Resolution::Deleted;
            }
        }
        match self.merge_crossing() {
            0 => Resolution::Unchanged,
            n => Resolution::Merged(n),
        }
    }

    /// Merge every crossing pair into the lower slot; returns freed slot count.
    ///
    /// After a merge the inner scan restarts right after the surviving slot,
    /// so an interval that grew by absorbing one neighbour is compared again
    /// against everything it may now reach.
    pub fn merge_crossing(&mut self) -> usize {
        let len = self.slots.len();
        let mut merged = 0;
        for i in 0..len.saturating_sub(1) {
            if self.slots[i].is_none() {
                continue;
            }
            let mut j = i + 1;
            while j < len {
                let (Some(first), Some(second)) = (self.slots[i], self.slots[j]) else {
                    j += 1;
                    continue;
                };
                if !first.crosses(&second) {
                    j += 1;
                    continue;
                }
                log::debug!(
                    "merging slot {i} {} with slot {j} {}",
                    first.part(),
                    second.part()
                );
                let mut combined = first;
                if second.start.minute < combined.start.minute {
                    combined.start = second.start;
                }
                if second.end.minute > combined.end.minute {
                    combined.end = second.end;
                }
                self.slots[i] = Some(combined);
                self.slots[j] = None;
                merged += 1;
                j = i + 1;
            }
        }
        merged
    }

    /// Occupied intervals sorted by start minute
    pub fn snapshot_sorted(&self) -> Vec<TimePart> {
        let mut parts: Vec<TimePart> = self.iter().map(|(_, iv)| iv.part()).collect();
        parts.sort_by_key(|p| p.start);
        parts
    }

    /// Replace every slot with `parts`, in input order.
    ///
    /// Nothing changes unless every part is valid, no two overlap and they
    /// all fit.
    pub fn replace_all(
        &mut self,
        parts: &[TimePart],
        layout: &RingLayout,
    ) -> Result<(), ValidationError> {
        validate_parts(parts, self.capacity())?;
        self.clear();
        for (slot, part) in self.slots.iter_mut().zip(parts) {
            *slot = Some(TimeInterval::new(part.start, part.end, layout));
        }
        Ok(())
    }

    /// Empty every slot
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }

    /// Recompute every anchor from its minute after a layout change
    pub fn relayout(&mut self, layout: &RingLayout) {
        for interval in self.slots.iter_mut().flatten() {
            *interval = TimeInterval::new(interval.start.minute, interval.end.minute, layout);
        }
    }
}

/// Check a bulk update against the capacity and the interval invariants
pub fn validate_parts(parts: &[TimePart], capacity: usize) -> Result<(), ValidationError> {
    if parts.len() > capacity {
        return Err(ValidationError::TooManyParts {
            len: parts.len(),
            capacity,
        });
    }
    if let Some(bad) = parts.iter().find(|p| !p.is_valid()) {
        return Err(ValidationError::OutOfRange(*bad));
    }
    for (i, a) in parts.iter().enumerate() {
        if let Some(b) = parts[i + 1..].iter().find(|b| a.overlaps(b)) {
            return Err(ValidationError::Overlapping(*a, *b));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Padding;
    use crate::style::RingStyle;

    fn layout() -> RingLayout {
        RingLayout::calculate(400.0, 400.0, Padding::default(), &RingStyle::default())
    }

    fn set_with(capacity: usize, parts: &[(u32, u32)]) -> IntervalSet {
        let layout = layout();
        let mut set = IntervalSet::new(capacity);
        let parts: Vec<TimePart> = parts.iter().map(|&(s, e)| TimePart::new(s, e)).collect();
        set.replace_all(&parts, &layout).unwrap();
        set
    }

    #[test]
    fn test_insert_two_intervals() {
        let layout = layout();
        let mut set = IntervalSet::new(3);
        assert_eq!(set.insert(10, 10, &layout), Some(0));
        assert_eq!(set.insert(40, 10, &layout), Some(1));
        assert_eq!(
            set.snapshot_sorted(),
            vec![TimePart::new(10, 20), TimePart::new(40, 50)]
        );
    }

    #[test]
    fn test_insert_rejections() {
        let layout = layout();
        let mut set = set_with(2, &[(10, 20)]);
        // runs past the end of the dial
        assert_eq!(set.insert(55, 10, &layout), None);
        // end lands inside an existing interval
        assert_eq!(set.insert(5, 10, &layout), None);
        // start touches an existing end
        assert_eq!(set.insert(20, 5, &layout), None);
        // full
        assert_eq!(set.insert(30, 5, &layout), Some(1));
        assert_eq!(set.insert(45, 5, &layout), None);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_insert_absorbs_enclosed_interval() {
        let layout = layout();
        let mut set = set_with(3, &[(12, 15), (40, 50)]);
        assert_eq!(set.insert(10, 10, &layout), Some(2));
        assert_eq!(
            set.snapshot_sorted(),
            vec![TimePart::new(10, 20), TimePart::new(40, 50)]
        );
        assert_eq!(set.len(), 2);
        assert!(set.get(2).is_none());
    }

    #[test]
    fn test_find_helpers() {
        let set = set_with(3, &[(10, 20), (40, 50)]);
        assert_eq!(set.find_free_slot(), Some(2));
        assert_eq!(set.find_interval_containing(20), Some(0));
        assert_eq!(set.find_interval_containing(45), Some(1));
        assert_eq!(set.find_interval_containing(30), None);
        assert!(set.would_overlap_existing(0, 10));
        assert!(!set.would_overlap_existing(25, 35));
    }

    #[test]
    fn test_drag_anchor_limits() {
        let layout = layout();
        let mut set = set_with(3, &[(10, 20)]);

        assert!(set.drag_anchor(0, AnchorKind::End, 23, &layout));
        assert_eq!(set.get(0).unwrap().end.minute, 23);

        // more than five minutes at once
        assert!(!set.drag_anchor(0, AnchorKind::End, 29, &layout));
        assert_eq!(set.get(0).unwrap().end.minute, 23);

        // start may not pass the end
        let mut tight = set_with(1, &[(10, 12)]);
        assert!(!tight.drag_anchor(0, AnchorKind::Start, 14, &layout));
        assert!(tight.drag_anchor(0, AnchorKind::Start, 12, &layout));
        assert!(tight.get(0).unwrap().is_degenerate());

        // unchanged minute and empty slot
        assert!(!set.drag_anchor(0, AnchorKind::Start, 10, &layout));
        assert!(!set.drag_anchor(2, AnchorKind::Start, 11, &layout));
    }

    #[test]
    fn test_drag_anchor_recomputes_geometry() {
        let layout = layout();
        let mut set = set_with(1, &[(10, 20)]);
        assert!(set.drag_anchor(0, AnchorKind::Start, 15, &layout));
        assert_eq!(set.get(0).unwrap().start, layout.anchor_from_minute(15));
    }

    #[test]
    fn test_resolve_deletes_collapsed_interval() {
        let layout = layout();
        let mut set = set_with(3, &[(10, 14), (40, 50)]);
        for m in [13, 12, 11, 10] {
            assert!(set.drag_anchor(0, AnchorKind::End, m, &layout));
        }
        assert_eq!(set.resolve_after_drag(0), Resolution::Deleted);
        assert_eq!(set.snapshot_sorted(), vec![TimePart::new(40, 50)]);
    }

    #[test]
    fn test_resolve_merges_crossing_pair() {
        let layout = layout();
        let mut set = IntervalSet::new(3);
        set.slots[0] = Some(TimeInterval::new(5, 15, &layout));
        set.slots[1] = Some(TimeInterval::new(12, 25, &layout));
        assert_eq!(set.resolve_after_drag(1), Resolution::Merged(1));
        assert_eq!(set.get(0).unwrap().part(), TimePart::new(5, 25));
        assert!(set.get(1).is_none());
        assert_eq!(set.find_free_slot(), Some(1));
    }

    #[test]
    fn test_merge_chain() {
        let layout = layout();
        let mut set = IntervalSet::new(4);
        set.slots[0] = Some(TimeInterval::new(20, 30, &layout));
        set.slots[1] = Some(TimeInterval::new(5, 12, &layout));
        set.slots[2] = Some(TimeInterval::new(28, 40, &layout));
        set.slots[3] = Some(TimeInterval::new(10, 21, &layout));
        // slot 0 absorbs 2, then 3, after which it reaches slot 1
        assert_eq!(set.merge_crossing(), 3);
        assert_eq!(set.snapshot_sorted(), vec![TimePart::new(5, 40)]);
        assert_eq!(set.get(0).unwrap().part(), TimePart::new(5, 40));
    }

    #[test]
    fn test_touching_intervals_merge() {
        let mut set = set_with(2, &[(10, 20), (20, 30)]);
        assert_eq!(set.resolve_after_drag(0), Resolution::Merged(1));
        assert_eq!(set.snapshot_sorted(), vec![TimePart::new(10, 30)]);
    }

    #[test]
    fn test_resolve_without_changes() {
        let mut set = set_with(3, &[(10, 20), (40, 50)]);
        assert_eq!(set.resolve_after_drag(1), Resolution::Unchanged);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let set = set_with(3, &[(40, 50), (0, 5), (20, 30)]);
        let parts = set.snapshot_sorted();
        assert_eq!(
            parts,
            vec![TimePart::new(0, 5), TimePart::new(20, 30), TimePart::new(40, 50)]
        );
        assert!(parts.windows(2).all(|w| w[0].start < w[1].start && !w[0].overlaps(&w[1])));
        // slots keep input order
        assert_eq!(set.get(0).unwrap().part(), TimePart::new(40, 50));
    }

    #[test]
    fn test_replace_all_validation() {
        let layout = layout();
        let mut set = set_with(2, &[(10, 20)]);
        let before = set.clone();

        let err = set.replace_all(&[TimePart::new(70, 80)], &layout).unwrap_err();
        assert_eq!(err, ValidationError::OutOfRange(TimePart::new(70, 80)));
        assert_eq!(set, before);

        let err = set
            .replace_all(
                &[TimePart::new(0, 5), TimePart::new(10, 15), TimePart::new(20, 25)],
                &layout,
            )
            .unwrap_err();
        assert!(matches!(err, ValidationError::TooManyParts { len: 3, capacity: 2 }));
        assert_eq!(set, before);

        let err = set
            .replace_all(&[TimePart::new(0, 15), TimePart::new(10, 25)], &layout)
            .unwrap_err();
        assert!(matches!(err, ValidationError::Overlapping(..)));

        assert!(set.replace_all(&[TimePart::new(30, 30)], &layout).is_err());
        assert_eq!(set, before);
    }

    #[test]
    fn test_snap_end() {
        let layout = layout();
        let mut set = set_with(1, &[(10, 30)]);
        assert!(set.snap_end(0, 18, &layout));
        assert_eq!(set.get(0).unwrap().part(), TimePart::new(10, 18));
        assert!(!set.snap_end(0, 10, &layout));
        assert!(!set.snap_end(0, 25, &layout));
    }

    #[test]
    fn test_relayout_moves_anchors() {
        let mut set = IntervalSet::new(1);
        set.replace_all(&[TimePart::new(0, 15)], &RingLayout::default())
            .unwrap();
        let layout = layout();
        set.relayout(&layout);
        assert_eq!(set.get(0).unwrap().end, layout.anchor_from_minute(15));
    }

    #[test]
    fn test_clear() {
        let mut set = set_with(3, &[(10, 20), (40, 50)]);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.capacity(), 3);
    }
}
