//! Touch state machine - interprets press/move/release against the ring
//!
//! The machine owns nothing but its state. Each event borrows the interval
//! set, applies at most one mutation and reports what the host should hear
//! about.

use crate::geometry::{Point, RingLayout, MAX_MINUTE};
use crate::interval::{AnchorKind, IntervalSet, TimePart};
use crate::style::RingStyle;

/// A single-pointer input event in host pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Point),
    Move(Point),
    Release(Point),
}

/// Notifications emitted to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RingEvent {
    /// The set of intervals changed structurally; sorted by start
    Changed(Vec<TimePart>),
    /// A blank-area press created an interval
    Inserted(TimePart),
    /// An anchor was grabbed; its current minute
    SelectStarted(u32),
    /// The held anchor moved to a new minute
    SelectChanging(u32),
    /// The held anchor was let go
    SelectFinished,
}

/// Whether the widget used an event or the host may pass it on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Consumed,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    DraggingAnchor { index: usize, kind: AnchorKind },
}

/// Result of feeding one event through the machine
#[derive(Debug, Clone, PartialEq)]
pub struct GestureOutcome {
    pub handled: Handled,
    pub events: Vec<RingEvent>,
    /// The frame must be planned again
    pub redraw: bool,
}

impl GestureOutcome {
    fn ignored() -> Self {
        Self {
            handled: Handled::Ignored,
            events: Vec::new(),
            redraw: false,
        }
    }

    fn consumed(events: Vec<RingEvent>, redraw: bool) -> Self {
        Self {
            handled: Handled::Consumed,
            events,
            redraw,
        }
    }
}

/// Press, drag and release handling
#[derive(Debug, Clone, Default)]
pub struct GestureMachine {
    state: GestureState,
}

impl GestureMachine {
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// The held anchor, if a drag is in progress
    pub fn active(&self) -> Option<(usize, AnchorKind)> {
        match self.state {
            GestureState::Idle => None,
            GestureState::DraggingAnchor { index, kind } => Some((index, kind)),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active().is_some()
    }

    /// Drop any drag in progress without resolving it
    pub fn abort(&mut self) {
        if let GestureState::DraggingAnchor { index, .. } = self.state {
            log::debug!("aborting drag of slot {index}");
        }
        self.state = GestureState::Idle;
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        intervals: &mut IntervalSet,
        layout: &RingLayout,
        style: &RingStyle,
    ) -> GestureOutcome {
        match event {
            PointerEvent::Press(p) => {
                // A drag whose release never arrived is settled before the new press.
                let settled = match self.state {
                    GestureState::DraggingAnchor { index, .. } => {
                        log::debug!("press during drag of slot {index}, settling it first");
                        Some(self.release(intervals))
                    }
                    GestureState::Idle => None,
                };
                let outcome = self.press(p, intervals, layout, style);
                match settled {
                    Some(mut first) => {
                        first.events.extend(outcome.events);
                        GestureOutcome {
                            handled: outcome.handled,
                            events: first.events,
                            redraw: true,
                        }
                    }
                    None => outcome,
                }
            }
            PointerEvent::Move(p) => self.drag(p, intervals, layout),
            PointerEvent::Release(_) => self.release(intervals),
        }
    }

    fn press(
        &mut self,
        p: Point,
        intervals: &mut IntervalSet,
        layout: &RingLayout,
        style: &RingStyle,
    ) -> GestureOutcome {
        if let Some((index, kind)) = find_anchor_at(intervals, layout, p) {
            let minute = intervals
                .get(index)
                .map(|iv| iv.anchor(kind).minute)
                .unwrap_or_default();
            log::debug!("press on {kind:?} anchor of slot {index} at minute {minute}");
            self.state = GestureState::DraggingAnchor { index, kind };
            return GestureOutcome::consumed(vec![RingEvent::SelectStarted(minute)], true);
        }

        if !layout.is_in_ring_band(p) {
            return GestureOutcome::ignored();
        }

        let minute = layout.point_to_minute(p);
        let end = minute + style.initial_minutes;
        if !intervals.would_overlap_existing(minute, end) {
            if end > MAX_MINUTE {
                return GestureOutcome::ignored();
            }
            // Inserted reports the new interval as placed, before it absorbed anything.
            return match intervals.insert(minute, style.initial_minutes, layout) {
                Some(_) => GestureOutcome::consumed(
                    vec![
                        RingEvent::Changed(intervals.snapshot_sorted()),
                        RingEvent::Inserted(TimePart::new(minute, end)),
                    ],
                    true,
                ),
                None => GestureOutcome::ignored(),
            };
        }

        if style.quick_cut_enable {
            if let Some(index) = intervals.find_interval_containing(minute) {
                if intervals.snap_end(index, minute, layout) {
                    log::debug!("quick cut of slot {index} at minute {minute}");
                    return GestureOutcome::consumed(
                        vec![RingEvent::Changed(intervals.snapshot_sorted())],
                        true,
                    );
                }
            }
        }
        GestureOutcome::ignored()
    }

    fn drag(&mut self, p: Point, intervals: &mut IntervalSet, layout: &RingLayout) -> GestureOutcome {
        let GestureState::DraggingAnchor { index, kind } = self.state else {
            return GestureOutcome::ignored();
        };
        let minute = layout.point_to_minute(p);
        if intervals.drag_anchor(index, kind, minute, layout) {
            GestureOutcome::consumed(vec![RingEvent::SelectChanging(minute)], true)
        } else {
            GestureOutcome::consumed(Vec::new(), false)
        }
    }

    fn release(&mut self, intervals: &mut IntervalSet) -> GestureOutcome {
        let GestureState::DraggingAnchor { index, .. } = self.state else {
            return GestureOutcome::ignored();
        };
        self.state = GestureState::Idle;
        let resolution = intervals.resolve_after_drag(index);
        log::debug!("release of slot {index}: {resolution:?}");
        let mut events = Vec::with_capacity(2);
        if resolution.is_structural() {
            events.push(RingEvent::Changed(intervals.snapshot_sorted()));
        }
        events.push(RingEvent::SelectFinished);
        GestureOutcome::consumed(events, true)
    }
}

/// First anchor under a point, scanning slots in order, start before end
fn find_anchor_at(
    intervals: &IntervalSet,
    layout: &RingLayout,
    p: Point,
) -> Option<(usize, AnchorKind)> {
    intervals.iter().find_map(|(i, iv)| {
        [AnchorKind::Start, AnchorKind::End]
            .into_iter()
            .find(|&kind| layout.is_near_anchor(p, iv.anchor(kind)))
            .map(|kind| (i, kind))
    })
}
