//! The ring time picker widget
//!
//! Ties the geometry engine, interval model, gesture machine and render
//! planner together behind the API a host shell talks to. Every mutation
//! re-plans the cached frame before listeners hear about it.

use crate::error::RingResult;
use crate::geometry::{Padding, RingLayout};
use crate::gesture::{GestureMachine, Handled, PointerEvent, RingEvent};
use crate::interval::{validate_parts, IntervalSet, TimePart};
use crate::render::{plan, render, DrawCommand, Surface};
use crate::style::RingStyle;

/// Callback receiving every [`RingEvent`]
pub type Listener = Box<dyn FnMut(&RingEvent)>;

pub struct RingTimeView {
    style: RingStyle,
    padding: Padding,
    layout: RingLayout,
    intervals: IntervalSet,
    gesture: GestureMachine,
    frame: Vec<DrawCommand>,
    listener: Option<Listener>,
}

impl RingTimeView {
    /// Build a widget; fails if the style is invalid.
    ///
    /// The layout starts empty, so call [`recompute_layout`](Self::recompute_layout)
    /// once the host size is known.
    pub fn new(style: RingStyle) -> RingResult<Self> {
        style.validate()?;
        let layout = RingLayout::default();
        let mut intervals = IntervalSet::new(style.section_sum);
        if let Some(seed) = style.seed_part() {
            intervals.replace_all(&[seed], &layout)?;
        }
        let mut view = Self {
            style,
            padding: Padding::default(),
            layout,
            intervals,
            gesture: GestureMachine::default(),
            frame: Vec::new(),
            listener: None,
        };
        view.replan();
        Ok(view)
    }

    pub fn style(&self) -> &RingStyle {
        &self.style
    }

    pub fn layout(&self) -> &RingLayout {
        &self.layout
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn set_listener(&mut self, listener: impl FnMut(&RingEvent) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn set_quick_cut_enable(&mut self, enable: bool) {
        self.style.quick_cut_enable = enable;
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Recalculate the cached layout for a new host size
    pub fn recompute_layout(&mut self, width: f32, height: f32, padding: Padding) {
        self.padding = padding;
        self.layout = RingLayout::calculate(width, height, padding, &self.style);
        self.intervals.relayout(&self.layout);
        self.replan();
    }

    /// Feed one pointer event through the gesture machine
    pub fn on_pointer(&mut self, event: PointerEvent) -> Handled {
        let outcome = self
            .gesture
            .handle(event, &mut self.intervals, &self.layout, &self.style);
        if outcome.redraw {
            self.replan();
        }
        for event in &outcome.events {
            self.emit(event);
        }
        outcome.handled
    }

    /// Current intervals, sorted by start minute
    pub fn intervals(&self) -> Vec<TimePart> {
        self.intervals.snapshot_sorted()
    }

    /// Replace all intervals; any drag in progress is abandoned.
    ///
    /// Nothing changes if the list does not fit or contains an invalid or
    /// overlapping part.
    pub fn set_intervals(&mut self, parts: &[TimePart]) -> RingResult<()> {
        if let Err(e) = validate_parts(parts, self.intervals.capacity()) {
            log::warn!("rejected interval update: {e}");
            return Err(e.into());
        }
        self.gesture.abort();
        self.intervals.replace_all(parts, &self.layout)?;
        self.after_bulk_change();
        Ok(())
    }

    /// Remove every interval; any drag in progress is abandoned
    pub fn clear_intervals(&mut self) {
        self.gesture.abort();
        self.intervals.clear();
        self.after_bulk_change();
    }

    /// The most recently planned frame
    pub fn frame(&self) -> &[DrawCommand] {
        &self.frame
    }

    /// Replay the current frame onto a host surface
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        render(&self.frame, surface);
    }

    fn after_bulk_change(&mut self) {
        self.replan();
        let event = RingEvent::Changed(self.intervals.snapshot_sorted());
        self.emit(&event);
    }

    fn replan(&mut self) {
        self.frame = plan(
            &self.intervals,
            self.gesture.active(),
            &self.style,
            &self.layout,
        );
    }

    fn emit(&mut self, event: &RingEvent) {
        if let Some(listener) = self.listener.as_mut() {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::error::{ConfigurationError, RingError, ValidationError};
    use crate::geometry::Point;
    use crate::render::DrawCommand;

    fn view_with(style: RingStyle) -> (RingTimeView, Rc<RefCell<Vec<RingEvent>>>) {
        let mut view = RingTimeView::new(style).unwrap();
        view.recompute_layout(400.0, 400.0, Padding::default());
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        view.set_listener(move |e| sink.borrow_mut().push(e.clone()));
        (view, log)
    }

    fn default_view() -> (RingTimeView, Rc<RefCell<Vec<RingEvent>>>) {
        view_with(RingStyle {
            initial_minutes: 10,
            anchor_diameter: 20.0,
            ..RingStyle::default()
        })
    }

    fn at(view: &RingTimeView, minute: u32) -> Point {
        view.layout().position_of_minute(minute)
    }

    fn press(view: &mut RingTimeView, minute: u32) -> Handled {
        let p = at(view, minute);
        view.on_pointer(PointerEvent::Press(p))
    }

    fn move_to(view: &mut RingTimeView, minute: u32) -> Handled {
        let p = at(view, minute);
        view.on_pointer(PointerEvent::Move(p))
    }

    fn release(view: &mut RingTimeView, minute: u32) -> Handled {
        let p = at(view, minute);
        view.on_pointer(PointerEvent::Release(p))
    }

    #[test]
    fn test_invalid_style_is_rejected() {
        let style = RingStyle {
            section_sum: 0,
            ..RingStyle::default()
        };
        assert!(matches!(
            RingTimeView::new(style),
            Err(RingError::Configuration(ConfigurationError::SectionSum(0)))
        ));
    }

    #[test]
    fn test_seeded_interval() {
        let style = RingStyle {
            seed: Some(TimePart::new(15, 45)),
            ..RingStyle::default()
        };
        let (view, _) = view_with(style);
        assert_eq!(view.intervals(), vec![TimePart::new(15, 45)]);

        let empty_seed = RingStyle {
            seed: Some(TimePart::new(15, 15)),
            ..RingStyle::default()
        };
        let view = RingTimeView::new(empty_seed).unwrap();
        assert!(view.intervals().is_empty());
    }

    #[test]
    fn test_layout_repositions_seeded_anchors() {
        let style = RingStyle {
            seed: Some(TimePart::new(0, 30)),
            ..RingStyle::default()
        };
        let mut view = RingTimeView::new(style).unwrap();
        view.recompute_layout(300.0, 300.0, Padding::uniform(10.0));
        let expected = view.layout().anchor_from_minute(30).position;
        let found = view.frame().iter().any(|c| {
            matches!(c, DrawCommand::Text { text, center, .. } if text == "OFF" && *center == expected)
        });
        assert!(found);
    }

    #[test]
    fn test_insert_two_and_read_back() {
        let (mut view, log) = default_view();
        assert_eq!(press(&mut view, 10), Handled::Consumed);
        assert_eq!(press(&mut view, 40), Handled::Consumed);
        assert_eq!(
            view.intervals(),
            vec![TimePart::new(10, 20), TimePart::new(40, 50)]
        );
        let inserted: Vec<_> = log
            .borrow()
            .iter()
            .filter_map(|e| match e {
                RingEvent::Inserted(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(inserted, vec![TimePart::new(10, 20), TimePart::new(40, 50)]);
    }

    #[test]
    fn test_collapse_deletes() {
        let (mut view, log) = default_view();
        press(&mut view, 10);
        log.borrow_mut().clear();

        assert_eq!(press(&mut view, 20), Handled::Consumed);
        for m in [16, 12, 10] {
            move_to(&mut view, m);
        }
        release(&mut view, 10);
        assert!(view.intervals().is_empty());
        assert_eq!(
            *log.borrow(),
            vec![
                RingEvent::SelectStarted(20),
                RingEvent::SelectChanging(16),
                RingEvent::SelectChanging(12),
                RingEvent::SelectChanging(10),
                RingEvent::Changed(Vec::new()),
                RingEvent::SelectFinished,
            ]
        );
    }

    #[test]
    fn test_rejected_jump_fires_nothing() {
        let (mut view, log) = default_view();
        view.set_intervals(&[TimePart::new(0, 10)]).unwrap();
        press(&mut view, 0);
        log.borrow_mut().clear();
        let before = view.frame().to_vec();

        assert_eq!(move_to(&mut view, 57), Handled::Consumed);
        assert!(log.borrow().is_empty());
        assert_eq!(view.frame(), before.as_slice());
        assert_eq!(view.intervals(), vec![TimePart::new(0, 10)]);
    }

    #[test]
    fn test_set_intervals_validation_keeps_state() {
        let (mut view, log) = default_view();
        view.set_intervals(&[TimePart::new(5, 15)]).unwrap();
        log.borrow_mut().clear();

        let err = view.set_intervals(&[TimePart::new(70, 80)]).unwrap_err();
        assert_eq!(
            err,
            RingError::Validation(ValidationError::OutOfRange(TimePart::new(70, 80)))
        );
        let too_many = [
            TimePart::new(0, 5),
            TimePart::new(10, 15),
            TimePart::new(20, 25),
            TimePart::new(30, 35),
        ];
        assert!(matches!(
            view.set_intervals(&too_many),
            Err(RingError::Validation(ValidationError::TooManyParts { .. }))
        ));
        assert_eq!(view.intervals(), vec![TimePart::new(5, 15)]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_bulk_update_aborts_drag() {
        let (mut view, log) = default_view();
        view.set_intervals(&[TimePart::new(10, 20)]).unwrap();
        press(&mut view, 20);
        assert!(view.is_dragging());

        view.set_intervals(&[TimePart::new(40, 50), TimePart::new(0, 5)])
            .unwrap();
        assert!(!view.is_dragging());
        assert_eq!(release(&mut view, 20), Handled::Ignored);
        assert_eq!(
            log.borrow().last(),
            Some(&RingEvent::Changed(vec![
                TimePart::new(0, 5),
                TimePart::new(40, 50)
            ]))
        );

        view.clear_intervals();
        assert!(view.intervals().is_empty());
        assert_eq!(log.borrow().last(), Some(&RingEvent::Changed(Vec::new())));
    }

    #[test]
    fn test_dragged_interval_planned_last() {
        let (mut view, _) = default_view();
        view.set_intervals(&[TimePart::new(10, 20), TimePart::new(40, 50)])
            .unwrap();
        press(&mut view, 10);
        let last_arc = view.frame().iter().rev().find_map(|c| match c {
            DrawCommand::Arc { start_angle, .. } => Some(*start_angle),
            _ => None,
        });
        assert_eq!(last_arc, Some(60.0));
    }

    #[test]
    fn test_quick_cut_toggle() {
        let (mut view, log) = default_view();
        view.set_intervals(&[TimePart::new(10, 30)]).unwrap();
        log.borrow_mut().clear();

        assert_eq!(press(&mut view, 20), Handled::Ignored);
        assert!(log.borrow().is_empty());

        view.set_quick_cut_enable(true);
        assert_eq!(press(&mut view, 20), Handled::Consumed);
        assert_eq!(view.intervals(), vec![TimePart::new(10, 20)]);
        assert_eq!(
            *log.borrow(),
            vec![RingEvent::Changed(vec![TimePart::new(10, 20)])]
        );
    }
}
