//! Render planner - turns the interval set and style into draw primitives
//!
//! Planning is a pure read of the current state. The resulting list is
//! replayed onto any [`Surface`] the host provides; the planner never draws
//! pixels itself.

use crate::geometry::{minute_to_angle, Point, RingLayout, MAX_MINUTE, MIN_MINUTE};
use crate::interval::{AnchorKind, IntervalSet, TimeAnchor, TimeInterval};
use crate::style::{AnchorPaint, Color, RingStyle, SectionFill};

/// Number of tick marks around the dial
const TICK_COUNT: u32 = 60;
/// Label size factor used when both anchor labels share one circle
const MERGED_TEXT_SCALE: f32 = 0.7;

/// One primitive drawing call. Angles are ring angles: degrees clockwise from
/// 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A circle; filled when `stroke` is `None`, otherwise outlined with that width
    Circle {
        center: Point,
        radius: f32,
        color: Color,
        stroke: Option<f32>,
    },
    /// A stroked arc along the ring
    Arc {
        center: Point,
        radius: f32,
        start_angle: f32,
        sweep_angle: f32,
        width: f32,
        fill: SectionFill,
    },
    Line {
        from: Point,
        to: Point,
        width: f32,
        color: Color,
    },
    /// Text centred on `center`
    Text {
        text: String,
        center: Point,
        size: f32,
        color: Color,
    },
}

/// Drawing backend supplied by the host
pub trait Surface {
    fn circle(&mut self, center: Point, radius: f32, color: Color, stroke: Option<f32>);

    fn arc(
        &mut self,
        center: Point,
        radius: f32,
        start_angle: f32,
        sweep_angle: f32,
        width: f32,
        fill: &SectionFill,
    );

    fn line(&mut self, from: Point, to: Point, width: f32, color: Color);

    fn text(&mut self, text: &str, center: Point, size: f32, color: Color);
}

impl DrawCommand {
    pub fn draw_on<S: Surface + ?Sized>(&self, surface: &mut S) {
        match self {
            DrawCommand::Circle {
                center,
                radius,
                color,
                stroke,
            } => surface.circle(*center, *radius, *color, *stroke),
            DrawCommand::Arc {
                center,
                radius,
                start_angle,
                sweep_angle,
                width,
                fill,
            } => surface.arc(*center, *radius, *start_angle, *sweep_angle, *width, fill),
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => surface.line(*from, *to, *width, *color),
            DrawCommand::Text {
                text,
                center,
                size,
                color,
            } => surface.text(text, *center, *size, *color),
        }
    }
}

/// Replay a planned frame onto a surface
pub fn render<S: Surface + ?Sized>(commands: &[DrawCommand], surface: &mut S) {
    for command in commands {
        command.draw_on(surface);
    }
}

/// Point at `radius` from the centre, at a ring angle
fn polar(center: Point, radius: f32, angle: f32) -> Point {
    let rad = angle.to_radians();
    Point::new(center.x + radius * rad.sin(), center.y - radius * rad.cos())
}

/// Start and sweep of the arc covering an interval
pub fn arc_angles(start: &TimeAnchor, end: &TimeAnchor) -> (f32, f32) {
    let sweep = if start.angle > end.angle {
        360.0 - (start.angle - end.angle)
    } else {
        end.angle - start.angle
    };
    (start.angle, sweep)
}

/// Plan a full frame.
///
/// Order: background ring, 60 ticks, 12 labels, every idle interval, and
/// finally the interval being dragged so it stays on top.
pub fn plan(
    intervals: &IntervalSet,
    active: Option<(usize, AnchorKind)>,
    style: &RingStyle,
    layout: &RingLayout,
) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(1 + TICK_COUNT as usize + 12 + intervals.len() * 5);
    let painter = Painter {
        style,
        layout,
        fill: style.section_fill(),
        start_paint: style.start_anchor(),
        end_paint: style.end_anchor(),
    };

    out.push(DrawCommand::Circle {
        center: layout.center,
        radius: layout.ring_radius,
        color: style.ring_color,
        stroke: Some(style.ring_width),
    });

    painter.ticks(&mut out);
    painter.numbers(&mut out);

    let active_index = active.map(|(i, _)| i);
    for (i, interval) in intervals.iter() {
        if Some(i) == active_index {
            continue;
        }
        painter.section(&mut out, interval, None);
    }
    if let Some((i, kind)) = active {
        if let Some(interval) = intervals.get(i) {
            painter.section(&mut out, interval, Some(kind));
        }
    }
    out
}

struct Painter<'a> {
    style: &'a RingStyle,
    layout: &'a RingLayout,
    fill: SectionFill,
    start_paint: AnchorPaint,
    end_paint: AnchorPaint,
}

impl Painter<'_> {
    /// Tick radius where the ticks begin, the inner edge of the ring
    fn tick_base(&self) -> f32 {
        self.layout.ring_radius - self.layout.ring_half_width
    }

    fn ticks(&self, out: &mut Vec<DrawCommand>) {
        let base = self.tick_base();
        for i in 0..TICK_COUNT {
            let angle = minute_to_angle(i);
            let (length, width) = if i % 5 == 0 {
                (self.layout.long_tick_length, self.style.tick_long_width)
            } else {
                (self.layout.short_tick_length, self.style.tick_short_width())
            };
            out.push(DrawCommand::Line {
                from: polar(self.layout.center, base, angle),
                to: polar(self.layout.center, base - length, angle),
                width,
                color: self.style.tick_color,
            });
        }
    }

    fn numbers(&self, out: &mut Vec<DrawCommand>) {
        // One full number size of clearance inside the long ticks.
        let radius = self.tick_base() - self.layout.long_tick_length - self.style.number_size;
        for i in 0..12u32 {
            out.push(DrawCommand::Text {
                text: format!("{:02}", i * 5),
                center: polar(self.layout.center, radius, i as f32 * 30.0),
                size: self.style.number_size,
                color: self.style.number_color,
            });
        }
    }

    /// Arc plus anchors; `dragging` names the held anchor of the active interval
    fn section(&self, out: &mut Vec<DrawCommand>, interval: &TimeInterval, dragging: Option<AnchorKind>) {
        // A collapsed interval spans no minutes, only its anchors are drawn.
        if !interval.is_degenerate() {
            let (start_angle, sweep_angle) = arc_angles(&interval.start, &interval.end);
            out.push(DrawCommand::Arc {
                center: self.layout.center,
                radius: self.layout.ring_radius,
                start_angle,
                sweep_angle,
                width: self.style.ring_width,
                fill: self.fill.clone(),
            });
        }

        let full_circle =
            interval.start.minute == MIN_MINUTE && interval.end.minute == MAX_MINUTE;
        if self.style.anchor_need_merge && full_circle {
            self.merged_anchor(out, interval.start.position);
        } else if dragging == Some(AnchorKind::Start) {
            self.anchor(out, &interval.end, &self.end_paint);
            self.anchor(out, &interval.start, &self.start_paint);
        } else {
            self.anchor(out, &interval.start, &self.start_paint);
            self.anchor(out, &interval.end, &self.end_paint);
        }
    }

    fn anchor_disc(&self, out: &mut Vec<DrawCommand>, center: Point, paint: &AnchorPaint) {
        let radius = self.layout.anchor_radius;
        let stroke = self.style.anchor_stroke_width;
        if stroke != 0.0 {
            out.push(DrawCommand::Circle {
                center,
                radius,
                color: paint.stroke_color,
                stroke: None,
            });
        }
        out.push(DrawCommand::Circle {
            center,
            radius: radius - stroke,
            color: paint.color,
            stroke: None,
        });
    }

    fn anchor(&self, out: &mut Vec<DrawCommand>, anchor: &TimeAnchor, paint: &AnchorPaint) {
        self.anchor_disc(out, anchor.position, paint);
        out.push(DrawCommand::Text {
            text: paint.text.clone(),
            center: anchor.position,
            size: self.style.anchor_text_size,
            color: paint.text_color,
        });
    }

    /// Single disc in the start colours with both labels stacked
    fn merged_anchor(&self, out: &mut Vec<DrawCommand>, center: Point) {
        self.anchor_disc(out, center, &self.start_paint);
        let size = self.style.anchor_text_size * MERGED_TEXT_SCALE;
        let offset = self.layout.anchor_radius * 0.4;
        out.push(DrawCommand::Text {
            text: self.start_paint.text.clone(),
            center: Point::new(center.x, center.y - offset),
            size,
            color: self.start_paint.text_color,
        });
        out.push(DrawCommand::Text {
            text: self.end_paint.text.clone(),
            center: Point::new(center.x, center.y + offset),
            size,
            color: self.end_paint.text_color,
        });
    }
}
