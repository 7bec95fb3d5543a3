//! Drawing module for the Ring Picker
//!
//! Replays the widget's planned frame through nannou. The widget works in a
//! y-down pixel space whose origin is the stage's top-left corner; nannou is
//! y-up around the window centre.

use nannou::prelude::*;
use ring_time::{Color, Point, RingTimeView, SectionFill, Surface};

/// Color palette for the picker window
pub mod colors {
    use nannou::prelude::*;

    /// Window background
    pub const BACKGROUND: Srgb<u8> = Srgb {
        red: 24,
        green: 26,
        blue: 31,
        standard: std::marker::PhantomData,
    };

    /// Title text
    pub const TEXT_PRIMARY: Srgb<u8> = Srgb {
        red: 220,
        green: 225,
        blue: 235,
        standard: std::marker::PhantomData,
    };

    /// Hint text
    pub const TEXT_SECONDARY: Srgb<u8> = Srgb {
        red: 140,
        green: 150,
        blue: 170,
        standard: std::marker::PhantomData,
    };
}

/// Degrees per polyline segment when approximating arcs
const ARC_STEP_DEGREES: f32 = 2.0;

fn to_srgba(c: Color) -> Srgba<u8> {
    srgba(c.r, c.g, c.b, c.a)
}

/// A [`Surface`] that draws onto a nannou [`Draw`]
pub struct NannouSurface<'a> {
    draw: &'a Draw,
    /// Top-left corner of the stage, in nannou coordinates
    origin: Point2,
}

impl<'a> NannouSurface<'a> {
    pub fn new(draw: &'a Draw, stage: Rect) -> Self {
        Self {
            draw,
            origin: pt2(stage.left(), stage.top()),
        }
    }

    fn to_nannou(&self, p: Point) -> Point2 {
        pt2(self.origin.x + p.x, self.origin.y - p.y)
    }

    /// Point on a circle at a ring angle, in nannou coordinates
    fn polar(&self, center: Point, radius: f32, angle: f32) -> Point2 {
        let rad = angle.to_radians();
        self.to_nannou(Point::new(
            center.x + radius * rad.sin(),
            center.y - radius * rad.cos(),
        ))
    }
}

impl Surface for NannouSurface<'_> {
    fn circle(&mut self, center: Point, radius: f32, color: Color, stroke: Option<f32>) {
        match stroke {
            None => {
                self.draw
                    .ellipse()
                    .xy(self.to_nannou(center))
                    .radius(radius)
                    .color(to_srgba(color));
            }
            Some(weight) => {
                let segments = 120;
                let points: Vec<Point2> = (0..=segments)
                    .map(|i| self.polar(center, radius, i as f32 / segments as f32 * 360.0))
                    .collect();
                self.draw
                    .polyline()
                    .weight(weight)
                    .color(to_srgba(color))
                    .points(points);
            }
        }
    }

    fn arc(
        &mut self,
        center: Point,
        radius: f32,
        start_angle: f32,
        sweep_angle: f32,
        width: f32,
        fill: &SectionFill,
    ) {
        let segments = ((sweep_angle / ARC_STEP_DEGREES).ceil() as usize).max(1);
        let points: Vec<(Point2, Srgba<u8>)> = (0..=segments)
            .map(|i| {
                let angle = start_angle + sweep_angle * i as f32 / segments as f32;
                (
                    self.polar(center, radius, angle),
                    to_srgba(fill.color_at(angle)),
                )
            })
            .collect();
        self.draw
            .polyline()
            .weight(width)
            .points_colored(points);
    }

    fn line(&mut self, from: Point, to: Point, width: f32, color: Color) {
        self.draw
            .line()
            .start(self.to_nannou(from))
            .end(self.to_nannou(to))
            .color(to_srgba(color))
            .weight(width);
    }

    fn text(&mut self, text: &str, center: Point, size: f32, color: Color) {
        self.draw
            .text(text)
            .xy(self.to_nannou(center))
            .color(to_srgba(color))
            .font_size(size.round().max(1.0) as u32)
            .w(size * text.chars().count().max(1) as f32 * 2.0);
    }
}

/// Draw the widget into the stage area
pub fn draw_stage(draw: &Draw, stage: Rect, view: &RingTimeView) {
    let mut surface = NannouSurface::new(draw, stage);
    view.draw(&mut surface);
}

/// Title and usage hint above the stage
pub fn draw_header(draw: &Draw, stage: Rect) {
    draw.text("RING PICKER")
        .x_y(stage.x(), stage.top() - 20.0)
        .color(colors::TEXT_PRIMARY)
        .font_size(18)
        .w(300.0);
    draw.text("Press the ring to add a section, drag ON/OFF to resize")
        .x_y(stage.x(), stage.bottom() + 18.0)
        .color(colors::TEXT_SECONDARY)
        .font_size(12)
        .w(stage.w());
}
