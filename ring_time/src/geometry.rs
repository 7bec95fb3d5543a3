//! Geometry engine - conversions between minutes, angles and ring coordinates
//!
//! All coordinates are in the host's pixel space with the origin at the top
//! left and y growing downward. Angles are in degrees, measured clockwise from
//! 12 o'clock, in `0..=360`.

use serde::{Deserialize, Serialize};

use crate::interval::TimeAnchor;
use crate::style::RingStyle;

/// Smallest minute on the dial
pub const MIN_MINUTE: u32 = 0;
/// Largest minute on the dial (same position as [`MIN_MINUTE`])
pub const MAX_MINUTE: u32 = 60;
/// Largest minute delta a single drag event may apply
pub const SMOOTH_RANGE: u32 = 5;

/// A point in host pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point
    pub fn distance_sq(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Padding around the drawing area, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Padding {
    pub const fn uniform(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

/// Horizontal placement of the square ring area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalGravity {
    #[default]
    Left,
    Right,
    Center,
}

/// Vertical placement of the square ring area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalGravity {
    #[default]
    Top,
    Bottom,
    Center,
}

/// Where the ring sits when the host area is not square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Gravity {
    pub horizontal: HorizontalGravity,
    pub vertical: VerticalGravity,
}

impl Gravity {
    pub const CENTER: Gravity = Gravity {
        horizontal: HorizontalGravity::Center,
        vertical: VerticalGravity::Center,
    };
}

/// Convert a minute to its angle on the dial
pub fn minute_to_angle(minute: u32) -> f32 {
    minute as f32 * 360.0 / MAX_MINUTE as f32
}

/// Convert an angle to the nearest minute, clamped to `0..=60`
pub fn angle_to_minute(angle: f32) -> u32 {
    if !angle.is_finite() {
        return MIN_MINUTE;
    }
    let minute = (MAX_MINUTE as f32 * angle / 360.0).round();
    minute.clamp(MIN_MINUTE as f32, MAX_MINUTE as f32) as u32
}

/// Layout constants derived from the host size and the style.
///
/// Computed once per size change by [`RingLayout::calculate`] and cached by
/// the widget until the next call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RingLayout {
    /// Side of the square drawing area
    pub size: f32,
    /// Centre of the ring
    pub center: Point,
    /// Radius of the ring's centre line
    pub ring_radius: f32,
    /// Half the ring width
    pub ring_half_width: f32,
    /// Squared inner radius of the ring band
    pub inner_range: f32,
    /// Squared outer radius of the ring band
    pub outer_range: f32,
    /// Radius of an anchor circle
    pub anchor_radius: f32,
    /// Squared anchor radius, the hit area of an anchor
    pub anchor_range: f32,
    /// Resolved length of the long (every fifth) tick marks
    pub long_tick_length: f32,
    /// Resolved length of the short tick marks
    pub short_tick_length: f32,
}

impl RingLayout {
    /// Calculate the layout for a host area of `width` x `height`.
    ///
    /// The ring lives in the largest square that fits inside the padding,
    /// placed by the style's gravity.
    pub fn calculate(width: f32, height: f32, padding: Padding, style: &RingStyle) -> Self {
        let inner_w = (width - padding.left - padding.right).max(0.0);
        let inner_h = (height - padding.top - padding.bottom).max(0.0);
        let size = inner_w.min(inner_h);
        let half_size = size * 0.5;

        let ring_radius = ((size - style.anchor_diameter.max(style.ring_width)) * 0.5).max(0.0);

        let long_tick_length = style.tick_long_length.unwrap_or(ring_radius / 16.0);
        let short_tick_length = style.tick_short_length.unwrap_or(long_tick_length * 0.5);

        let ring_half_width = style.ring_width * 0.5;
        let inner_edge = (ring_radius - ring_half_width).max(0.0);
        let outer_edge = ring_radius + ring_half_width;

        let cx = match style.gravity.horizontal {
            HorizontalGravity::Left => padding.left + half_size,
            HorizontalGravity::Right => width - padding.right - half_size,
            HorizontalGravity::Center => padding.left + inner_w * 0.5,
        };
        let cy = match style.gravity.vertical {
            VerticalGravity::Top => padding.top + half_size,
            VerticalGravity::Bottom => height - padding.bottom - half_size,
            VerticalGravity::Center => padding.top + inner_h * 0.5,
        };

        let anchor_radius = style.anchor_diameter * 0.5;

        log::debug!(
            "layout: size={size}, center=({cx}, {cy}), ring_radius={ring_radius}, band=[{inner_edge}, {outer_edge}]"
        );

        Self {
            size,
            center: Point::new(cx, cy),
            ring_radius,
            ring_half_width,
            inner_range: inner_edge * inner_edge,
            outer_range: outer_edge * outer_edge,
            anchor_radius,
            anchor_range: anchor_radius * anchor_radius,
            long_tick_length,
            short_tick_length,
        }
    }

    /// Clockwise angle of a point around the centre, measured from 12 o'clock.
    ///
    /// The centre itself has no direction and maps to 0.
    pub fn point_to_angle(&self, p: Point) -> f32 {
        let dx = p.x - self.center.x;
        let dy = p.y - self.center.y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance <= f32::EPSILON {
            return 0.0;
        }
        let cos = (dy / distance).clamp(-1.0, 1.0);
        let acos_deg = cos.acos().to_degrees();
        if p.x < self.center.x {
            180.0 + acos_deg
        } else {
            180.0 - acos_deg
        }
    }

    /// Minute under a point
    pub fn point_to_minute(&self, p: Point) -> u32 {
        angle_to_minute(self.point_to_angle(p))
    }

    /// Position of a minute on the ring's centre line
    pub fn position_of_minute(&self, minute: u32) -> Point {
        let angle = minute_to_angle(minute);
        let cos = -angle.to_radians().cos();
        let sin = (1.0 - cos * cos).max(0.0).sqrt();
        let x = if angle < 180.0 {
            self.center.x + sin * self.ring_radius
        } else {
            self.center.x - sin * self.ring_radius
        };
        let y = self.center.y + self.ring_radius * cos;
        Point::new(x, y)
    }

    /// Build an anchor for a minute, recomputing angle and position from it
    pub fn anchor_from_minute(&self, minute: u32) -> TimeAnchor {
        TimeAnchor {
            minute,
            angle: minute_to_angle(minute),
            position: self.position_of_minute(minute),
        }
    }

    /// Whether a point lies on the ring band
    pub fn is_in_ring_band(&self, p: Point) -> bool {
        let d = p.distance_sq(self.center);
        d >= self.inner_range && d <= self.outer_range
    }

    /// Whether a point lies on an anchor circle
    pub fn is_near_anchor(&self, p: Point, anchor: &TimeAnchor) -> bool {
        p.distance_sq(anchor.position) < self.anchor_range
    }
}
