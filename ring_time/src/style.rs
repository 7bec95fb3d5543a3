//! Style configuration for the ring
//!
//! Every option the widget recognises, with defaults matching the stock look:
//! a grey ring, green sections and blue "ON"/"OFF" anchors. Styles are plain
//! data and can be loaded from TOML.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::geometry::{Gravity, MAX_MINUTE};
use crate::interval::TimePart;

/// Largest allowed interval capacity
pub const MAX_SECTION_SUM: usize = 59;

/// An sRGB colour with alpha, written as `#rrggbb` or `#rrggbbaa`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Linear blend towards `other`, `t` in `0..=1`
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xff {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid colour: {}", value))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

/// How selected sections are painted
#[derive(Debug, Clone, PartialEq)]
pub enum SectionFill {
    Solid(Color),
    /// Sweep gradient; stops are spread evenly around the circle starting at
    /// 3 o'clock and the last stop repeats the first.
    Sweep(Vec<Color>),
}

impl SectionFill {
    /// Colour at a ring angle (degrees clockwise from 12 o'clock)
    pub fn color_at(&self, ring_angle: f32) -> Color {
        match self {
            SectionFill::Solid(c) => *c,
            SectionFill::Sweep(stops) => {
                let Some(&first) = stops.first() else {
                    return Color::WHITE;
                };
                if stops.len() == 1 {
                    return first;
                }
                let sweep_angle = (ring_angle - 90.0).rem_euclid(360.0);
                let pos = sweep_angle / 360.0 * (stops.len() - 1) as f32;
                let idx = (pos.floor() as usize).min(stops.len() - 2);
                stops[idx].lerp(stops[idx + 1], pos - idx as f32)
            }
        }
    }
}

/// Resolved colours and label of one anchor kind
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorPaint {
    pub color: Color,
    pub stroke_color: Color,
    pub text: String,
    pub text_color: Color,
}

/// All recognised widget options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingStyle {
    /// Interval shown before any interaction; `start == end` seeds nothing
    pub seed: Option<TimePart>,
    pub gravity: Gravity,
    /// Length of an interval created by pressing a blank area
    pub initial_minutes: u32,

    pub ring_width: f32,
    pub ring_color: Color,

    /// Maximum number of intervals
    pub section_sum: usize,
    /// Pressing inside a section moves its end anchor there
    pub quick_cut_enable: bool,
    pub section_color: Color,
    /// Second sweep-gradient stop; enables the gradient
    pub section_color2: Option<Color>,
    /// Third sweep-gradient stop, only used together with the second
    pub section_color3: Option<Color>,

    pub anchor_diameter: f32,
    pub anchor_stroke_width: f32,
    pub anchor_text_size: f32,
    /// Draw one combined anchor when a section covers the full circle
    pub anchor_need_merge: bool,

    pub anchor_start_color: Color,
    pub anchor_start_stroke_color: Color,
    pub anchor_start_text: String,
    pub anchor_start_text_color: Color,

    pub anchor_end_color: Option<Color>,
    pub anchor_end_stroke_color: Option<Color>,
    pub anchor_end_text: String,
    pub anchor_end_text_color: Option<Color>,

    pub tick_color: Color,
    /// Defaults to ring radius / 16
    pub tick_long_length: Option<f32>,
    pub tick_long_width: f32,
    /// Defaults to half the long tick length
    pub tick_short_length: Option<f32>,
    /// Defaults to the long tick width
    pub tick_short_width: Option<f32>,

    pub number_size: f32,
    pub number_color: Color,
}

impl Default for RingStyle {
    fn default() -> Self {
        Self {
            seed: None,
            gravity: Gravity::default(),
            initial_minutes: 5,
            ring_width: 30.0,
            ring_color: Color::rgb(0xa7, 0xa7, 0xa7),
            section_sum: 3,
            quick_cut_enable: false,
            section_color: Color::rgb(0x14, 0x8c, 0x75),
            section_color2: None,
            section_color3: None,
            anchor_diameter: 50.0,
            anchor_stroke_width: 6.0,
            anchor_text_size: 16.0,
            anchor_need_merge: true,
            anchor_start_color: Color::rgb(0x00, 0x7f, 0xfe),
            anchor_start_stroke_color: Color::WHITE,
            anchor_start_text: "ON".to_string(),
            anchor_start_text_color: Color::WHITE,
            anchor_end_color: None,
            anchor_end_stroke_color: None,
            anchor_end_text: "OFF".to_string(),
            anchor_end_text_color: None,
            tick_color: Color::rgb(0x88, 0x88, 0x88),
            tick_long_length: None,
            tick_long_width: 2.0,
            tick_short_length: None,
            tick_short_width: None,
            number_size: 14.0,
            number_color: Color::rgb(0x88, 0x88, 0x88),
        }
    }
}

impl RingStyle {
    /// Parse and validate a TOML style document
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigurationError> {
        let style: RingStyle =
            toml::from_str(s).map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        style.validate()?;
        Ok(style)
    }

    /// Check every option a widget depends on
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.section_sum < 1 || self.section_sum > MAX_SECTION_SUM {
            return Err(ConfigurationError::SectionSum(self.section_sum));
        }
        if let Some(seed) = self.seed {
            if seed.start > MAX_MINUTE {
                return Err(ConfigurationError::SeedMinute {
                    which: "start",
                    minute: seed.start,
                });
            }
            if seed.end > MAX_MINUTE {
                return Err(ConfigurationError::SeedMinute {
                    which: "end",
                    minute: seed.end,
                });
            }
            if seed.start > seed.end {
                return Err(ConfigurationError::SeedOrder {
                    start: seed.start,
                    end: seed.end,
                });
            }
        }
        if self.initial_minutes < 1 || self.initial_minutes > MAX_MINUTE {
            return Err(ConfigurationError::InitialMinutes(self.initial_minutes));
        }

        positive("ring_width", self.ring_width)?;
        positive("anchor_diameter", self.anchor_diameter)?;
        positive("anchor_text_size", self.anchor_text_size)?;
        positive("number_size", self.number_size)?;
        non_negative("anchor_stroke_width", self.anchor_stroke_width)?;
        non_negative("tick_long_width", self.tick_long_width)?;
        if let Some(v) = self.tick_long_length {
            non_negative("tick_long_length", v)?;
        }
        if let Some(v) = self.tick_short_length {
            non_negative("tick_short_length", v)?;
        }
        if let Some(v) = self.tick_short_width {
            non_negative("tick_short_width", v)?;
        }

        let radius = self.anchor_diameter * 0.5;
        if self.anchor_stroke_width > radius {
            return Err(ConfigurationError::AnchorStroke {
                stroke: self.anchor_stroke_width,
                radius,
            });
        }
        Ok(())
    }

    /// The seeded interval, if it describes a non-empty range
    pub fn seed_part(&self) -> Option<TimePart> {
        self.seed.filter(TimePart::is_valid)
    }

    pub fn section_fill(&self) -> SectionFill {
        match (self.section_color2, self.section_color3) {
            (None, _) => SectionFill::Solid(self.section_color),
            (Some(c2), None) => SectionFill::Sweep(vec![self.section_color, c2, self.section_color]),
            (Some(c2), Some(c3)) => {
                SectionFill::Sweep(vec![self.section_color, c2, c3, self.section_color])
            }
        }
    }

    pub fn start_anchor(&self) -> AnchorPaint {
        AnchorPaint {
            color: self.anchor_start_color,
            stroke_color: self.anchor_start_stroke_color,
            text: self.anchor_start_text.clone(),
            text_color: self.anchor_start_text_color,
        }
    }

    /// End anchor paint; unset colours fall back to the start anchor's
    pub fn end_anchor(&self) -> AnchorPaint {
        AnchorPaint {
            color: self.anchor_end_color.unwrap_or(self.anchor_start_color),
            stroke_color: self
                .anchor_end_stroke_color
                .unwrap_or(self.anchor_start_stroke_color),
            text: self.anchor_end_text.clone(),
            text_color: self
                .anchor_end_text_color
                .unwrap_or(self.anchor_start_text_color),
        }
    }

    pub fn tick_short_width(&self) -> f32 {
        self.tick_short_width.unwrap_or(self.tick_long_width)
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigurationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NonPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigurationError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::Negative { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_is_valid() {
        assert!(RingStyle::default().validate().is_ok());
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_hex("#148c75"), Some(Color::rgb(0x14, 0x8c, 0x75)));
        assert_eq!(
            Color::from_hex("#00000080"),
            Some(Color::rgba(0, 0, 0, 0x80))
        );
        assert_eq!(Color::from_hex("148c75"), None);
        assert_eq!(Color::from_hex("#14"), None);
        assert_eq!(Color::from_hex("#zz8c75"), None);
        assert_eq!(Color::rgb(0x00, 0x7f, 0xfe).to_string(), "#007ffe");
    }

    #[test]
    fn test_section_sum_bounds() {
        for sum in [0, 60] {
            let style = RingStyle {
                section_sum: sum,
                ..RingStyle::default()
            };
            assert_eq!(style.validate(), Err(ConfigurationError::SectionSum(sum)));
        }
        let style = RingStyle {
            section_sum: 59,
            ..RingStyle::default()
        };
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_seed_validation() {
        let bad_end = RingStyle {
            seed: Some(TimePart::new(10, 61)),
            ..RingStyle::default()
        };
        assert!(matches!(
            bad_end.validate(),
            Err(ConfigurationError::SeedMinute { which: "end", .. })
        ));

        let reversed = RingStyle {
            seed: Some(TimePart::new(30, 20)),
            ..RingStyle::default()
        };
        assert!(matches!(
            reversed.validate(),
            Err(ConfigurationError::SeedOrder { .. })
        ));

        let empty = RingStyle {
            seed: Some(TimePart::new(20, 20)),
            ..RingStyle::default()
        };
        assert!(empty.validate().is_ok());
        assert_eq!(empty.seed_part(), None);
    }

    #[test]
    fn test_dimension_validation() {
        let style = RingStyle {
            ring_width: 0.0,
            ..RingStyle::default()
        };
        assert!(matches!(
            style.validate(),
            Err(ConfigurationError::NonPositive { name: "ring_width", .. })
        ));

        let style = RingStyle {
            anchor_stroke_width: 30.0,
            ..RingStyle::default()
        };
        assert!(matches!(
            style.validate(),
            Err(ConfigurationError::AnchorStroke { .. })
        ));

        let style = RingStyle {
            initial_minutes: 0,
            ..RingStyle::default()
        };
        assert_eq!(style.validate(), Err(ConfigurationError::InitialMinutes(0)));
    }

    #[test]
    fn test_end_anchor_falls_back_to_start() {
        let style = RingStyle {
            anchor_end_text_color: Some(Color::rgb(1, 2, 3)),
            ..RingStyle::default()
        };
        let end = style.end_anchor();
        assert_eq!(end.color, style.anchor_start_color);
        assert_eq!(end.stroke_color, style.anchor_start_stroke_color);
        assert_eq!(end.text, "OFF");
        assert_eq!(end.text_color, Color::rgb(1, 2, 3));
    }

    #[test]
    fn test_sweep_fill() {
        let a = Color::rgb(0, 0, 0);
        let b = Color::rgb(200, 100, 0);
        let style = RingStyle {
            section_color: a,
            section_color2: Some(b),
            ..RingStyle::default()
        };
        let fill = style.section_fill();
        assert_eq!(fill, SectionFill::Sweep(vec![a, b, a]));
        // 3 o'clock is the first stop, 9 o'clock the middle one
        assert_eq!(fill.color_at(90.0), a);
        assert_eq!(fill.color_at(270.0), b);
        assert_eq!(fill.color_at(180.0), Color::rgb(100, 50, 0));

        let solid = RingStyle::default().section_fill();
        assert_eq!(solid.color_at(123.0), RingStyle::default().section_color);
    }

    #[test]
    fn test_from_toml() {
        let style = RingStyle::from_toml_str(
            r##"
            section_sum = 5
            quick_cut_enable = true
            section_color = "#ff0000"
            section_color2 = "#00ff00"
            anchor_start_text = "GO"
            seed = { start = 0, end = 60 }

            [gravity]
            horizontal = "center"
            vertical = "bottom"
            "##,
        )
        .unwrap();
        assert_eq!(style.section_sum, 5);
        assert!(style.quick_cut_enable);
        assert_eq!(style.section_color2, Some(Color::rgb(0, 0xff, 0)));
        assert_eq!(style.anchor_start_text, "GO");
        assert_eq!(style.seed_part(), Some(TimePart::new(0, 60)));
        assert_eq!(style.ring_width, 30.0);

        assert!(matches!(
            RingStyle::from_toml_str("section_color = \"green\""),
            Err(ConfigurationError::Parse(_))
        ));
        assert!(matches!(
            RingStyle::from_toml_str("section_sum = 0"),
            Err(ConfigurationError::SectionSum(0))
        ));
    }
}
