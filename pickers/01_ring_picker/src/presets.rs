//! Style presets for the ring picker
//!
//! Six looks selectable from the side panel. All of them keep the ring
//! centred in the stage.

use ring_time::{Color, Gravity, RingStyle, TimePart};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Preset {
    #[default]
    Classic,
    Gradient,
    Sunrise,
    Compact,
    FullHour,
    Mono,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::Classic,
        Preset::Gradient,
        Preset::Sunrise,
        Preset::Compact,
        Preset::FullHour,
        Preset::Mono,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Gradient => "Two-stop gradient",
            Preset::Sunrise => "Sunrise (three stops)",
            Preset::Compact => "Compact, many sections",
            Preset::FullHour => "Full hour seed",
            Preset::Mono => "Monochrome",
        }
    }

    pub fn style(self) -> RingStyle {
        let base = RingStyle {
            gravity: Gravity::CENTER,
            ..RingStyle::default()
        };
        match self {
            Preset::Classic => RingStyle {
                seed: Some(TimePart::new(5, 15)),
                ..base
            },
            Preset::Gradient => RingStyle {
                section_color: Color::rgb(0x14, 0x8c, 0x75),
                section_color2: Some(Color::rgb(0x00, 0x7f, 0xfe)),
                anchor_end_color: Some(Color::rgb(0xe0, 0x4f, 0x5f)),
                ..base
            },
            Preset::Sunrise => RingStyle {
                ring_width: 40.0,
                ring_color: Color::rgb(0x3a, 0x3f, 0x4b),
                section_color: Color::rgb(0xff, 0xb3, 0x47),
                section_color2: Some(Color::rgb(0xff, 0x5e, 0x62)),
                section_color3: Some(Color::rgb(0x8e, 0x44, 0xad)),
                anchor_start_color: Color::rgb(0xff, 0x8c, 0x00),
                anchor_end_color: Some(Color::rgb(0x8e, 0x44, 0xad)),
                anchor_diameter: 56.0,
                ..base
            },
            Preset::Compact => RingStyle {
                section_sum: 6,
                initial_minutes: 3,
                ring_width: 18.0,
                anchor_diameter: 30.0,
                anchor_stroke_width: 3.0,
                anchor_text_size: 10.0,
                anchor_start_text: "+".to_string(),
                anchor_end_text: "-".to_string(),
                number_size: 11.0,
                ..base
            },
            Preset::FullHour => RingStyle {
                seed: Some(TimePart::new(0, 60)),
                quick_cut_enable: true,
                section_sum: 1,
                ..base
            },
            Preset::Mono => RingStyle {
                ring_color: Color::rgb(0x30, 0x30, 0x30),
                section_color: Color::rgb(0xdd, 0xdd, 0xdd),
                anchor_start_color: Color::rgb(0x20, 0x20, 0x20),
                anchor_start_stroke_color: Color::rgb(0xdd, 0xdd, 0xdd),
                anchor_stroke_width: 2.0,
                anchor_need_merge: false,
                tick_color: Color::rgb(0x66, 0x66, 0x66),
                tick_long_width: 3.0,
                tick_short_width: Some(1.0),
                number_color: Color::rgb(0xaa, 0xaa, 0xaa),
                ..base
            },
        }
    }
}
