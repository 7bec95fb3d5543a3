//! UI module for the Ring Picker
//!
//! Side panel with the interval readout, sample buttons, the quick-cut
//! toggle, the preset selector and a log of widget events.

use std::collections::VecDeque;

use chrono::{Duration, NaiveTime};
use nannou_egui::egui;
use ring_time::{RingEvent, TimePart};

use crate::presets::Preset;

/// Result of side panel interactions
#[derive(Default)]
pub struct PanelResult {
    /// Replace the sections with the sample pair
    pub set_sample: bool,
    /// Remove every section
    pub clear: bool,
    /// Quick-cut checkbox toggled
    pub quick_cut_changed: bool,
    /// A different preset was picked
    pub preset: Option<Preset>,
    /// Forget the saved settings and go back to the defaults
    pub reset_settings: bool,
}

/// Draw the side panel (right)
pub fn draw_side_panel(
    ctx: &egui::Context,
    width: f32,
    hour: u32,
    sections: &[TimePart],
    quick_cut: &mut bool,
    preset: Preset,
    event_log: &VecDeque<String>,
) -> PanelResult {
    let mut result = PanelResult::default();

    egui::SidePanel::right("picker_panel")
        .resizable(false)
        .exact_width(width)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading("Sections");

            if sections.is_empty() {
                ui.label(
                    egui::RichText::new("No sections")
                        .color(egui::Color32::from_rgb(140, 150, 170)),
                );
            } else {
                for part in sections {
                    ui.label(egui::RichText::new(format_part(hour, *part)).size(14.0));
                }
            }

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui
                    .button("Set 10-20 & 40-50")
                    .on_hover_text("Replace all sections with two samples")
                    .clicked()
                {
                    result.set_sample = true;
                }
                if ui.button("Clear").clicked() {
                    result.clear = true;
                }
            });

            ui.separator();
            ui.heading("Style");

            if ui
                .checkbox(quick_cut, "Quick cut")
                .on_hover_text("Pressing inside a section moves its OFF anchor there")
                .changed()
            {
                result.quick_cut_changed = true;
            }

            egui::ComboBox::from_label("Preset")
                .selected_text(preset.label())
                .show_ui(ui, |ui| {
                    for candidate in Preset::ALL {
                        if ui
                            .selectable_label(candidate == preset, candidate.label())
                            .clicked()
                            && candidate != preset
                        {
                            result.preset = Some(candidate);
                        }
                    }
                });

            if ui
                .button("Reset settings")
                .on_hover_text("Delete the saved preset and quick-cut choice")
                .clicked()
            {
                result.reset_settings = true;
            }

            ui.separator();
            ui.heading("Events");

            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in event_log {
                        ui.label(egui::RichText::new(line).monospace().size(11.0));
                    }
                });
        });

    result
}

/// Show a section as wall-clock times within `hour`
pub fn format_part(hour: u32, part: TimePart) -> String {
    let Some(base) = NaiveTime::from_hms_opt(hour % 24, 0, 0) else {
        return part.to_string();
    };
    let at = |minute: u32| (base + Duration::minutes(i64::from(minute))).format("%H:%M");
    format!("{} - {} ({} min)", at(part.start), at(part.end), part.minutes())
}

/// One line of the event log
pub fn describe_event(event: &RingEvent) -> String {
    match event {
        RingEvent::Changed(parts) => {
            let list: Vec<String> = parts.iter().map(ToString::to_string).collect();
            format!("changed: {}", list.join(" "))
        }
        RingEvent::Inserted(part) => format!("insert: {} ~ {}", part.start, part.end),
        RingEvent::SelectStarted(minute) => format!("select start: {}", minute),
        RingEvent::SelectChanging(minute) => format!("select changed: {}", minute),
        RingEvent::SelectFinished => "select finished".to_string(),
    }
}
