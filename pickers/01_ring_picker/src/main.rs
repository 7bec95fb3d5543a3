//! Ring Picker
//!
//! Desktop demo of the ring time widget: a 60-minute dial on which up to
//! `section_sum` sections are created by pressing the ring and resized by
//! dragging their ON/OFF anchors. A side panel shows the sections as
//! wall-clock times in the current hour and lets the user switch styles.

mod drawing;
mod presets;
mod ui;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use chrono::{Local, Timelike};
use nannou::prelude::*;
use nannou::winit::event::{TouchPhase as WinitTouchPhase, WindowEvent};
use nannou_egui::{self, Egui};
use ring_time::{Padding, PointerEvent, RingEvent, RingResult, RingTimeView, TimePart};
use serde::{Deserialize, Serialize};

use crate::presets::Preset;

const PICKER_NAME: &str = "ring_picker";
const PANEL_WIDTH: f32 = 280.0;
const EVENT_LOG_LEN: usize = 200;
/// Room for the title above and the hint below the ring
const STAGE_PADDING: Padding = Padding {
    left: 16.0,
    top: 44.0,
    right: 16.0,
    bottom: 40.0,
};
const SAMPLE_SECTIONS: [TimePart; 2] = [TimePart::new(10, 20), TimePart::new(40, 50)];

fn main() {
    // Initialize logging (RUST_LOG can raise the level, e.g. to debug)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Ring Picker starting up...");
    nannou::app(model).update(update).run();
}

/// Persisted configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct Config {
    preset: Preset,
    quick_cut_enable: bool,
}

/// Events queued by the widget listener until the next update
type EventQueue = Rc<RefCell<VecDeque<RingEvent>>>;

/// Application state
pub struct Model {
    /// The widget
    view: RingTimeView,
    /// Filled by the widget listener
    pending: EventQueue,
    /// Rendered event history, newest last
    event_log: VecDeque<String>,

    preset: Preset,
    quick_cut: bool,

    /// Stage size the widget was last laid out for
    laid_out: Option<(f32, f32)>,
    pointer_down: bool,
    /// Touch currently driving the widget
    active_touch: Option<u64>,

    /// egui integration
    egui: Egui,
}

impl Model {
    /// Switch to another preset; the new style starts with its own seed
    fn apply_preset(&mut self, preset: Preset) {
        if self.replace_view(preset) {
            save_config(self);
        }
    }

    /// Delete the saved settings and fall back to the defaults
    fn reset_settings(&mut self) {
        if let Err(e) = ring_time::delete_config(PICKER_NAME) {
            log::warn!("failed to delete config: {}", e);
            return;
        }
        let defaults = Config::default();
        self.quick_cut = defaults.quick_cut_enable;
        self.replace_view(defaults.preset);
        self.log_line("settings reset".to_string());
    }

    fn replace_view(&mut self, preset: Preset) -> bool {
        match build_view(preset, self.quick_cut, &self.pending) {
            Ok(view) => {
                self.view = view;
                self.preset = preset;
                self.laid_out = None;
                self.pointer_down = false;
                self.active_touch = None;
                self.log_line(format!("preset: {}", preset.label()));
                true
            }
            Err(e) => {
                log::error!("preset {:?} rejected: {}", preset, e);
                false
            }
        }
    }

    fn log_line(&mut self, line: String) {
        self.event_log.push_back(line);
        while self.event_log.len() > EVENT_LOG_LEN {
            self.event_log.pop_front();
        }
    }

    /// Move queued widget events into the log
    fn drain_events(&mut self) {
        let events: Vec<RingEvent> = self.pending.borrow_mut().drain(..).collect();
        for event in events {
            if let RingEvent::Changed(parts) = &event {
                log::info!("sections now {:?}", parts);
            }
            self.log_line(ui::describe_event(&event));
        }
    }

    fn pointer(&mut self, event: PointerEvent) {
        self.view.on_pointer(event);
        self.drain_events();
    }
}

fn build_view(preset: Preset, quick_cut: bool, pending: &EventQueue) -> RingResult<RingTimeView> {
    let mut style = preset.style();
    style.quick_cut_enable = quick_cut;
    let mut view = RingTimeView::new(style)?;
    let sink = Rc::clone(pending);
    view.set_listener(move |event| sink.borrow_mut().push_back(event.clone()));
    Ok(view)
}

fn save_config(model: &Model) {
    let config = Config {
        preset: model.preset,
        quick_cut_enable: model.quick_cut,
    };
    if let Err(e) = ring_time::save_config(PICKER_NAME, &config) {
        log::warn!("failed to save config: {}", e);
    }
}

/// Window area left of the side panel
fn stage_rect(window_rect: Rect) -> Rect {
    Rect::from_corners(
        pt2(window_rect.left(), window_rect.bottom()),
        pt2((window_rect.right() - PANEL_WIDTH).max(window_rect.left()), window_rect.top()),
    )
}

/// Convert nannou coordinates into the widget's y-down stage space
fn stage_point(stage: Rect, pos: Point2) -> ring_time::Point {
    ring_time::Point::new(pos.x - stage.left(), stage.top() - pos.y)
}

/// Like [`stage_point`], but only for positions left of the side panel
fn to_stage(stage: Rect, pos: Point2) -> Option<ring_time::Point> {
    (pos.x <= stage.right()).then(|| stage_point(stage, pos))
}

fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("Ring Picker")
        .size(980, 700)
        .min_size(640, 480)
        .view(view)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_moved(mouse_moved)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let config: Config = match ring_time::load_config(PICKER_NAME) {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            log::warn!("ignoring saved config: {}", e);
            Config::default()
        }
    };

    let pending: EventQueue = Rc::new(RefCell::new(VecDeque::new()));
    let (view, preset) = match build_view(config.preset, config.quick_cut_enable, &pending) {
        Ok(view) => (view, config.preset),
        Err(e) => {
            log::error!("preset {:?} rejected: {}", config.preset, e);
            let fallback = build_view(Preset::default(), config.quick_cut_enable, &pending)
                .expect("stock preset is valid");
            (fallback, Preset::default())
        }
    };
    log::info!("starting with preset {:?}", preset);

    Model {
        view,
        pending,
        event_log: VecDeque::new(),
        preset,
        quick_cut: config.quick_cut_enable,
        laid_out: None,
        pointer_down: false,
        active_touch: None,
        egui,
    }
}

fn update(app: &App, model: &mut Model, update: Update) {
    // Lay the ring out again whenever the stage changes size
    let stage = stage_rect(app.window_rect());
    let size = (stage.w(), stage.h());
    if model.laid_out != Some(size) {
        model.view.recompute_layout(size.0, size.1, STAGE_PADDING);
        model.laid_out = Some(size);
        log::debug!("stage resized to {}x{}", size.0, size.1);
    }

    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    let sections = model.view.intervals();
    let ui_result = ui::draw_side_panel(
        &ctx,
        PANEL_WIDTH,
        Local::now().hour(),
        &sections,
        &mut model.quick_cut,
        model.preset,
        &model.event_log,
    );

    drop(ctx);

    if ui_result.set_sample {
        if let Err(e) = model.view.set_intervals(&SAMPLE_SECTIONS) {
            log::warn!("sample sections rejected: {}", e);
            model.log_line(format!("set rejected: {}", e));
        }
    }
    if ui_result.clear {
        model.view.clear_intervals();
    }
    if ui_result.quick_cut_changed {
        model.view.set_quick_cut_enable(model.quick_cut);
        save_config(model);
    }
    if let Some(preset) = ui_result.preset {
        model.apply_preset(preset);
    }
    if ui_result.reset_settings {
        model.reset_settings();
    }
    model.drain_events();
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let stage = stage_rect(app.window_rect());

    draw.background().color(drawing::colors::BACKGROUND);
    drawing::draw_stage(&draw, stage, &model.view);
    drawing::draw_header(&draw, stage);

    draw.to_frame(app, &frame).unwrap();
    model.egui.draw_to_frame(&frame).unwrap();
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left {
        return;
    }
    let stage = stage_rect(app.window_rect());
    if let Some(p) = to_stage(stage, app.mouse.position()) {
        model.pointer_down = true;
        model.pointer(PointerEvent::Press(p));
    }
}

fn mouse_released(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left || !model.pointer_down {
        return;
    }
    model.pointer_down = false;
    let stage = stage_rect(app.window_rect());
    let p = stage_point(stage, app.mouse.position());
    model.pointer(PointerEvent::Release(p));
}

fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    if !model.pointer_down {
        return;
    }
    let stage = stage_rect(app.window_rect());
    // Drags keep tracking past the panel edge
    let p = stage_point(stage, pos);
    model.pointer(PointerEvent::Move(p));
}

fn raw_window_event(app: &App, model: &mut Model, event: &WindowEvent) {
    model.egui.handle_raw_event(event);

    // Handle touch events (map to pointer events)
    if let WindowEvent::Touch(touch) = event {
        let window_rect = app.window_rect();
        let stage = stage_rect(window_rect);

        // Convert touch position to nannou coordinates
        let pos = pt2(
            touch.location.x as f32 - window_rect.w() / 2.0,
            window_rect.h() / 2.0 - touch.location.y as f32,
        );
        let p = stage_point(stage, pos);

        match touch.phase {
            WinitTouchPhase::Started => {
                if model.active_touch.is_none() && to_stage(stage, pos).is_some() {
                    model.active_touch = Some(touch.id);
                    model.pointer(PointerEvent::Press(p));
                }
            }
            WinitTouchPhase::Moved => {
                if model.active_touch == Some(touch.id) {
                    model.pointer(PointerEvent::Move(p));
                }
            }
            WinitTouchPhase::Ended | WinitTouchPhase::Cancelled => {
                if model.active_touch == Some(touch.id) {
                    model.active_touch = None;
                    model.pointer(PointerEvent::Release(p));
                }
            }
        }
    }
}
