//! Circular minute-range picker core
//!
//! A ring dial of 60 minutes on which a user creates, drags, merges and
//! deletes up to `section_sum` intervals. The crate has no windowing
//! dependency: hosts feed [`PointerEvent`]s into a [`RingTimeView`] and
//! replay its [`DrawCommand`]s onto their own [`Surface`].

pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod interval;
pub mod render;
pub mod style;
pub mod widget;

pub use config::{config_dir, config_path, delete_config, load_config, save_config, ConfigError};
pub use error::{ConfigurationError, RingError, RingResult, ValidationError};
pub use geometry::{
    angle_to_minute, minute_to_angle, Gravity, HorizontalGravity, Padding, Point, RingLayout,
    VerticalGravity, MAX_MINUTE, MIN_MINUTE, SMOOTH_RANGE,
};
pub use gesture::{GestureMachine, GestureState, Handled, PointerEvent, RingEvent};
pub use interval::{AnchorKind, IntervalSet, TimeAnchor, TimeInterval, TimePart};
pub use render::{plan, render, DrawCommand, Surface};
pub use style::{AnchorPaint, Color, RingStyle, SectionFill, MAX_SECTION_SUM};
pub use widget::{Listener, RingTimeView};
