//! Error types for the ring time picker
//!
//! Construction problems are fatal and reported as [`ConfigurationError`].
//! Bulk interval updates that fail validation are reported as
//! [`ValidationError`] and leave the widget untouched. Rejected drags and
//! inserts are not errors at all; they simply do nothing.

use thiserror::Error;

use crate::interval::TimePart;

/// Problems with a [`RingStyle`](crate::RingStyle) detected before a widget is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Capacity must allow at least one interval and stay below 60.
    #[error("section sum must be between 1 and 59, got {0}")]
    SectionSum(usize),

    /// A seeded minute fell outside the dial.
    #[error("seeded {which} minute must be between 0 and 60, got {minute}")]
    SeedMinute {
        /// "start" or "end"
        which: &'static str,
        /// The offending minute
        minute: u32,
    },

    /// Seeded start comes after the seeded end.
    #[error("seeded end minute {end} must not be smaller than start minute {start}")]
    SeedOrder {
        /// Seeded start minute
        start: u32,
        /// Seeded end minute
        end: u32,
    },

    /// The length of a freshly inserted interval.
    #[error("initial interval length must be between 1 and 60 minutes, got {0}")]
    InitialMinutes(u32),

    /// A dimension that has to be strictly positive.
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Style field name
        name: &'static str,
        /// The offending value
        value: f32,
    },

    /// A dimension that may be zero but not negative.
    #[error("{name} must not be negative, got {value}")]
    Negative {
        /// Style field name
        name: &'static str,
        /// The offending value
        value: f32,
    },

    /// The anchor border would swallow the whole anchor.
    #[error("anchor stroke width {stroke} exceeds anchor radius {radius}")]
    AnchorStroke {
        /// Configured stroke width
        stroke: f32,
        /// Half the configured anchor diameter
        radius: f32,
    },

    /// A style document could not be parsed.
    #[error("invalid style document: {0}")]
    Parse(String),
}

/// Reasons a bulk interval update is refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// More parts than the widget has slots for.
    #[error("got {len} intervals but only {capacity} fit")]
    TooManyParts {
        /// Number of parts supplied
        len: usize,
        /// Slot count of the widget
        capacity: usize,
    },

    /// A part is empty, reversed or leaves the dial.
    #[error("interval {0} must satisfy 0 <= start < end <= 60")]
    OutOfRange(TimePart),

    /// Two supplied parts share at least one minute.
    #[error("intervals {0} and {1} overlap")]
    Overlapping(TimePart, TimePart),
}

/// Any error the widget can report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RingError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type for widget operations.
pub type RingResult<T> = Result<T, RingError>;
