//! Human-readable formatting for timestamps, durations and byte counts.

pub mod calendar;
pub mod config;
pub mod format;
pub mod zone;

pub use format::{
    DateParts, Formatter, MidnightStyle, date_string_from_secs, date_string_from_secs_f64,
    duration_from_secs, duration_from_secs_f64, elapsed_from_secs, file_size_from_bytes,
    time_string_from_secs, time_string_from_secs_f64,
};
pub use zone::{TzSource, ZoneError};
