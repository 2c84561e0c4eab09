//! String formatters for timestamps, durations and byte counts.
//!
//! The free functions read wall-clock fields in the host's local zone. Use a
//! [`Formatter`] to pick another [`TzSource`] or the conventional midnight.

use crate::calendar;
use crate::zone::TzSource;
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

const INVALID_DATE: &str = "NaN/NaN/NaN";
const INVALID_DURATION: &str = "NaN:NaN:NaN";

/// How hour 0 of each half-day is rendered on the 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MidnightStyle {
    /// `0:00 am` for midnight and `0:00 pm` for noon.
    #[default]
    Zero,
    /// `12:00 am` for midnight and `12:00 pm` for noon.
    Twelve,
}

/// Calendar and clock fields of one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl From<NaiveDateTime> for DateParts {
    fn from(dt: NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Formatter {
    pub tz: TzSource,
    pub midnight: MidnightStyle,
}

impl Formatter {
    pub fn new(tz: TzSource, midnight: MidnightStyle) -> Self {
        Self { tz, midnight }
    }

    /// Fields of `secs` in the configured zone, `None` if unrepresentable
    pub fn parts(&self, secs: i64) -> Option<DateParts> {
        let parts = self.tz.resolve(secs).map(DateParts::from);
        if parts.is_none() {
            tracing::debug!(secs, tz = %self.tz, "timestamp outside representable range");
        }
        parts
    }

    /// Fields of the current instant in the configured zone.
    pub fn now_parts(&self) -> Option<DateParts> {
        self.parts(calendar::now_secs())
    }

    /// Format timestamp as `DD/MM/YYYY`
    pub fn date_string(&self, secs: i64) -> String {
        match self.parts(secs) {
            Some(p) => format!("{:02}/{:02}/{}", p.day, p.month, p.year),
            None => INVALID_DATE.to_string(),
        }
    }

    /// Format timestamp as a 12-hour clock, e.g. "1:05 pm"
    pub fn time_string(&self, secs: i64) -> String {
        let Some(p) = self.parts(secs) else {
            return format!("NaN:NaN {}", calendar::am_text());
        };

        let (hour, suffix) = if p.hour > 11 {
            (p.hour - 12, calendar::pm_text())
        } else {
            (p.hour, calendar::am_text())
        };
        let hour = match (hour, self.midnight) {
            (0, MidnightStyle::Twelve) => 12,
            (h, _) => h,
        };

        format!("{}:{:02} {}", hour, p.minute, suffix)
    }

    /// Format the time-of-day of `secs` as `HH:MM:SS`.
    ///
    /// This reads the wall clock of the instant, so it wraps every 24 hours
    /// and shifts with the zone offset. Pass a pre-subtracted difference in
    /// [`TzSource::Utc`] to use it for short durations, or call
    /// [`elapsed_from_secs`] instead.
    pub fn duration(&self, secs: i64) -> String {
        match self.parts(secs) {
            Some(p) => format!("{:02}:{:02}:{:02}", p.hour, p.minute, p.second),
            None => INVALID_DURATION.to_string(),
        }
    }
}

/// Format timestamp as `DD/MM/YYYY` in local time
pub fn date_string_from_secs(secs: i64) -> String {
    Formatter::default().date_string(secs)
}

/// Format timestamp as `H:MM am|pm` in local time
pub fn time_string_from_secs(secs: i64) -> String {
    Formatter::default().time_string(secs)
}

/// Format local time-of-day of timestamp as `HH:MM:SS`
pub fn duration_from_secs(secs: i64) -> String {
    Formatter::default().duration(secs)
}

/// Same as [`date_string_from_secs`], truncating fractional seconds.
pub fn date_string_from_secs_f64(secs: f64) -> String {
    match whole_secs(secs) {
        Some(s) => date_string_from_secs(s),
        None => INVALID_DATE.to_string(),
    }
}

/// Same as [`time_string_from_secs`], truncating fractional seconds.
pub fn time_string_from_secs_f64(secs: f64) -> String {
    match whole_secs(secs) {
        Some(s) => time_string_from_secs(s),
        None => format!("NaN:NaN {}", calendar::am_text()),
    }
}

/// Same as [`duration_from_secs`], truncating fractional seconds.
pub fn duration_from_secs_f64(secs: f64) -> String {
    match whole_secs(secs) {
        Some(s) => duration_from_secs(s),
        None => INVALID_DURATION.to_string(),
    }
}

/// Format an elapsed number of seconds as `HH:MM:SS`, hours unbounded
pub fn elapsed_from_secs(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let total = secs.unsigned_abs();
    format!(
        "{}{:02}:{:02}:{:02}",
        sign,
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Format bytes into human-readable size, truncated to a whole unit
pub fn file_size_from_bytes(bytes: u64) -> String {
    let (divisor, unit) = match bytes {
        b if b > GB => (GB, "GB"),
        b if b > MB => (MB, "MB"),
        b if b > KB => (KB, "kB"),
        _ => (1, "B"),
    };
    format!("{} {}", bytes / divisor, unit)
}

fn whole_secs(secs: f64) -> Option<i64> {
    if !secs.is_finite() {
        return None;
    }
    // `as` saturates; saturated values fall outside chrono's range anyway.
    Some(secs.trunc() as i64)
}
