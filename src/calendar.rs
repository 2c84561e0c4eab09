//! Calendar lookups used alongside the formatters.
//!
//! Names are English only. Days run 1 = Monday to 7 = Sunday and months run
//! 1 = January to 12 = December; anything else yields `None`.

use chrono::{Month, NaiveDate, Weekday};
use std::time::{SystemTime, UNIX_EPOCH};

const SHORT_DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Current Unix timestamp in whole seconds
pub fn now_secs() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        // clock set before 1970
        Err(e) => -(e.duration().as_secs() as i64),
    }
}

/// Number of days in `month` of `year`, accounting for leap years
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

pub fn short_day_name(day: u32) -> Option<&'static str> {
    weekday(day).map(|d| SHORT_DAYS[d.num_days_from_monday() as usize])
}

pub fn long_day_name(day: u32) -> Option<&'static str> {
    weekday(day).map(|d| match d {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    })
}

pub fn short_month_name(month: u32) -> Option<&'static str> {
    month_of(month).map(|m| SHORT_MONTHS[m.number_from_month() as usize - 1])
}

pub fn long_month_name(month: u32) -> Option<&'static str> {
    month_of(month).map(|m| m.name())
}

/// Suffix for hours 0-11 on the 12-hour clock.
pub fn am_text() -> &'static str {
    "am"
}

/// Suffix for hours 12-23 on the 12-hour clock.
pub fn pm_text() -> &'static str {
    "pm"
}

fn weekday(day: u32) -> Option<Weekday> {
    match day {
        1..=7 => Weekday::try_from((day - 1) as u8).ok(),
        _ => None,
    }
}

fn month_of(month: u32) -> Option<Month> {
    match month {
        1..=12 => Month::try_from(month as u8).ok(),
        _ => None,
    }
}
