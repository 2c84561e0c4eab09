//! Timezone source used to turn a Unix instant into wall-clock time.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoneError {
    #[error("invalid timezone {0:?}: expected local, utc, or an offset like +05:30")]
    Malformed(String),

    #[error("offset {0:?} is out of range (must be within +/-23:59)")]
    OutOfRange(String),
}

/// Where wall-clock fields are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TzSource {
    /// Host timezone, including its DST rules.
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl TzSource {
    /// Wall-clock time of `secs` in this zone, or `None` when the instant is
    /// outside chrono's representable range.
    pub fn resolve(&self, secs: i64) -> Option<NaiveDateTime> {
        let utc = DateTime::<Utc>::from_timestamp(secs, 0)?;
        let naive = utc.naive_utc();
        Some(match self {
            TzSource::Local => Local.from_utc_datetime(&naive).naive_local(),
            TzSource::Utc => naive,
            TzSource::Fixed(offset) => offset.from_utc_datetime(&naive).naive_local(),
        })
    }

    /// Builds a fixed source from an offset in seconds east of UTC.
    pub fn east(secs: i32) -> Option<Self> {
        FixedOffset::east_opt(secs).map(TzSource::Fixed)
    }
}

impl FromStr for TzSource {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "local" => return Ok(TzSource::Local),
            "utc" | "z" => return Ok(TzSource::Utc),
            _ => {}
        }

        let (sign, rest) = match trimmed.as_bytes().first() {
            Some(b'+') => (1, &trimmed[1..]),
            Some(b'-') => (-1, &trimmed[1..]),
            _ => return Err(ZoneError::Malformed(s.to_string())),
        };

        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        let colons = rest.chars().filter(|c| *c == ':').count();
        if colons > 1
            || (colons == 1 && rest.find(':') != Some(2))
            || !matches!(digits.len(), 2 | 4)
            || !digits.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ZoneError::Malformed(s.to_string()));
        }

        let hours: i32 = digits[..2]
            .parse()
            .map_err(|_| ZoneError::Malformed(s.to_string()))?;
        let minutes: i32 = if digits.len() == 4 {
            digits[2..]
                .parse()
                .map_err(|_| ZoneError::Malformed(s.to_string()))?
        } else {
            0
        };

        if hours > 23 || minutes > 59 {
            return Err(ZoneError::OutOfRange(s.to_string()));
        }

        TzSource::east(sign * (hours * 3600 + minutes * 60))
            .ok_or_else(|| ZoneError::OutOfRange(s.to_string()))
    }
}

impl fmt::Display for TzSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TzSource::Local => f.write_str("local"),
            TzSource::Utc => f.write_str("utc"),
            TzSource::Fixed(offset) => {
                let total = offset.local_minus_utc();
                let sign = if total < 0 { '-' } else { '+' };
                let abs = total.abs();
                write!(f, "{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_named_zones() {
        assert_eq!("local".parse::<TzSource>().unwrap(), TzSource::Local);
        assert_eq!("UTC".parse::<TzSource>().unwrap(), TzSource::Utc);
        assert_eq!("Z".parse::<TzSource>().unwrap(), TzSource::Utc);
        assert_eq!(" utc ".parse::<TzSource>().unwrap(), TzSource::Utc);
    }

    #[test]
    fn test_parse_offsets() {
        assert_eq!("+05:30".parse::<TzSource>().unwrap(), TzSource::east(19_800).unwrap());
        assert_eq!("+0530".parse::<TzSource>().unwrap(), TzSource::east(19_800).unwrap());
        assert_eq!("-08".parse::<TzSource>().unwrap(), TzSource::east(-28_800).unwrap());
        assert_eq!("+00:00".parse::<TzSource>().unwrap(), TzSource::east(0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!("Europe/Paris".parse::<TzSource>(), Err(ZoneError::Malformed(_))));
        assert!(matches!("+5".parse::<TzSource>(), Err(ZoneError::Malformed(_))));
        assert!(matches!("+05:3".parse::<TzSource>(), Err(ZoneError::Malformed(_))));
        assert!(matches!("+0:530".parse::<TzSource>(), Err(ZoneError::Malformed(_))));
        assert!(matches!("+ab:cd".parse::<TzSource>(), Err(ZoneError::Malformed(_))));
        assert!(matches!("".parse::<TzSource>(), Err(ZoneError::Malformed(_))));
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(matches!("+24:00".parse::<TzSource>(), Err(ZoneError::OutOfRange(_))));
        assert!(matches!("-05:60".parse::<TzSource>(), Err(ZoneError::OutOfRange(_))));
    }

    #[test]
    fn test_display_round_trips_canonical_form() {
        for s in ["local", "utc", "+05:30", "-08:00", "+00:00"] {
            assert_eq!(s.parse::<TzSource>().unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_resolve_applies_offset() {
        // 2021-01-01T00:00:00Z
        let secs = 1_609_459_200;
        let utc = TzSource::Utc.resolve(secs).unwrap();
        assert_eq!((utc.hour(), utc.minute()), (0, 0));

        let ist = TzSource::east(19_800).unwrap().resolve(secs).unwrap();
        assert_eq!((ist.hour(), ist.minute()), (5, 30));

        let pst = TzSource::east(-28_800).unwrap().resolve(secs).unwrap();
        assert_eq!(pst.hour(), 16);
    }

    #[test]
    fn test_resolve_out_of_range_is_none() {
        assert!(TzSource::Utc.resolve(i64::MAX).is_none());
        assert!(TzSource::Local.resolve(i64::MIN).is_none());
    }
}
