//! Formatter settings resolved from command-line flags and the environment.
//!
//! Precedence is flag > environment variable > default.

use crate::format::{Formatter, MidnightStyle};
use crate::zone::{TzSource, ZoneError};
use serde::Serialize;

pub const TZ_ENV: &str = "STAMPFMT_TZ";
pub const MIDNIGHT_ENV: &str = "STAMPFMT_MIDNIGHT";

/// Where a setting's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Flag,
    Env,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub tz: TzSource,
    pub midnight: MidnightStyle,
    tz_source: Source,
}

impl Settings {
    /// Resolve against the process environment.
    pub fn resolve(cli_tz: Option<&str>, cli_midnight_twelve: bool) -> Result<Self, ZoneError> {
        Self::resolve_with(cli_tz, cli_midnight_twelve, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup.
    ///
    /// A bad `--tz` is an error; a bad `STAMPFMT_TZ` is logged and ignored.
    pub fn resolve_with<F>(
        cli_tz: Option<&str>,
        cli_midnight_twelve: bool,
        env: F,
    ) -> Result<Self, ZoneError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (tz, tz_source) = match cli_tz {
            Some(raw) => (raw.parse::<TzSource>()?, Source::Flag),
            None => match env(TZ_ENV) {
                Some(raw) => match raw.parse::<TzSource>() {
                    Ok(tz) => (tz, Source::Env),
                    Err(e) => {
                        tracing::warn!("ignoring {}: {}", TZ_ENV, e);
                        (TzSource::default(), Source::Default)
                    }
                },
                None => (TzSource::default(), Source::Default),
            },
        };

        let midnight = if cli_midnight_twelve
            || env(MIDNIGHT_ENV).is_some_and(|v| v.trim() == "12")
        {
            MidnightStyle::Twelve
        } else {
            MidnightStyle::Zero
        };

        tracing::debug!(%tz, ?tz_source, ?midnight, "resolved settings");

        Ok(Self {
            tz,
            midnight,
            tz_source,
        })
    }

    pub fn source(&self) -> Source {
        self.tz_source
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.tz, self.midnight)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tz: TzSource::default(),
            midnight: MidnightStyle::default(),
            tz_source: Source::Default,
        }
    }
}
