/*!
 * Timestamp patterns for text output.
 *
 * A pattern is one of the base layouts `HH:MM:SS`, `HH:MM`, `SS`, `MM` or
 * `Mi`, optionally followed by `.Mi` to append milliseconds
 * (e.g. `HH:MM:SS.Mi`). `SS` and `MM` render the *total* seconds / minutes,
 * `Mi` renders the raw millisecond value.
 */

use std::fmt;
use std::str::FromStr;

use crate::errors::SubtitleError;

// @const: Suffix that requests a milliseconds component
const MILLIS_SUFFIX: &str = "Mi";

/// Base layout of a timestamp pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampLayout {
    /// Hours, minutes and seconds
    HoursMinutesSeconds,
    /// Hours and minutes
    HoursMinutes,
    /// Total seconds
    Seconds,
    /// Total minutes
    Minutes,
    /// Raw milliseconds
    Millis,
}

impl TimestampLayout {
    fn token(&self) -> &'static str {
        match self {
            Self::HoursMinutesSeconds => "HH:MM:SS",
            Self::HoursMinutes => "HH:MM",
            Self::Seconds => "SS",
            Self::Minutes => "MM",
            Self::Millis => "Mi",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "HH:MM:SS" => Some(Self::HoursMinutesSeconds),
            "HH:MM" => Some(Self::HoursMinutes),
            "SS" => Some(Self::Seconds),
            "MM" => Some(Self::Minutes),
            "Mi" => Some(Self::Millis),
            _ => None,
        }
    }
}

/// A parsed timestamp pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampFormat {
    pub layout: TimestampLayout,
    pub with_millis: bool,
}

impl TimestampFormat {
    /// Patterns offered on the command line
    pub const PATTERNS: [&'static str; 6] = ["HH:MM:SS.Mi", "HH:MM:SS", "HH:MM", "SS", "MM", "Mi"];

    pub fn new(layout: TimestampLayout, with_millis: bool) -> Self {
        // Raw milliseconds already carry the millisecond part
        let with_millis = with_millis && layout != TimestampLayout::Millis;
        TimestampFormat { layout, with_millis }
    }

    /// Render a millisecond offset using this pattern
    pub fn format(&self, ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        let mut out = match self.layout {
            TimestampLayout::HoursMinutesSeconds => {
                format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
            }
            TimestampLayout::HoursMinutes => format!("{:02}:{:02}", hours, minutes),
            TimestampLayout::Seconds => format!("{:02}", ms / 1_000),
            TimestampLayout::Minutes => format!("{:02}", ms / 60_000),
            TimestampLayout::Millis => ms.to_string(),
        };

        if self.with_millis {
            out.push_str(&format!(".{:03}", millis));
        }
        out
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        TimestampFormat::new(TimestampLayout::HoursMinutesSeconds, false)
    }
}

impl FromStr for TimestampFormat {
    type Err = SubtitleError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        let pattern = pattern.trim();

        // Whole-pattern match first so a bare "Mi" is the raw layout, not a suffix
        if let Some(layout) = TimestampLayout::from_token(pattern) {
            return Ok(TimestampFormat::new(layout, false));
        }

        let (base, suffix) = match pattern.rsplit_once('.') {
            Some((base, suffix)) => (base, Some(suffix)),
            None => (pattern, None),
        };

        if let Some(suffix) = suffix {
            if suffix != MILLIS_SUFFIX {
                return Err(SubtitleError::Format { token: suffix.to_string() });
            }
        }

        match TimestampLayout::from_token(base) {
            Some(TimestampLayout::Millis) | None => Err(SubtitleError::Format { token: base.to_string() }),
            Some(layout) => Ok(TimestampFormat::new(layout, suffix.is_some())),
        }
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.layout.token())?;
        if self.with_millis {
            write!(f, ".{}", MILLIS_SUFFIX)?;
        }
        Ok(())
    }
}
