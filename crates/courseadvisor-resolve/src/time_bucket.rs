//! Time-of-day bucketing for free-text meeting patterns.
//!
//! Only the first `HH:MM` in the text is considered. An AM/PM marker is
//! honored when it appears before the first `-` (i.e. on the start time);
//! a bare time is taken as 24-hour. Bucket membership compares the
//! zero-padded `HH:MM` text, so clock values are not range-checked.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CLOCK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{1,2}):(\d{2})\b").unwrap());
static PM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bPM\b").unwrap());
static AM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bAM\b").unwrap());

/// A start time after AM/PM adjustment. Not validated: `09:60` is kept as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Start time of a meeting pattern such as `"TTH | 10:20 AM - 12:00 PM"`.
    pub fn parse_start(text: &str) -> Option<Self> {
        let caps = CLOCK_RE.captures(text)?;
        let mut hour: u8 = caps[1].parse().ok()?;
        let minute: u8 = caps[2].parse().ok()?;

        let start_part = match text.find('-') {
            Some(i) => &text[..i],
            None => text,
        };
        if PM_RE.is_match(start_part) && hour != 12 {
            hour += 12;
        }
        if AM_RE.is_match(start_part) && hour == 12 {
            hour = 0;
        }
        Some(Self::new(hour, minute))
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Fixed time-of-day buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBucket {
    /// 06:00 – 11:59
    Morning,
    /// 12:00 – 17:00
    Afternoon,
    /// 17:01 – 22:59
    Evening,
}

impl TimeBucket {
    pub const ALL: [TimeBucket; 3] = [Self::Morning, Self::Afternoon, Self::Evening];

    /// Inclusive bounds of the bucket.
    pub fn bounds(&self) -> (ClockTime, ClockTime) {
        match self {
            Self::Morning => (ClockTime::new(6, 0), ClockTime::new(11, 59)),
            Self::Afternoon => (ClockTime::new(12, 0), ClockTime::new(17, 0)),
            Self::Evening => (ClockTime::new(17, 1), ClockTime::new(22, 59)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }

    /// Case-insensitive bucket name; `None` for anything else.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "morning" => Some(Self::Morning),
            "afternoon" => Some(Self::Afternoon),
            "evening" => Some(Self::Evening),
            _ => None,
        }
    }

    /// Inclusive, on the `HH:MM` text.
    pub fn contains(&self, time: ClockTime) -> bool {
        let (lo, hi) = self.bounds();
        let time = time.to_string();
        lo.to_string() <= time && time <= hi.to_string()
    }

    /// Whether the start time in `time_text` falls in this bucket.
    pub fn matches(&self, time_text: &str) -> bool {
        ClockTime::parse_start(time_text).is_some_and(|t| self.contains(t))
    }

    /// Bucket containing the start time in `time_text`, if any. Times
    /// between 23:00 and 05:59 belong to no bucket.
    pub fn of(time_text: &str) -> Option<Self> {
        let time = ClockTime::parse_start(time_text)?;
        Self::ALL.into_iter().find(|b| b.contains(time))
    }
}

impl std::fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name-based classification: false for unknown bucket names and for text
/// without a parseable clock time.
pub fn classify(time_text: &str, bucket: &str) -> bool {
    TimeBucket::parse(bucket).is_some_and(|b| b.matches(time_text))
}
