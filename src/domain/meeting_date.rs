use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

use serde::{Deserialize, Serialize};

/// Calendar day a meeting is requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeetingDate(NaiveDate);

impl MeetingDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Start of the day as an absolute UTC instant, used for storage
    pub fn to_instant(&self) -> DateTime<Utc> {
        self.0.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    /// Human readable form used in emails, e.g. "March 10, 2025"
    pub fn to_display(&self) -> String {
        self.0.format("%B %d, %Y").to_string()
    }

    pub fn is_before(&self, day: NaiveDate) -> bool {
        self.0 < day
    }
}

impl From<NaiveDate> for MeetingDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<DateTime<Utc>> for MeetingDate {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant.date_naive())
    }
}

impl fmt::Display for MeetingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
