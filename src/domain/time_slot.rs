use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Bookable time labels for a single business day, 09:00 to 17:30 in 30 minute steps
pub static SLOT_CATALOG: [&str; 18] = [
    "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM", "12:00 PM",
    "12:30 PM", "01:00 PM", "01:30 PM", "02:00 PM", "02:30 PM", "03:00 PM", "03:30 PM",
    "04:00 PM", "04:30 PM", "05:00 PM", "05:30 PM",
];

/// A time slot drawn from [`SLOT_CATALOG`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSlot(&'static str);

impl TimeSlot {
    /// Every bookable slot, in catalog order
    pub fn catalog() -> impl Iterator<Item = TimeSlot> {
        SLOT_CATALOG.iter().copied().map(TimeSlot)
    }
}

impl FromStr for TimeSlot {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim();
        SLOT_CATALOG
            .iter()
            .copied()
            .find(|label| *label == value)
            .map(TimeSlot)
            .ok_or_else(|| Error::ParsingError(format!("{} is not a bookable time slot", value)))
    }
}

impl AsRef<str> for TimeSlot {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
