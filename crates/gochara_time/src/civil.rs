//! Civil calendar dates with parsing and formatting.
//!
//! `CivilDate` is the boundary representation: callers hand in dates
//! as `YYYY-MM-DD` (optionally with a `Thh:mm:ssZ` suffix, which is
//! truncated — scanning is day-granular), and results are formatted
//! the same way.

use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::day::{DayNumber, civil_to_day_number};
use crate::error::TimeError;

/// A calendar date (proleptic Julian before 1582-10-15, Gregorian after).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CivilDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Convert to a day number, validating the calendar fields.
    pub fn to_day_number(self) -> Result<DayNumber, TimeError> {
        civil_to_day_number(self)
    }
}

impl std::fmt::Display for CivilDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CivilDate {
    type Err = TimeError;

    /// Parse `YYYY-MM-DD`, tolerating an ISO-8601 time suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date_part = s.split('T').next().unwrap_or(s).trim();
        let parts: Vec<&str> = date_part.split('-').collect();
        if parts.len() != 3 {
            return Err(TimeError::Parse(format!(
                "expected YYYY-MM-DD, got {s:?}"
            )));
        }
        let year: i32 = parts[0]
            .parse()
            .map_err(|e| TimeError::Parse(format!("bad year in {s:?}: {e}")))?;
        let month: u32 = parts[1]
            .parse()
            .map_err(|e| TimeError::Parse(format!("bad month in {s:?}: {e}")))?;
        let day: u32 = parts[2]
            .parse()
            .map_err(|e| TimeError::Parse(format!("bad day in {s:?}: {e}")))?;

        let date = Self { year, month, day };
        // Validate eagerly so malformed input fails at the boundary.
        date.to_day_number()?;
        Ok(date)
    }
}

impl Serialize for CivilDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
