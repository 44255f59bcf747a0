//! Error types for calendar conversion and date parsing.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from date parsing or calendar conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimeError {
    /// Date string could not be parsed.
    Parse(String),
    /// Month outside 1..=12.
    InvalidMonth(u32),
    /// Day outside the month's valid range.
    InvalidDay { year: i32, month: u32, day: u32 },
    /// One of the ten dates dropped by the Gregorian calendar reform
    /// (1582-10-05 through 1582-10-14).
    DroppedByReform { year: i32, month: u32, day: u32 },
    /// Year outside the supported conversion range.
    YearOutOfRange(i32),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "date parse error: {msg}"),
            Self::InvalidMonth(m) => write!(f, "invalid month: {m}"),
            Self::InvalidDay { year, month, day } => {
                write!(f, "invalid day {day} for {year:04}-{month:02}")
            }
            Self::DroppedByReform { year, month, day } => {
                write!(
                    f,
                    "{year:04}-{month:02}-{day:02} does not exist (dropped by the Gregorian reform)"
                )
            }
            Self::YearOutOfRange(y) => write!(f, "year out of supported range: {y}"),
        }
    }
}

impl Error for TimeError {}
