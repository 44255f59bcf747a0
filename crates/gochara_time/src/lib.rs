//! Day-granular time handling for transit scanning.
//!
//! This crate provides:
//! - `CivilDate`: a calendar date with parsing and formatting
//! - `DayNumber`: a continuous Julian Day Number for day arithmetic
//! - Calendar ↔ day-number conversions honoring the 1582 Gregorian switch
//!
//! The scan engine advances by exactly one calendar day per step, so a
//! whole-day instant type is all it needs. Sub-day time-of-day input is
//! accepted at the parsing boundary and truncated.

pub mod civil;
pub mod day;
pub mod error;

pub use civil::CivilDate;
pub use day::{DayNumber, GREGORIAN_START_DAY};
pub use error::TimeError;
