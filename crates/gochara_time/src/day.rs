//! Julian Day Number arithmetic and calendar conversions.
//!
//! A `DayNumber` is the integer Julian Day Number of a civil day: a
//! continuous day count that makes "add one day" trivially correct
//! across month and year boundaries. Conversions use the Fliegel/
//! Van Flandern style integer formulas, with the Julian calendar in
//! force through 1582-10-04 and the Gregorian calendar from
//! 1582-10-15 onward.

use crate::civil::CivilDate;
use crate::error::TimeError;

/// JDN of 1582-10-15, the first day of the Gregorian calendar.
pub const GREGORIAN_START_DAY: i64 = 2_299_161;

/// Supported conversion range; keeps the integer formulas in their
/// validated domain.
const MIN_YEAR: i32 = -4700;
const MAX_YEAR: i32 = 9999;

/// Integer Julian Day Number identifying one civil day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayNumber(pub i64);

impl DayNumber {
    /// The next calendar day.
    pub const fn succ(self) -> Self {
        Self(self.0 + 1)
    }

    /// This day offset by `days` (may be negative).
    pub const fn offset(self, days: i64) -> Self {
        Self(self.0 + days)
    }

    /// Signed number of days from `other` to `self`.
    pub const fn days_since(self, other: Self) -> i64 {
        self.0 - other.0
    }

    /// Julian Date of this day's 00:00 UTC.
    ///
    /// The integer JDN labels the day containing noon UTC, so midnight
    /// at the start of the day is half a day earlier.
    pub fn jd_utc(self) -> f64 {
        self.0 as f64 - 0.5
    }

    /// Civil calendar date of this day.
    pub fn to_civil(self) -> CivilDate {
        day_number_to_civil(self)
    }
}

impl std::ops::Add<i64> for DayNumber {
    type Output = DayNumber;

    fn add(self, days: i64) -> DayNumber {
        self.offset(days)
    }
}

impl std::fmt::Display for DayNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_civil())
    }
}

/// Whether `year` is a leap year under the calendar in force for it.
fn is_leap_year(year: i32, gregorian: bool) -> bool {
    if gregorian {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    } else {
        year % 4 == 0
    }
}

/// Number of days in a month under the calendar in force.
fn days_in_month(year: i32, month: u32, gregorian: bool) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year, gregorian) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Whether a civil date falls on or after the Gregorian reform.
fn is_gregorian(year: i32, month: u32, day: u32) -> bool {
    (year, month, day) >= (1582, 10, 15)
}

/// Convert a civil date to its Julian Day Number.
///
/// Rejects out-of-range months and days, and the ten dates the
/// Gregorian reform dropped (1582-10-05 … 1582-10-14).
pub fn civil_to_day_number(date: CivilDate) -> Result<DayNumber, TimeError> {
    let CivilDate { year, month, day } = date;

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(TimeError::YearOutOfRange(year));
    }
    if !(1..=12).contains(&month) {
        return Err(TimeError::InvalidMonth(month));
    }

    let gregorian = is_gregorian(year, month, day);
    if day == 0 || day > days_in_month(year, month, gregorian) {
        return Err(TimeError::InvalidDay { year, month, day });
    }
    if year == 1582 && month == 10 && (5..=14).contains(&day) {
        return Err(TimeError::DroppedByReform { year, month, day });
    }

    let a = i64::from((14 - month) / 12);
    let y = i64::from(year) + 4800 - a;
    let m = i64::from(month) + 12 * a - 3;
    let d = i64::from(day);

    let jdn = if gregorian {
        d + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045
    } else {
        d + (153 * m + 2) / 5 + 365 * y + y / 4 - 32083
    };

    Ok(DayNumber(jdn))
}

/// Convert a Julian Day Number back to a civil date.
pub fn day_number_to_civil(day: DayNumber) -> CivilDate {
    let jdn = day.0;

    let (b, c) = if jdn >= GREGORIAN_START_DAY {
        let a = jdn + 32044;
        let b = (4 * a + 3) / 146097;
        let c = a - 146097 * b / 4;
        (b, c)
    } else {
        (0, jdn + 32082)
    };

    let d = (4 * c + 3) / 1461;
    let e = c - 1461 * d / 4;
    let m = (5 * e + 2) / 153;

    let day_of_month = e - (153 * m + 2) / 5 + 1;
    let month = m + 3 - 12 * (m / 10);
    let year = 100 * b + d - 4800 + m / 10;

    CivilDate {
        year: year as i32,
        month: month as u32,
        day: day_of_month as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jdn(year: i32, month: u32, day: u32) -> i64 {
        civil_to_day_number(CivilDate { year, month, day })
            .expect("valid date")
            .0
    }

    #[test]
    fn j2000_epoch() {
        // 2000-01-01 is JDN 2451545.
        assert_eq!(jdn(2000, 1, 1), 2_451_545);
    }

    #[test]
    fn gregorian_reform_boundary() {
        // 1582-10-04 (Julian) is immediately followed by 1582-10-15.
        assert_eq!(jdn(1582, 10, 4), GREGORIAN_START_DAY - 1);
        assert_eq!(jdn(1582, 10, 15), GREGORIAN_START_DAY);
    }

    #[test]
    fn dropped_dates_rejected() {
        for day in 5..=14 {
            let result = civil_to_day_number(CivilDate {
                year: 1582,
                month: 10,
                day,
            });
            assert!(
                matches!(result, Err(TimeError::DroppedByReform { .. })),
                "1582-10-{day:02} should be rejected"
            );
        }
    }

    #[test]
    fn month_boundary_crossing() {
        assert_eq!(jdn(2024, 2, 1), jdn(2024, 1, 31) + 1);
        assert_eq!(jdn(2024, 3, 1), jdn(2024, 2, 29) + 1); // leap year
        assert_eq!(jdn(2023, 3, 1), jdn(2023, 2, 28) + 1);
    }

    #[test]
    fn year_boundary_crossing() {
        assert_eq!(jdn(2025, 1, 1), jdn(2024, 12, 31) + 1);
    }

    #[test]
    fn rejects_invalid_month() {
        let result = civil_to_day_number(CivilDate {
            year: 2024,
            month: 13,
            day: 1,
        });
        assert!(matches!(result, Err(TimeError::InvalidMonth(13))));
    }

    #[test]
    fn rejects_invalid_day() {
        let result = civil_to_day_number(CivilDate {
            year: 2023,
            month: 2,
            day: 29,
        });
        assert!(matches!(result, Err(TimeError::InvalidDay { .. })));
    }

    #[test]
    fn rejects_year_out_of_range() {
        let result = civil_to_day_number(CivilDate {
            year: 100_000,
            month: 1,
            day: 1,
        });
        assert!(matches!(result, Err(TimeError::YearOutOfRange(_))));
    }

    #[test]
    fn roundtrip_across_reform() {
        // Every day for a decade straddling the reform maps back to itself.
        let start = jdn(1578, 1, 1);
        let end = jdn(1588, 1, 1);
        for n in start..=end {
            let civil = day_number_to_civil(DayNumber(n));
            assert_eq!(civil_to_day_number(civil).expect("roundtrip").0, n, "{civil}");
        }
    }

    #[test]
    fn roundtrip_modern_era() {
        let start = jdn(1999, 12, 1);
        let end = jdn(2001, 2, 1);
        for n in start..=end {
            let civil = day_number_to_civil(DayNumber(n));
            assert_eq!(civil_to_day_number(civil).expect("roundtrip").0, n);
        }
    }

    #[test]
    fn jd_utc_is_midnight() {
        // JD of 2000-01-01T00:00Z is 2451544.5.
        let day = DayNumber(2_451_545);
        assert!((day.jd_utc() - 2_451_544.5).abs() < 1e-12);
    }

    #[test]
    fn day_arithmetic() {
        let day = DayNumber(2_451_545);
        assert_eq!(day.succ(), DayNumber(2_451_546));
        assert_eq!(day.offset(-10), DayNumber(2_451_535));
        assert_eq!(day.offset(30).days_since(day), 30);
        assert_eq!(day + 7, DayNumber(2_451_552));
    }
}
