//! Error types for scan configuration and execution.

use std::error::Error;
use std::fmt::{Display, Formatter};

use gochara_core::EphemerisError;
use gochara_time::{CivilDate, TimeError};

/// Errors from scanner construction or a running scan.
///
/// Every error is terminal for the current scan; there is no partial
/// success. Callers fix the input and re-run.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ScanError {
    /// End date precedes the start date.
    InvalidRange { start: CivilDate, end: CivilDate },
    /// Malformed scanner or detector configuration.
    InvalidConfig(&'static str),
    /// The scan would exceed the point-computation ceiling.
    RangeTooLarge { cost: u64, ceiling: u64 },
    /// Date conversion failed.
    Time(TimeError),
    /// The ephemeris provider failed; the whole scan aborts.
    Ephemeris(EphemerisError),
}

impl Display for ScanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange { start, end } => {
                write!(f, "invalid range: end {end} precedes start {start}")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::RangeTooLarge { cost, ceiling } => {
                write!(
                    f,
                    "range too large: {cost} point computations exceed the ceiling of {ceiling}"
                )
            }
            Self::Time(e) => write!(f, "time error: {e}"),
            Self::Ephemeris(e) => write!(f, "ephemeris error: {e}"),
        }
    }
}

impl Error for ScanError {}

impl From<TimeError> for ScanError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}

impl From<EphemerisError> for ScanError {
    fn from(e: EphemerisError) -> Self {
        Self::Ephemeris(e)
    }
}
