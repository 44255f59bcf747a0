//! The detector seam.
//!
//! A detector is a stateless comparator: it holds only its static
//! configuration (which bodies/signs/pairs it watches) and is invoked
//! once per scan day with the current snapshot and up to two prior
//! ones. All "memory" lives in the history the scanner supplies.
//!
//! The signature fixes the maximum lookback at two prior snapshots;
//! detectors that need less simply ignore the deeper argument. Every
//! detector returns no events when `previous` is `None` — the first
//! day of a scan has nothing to compare against.

use crate::error::ScanError;
use crate::event::TransitEvent;
use crate::snapshot::Snapshot;

/// A stateless daily event comparator.
pub trait EventDetector: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Compare the current snapshot against the supplied history and
    /// return this day's events, in emission order.
    fn detect(
        &self,
        current: &Snapshot,
        previous: Option<&Snapshot>,
        previous2: Option<&Snapshot>,
    ) -> Result<Vec<TransitEvent>, ScanError>;
}
