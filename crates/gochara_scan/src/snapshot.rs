//! Daily position snapshots.
//!
//! A snapshot is the immutable set of all tracked bodies' positions at
//! one scan day. The scanner builds one per day and hands detectors
//! read-only references; detectors never mutate snapshots.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use gochara_core::{Body, BodyPosition, Ephemeris};
use gochara_time::DayNumber;

use crate::error::ScanError;

/// All tracked bodies' positions at one day.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    day: DayNumber,
    positions: BTreeMap<Body, BodyPosition>,
}

impl Snapshot {
    /// Assemble a snapshot from explicit positions.
    pub fn from_positions(
        day: DayNumber,
        positions: impl IntoIterator<Item = (Body, BodyPosition)>,
    ) -> Self {
        Self {
            day,
            positions: positions.into_iter().collect(),
        }
    }

    /// The day this snapshot was captured for.
    pub fn day(&self) -> DayNumber {
        self.day
    }

    /// Position of one body, if tracked.
    pub fn position(&self, body: Body) -> Option<&BodyPosition> {
        self.positions.get(&body)
    }

    /// Tracked bodies in canonical order.
    pub fn bodies(&self) -> impl Iterator<Item = Body> + '_ {
        self.positions.keys().copied()
    }

    /// Bodies with their positions, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Body, &BodyPosition)> {
        self.positions.iter().map(|(b, p)| (*b, p))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

// Wire format: a snapshot is just the body → position map; the day is
// carried by the enclosing event.
impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.positions.iter())
    }
}

/// Build the snapshot for one day by querying the provider once per body.
///
/// Any provider failure fails the whole build — no partial snapshots —
/// and the error propagates to the scanner, which aborts the scan.
pub fn build_snapshot(
    provider: &dyn Ephemeris,
    day: DayNumber,
    bodies: &[Body],
) -> Result<Snapshot, ScanError> {
    let jd = day.jd_utc();
    let mut positions = BTreeMap::new();
    for &body in bodies {
        let state = provider.ecliptic_state(jd, body)?;
        positions.insert(body, BodyPosition::from_state(state));
    }
    Ok(Snapshot { day, positions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gochara_core::{EclipticState, EphemerisError};

    struct FixedProvider;

    impl Ephemeris for FixedProvider {
        fn ecliptic_state(&self, _jd: f64, body: Body) -> Result<EclipticState, EphemerisError> {
            Ok(EclipticState {
                longitude_deg: f64::from(body.code()) * 10.0,
                speed_deg_per_day: 1.0,
            })
        }
    }

    struct FailingProvider;

    impl Ephemeris for FailingProvider {
        fn ecliptic_state(&self, _jd: f64, body: Body) -> Result<EclipticState, EphemerisError> {
            if body == Body::Mars {
                Err(EphemerisError::UnsupportedBody(body))
            } else {
                Ok(EclipticState {
                    longitude_deg: 0.0,
                    speed_deg_per_day: 1.0,
                })
            }
        }
    }

    #[test]
    fn builds_one_entry_per_body() {
        let day = DayNumber(2_451_545);
        let bodies = [Body::Sun, Body::Mars, Body::Pluto];
        let snap = build_snapshot(&FixedProvider, day, &bodies).expect("should build");
        assert_eq!(snap.len(), 3);
        assert_eq!(snap.day(), day);
        let mars = snap.position(Body::Mars).expect("tracked");
        assert!((mars.longitude_deg - 40.0).abs() < 1e-12);
        assert!(snap.position(Body::Venus).is_none());
    }

    #[test]
    fn provider_failure_fails_whole_build() {
        let day = DayNumber(2_451_545);
        let bodies = [Body::Sun, Body::Mars];
        let result = build_snapshot(&FailingProvider, day, &bodies);
        assert!(matches!(result, Err(ScanError::Ephemeris(_))));
    }

    #[test]
    fn bodies_iterate_in_canonical_order() {
        let day = DayNumber(2_451_545);
        // Insert out of order; iteration must still be canonical.
        let snap = build_snapshot(&FixedProvider, day, &[Body::Pluto, Body::Sun, Body::Moon])
            .expect("should build");
        let order: Vec<Body> = snap.bodies().collect();
        assert_eq!(order, vec![Body::Sun, Body::Moon, Body::Pluto]);
    }
}
