//! Retrograde-station detection.
//!
//! Watches each body's retrograde flag and emits a station event on
//! any flip, tagged with the direction of the turn. An optional sign
//! filter suppresses stations that happen outside a configured list
//! of signs.

use gochara_core::Body;
use gochara_zodiac::{Sign, is_in_sign, sign_from_longitude};

use crate::detector::EventDetector;
use crate::error::ScanError;
use crate::event::{EventDetail, StationDirection, TransitEvent};
use crate::snapshot::Snapshot;

/// Detects bodies stationing retrograde or direct.
#[derive(Debug, Clone)]
pub struct StationDetector {
    bodies: Vec<Body>,
    /// When set, only stations inside one of these signs are reported.
    sign_filter: Option<Vec<Sign>>,
}

impl StationDetector {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self {
            bodies,
            sign_filter: None,
        }
    }

    /// Restrict reporting to stations whose current longitude falls in
    /// one of the given signs. Candidates are tested in listed order;
    /// the first containing sign decides (bands are disjoint, so at
    /// most one can match).
    pub fn with_sign_filter(mut self, signs: Vec<Sign>) -> Self {
        self.sign_filter = Some(signs);
        self
    }

    fn passes_filter(&self, longitude_deg: f64) -> bool {
        match &self.sign_filter {
            None => true,
            Some(signs) => signs
                .iter()
                .any(|&sign| is_in_sign(longitude_deg, sign)),
        }
    }
}

impl EventDetector for StationDetector {
    fn name(&self) -> &'static str {
        "retrograde-station"
    }

    fn detect(
        &self,
        current: &Snapshot,
        previous: Option<&Snapshot>,
        _previous2: Option<&Snapshot>,
    ) -> Result<Vec<TransitEvent>, ScanError> {
        let Some(previous) = previous else {
            return Ok(Vec::new());
        };

        let mut events = Vec::new();
        for &body in &self.bodies {
            let (Some(curr), Some(prev)) = (current.position(body), previous.position(body))
            else {
                continue;
            };
            if curr.retrograde == prev.retrograde {
                continue;
            }
            if !self.passes_filter(curr.longitude_deg) {
                continue;
            }

            let direction = if curr.retrograde {
                StationDirection::Retrograde
            } else {
                StationDirection::Direct
            };
            let sign = sign_from_longitude(curr.longitude_deg);
            let description = format!(
                "{body} stations {} at {:.2} deg ({sign})",
                direction.name(),
                curr.longitude_deg
            );
            events.push(TransitEvent::new(
                current.day(),
                EventDetail::RetrogradeStation {
                    body,
                    direction,
                    longitude_deg: curr.longitude_deg,
                },
                description,
            ));
        }
        Ok(events)
    }
}
