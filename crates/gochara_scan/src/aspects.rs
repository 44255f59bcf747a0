//! Aspect formation, peak, and separation detection.
//!
//! The aspect detector needs the deepest lookback of the family: two
//! prior snapshots. Begin and end are threshold crossings of the orb,
//! found from one prior day; the peak is a local minimum of the
//! deviation series, which takes three consecutive in-orb samples to
//! recognize. The peak event is dated at the middle sample — the day
//! the extremum actually occurred — not the day it became detectable.

use gochara_core::Body;
use gochara_zodiac::{AspectSpec, aspect_orb};

use crate::detector::EventDetector;
use crate::error::ScanError;
use crate::event::{EventDetail, TransitEvent};
use crate::snapshot::Snapshot;

/// All unordered body pairs, in input order (no self pairs, no
/// reversed duplicates).
pub fn all_pairs(bodies: &[Body]) -> Vec<(Body, Body)> {
    let mut pairs = Vec::with_capacity(bodies.len() * bodies.len().saturating_sub(1) / 2);
    for (i, &a) in bodies.iter().enumerate() {
        for &b in &bodies[i + 1..] {
            pairs.push((a, b));
        }
    }
    pairs
}

/// Detects pairs of bodies moving into, through, and out of aspect.
#[derive(Debug, Clone)]
pub struct AspectDetector {
    pairs: Vec<(Body, Body)>,
    aspects: Vec<AspectSpec>,
    require_sign_match: bool,
    detect_peaks: bool,
}

impl AspectDetector {
    /// Watch all pairwise combinations of `bodies`.
    pub fn new(bodies: &[Body], aspects: Vec<AspectSpec>) -> Self {
        Self::with_pairs(all_pairs(bodies), aspects)
    }

    /// Watch an explicit pair list.
    pub fn with_pairs(pairs: Vec<(Body, Body)>, aspects: Vec<AspectSpec>) -> Self {
        Self {
            pairs,
            aspects,
            require_sign_match: false,
            detect_peaks: true,
        }
    }

    /// Reject aspects whose bodies are not in sign-compatible bands.
    pub fn with_sign_match(mut self, on: bool) -> Self {
        self.require_sign_match = on;
        self
    }

    /// Enable or disable closest-approach (peak) events.
    pub fn with_peaks(mut self, on: bool) -> Self {
        self.detect_peaks = on;
        self
    }

    pub fn pairs(&self) -> &[(Body, Body)] {
        &self.pairs
    }

    /// Deviation of a pair from an aspect in one snapshot, if both
    /// bodies are present and within orb.
    fn orb_in(
        &self,
        snapshot: &Snapshot,
        a: Body,
        b: Body,
        spec: &AspectSpec,
    ) -> Option<f64> {
        let pos_a = snapshot.position(a)?;
        let pos_b = snapshot.position(b)?;
        aspect_orb(
            pos_a.longitude_deg,
            pos_b.longitude_deg,
            spec,
            self.require_sign_match,
        )
    }
}

impl EventDetector for AspectDetector {
    fn name(&self) -> &'static str {
        "aspects"
    }

    fn detect(
        &self,
        current: &Snapshot,
        previous: Option<&Snapshot>,
        previous2: Option<&Snapshot>,
    ) -> Result<Vec<TransitEvent>, ScanError> {
        let Some(previous) = previous else {
            return Ok(Vec::new());
        };

        let mut events = Vec::new();
        for &(a, b) in &self.pairs {
            // A pair with a body missing from either snapshot is
            // skipped for the day rather than treated as out of orb.
            if current.position(a).is_none()
                || current.position(b).is_none()
                || previous.position(a).is_none()
                || previous.position(b).is_none()
            {
                continue;
            }

            for spec in &self.aspects {
                let orb_now = self.orb_in(current, a, b, spec);
                let orb_prev = self.orb_in(previous, a, b, spec);

                match (orb_prev, orb_now) {
                    (None, Some(orb_deg)) => {
                        let description = format!(
                            "{a} {} {b} begins (orb {orb_deg:.2} deg)",
                            spec.kind
                        );
                        events.push(TransitEvent::new(
                            current.day(),
                            EventDetail::AspectBegin {
                                body_a: a,
                                body_b: b,
                                aspect: spec.kind,
                                orb_deg,
                            },
                            description,
                        ));
                    }
                    (Some(orb_deg), None) => {
                        let description = format!(
                            "{a} {} {b} ends (last orb {orb_deg:.2} deg)",
                            spec.kind
                        );
                        events.push(TransitEvent::new(
                            current.day(),
                            EventDetail::AspectEnd {
                                body_a: a,
                                body_b: b,
                                aspect: spec.kind,
                                orb_deg,
                            },
                            description,
                        ));
                    }
                    (Some(orb_mid), Some(orb_now)) if self.detect_peaks => {
                        let Some(previous2) = previous2 else {
                            continue;
                        };
                        let Some(orb_before) = self.orb_in(previous2, a, b, spec) else {
                            continue;
                        };
                        // Strict local minimum of the deviation series,
                        // dated at the middle sample.
                        if orb_mid < orb_before && orb_mid < orb_now {
                            let description = format!(
                                "{a} {} {b} at closest approach (orb {orb_mid:.2} deg)",
                                spec.kind
                            );
                            events.push(TransitEvent::new(
                                previous.day(),
                                EventDetail::AspectPeak {
                                    body_a: a,
                                    body_b: b,
                                    aspect: spec.kind,
                                    orb_deg: orb_mid,
                                },
                                description,
                            ));
                        }
                    }
                    _ => {}
                }
            }
        }
        Ok(events)
    }
}
