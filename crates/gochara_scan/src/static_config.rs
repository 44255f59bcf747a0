//! Named static-configuration detection.
//!
//! A static configuration is an N-body simultaneous condition: a fixed
//! list of (body, required sign) constraints plus a name. The detector
//! is edge-triggered — it fires on the first day the full set holds
//! and stays silent while the configuration persists, re-arming once
//! any constraint lapses.

use gochara_zodiac::is_in_sign;

use crate::detector::EventDetector;
use crate::error::ScanError;
use crate::event::{EventDetail, SignConstraint, TransitEvent};
use crate::snapshot::Snapshot;

/// Detects a named all-constraints-hold configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigurationDetector {
    name: String,
    constraints: Vec<SignConstraint>,
}

impl StaticConfigurationDetector {
    pub fn new(name: impl Into<String>, constraints: Vec<SignConstraint>) -> Self {
        Self {
            name: name.into(),
            constraints,
        }
    }

    /// Whether every constraint holds in the snapshot. A missing body
    /// counts as not holding.
    fn holds_in(&self, snapshot: &Snapshot) -> bool {
        self.constraints.iter().all(|c| {
            snapshot
                .position(c.body)
                .is_some_and(|p| is_in_sign(p.longitude_deg, c.sign))
        })
    }
}

impl EventDetector for StaticConfigurationDetector {
    fn name(&self) -> &'static str {
        "static-configuration"
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
        if self.constraints.is_empty() {
            return Ok(Vec::new());
        }
        if !self.holds_in(current) || self.holds_in(previous) {
            return Ok(Vec::new());
        }

        let placements: Vec<String> = self
            .constraints
            .iter()
            .map(|c| format!("{} in {}", c.body, c.sign))
            .collect();
        let description = format!("{}: {}", self.name, placements.join(", "));

        Ok(vec![TransitEvent::new(
            current.day(),
            EventDetail::StaticConfiguration {
                name: self.name.clone(),
                constraints: self.constraints.clone(),
            },
            description,
        )])
    }
}
