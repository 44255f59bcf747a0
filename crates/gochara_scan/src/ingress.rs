//! Sign-ingress detection.
//!
//! Compares each watched body's sign between the previous and current
//! snapshot and emits one event carrying both the old and new sign
//! whenever they differ. A single combined event covers leaving one
//! sign and entering the next; there is no separate egress kind.

use gochara_core::Body;
use gochara_zodiac::sign_from_longitude;

use crate::detector::EventDetector;
use crate::error::ScanError;
use crate::event::{EventDetail, TransitEvent};
use crate::snapshot::Snapshot;

/// Detects bodies crossing sign boundaries.
#[derive(Debug, Clone)]
pub struct SignIngressDetector {
    bodies: Vec<Body>,
}

impl SignIngressDetector {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }
}

impl EventDetector for SignIngressDetector {
    fn name(&self) -> &'static str {
        "sign-ingress"
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

            let to_sign = sign_from_longitude(curr.longitude_deg);
            let from_sign = sign_from_longitude(prev.longitude_deg);
            if to_sign == from_sign {
                continue;
            }

            let description = format!("{body} enters {to_sign} (leaving {from_sign})");
            events.push(TransitEvent::new(
                current.day(),
                EventDetail::SignIngress {
                    body,
                    from_sign,
                    to_sign,
                },
                description,
            ));
        }
        Ok(events)
    }
}
