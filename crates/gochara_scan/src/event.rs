//! Typed transit events.
//!
//! Events are pure output: a detector creates one, the scanner may
//! attach the day's snapshot for downstream rendering, and nothing
//! mutates it afterwards.
//!
//! Wire shape (JSON): `{ "date": "YYYY-MM-DD", "type": "...",
//! "data": {...}, "description": "...", "planets": {...}? }`.

use serde::{Serialize, Serializer};

use gochara_core::Body;
use gochara_time::DayNumber;
use gochara_zodiac::{AspectKind, Sign};

use crate::snapshot::Snapshot;

/// Direction of a station: into or out of retrograde motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StationDirection {
    /// Apparent motion turned westward.
    Retrograde,
    /// Apparent motion turned eastward again.
    Direct,
}

impl StationDirection {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Retrograde => "retrograde",
            Self::Direct => "direct",
        }
    }
}

/// One (body, required sign) constraint of a static configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignConstraint {
    pub body: Body,
    pub sign: Sign,
}

/// Typed event payload; the serde tag is the event's wire `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum EventDetail {
    /// A body crossed into a different sign since the previous day.
    SignIngress {
        body: Body,
        from_sign: Sign,
        to_sign: Sign,
    },
    /// A body's apparent motion reversed since the previous day.
    RetrogradeStation {
        body: Body,
        direction: StationDirection,
        longitude_deg: f64,
    },
    /// A pair moved into orb of an aspect.
    AspectBegin {
        body_a: Body,
        body_b: Body,
        aspect: AspectKind,
        orb_deg: f64,
    },
    /// The middle of three in-orb days was the closest approach.
    AspectPeak {
        body_a: Body,
        body_b: Body,
        aspect: AspectKind,
        orb_deg: f64,
    },
    /// A pair moved out of orb of an aspect.
    AspectEnd {
        body_a: Body,
        body_b: Body,
        aspect: AspectKind,
        orb_deg: f64,
    },
    /// All constraints of a named configuration hold as of this day.
    StaticConfiguration {
        name: String,
        constraints: Vec<SignConstraint>,
    },
}

/// Closed tag set of event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SignIngress,
    RetrogradeStation,
    AspectBegin,
    AspectPeak,
    AspectEnd,
    StaticConfiguration,
}

impl EventKind {
    /// Wire tag for this kind.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::SignIngress => "sign-ingress",
            Self::RetrogradeStation => "retrograde-station",
            Self::AspectBegin => "aspect-begin",
            Self::AspectPeak => "aspect-peak",
            Self::AspectEnd => "aspect-end",
            Self::StaticConfiguration => "static-configuration",
        }
    }
}

impl EventDetail {
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::SignIngress { .. } => EventKind::SignIngress,
            Self::RetrogradeStation { .. } => EventKind::RetrogradeStation,
            Self::AspectBegin { .. } => EventKind::AspectBegin,
            Self::AspectPeak { .. } => EventKind::AspectPeak,
            Self::AspectEnd { .. } => EventKind::AspectEnd,
            Self::StaticConfiguration { .. } => EventKind::StaticConfiguration,
        }
    }
}

fn day_as_date<S: Serializer>(day: &DayNumber, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&day.to_civil())
}

/// A detected transit event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitEvent {
    /// Day the event was detected for (day-granular; no sub-day timing).
    #[serde(rename = "date", serialize_with = "day_as_date")]
    pub day: DayNumber,
    #[serde(flatten)]
    pub detail: EventDetail,
    /// Human-readable one-liner.
    pub description: String,
    /// The full snapshot for the event's day, when enrichment is on.
    #[serde(rename = "planets", skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<Snapshot>,
}

impl TransitEvent {
    pub fn new(day: DayNumber, detail: EventDetail, description: String) -> Self {
        Self {
            day,
            detail,
            description,
            snapshot: None,
        }
    }

    pub const fn kind(&self) -> EventKind {
        self.detail.kind()
    }
}
