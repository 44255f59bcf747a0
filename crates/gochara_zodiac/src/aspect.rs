//! Aspect angles and orb measurement.
//!
//! An aspect is a named target angular separation between two bodies,
//! accepted within a tolerance ("orb"). `aspect_orb` measures how far
//! a pair of longitudes deviates from an aspect's exact angle, with an
//! optional filter that rejects "out of sign" aspects: pairs that are
//! numerically in orb but whose signs do not stand in the aspect's
//! expected sign relationship.

use serde::Serialize;

use crate::sign::{normalize_360, sign_distance, sign_from_longitude};

/// The five major aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

/// All aspects in increasing angle order.
pub const ALL_ASPECTS: [AspectKind; 5] = [
    AspectKind::Conjunction,
    AspectKind::Sextile,
    AspectKind::Square,
    AspectKind::Trine,
    AspectKind::Opposition,
];

impl AspectKind {
    /// Display name of the aspect.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "conjunction",
            Self::Sextile => "sextile",
            Self::Square => "square",
            Self::Trine => "trine",
            Self::Opposition => "opposition",
        }
    }

    /// Exact target angle in degrees.
    pub const fn angle_deg(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::Sextile => 60.0,
            Self::Square => 90.0,
            Self::Trine => 120.0,
            Self::Opposition => 180.0,
        }
    }

    /// How many sign bands apart the two bodies sit at the exact angle.
    pub const fn sign_span(self) -> u8 {
        (self.angle_deg() / 30.0) as u8
    }

    /// Look up an aspect by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_ASPECTS
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for AspectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An aspect together with the orb it is accepted within.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AspectSpec {
    pub kind: AspectKind,
    /// Allowed deviation from the exact angle, in degrees.
    pub orb_deg: f64,
}

impl AspectSpec {
    pub const fn new(kind: AspectKind, orb_deg: f64) -> Self {
        Self { kind, orb_deg }
    }

    /// Conventional orb for each aspect: wider for the strong aspects,
    /// tighter for the sextile.
    pub const fn standard(kind: AspectKind) -> Self {
        let orb_deg = match kind {
            AspectKind::Conjunction | AspectKind::Opposition => 8.0,
            AspectKind::Trine => 8.0,
            AspectKind::Square => 7.0,
            AspectKind::Sextile => 6.0,
        };
        Self { kind, orb_deg }
    }

    /// The five standard aspects with their conventional orbs.
    pub fn standard_set() -> Vec<Self> {
        ALL_ASPECTS.into_iter().map(Self::standard).collect()
    }
}

/// Angular separation of two longitudes, in [0, 180].
pub fn angular_separation(lon_a: f64, lon_b: f64) -> f64 {
    let d = (normalize_360(lon_a) - normalize_360(lon_b)).abs();
    if d > 180.0 { 360.0 - d } else { d }
}

/// Deviation of a pair of longitudes from an aspect's exact angle.
///
/// Returns `Some(deviation)` when the separation is within the given
/// orb, else `None`. With `require_sign_match` set, a numerically
/// in-orb pair is still rejected unless the two signs sit exactly
/// `kind.sign_span()` bands apart — this drops out-of-sign aspects
/// near sign boundaries (e.g. a trine whose bodies are 3.2 signs
/// apart by band even though the angle reads ~120).
pub fn aspect_orb(
    lon_a: f64,
    lon_b: f64,
    spec: &AspectSpec,
    require_sign_match: bool,
) -> Option<f64> {
    let deviation = (angular_separation(lon_a, lon_b) - spec.kind.angle_deg()).abs();
    if deviation > spec.orb_deg {
        return None;
    }
    if require_sign_match {
        let bands = sign_distance(sign_from_longitude(lon_a), sign_from_longitude(lon_b));
        if bands != spec.kind.sign_span() {
            return None;
        }
    }
    Some(deviation)
}
