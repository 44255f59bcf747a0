//! Tracked celestial bodies and the ephemeris provider contract.
//!
//! This crate defines the closed set of bodies the scan engine tracks,
//! the per-body ecliptic state a provider returns, and the [`Ephemeris`]
//! trait that decouples the engine from any particular position source.
//! A built-in low-precision provider lives in [`mean_motion`].
//!
//! Providers are explicit handles: construct one, pass it by reference.
//! There is no process-wide provider singleton.

use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::Serialize;

pub mod mean_motion;

pub use mean_motion::MeanMotionEphemeris;

/// Bodies supported by the scan contract.
///
/// This is the fixed, finite set known at detector-construction time.
/// Earth is the implied observer and is deliberately not listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// All tracked bodies in canonical order (Sun first, Pluto last).
pub const ALL_BODIES: [Body; 10] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
];

impl Body {
    /// Display name of the body.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
        }
    }

    /// Compact body code for interoperability (0 = Sun … 9 = Pluto).
    pub const fn code(self) -> u8 {
        match self {
            Self::Sun => 0,
            Self::Moon => 1,
            Self::Mercury => 2,
            Self::Venus => 3,
            Self::Mars => 4,
            Self::Jupiter => 5,
            Self::Saturn => 6,
            Self::Uranus => 7,
            Self::Neptune => 8,
            Self::Pluto => 9,
        }
    }

    /// Convert a compact body code back into a [`Body`].
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Sun),
            1 => Some(Self::Moon),
            2 => Some(Self::Mercury),
            3 => Some(Self::Venus),
            4 => Some(Self::Mars),
            5 => Some(Self::Jupiter),
            6 => Some(Self::Saturn),
            7 => Some(Self::Uranus),
            8 => Some(Self::Neptune),
            9 => Some(Self::Pluto),
            _ => None,
        }
    }

    /// Look up a body by its display name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_BODIES
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(name))
    }

    /// Whether the body can station (reverse apparent direction).
    ///
    /// The Sun and Moon always move eastward along the ecliptic as seen
    /// from Earth, so they never produce station events.
    pub const fn can_station(self) -> bool {
        !matches!(self, Self::Sun | Self::Moon)
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw per-body state returned by an ephemeris provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticState {
    /// Geocentric ecliptic longitude in degrees [0, 360).
    pub longitude_deg: f64,
    /// Longitude rate in degrees per day; negative while retrograde.
    pub speed_deg_per_day: f64,
}

/// Scanner-facing position: longitude plus the derived retrograde flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyPosition {
    /// Geocentric ecliptic longitude in degrees [0, 360).
    pub longitude_deg: f64,
    /// Whether the body's apparent motion is currently westward.
    pub retrograde: bool,
}

impl BodyPosition {
    /// Derive a position from a provider state.
    ///
    /// Retrograde status comes from the sign of the longitude rate and
    /// is never recomputed downstream.
    pub fn from_state(state: EclipticState) -> Self {
        Self {
            longitude_deg: state.longitude_deg,
            retrograde: state.speed_deg_per_day < 0.0,
        }
    }
}

/// Errors surfaced by an ephemeris provider.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EphemerisError {
    /// Requested epoch is outside the provider's valid range.
    EpochOutOfRange { jd_utc: f64 },
    /// The provider cannot compute this body.
    UnsupportedBody(Body),
    /// Provider-internal failure.
    Provider(String),
}

impl Display for EphemerisError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EpochOutOfRange { jd_utc } => {
                write!(f, "epoch out of provider range: JD {jd_utc}")
            }
            Self::UnsupportedBody(body) => write!(f, "unsupported body: {body}"),
            Self::Provider(msg) => write!(f, "provider error: {msg}"),
        }
    }
}

impl Error for EphemerisError {}

/// The ephemeris provider seam.
///
/// One query per (instant, body); implementations must be deterministic
/// for identical inputs so a scan is a pure function of its inputs.
/// `Send + Sync` so a provider can be shared across tasks by reference.
pub trait Ephemeris: Send + Sync {
    /// Geocentric ecliptic longitude and longitude rate at `jd_utc`.
    fn ecliptic_state(&self, jd_utc: f64, body: Body) -> Result<EclipticState, EphemerisError>;
}
