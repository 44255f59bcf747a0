//! Built-in low-precision ephemeris provider.
//!
//! Models each planet as a circular heliocentric orbit with its mean
//! motion and J2000 mean longitude, then derives geocentric ecliptic
//! longitude by subtracting Earth's orbital position. Vector
//! subtraction reproduces the apparent retrograde loops of the real
//! sky, which is what the event detectors care about. The Sun is the
//! anti-Earth direction; the Moon is a mean-longitude circle around
//! Earth.
//!
//! Accuracy is degree-level, suitable for demos, benches, and tests.
//! Longitude rate comes from a central finite difference, the same
//! numerical approach the station search uses for acceleration.

use crate::{Body, EclipticState, Ephemeris, EphemerisError};

/// J2000.0 epoch as a Julian Date.
pub const J2000_JD: f64 = 2_451_545.0;

/// Step for the central-difference longitude rate, in days.
const RATE_STEP_DAYS: f64 = 0.5;

/// Mean elements drift; keep queries within ±2 centuries of J2000.
const MIN_JD: f64 = J2000_JD - 73_050.0;
const MAX_JD: f64 = J2000_JD + 73_050.0;

/// (semi-major axis AU, mean longitude at J2000 deg, mean motion deg/day)
///
/// Sun and Moon are modeled geocentrically in `longitude_at` and never
/// consult this table.
const fn heliocentric_elements(body: Body) -> (f64, f64, f64) {
    match body {
        Body::Mercury => (0.38710, 252.2509, 4.092_334_4),
        Body::Venus => (0.72333, 181.9798, 1.602_130_3),
        Body::Mars => (1.52368, 355.4333, 0.524_020_7),
        Body::Jupiter => (5.20260, 34.3515, 0.083_085_3),
        Body::Saturn => (9.55491, 50.0775, 0.033_444_1),
        Body::Uranus => (19.21845, 314.0550, 0.011_728_3),
        Body::Neptune => (30.11039, 304.3487, 0.005_981_0),
        Body::Pluto => (39.48169, 238.9290, 0.003_964_0),
        Body::Sun | Body::Moon => EARTH_ELEMENTS,
    }
}

/// Earth's orbit, used as the observer position.
const EARTH_ELEMENTS: (f64, f64, f64) = (1.00000, 100.4644, 0.985_609_1);

/// Moon around Earth: (mean longitude at J2000 deg, mean motion deg/day).
const MOON_ELEMENTS: (f64, f64) = (218.3164, 13.176_396_5);

fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// Wrap an angle difference to [-180, +180].
fn wrap_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d < -180.0 {
        d += 360.0;
    }
    d
}

/// Heliocentric position of a circular orbit at `t` days past J2000.
fn orbit_xy(elements: (f64, f64, f64), t: f64) -> (f64, f64) {
    let (a, l0, n) = elements;
    let lon = (l0 + n * t).to_radians();
    (a * lon.cos(), a * lon.sin())
}

/// Low-precision mean-motion provider.
///
/// Deterministic: equal `(jd_utc, body)` inputs yield bit-equal
/// outputs, so scans over it are reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanMotionEphemeris;

impl MeanMotionEphemeris {
    pub fn new() -> Self {
        Self
    }

    /// Geocentric ecliptic longitude at `t` days past J2000.
    fn longitude_at(self, body: Body, t: f64) -> f64 {
        match body {
            Body::Sun => {
                let (_, l0, n) = EARTH_ELEMENTS;
                normalize_360(l0 + n * t + 180.0)
            }
            Body::Moon => {
                let (l0, n) = MOON_ELEMENTS;
                normalize_360(l0 + n * t)
            }
            _ => {
                let (px, py) = orbit_xy(heliocentric_elements(body), t);
                let (ex, ey) = orbit_xy(EARTH_ELEMENTS, t);
                normalize_360((py - ey).atan2(px - ex).to_degrees())
            }
        }
    }
}

impl Ephemeris for MeanMotionEphemeris {
    fn ecliptic_state(&self, jd_utc: f64, body: Body) -> Result<EclipticState, EphemerisError> {
        if !jd_utc.is_finite() || !(MIN_JD..=MAX_JD).contains(&jd_utc) {
            return Err(EphemerisError::EpochOutOfRange { jd_utc });
        }

        let t = jd_utc - J2000_JD;
        let longitude_deg = self.longitude_at(body, t);

        let lon_ahead = self.longitude_at(body, t + RATE_STEP_DAYS);
        let lon_behind = self.longitude_at(body, t - RATE_STEP_DAYS);
        let speed_deg_per_day = wrap_pm180(lon_ahead - lon_behind) / (2.0 * RATE_STEP_DAYS);

        Ok(EclipticState {
            longitude_deg,
            speed_deg_per_day,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ALL_BODIES;

    fn state(body: Body, t: f64) -> EclipticState {
        MeanMotionEphemeris::new()
            .ecliptic_state(J2000_JD + t, body)
            .expect("in range")
    }

    #[test]
    fn sun_longitude_at_j2000() {
        // Sun's mean longitude at J2000 is ~280.46 deg.
        let s = state(Body::Sun, 0.0);
        assert!((s.longitude_deg - 280.46).abs() < 0.1, "{}", s.longitude_deg);
    }

    #[test]
    fn all_bodies_in_range() {
        for body in ALL_BODIES {
            let s = state(body, 0.0);
            assert!(
                (0.0..360.0).contains(&s.longitude_deg),
                "{body}: {}",
                s.longitude_deg
            );
        }
    }

    #[test]
    fn sun_never_retrograde() {
        for day in 0..400 {
            assert!(state(Body::Sun, day as f64).speed_deg_per_day > 0.0);
        }
    }

    #[test]
    fn moon_never_retrograde() {
        for day in 0..60 {
            let s = state(Body::Moon, day as f64);
            assert!((s.speed_deg_per_day - 13.176).abs() < 0.01);
        }
    }

    #[test]
    fn mars_retrogrades_within_a_synodic_period() {
        // Mars' synodic period is ~780 days; every cycle has a
        // retrograde window around opposition.
        let retrograde_days = (0..800)
            .filter(|&day| state(Body::Mars, day as f64).speed_deg_per_day < 0.0)
            .count();
        assert!(retrograde_days > 10, "found {retrograde_days} retrograde days");
    }

    #[test]
    fn mercury_retrogrades_within_two_synodic_periods() {
        let any_retrograde =
            (0..240).any(|day| state(Body::Mercury, day as f64).speed_deg_per_day < 0.0);
        assert!(any_retrograde);
    }

    #[test]
    fn rejects_epoch_out_of_range() {
        let eph = MeanMotionEphemeris::new();
        assert!(matches!(
            eph.ecliptic_state(J2000_JD + 100_000.0, Body::Mars),
            Err(EphemerisError::EpochOutOfRange { .. })
        ));
        assert!(matches!(
            eph.ecliptic_state(f64::NAN, Body::Mars),
            Err(EphemerisError::EpochOutOfRange { .. })
        ));
    }

    #[test]
    fn deterministic_for_equal_inputs() {
        let eph = MeanMotionEphemeris::new();
        let a = eph.ecliptic_state(J2000_JD + 123.25, Body::Venus).expect("in range");
        let b = eph.ecliptic_state(J2000_JD + 123.25, Body::Venus).expect("in range");
        assert_eq!(a.longitude_deg.to_bits(), b.longitude_deg.to_bits());
        assert_eq!(a.speed_deg_per_day.to_bits(), b.speed_deg_per_day.to_bits());
    }
}
