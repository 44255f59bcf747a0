//! Transit event scan engine.
//!
//! Scans a date range one calendar day at a time, samples every
//! tracked body's ecliptic position from an [`Ephemeris`] provider,
//! and turns the stream of daily snapshots into a typed event log:
//!
//! - sign ingresses (a body crossing into a new sign)
//! - retrograde and direct stations
//! - aspect begin / closest-approach / end between body pairs
//! - named static configurations (N bodies in required signs at once)
//!
//! Detectors are stateless comparators; all memory lives in the
//! sliding snapshot window the [`Scanner`] threads through them. The
//! scan resolves events to whole days — it detects that a boundary
//! was crossed between two daily samples, not the exact instant.
//!
//! ```rust,ignore
//! use gochara_core::MeanMotionEphemeris;
//! use gochara_scan::{ScanConfig, Scanner, standard_detectors};
//!
//! let config = ScanConfig::new("2024-01-01".parse()?, "2024-12-31".parse()?);
//! let scanner = Scanner::new(config.clone(), standard_detectors(&config.bodies))?;
//! let report = scanner.scan(&MeanMotionEphemeris::new()).await?;
//! for event in &report.events {
//!     println!("{} {}", event.day, event.description);
//! }
//! ```

use gochara_core::Body;
use gochara_zodiac::AspectSpec;

pub mod aspects;
pub mod detector;
pub mod error;
pub mod event;
pub mod headline;
pub mod ingress;
pub mod scanner;
pub mod snapshot;
pub mod static_config;
pub mod station;

pub use aspects::{AspectDetector, all_pairs};
pub use detector::EventDetector;
pub use error::ScanError;
pub use event::{
    EventDetail, EventKind, SignConstraint, StationDirection, TransitEvent,
};
pub use headline::{DEFAULT_HEADLINE_RULES, HeadlineRule, headlines};
pub use ingress::SignIngressDetector;
pub use scanner::{
    DEFAULT_POINT_CEILING, DEFAULT_PROGRESS_INTERVAL_DAYS, NoopObserver, ScanConfig, ScanObserver,
    ScanOutcome, ScanReport, Scanner, StopHandle,
};
pub use snapshot::{Snapshot, build_snapshot};
pub use static_config::StaticConfigurationDetector;
pub use station::StationDetector;

/// The standard detector set over a body list: sign ingresses for all
/// bodies, stations for the station-capable ones, and the five major
/// aspects over all pairs.
pub fn standard_detectors(bodies: &[Body]) -> Vec<Box<dyn EventDetector>> {
    let station_bodies: Vec<Body> = bodies.iter().copied().filter(|b| b.can_station()).collect();
    vec![
        Box::new(SignIngressDetector::new(bodies.to_vec())),
        Box::new(StationDetector::new(station_bodies)),
        Box::new(AspectDetector::new(bodies, AspectSpec::standard_set())),
    ]
}
