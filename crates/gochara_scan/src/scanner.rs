//! The day-by-day scan loop.
//!
//! The scanner owns the whole run: it validates the request up front
//! (including the point-computation ceiling, before any provider
//! call), builds one snapshot per calendar day, feeds every detector
//! the current snapshot plus a sliding two-deep history window, and
//! accumulates events in detector-registration order. It yields to the
//! scheduler once per simulated day so multi-year scans cooperate with
//! other tasks; that is the only suspension point.
//!
//! Cancellation is cooperative and day-granular: a stop request is
//! observed at the top of the next iteration, the in-flight day's
//! events are kept, and no further days are scanned.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};

use gochara_core::{ALL_BODIES, Body, Ephemeris};
use gochara_time::{CivilDate, DayNumber};

use crate::detector::EventDetector;
use crate::error::ScanError;
use crate::event::TransitEvent;
use crate::snapshot::{Snapshot, build_snapshot};

/// Default ceiling on `days * bodies` point computations per scan.
pub const DEFAULT_POINT_CEILING: u64 = 5_000;

/// Default progress-notification cadence, in scanned days.
pub const DEFAULT_PROGRESS_INTERVAL_DAYS: u32 = 30;

/// Scan request configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    pub start: CivilDate,
    pub end: CivilDate,
    /// Bodies sampled into each snapshot.
    pub bodies: Vec<Body>,
    /// Reject scans whose `days * bodies` cost exceeds this.
    pub max_point_computations: u64,
    /// Emit a progress notification every this many scanned days.
    pub progress_interval_days: u32,
    /// Attach each event's day snapshot for downstream rendering.
    pub attach_snapshots: bool,
}

impl ScanConfig {
    /// Config with the default body set, ceiling, and cadence.
    pub fn new(start: CivilDate, end: CivilDate) -> Self {
        Self {
            start,
            end,
            bodies: ALL_BODIES.to_vec(),
            max_point_computations: DEFAULT_POINT_CEILING,
            progress_interval_days: DEFAULT_PROGRESS_INTERVAL_DAYS,
            attach_snapshots: false,
        }
    }

    pub fn with_bodies(mut self, bodies: Vec<Body>) -> Self {
        self.bodies = bodies;
        self
    }

    pub fn with_ceiling(mut self, max_point_computations: u64) -> Self {
        self.max_point_computations = max_point_computations;
        self
    }

    pub fn with_attach_snapshots(mut self, on: bool) -> Self {
        self.attach_snapshots = on;
        self
    }
}

/// How a scan finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Every day in the range was scanned.
    Completed,
    /// A stop request ended the scan early.
    Stopped,
}

/// Result of a finished scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    /// All detected events, in day order then detector order.
    pub events: Vec<TransitEvent>,
    /// Days actually scanned (may be short of the range when stopped).
    pub days_scanned: u32,
    pub outcome: ScanOutcome,
}

/// Lifecycle notifications for a running scan.
///
/// All hooks default to no-ops; implement the ones you need.
pub trait ScanObserver: Send + Sync {
    fn on_start(&self, _start: DayNumber, _end: DayNumber) {}
    fn on_progress(&self, _percent: u8) {}
    fn on_event(&self, _event: &TransitEvent) {}
    fn on_complete(&self, _total_events: usize) {}
    fn on_stopped(&self, _days_scanned: u32) {}
}

/// Observer that ignores every notification.
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}

/// Cancels a running scan from another task.
///
/// Stopping is sticky: once requested, this scanner will not run
/// again; construct a new one to re-scan.
#[derive(Debug, Clone)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Request a stop at the next day boundary.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Drives a day-by-day scan over a date range.
pub struct Scanner {
    config: ScanConfig,
    detectors: Vec<Box<dyn EventDetector>>,
    start_day: DayNumber,
    end_day: DayNumber,
    stop: Arc<AtomicBool>,
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("config", &self.config)
            .field("detectors", &format_args!("[{} detectors]", self.detectors.len()))
            .field("start_day", &self.start_day)
            .field("end_day", &self.end_day)
            .field("stop", &self.stop)
            .finish()
    }
}

impl Scanner {
    /// Validate the request and build a scanner.
    ///
    /// Rejects inverted ranges, empty body lists, and ranges whose
    /// `days * bodies` cost exceeds the configured ceiling — all
    /// before any provider call is made.
    pub fn new(
        config: ScanConfig,
        detectors: Vec<Box<dyn EventDetector>>,
    ) -> Result<Self, ScanError> {
        let start_day = config.start.to_day_number()?;
        let end_day = config.end.to_day_number()?;

        if end_day < start_day {
            return Err(ScanError::InvalidRange {
                start: config.start,
                end: config.end,
            });
        }
        if config.bodies.is_empty() {
            return Err(ScanError::InvalidConfig("bodies must not be empty"));
        }
        if config.progress_interval_days == 0 {
            return Err(ScanError::InvalidConfig(
                "progress_interval_days must be greater than zero",
            ));
        }

        let scanner = Self {
            config,
            detectors,
            start_day,
            end_day,
            stop: Arc::new(AtomicBool::new(false)),
        };
        let cost = scanner.estimated_cost();
        if cost > scanner.config.max_point_computations {
            return Err(ScanError::RangeTooLarge {
                cost,
                ceiling: scanner.config.max_point_computations,
            });
        }
        Ok(scanner)
    }

    /// Pre-flight cost estimate: days in range times tracked bodies.
    pub fn estimated_cost(&self) -> u64 {
        let days = (self.end_day.days_since(self.start_day) + 1) as u64;
        days.saturating_mul(self.config.bodies.len() as u64)
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Handle for cancelling this scan from another task.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            flag: Arc::clone(&self.stop),
        }
    }

    /// Request a stop at the next day boundary.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Run the scan without lifecycle notifications.
    pub async fn scan(&self, provider: &dyn Ephemeris) -> Result<ScanReport, ScanError> {
        self.scan_with_observer(provider, &NoopObserver).await
    }

    /// Run the scan, reporting lifecycle notifications to `observer`.
    pub async fn scan_with_observer(
        &self,
        provider: &dyn Ephemeris,
        observer: &dyn ScanObserver,
    ) -> Result<ScanReport, ScanError> {
        let total_days = (self.end_day.days_since(self.start_day) + 1) as u32;
        info!(
            "scan start: {} .. {} ({total_days} days, {} bodies, {} detectors)",
            self.config.start,
            self.config.end,
            self.config.bodies.len(),
            self.detectors.len()
        );
        observer.on_start(self.start_day, self.end_day);

        let mut events: Vec<TransitEvent> = Vec::new();
        let mut previous: Option<Snapshot> = None;
        let mut previous2: Option<Snapshot> = None;
        let mut days_scanned = 0u32;
        let mut outcome = ScanOutcome::Completed;

        let mut day = self.start_day;
        while day <= self.end_day {
            if self.stop.load(Ordering::Relaxed) {
                outcome = ScanOutcome::Stopped;
                break;
            }

            let snapshot = build_snapshot(provider, day, &self.config.bodies)?;

            for detector in &self.detectors {
                let found =
                    detector.detect(&snapshot, previous.as_ref(), previous2.as_ref())?;
                for mut event in found {
                    if self.config.attach_snapshots {
                        event.snapshot = Some(self.snapshot_for(&event, &snapshot, &previous));
                    }
                    debug!("{}: {} {}", detector.name(), event.day, event.description);
                    observer.on_event(&event);
                    events.push(event);
                }
            }

            // Slide the lookback window: current → previous → previous-2.
            previous2 = previous.take();
            previous = Some(snapshot);

            days_scanned += 1;
            if days_scanned % self.config.progress_interval_days == 0 {
                let percent =
                    ((f64::from(days_scanned) / f64::from(total_days)) * 100.0).round() as u8;
                debug!("scan progress: {percent}% ({days_scanned}/{total_days} days)");
                observer.on_progress(percent);
            }

            day = day.succ();
            // Cooperative scheduling point: one yield per simulated day.
            tokio::task::yield_now().await;
        }

        match outcome {
            ScanOutcome::Completed => {
                info!("scan complete: {} events over {days_scanned} days", events.len());
                observer.on_complete(events.len());
            }
            ScanOutcome::Stopped => {
                info!(
                    "scan stopped after {days_scanned} days with {} events",
                    events.len()
                );
                observer.on_stopped(days_scanned);
            }
        }

        Ok(ScanReport {
            events,
            days_scanned,
            outcome,
        })
    }

    /// Snapshot to attach to an event: the one matching the event's
    /// day. Peak events are dated one day back, so they get the
    /// previous snapshot rather than today's.
    fn snapshot_for(
        &self,
        event: &TransitEvent,
        current: &Snapshot,
        previous: &Option<Snapshot>,
    ) -> Snapshot {
        match previous {
            Some(prev) if prev.day() == event.day => prev.clone(),
            _ => current.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    use gochara_core::{EclipticState, EphemerisError};

    /// Provider that counts calls and returns a fixed state.
    struct CountingProvider {
        calls: AtomicU32,
    }

    impl CountingProvider {
        fn new() -> Self {
            Self {
                calls: AtomicU32::new(0),
            }
        }
    }

    impl Ephemeris for CountingProvider {
        fn ecliptic_state(&self, _jd: f64, _body: Body) -> Result<EclipticState, EphemerisError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(EclipticState {
                longitude_deg: 100.0,
                speed_deg_per_day: 1.0,
            })
        }
    }

    fn date(s: &str) -> CivilDate {
        s.parse().expect("valid date")
    }

    #[test]
    fn rejects_inverted_range() {
        let config = ScanConfig::new(date("2024-06-01"), date("2024-05-01"));
        let result = Scanner::new(config, Vec::new());
        assert!(matches!(result, Err(ScanError::InvalidRange { .. })));
    }

    #[test]
    fn rejects_malformed_date() {
        assert!("2024-02-30".parse::<CivilDate>().is_err());
    }

    #[test]
    fn rejects_empty_bodies() {
        let config =
            ScanConfig::new(date("2024-01-01"), date("2024-01-10")).with_bodies(Vec::new());
        let result = Scanner::new(config, Vec::new());
        assert!(matches!(result, Err(ScanError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_progress_interval() {
        let mut config = ScanConfig::new(date("2024-01-01"), date("2024-01-10"));
        config.progress_interval_days = 0;
        let result = Scanner::new(config, Vec::new());
        assert!(matches!(result, Err(ScanError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_oversized_range_before_any_provider_call() {
        // 1000 days * 10 bodies = 10000 > 5000 default ceiling.
        let config = ScanConfig::new(date("2020-01-01"), date("2022-09-26"));
        let result = Scanner::new(config, Vec::new());
        let Err(ScanError::RangeTooLarge { cost, ceiling }) = result else {
            panic!("expected RangeTooLarge, got {result:?}");
        };
        assert!(cost > ceiling);
        assert_eq!(ceiling, DEFAULT_POINT_CEILING);
    }

    #[test]
    fn single_day_range_is_valid() {
        let config = ScanConfig::new(date("2024-01-01"), date("2024-01-01"));
        let scanner = Scanner::new(config, Vec::new()).expect("should build");
        assert_eq!(scanner.estimated_cost(), 10);
    }

    #[test]
    fn estimated_cost_counts_days_times_bodies() {
        let config = ScanConfig::new(date("2024-01-01"), date("2024-01-10"))
            .with_bodies(vec![Body::Sun, Body::Mars]);
        let scanner = Scanner::new(config, Vec::new()).expect("should build");
        assert_eq!(scanner.estimated_cost(), 20);
    }

    #[tokio::test]
    async fn scan_calls_provider_once_per_day_per_body() {
        let config = ScanConfig::new(date("2024-01-01"), date("2024-01-05"))
            .with_bodies(vec![Body::Sun, Body::Mars]);
        let scanner = Scanner::new(config, Vec::new()).expect("should build");
        let provider = CountingProvider::new();
        let report = scanner.scan(&provider).await.expect("scan");
        assert_eq!(report.days_scanned, 5);
        assert_eq!(report.outcome, ScanOutcome::Completed);
        assert_eq!(provider.calls.load(Ordering::Relaxed), 10);
    }

    #[tokio::test]
    async fn pre_stopped_scanner_scans_nothing() {
        let config = ScanConfig::new(date("2024-01-01"), date("2024-01-05"));
        let scanner = Scanner::new(config, Vec::new()).expect("should build");
        scanner.stop_handle().stop();
        let provider = CountingProvider::new();
        let report = scanner.scan(&provider).await.expect("scan");
        assert_eq!(report.outcome, ScanOutcome::Stopped);
        assert_eq!(report.days_scanned, 0);
        assert_eq!(provider.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn provider_failure_aborts_scan() {
        struct FailingProvider;
        impl Ephemeris for FailingProvider {
            fn ecliptic_state(
                &self,
                jd: f64,
                _body: Body,
            ) -> Result<EclipticState, EphemerisError> {
                Err(EphemerisError::EpochOutOfRange { jd_utc: jd })
            }
        }

        let config = ScanConfig::new(date("2024-01-01"), date("2024-01-05"));
        let scanner = Scanner::new(config, Vec::new()).expect("should build");
        let result = scanner.scan(&FailingProvider).await;
        assert!(matches!(result, Err(ScanError::Ephemeris(_))));
    }
}
