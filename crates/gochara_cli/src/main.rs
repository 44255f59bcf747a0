use clap::{Parser, Subcommand};
use log::{debug, info};
use serde_json::json;

use gochara_core::{ALL_BODIES, Body, MeanMotionEphemeris};
use gochara_scan::{
    AspectDetector, DEFAULT_HEADLINE_RULES, EventDetector, ScanConfig, ScanObserver, ScanReport,
    Scanner, SignConstraint, SignIngressDetector, StaticConfigurationDetector, StationDetector,
    TransitEvent, headlines,
};
use gochara_time::{CivilDate, DayNumber};
use gochara_zodiac::{AspectSpec, Sign, sign_from_longitude};

#[derive(Parser)]
#[command(name = "gochara", about = "Day-by-day planetary transit event scanner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a date range for transit events
    Scan {
        /// Start date (YYYY-MM-DD, ISO-8601 datetime accepted)
        #[arg(long)]
        start: String,
        /// End date, inclusive
        #[arg(long)]
        end: String,
        /// Comma-separated body names (default: all ten)
        #[arg(long)]
        bodies: Option<String>,
        /// Reject out-of-sign aspects
        #[arg(long)]
        sign_filter: bool,
        /// Skip closest-approach (peak) aspect events
        #[arg(long)]
        no_peaks: bool,
        /// Attach the day's full snapshot to every event
        #[arg(long)]
        attach_snapshots: bool,
        /// Point-computation ceiling (days x bodies)
        #[arg(long, default_value = "5000")]
        ceiling: u64,
        /// Watch a placement, e.g. --watch Mars=Leo (repeatable; all
        /// placements together form one watched configuration)
        #[arg(long)]
        watch: Vec<String>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Print headline lines for notable events
        #[arg(long)]
        headlines: bool,
    },
    /// Print one day's snapshot of body positions
    Positions {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Comma-separated body names (default: all ten)
        #[arg(long)]
        bodies: Option<String>,
    },
    /// Sign lookup for an ecliptic longitude
    Sign {
        /// Ecliptic longitude in degrees
        lon: f64,
    },
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("error: {msg}");
    std::process::exit(2);
}

fn parse_date(s: &str) -> CivilDate {
    s.parse().unwrap_or_else(|e| fail(e))
}

fn parse_bodies(spec: Option<&str>) -> Vec<Body> {
    match spec {
        None => ALL_BODIES.to_vec(),
        Some(list) => list
            .split(',')
            .map(|name| {
                let name = name.trim();
                Body::from_name(name)
                    .unwrap_or_else(|| fail(format!("unknown body {name:?}")))
            })
            .collect(),
    }
}

/// Parse `Body=Sign` placements into static-configuration constraints.
fn parse_watch(placements: &[String]) -> Vec<SignConstraint> {
    placements
        .iter()
        .map(|p| {
            let (body, sign) = p
                .split_once('=')
                .unwrap_or_else(|| fail(format!("expected Body=Sign, got {p:?}")));
            SignConstraint {
                body: Body::from_name(body.trim())
                    .unwrap_or_else(|| fail(format!("unknown body {body:?}"))),
                sign: Sign::from_name(sign.trim())
                    .unwrap_or_else(|| fail(format!("unknown sign {sign:?}"))),
            }
        })
        .collect()
}

fn build_detectors(
    bodies: &[Body],
    sign_filter: bool,
    peaks: bool,
    watch: &[SignConstraint],
) -> Vec<Box<dyn EventDetector>> {
    let station_bodies: Vec<Body> = bodies.iter().copied().filter(|b| b.can_station()).collect();
    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(SignIngressDetector::new(bodies.to_vec())),
        Box::new(StationDetector::new(station_bodies)),
        Box::new(
            AspectDetector::new(bodies, AspectSpec::standard_set())
                .with_sign_match(sign_filter)
                .with_peaks(peaks),
        ),
    ];
    if !watch.is_empty() {
        detectors.push(Box::new(StaticConfigurationDetector::new(
            "watched configuration",
            watch.to_vec(),
        )));
    }
    detectors
}

/// Logs scan lifecycle through the standard logger.
struct LogObserver;

impl ScanObserver for LogObserver {
    fn on_start(&self, start: DayNumber, end: DayNumber) {
        info!("scanning {start} .. {end}");
    }
    fn on_progress(&self, percent: u8) {
        info!("progress: {percent}%");
    }
    fn on_event(&self, event: &TransitEvent) {
        debug!("{} {}", event.day, event.description);
    }
    fn on_complete(&self, total_events: usize) {
        info!("done: {total_events} events");
    }
    fn on_stopped(&self, days_scanned: u32) {
        info!("stopped after {days_scanned} days");
    }
}

fn print_report(report: &ScanReport, config: &ScanConfig, as_json: bool, with_headlines: bool) {
    if as_json {
        let payload = json!({
            "metadata": {
                "start": config.start,
                "end": config.end,
                "bodies": config.bodies,
                "daysScanned": report.days_scanned,
                "eventCount": report.events.len(),
            },
            "events": report.events,
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(text) => println!("{text}"),
            Err(e) => fail(e),
        }
        return;
    }

    for event in &report.events {
        println!(
            "{}  {:<20}  {}",
            event.day.to_civil(),
            event.kind().slug(),
            event.description
        );
    }
    println!("{} events over {} days", report.events.len(), report.days_scanned);

    if with_headlines {
        let lines = headlines(&report.events, DEFAULT_HEADLINE_RULES);
        if !lines.is_empty() {
            println!();
            for line in lines {
                println!("* {line}");
            }
        }
    }
}

async fn run_scan(
    start: String,
    end: String,
    bodies: Option<String>,
    sign_filter: bool,
    no_peaks: bool,
    attach_snapshots: bool,
    ceiling: u64,
    watch: Vec<String>,
    json: bool,
    with_headlines: bool,
) {
    let bodies = parse_bodies(bodies.as_deref());
    let config = ScanConfig::new(parse_date(&start), parse_date(&end))
        .with_bodies(bodies.clone())
        .with_ceiling(ceiling)
        .with_attach_snapshots(attach_snapshots);
    let detectors = build_detectors(&bodies, sign_filter, !no_peaks, &parse_watch(&watch));

    let scanner = Scanner::new(config.clone(), detectors).unwrap_or_else(|e| fail(e));
    let provider = MeanMotionEphemeris::new();
    let report = scanner
        .scan_with_observer(&provider, &LogObserver)
        .await
        .unwrap_or_else(|e| fail(e));

    print_report(&report, &config, json, with_headlines);
}

fn run_positions(date: String, bodies: Option<String>) {
    let day = parse_date(&date)
        .to_day_number()
        .unwrap_or_else(|e| fail(e));
    let bodies = parse_bodies(bodies.as_deref());
    let provider = MeanMotionEphemeris::new();
    let snapshot = gochara_scan::build_snapshot(&provider, day, &bodies)
        .unwrap_or_else(|e| fail(e));

    println!("positions for {}", day.to_civil());
    for (body, position) in snapshot.iter() {
        let sign = sign_from_longitude(position.longitude_deg);
        let motion = if position.retrograde { "retrograde" } else { "direct" };
        println!(
            "  {:<8}  {:>8.3} deg  {:<11}  {motion}",
            body.name(),
            position.longitude_deg,
            sign.name()
        );
    }
}

fn run_sign(lon: f64) {
    let sign = sign_from_longitude(lon);
    let within = gochara_zodiac::normalize_360(lon) - sign.start_deg();
    println!(
        "{:.4} deg -> {} (index {}, {:.4} deg into the sign)",
        lon,
        sign.name(),
        sign.index(),
        within
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            start,
            end,
            bodies,
            sign_filter,
            no_peaks,
            attach_snapshots,
            ceiling,
            watch,
            json,
            headlines,
        } => {
            run_scan(
                start,
                end,
                bodies,
                sign_filter,
                no_peaks,
                attach_snapshots,
                ceiling,
                watch,
                json,
                headlines,
            )
            .await;
        }
        Commands::Positions { date, bodies } => run_positions(date, bodies),
        Commands::Sign { lon } => run_sign(lon),
    }
}
