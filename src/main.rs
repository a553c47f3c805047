//! Headless host for the simulated edge inference feed.
//!
//! Prints each alert as it is logged and a summary (or a JSON snapshot) once
//! the run ends.

use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use edgesense::app_dirs;
use edgesense::config::{self, AppSettings};
use edgesense::logging::{self, LogOptions};
use edgesense::monitor::{
    Driver, InferenceStatus, Intent, MonitorEvent, MonitorSimulator, Pacing, ScheduledIntent,
    WallClock,
};

const DEFAULT_DURATION: Duration = Duration::from_secs(30);
/// Longest accepted run: one year.
const MAX_DURATION: Duration = Duration::from_secs(365 * 24 * 60 * 60);

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    if let Some(home) = &options.config_home {
        app_dirs::set_config_base_override(home.clone());
    }
    let mut settings = match &options.config_path {
        Some(path) => config::load_from(path),
        None => config::load_or_default(),
    }
    .map_err(|err| err.to_string())?;
    options.apply_to(&mut settings);

    let log_options = LogOptions {
        console: !options.quiet,
        ..LogOptions::default()
    };
    if let Err(err) = logging::init(&log_options) {
        eprintln!("Logging disabled: {err}");
    }

    let sim_config = settings.simulator_config();
    let mut sim = match settings.seed {
        Some(seed) => MonitorSimulator::seeded(sim_config, seed, WallClock::local_now()),
        None => MonitorSimulator::from_entropy(sim_config),
    };
    let events = sim.subscribe();
    if settings.seed_demo_history {
        sim.seed_demo_history();
    }
    if settings.autostart {
        sim.start_monitoring();
    }
    tracing::info!(
        seed = ?settings.seed,
        duration_ms = u64::try_from(options.duration.as_millis()).unwrap_or(u64::MAX),
        pacing = ?options.pacing,
        "Starting monitor run"
    );

    let mut printer = FeedPrinter::new(!options.json);
    printer.drain(&events);
    let mut driver = Driver::new(options.pacing, options.script.clone());
    let report = driver.run(&mut sim, options.duration, |_| printer.drain(&events));
    tracing::info!(?report, "Monitor run finished");

    let snapshot = sim.shutdown();
    printer.drain(&events);
    if options.json {
        let text = serde_json::to_string_pretty(&snapshot)
            .map_err(|err| format!("Failed to serialize snapshot: {err}"))?;
        println!("{text}");
        return Ok(());
    }

    let stats = snapshot.stats;
    println!();
    println!(
        "{} on {} ({} MB model)",
        snapshot.device.name, snapshot.device.mode, snapshot.device.model_size_mb
    );
    println!(
        "Ticks: {} ({} anomalies{})",
        stats.ticks,
        stats.tick_anomalies,
        format_rate(stats.tick_anomaly_rate())
    );
    println!(
        "Uploads: {} completed, {} rejected ({} anomalies{})",
        stats.uploads_completed,
        stats.uploads_rejected,
        stats.upload_anomalies,
        format_rate(stats.upload_anomaly_rate())
    );
    println!("Alerts retained: {}", snapshot.alerts.len());
    Ok(())
}

fn format_rate(rate: Option<f64>) -> String {
    rate.map(|rate| format!(", {:.1}%", rate * 100.0))
        .unwrap_or_default()
}

/// Renders subscription events as feed lines on stdout.
struct FeedPrinter {
    enabled: bool,
    after_alert: bool,
}

impl FeedPrinter {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            after_alert: false,
        }
    }

    fn drain(&mut self, events: &Receiver<MonitorEvent>) {
        for event in events.try_iter() {
            if self.enabled {
                self.print(&event);
            }
            self.after_alert = matches!(event, MonitorEvent::AlertLogged(_));
        }
    }

    fn print(&self, event: &MonitorEvent) {
        match event {
            MonitorEvent::AlertLogged(entry) => println!(
                "[{}] #{} {} {:<7} {}",
                entry.timestamp,
                entry.id,
                entry.filename,
                InferenceStatus::from(entry.status).label(),
                entry.confidence_label()
            ),
            // Tick results are already shown by the alert line before them.
            MonitorEvent::ResultChanged(_) if self.after_alert => {}
            MonitorEvent::ResultChanged(result) => match result.status {
                InferenceStatus::Processing => println!("upload: processing..."),
                status => println!(
                    "upload: {} {}",
                    status.label(),
                    result.confidence_percent().unwrap_or_default()
                ),
            },
            MonitorEvent::MonitoringChanged(true) => println!("monitoring: live"),
            MonitorEvent::MonitoringChanged(false) => println!("monitoring: paused"),
            MonitorEvent::UploadRejected => println!("upload: rejected, still processing"),
            MonitorEvent::MetricsChanged(_) => {}
        }
    }
}

#[derive(Debug)]
struct Options {
    config_path: Option<PathBuf>,
    config_home: Option<PathBuf>,
    seed: Option<u64>,
    duration: Duration,
    pacing: Pacing,
    script: Vec<ScheduledIntent>,
    autostart: Option<bool>,
    demo_history: bool,
    json: bool,
    quiet: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config_path: None,
            config_home: None,
            seed: None,
            duration: DEFAULT_DURATION,
            pacing: Pacing::RealTime,
            script: Vec::new(),
            autostart: None,
            demo_history: false,
            json: false,
            quiet: false,
        }
    }
}

impl Options {
    /// Command-line flags win over values from the config file.
    fn apply_to(&self, settings: &mut AppSettings) {
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(autostart) = self.autostart {
            settings.autostart = autostart;
        }
        if self.demo_history {
            settings.seed_demo_history = true;
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        match flag {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--config" => {
                options.config_path = Some(PathBuf::from(take_value(&args, &mut idx, flag)?));
            }
            "--config-home" => {
                options.config_home = Some(PathBuf::from(take_value(&args, &mut idx, flag)?));
            }
            "--seed" => {
                let value = take_value(&args, &mut idx, flag)?;
                options.seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("--seed expects an integer, got `{value}`"))?,
                );
            }
            "--duration" => {
                let value = take_value(&args, &mut idx, flag)?;
                let secs: f64 = value
                    .parse()
                    .map_err(|_| format!("--duration expects seconds, got `{value}`"))?;
                let duration = Duration::try_from_secs_f64(secs)
                    .map_err(|_| format!("--duration must be a non-negative number, got `{value}`"))?;
                if duration > MAX_DURATION {
                    return Err(format!(
                        "--duration must be at most {} seconds, got `{value}`",
                        MAX_DURATION.as_secs()
                    ));
                }
                options.duration = duration;
            }
            "--virtual" => options.pacing = Pacing::Virtual,
            "--upload-at" => push_intent(&mut options, &args, &mut idx, Intent::SimulateUpload)?,
            "--pause-at" => push_intent(&mut options, &args, &mut idx, Intent::StopMonitoring)?,
            "--resume-at" => push_intent(&mut options, &args, &mut idx, Intent::StartMonitoring)?,
            "--no-autostart" => options.autostart = Some(false),
            "--demo-history" => options.demo_history = true,
            "--json" => options.json = true,
            "--quiet" => options.quiet = true,
            unknown => {
                return Err(format!("Unknown argument: {unknown}\n\n{}", help_text()));
            }
        }
        idx += 1;
    }
    Ok(Some(options))
}

fn take_value<'a>(args: &'a [String], idx: &mut usize, flag: &str) -> Result<&'a str, String> {
    *idx += 1;
    args.get(*idx)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn push_intent(
    options: &mut Options,
    args: &[String],
    idx: &mut usize,
    intent: Intent,
) -> Result<(), String> {
    let flag = args[*idx].clone();
    let value = take_value(args, idx, &flag)?;
    let millis: u64 = value
        .parse()
        .map_err(|_| format!("{flag} expects milliseconds, got `{value}`"))?;
    options.script.push(ScheduledIntent {
        at: Duration::from_millis(millis),
        intent,
    });
    Ok(())
}

fn help_text() -> String {
    [
        "Usage: edgesense [options]",
        "",
        "Runs the simulated edge inference feed and prints each alert as it arrives.",
        "",
        "Options:",
        "  --config <path>       Read settings from <path> instead of the app directory",
        "  --config-home <dir>   Use <dir> as the base for the app directory",
        "  --seed <n>            Seed the generator for a reproducible run",
        "  --duration <secs>     Run length in seconds (default 30)",
        "  --virtual             Skip sleeping and jump between deadlines",
        "  --upload-at <ms>      Simulate an upload at <ms> into the run (repeatable)",
        "  --pause-at <ms>       Pause monitoring at <ms> (repeatable)",
        "  --resume-at <ms>      Resume monitoring at <ms> (repeatable)",
        "  --no-autostart        Start with monitoring paused",
        "  --demo-history        Open with the five demo alert rows",
        "  --json                Print the final snapshot as JSON instead of the feed",
        "  --quiet               Keep log lines off stderr",
        "  -h, --help            Show this help",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn defaults_run_thirty_seconds_in_real_time() {
        let options = parse_args(Vec::new()).unwrap().unwrap();
        assert_eq!(options.duration, DEFAULT_DURATION);
        assert_eq!(options.pacing, Pacing::RealTime);
        assert!(options.script.is_empty());
        assert_eq!(options.autostart, None);
    }

    #[test]
    fn parses_script_and_overrides() {
        let options = parse_args(args(&[
            "--virtual",
            "--seed",
            "9",
            "--duration",
            "12.5",
            "--upload-at",
            "100",
            "--pause-at",
            "4000",
            "--resume-at",
            "9000",
            "--no-autostart",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(options.pacing, Pacing::Virtual);
        assert_eq!(options.duration, Duration::from_millis(12_500));
        assert_eq!(
            options.script.iter().map(|s| s.intent).collect::<Vec<_>>(),
            [Intent::SimulateUpload, Intent::StopMonitoring, Intent::StartMonitoring]
        );

        let mut settings = AppSettings::default();
        options.apply_to(&mut settings);
        assert_eq!(settings.seed, Some(9));
        assert!(!settings.autostart);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse_args(args(&["--seed"])).is_err());
        assert!(parse_args(args(&["--seed", "x"])).is_err());
        assert!(parse_args(args(&["--duration", "-1"])).is_err());
        assert!(parse_args(args(&["--duration", "1e19"])).is_err());
        assert!(parse_args(args(&["--duration", "31536001"])).is_err());
        assert!(parse_args(args(&["--upload-at", "soon"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
    }
}
