//! Drives a simulator through wall-clock or virtual time for headless runs.

use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;

use super::simulator::MonitorSimulator;

/// How the driver maps virtual time onto the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep between deadlines so timers fire at wall-clock speed.
    RealTime,
    /// Jump straight from one deadline to the next.
    Virtual,
}

/// User intent replayed at a fixed offset from the start of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    StartMonitoring,
    StopMonitoring,
    SimulateUpload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledIntent {
    /// Offset from the start of the run.
    pub at: Duration,
    pub intent: Intent,
}

/// Counters for one driver run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub wakeups: usize,
    pub timers_fired: usize,
    pub intents_applied: usize,
    pub intents_rejected: usize,
}

pub struct Driver {
    pacing: Pacing,
    script: VecDeque<ScheduledIntent>,
}

impl Driver {
    pub fn new(pacing: Pacing, mut script: Vec<ScheduledIntent>) -> Self {
        script.sort_by_key(|scheduled| scheduled.at);
        Self {
            pacing,
            script: script.into(),
        }
    }

    /// Run for `duration`, waking at every timer deadline and scripted intent.
    ///
    /// `observe` runs after each wakeup so callers can drain subscriptions.
    /// Intents scheduled past the end of the run are left unapplied.
    pub fn run<R: Rng>(
        &mut self,
        sim: &mut MonitorSimulator<R>,
        duration: Duration,
        mut observe: impl FnMut(&MonitorSimulator<R>),
    ) -> RunReport {
        let origin = sim.elapsed();
        let end = origin.saturating_add(duration);
        let started = Instant::now();
        let mut report = RunReport::default();

        loop {
            let wake = [
                sim.next_deadline(),
                self.script
                    .front()
                    .map(|scheduled| origin.saturating_add(scheduled.at)),
            ]
            .into_iter()
            .flatten()
            .fold(end, Duration::min)
            .max(sim.elapsed());

            if self.pacing == Pacing::RealTime {
                // Deadlines past what `Instant` can represent are reached without sleeping.
                if let Some(target) = started.checked_add(wake - origin) {
                    thread::sleep(target.saturating_duration_since(Instant::now()));
                }
            }

            report.wakeups += 1;
            report.timers_fired += sim.advance_to(wake);
            while let Some(scheduled) = self.script.front().copied() {
                if origin.saturating_add(scheduled.at) > wake {
                    break;
                }
                self.script.pop_front();
                if apply(sim, scheduled.intent) {
                    report.intents_applied += 1;
                } else {
                    report.intents_rejected += 1;
                }
            }
            observe(sim);

            if wake >= end {
                break;
            }
        }
        tracing::debug!(?report, "Driver run finished");
        report
    }
}

fn apply<R: Rng>(sim: &mut MonitorSimulator<R>, intent: Intent) -> bool {
    match intent {
        Intent::StartMonitoring => sim.start_monitoring(),
        Intent::StopMonitoring => sim.stop_monitoring(),
        Intent::SimulateUpload => sim.simulate_upload().is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{SimulatorConfig, WallClock};

    fn simulator() -> MonitorSimulator {
        MonitorSimulator::seeded(SimulatorConfig::default(), 21, WallClock::local_now())
    }

    #[test]
    fn virtual_run_fires_every_tick_in_the_window() {
        let mut sim = simulator();
        sim.start_monitoring();
        let mut driver = Driver::new(Pacing::Virtual, Vec::new());
        let report = driver.run(&mut sim, Duration::from_secs(30), |_| {});
        assert_eq!(report.timers_fired, 10);
        assert_eq!(sim.alert_log().len(), 10);
        assert_eq!(sim.elapsed(), Duration::from_secs(30));
    }

    #[test]
    fn scripted_intents_apply_in_time_order() {
        let mut sim = simulator();
        let script = vec![
            ScheduledIntent {
                at: Duration::from_millis(7_000),
                intent: Intent::StopMonitoring,
            },
            ScheduledIntent {
                at: Duration::ZERO,
                intent: Intent::StartMonitoring,
            },
            ScheduledIntent {
                at: Duration::from_millis(1_000),
                intent: Intent::SimulateUpload,
            },
            ScheduledIntent {
                at: Duration::from_millis(2_000),
                intent: Intent::SimulateUpload,
            },
        ];
        let mut driver = Driver::new(Pacing::Virtual, script);
        let report = driver.run(&mut sim, Duration::from_secs(20), |_| {});
        assert_eq!(report.intents_applied, 3);
        assert_eq!(report.intents_rejected, 1);
        assert_eq!(sim.stats().ticks, 2);
        assert_eq!(sim.stats().uploads_completed, 1);
        assert!(!sim.is_monitoring());
    }

    #[test]
    fn intents_past_the_window_are_left_pending() {
        let mut sim = simulator();
        let script = vec![ScheduledIntent {
            at: Duration::from_secs(5),
            intent: Intent::StartMonitoring,
        }];
        let mut driver = Driver::new(Pacing::Virtual, script);
        let report = driver.run(&mut sim, Duration::from_secs(1), |_| {});
        assert_eq!(report.intents_applied, 0);
        assert!(!sim.is_monitoring());
    }

    #[test]
    fn real_time_run_sleeps_until_the_window_closes() {
        let mut sim = simulator();
        let mut driver = Driver::new(Pacing::RealTime, Vec::new());
        let started = Instant::now();
        let mut observed = 0;
        driver.run(&mut sim, Duration::from_millis(30), |_| observed += 1);
        assert!(started.elapsed() >= Duration::from_millis(30));
        assert_eq!(observed, 1);
        assert_eq!(sim.elapsed(), Duration::from_millis(30));
    }

    #[test]
    fn real_time_run_past_instant_range_returns_without_sleeping() {
        let mut sim = simulator();
        let mut driver = Driver::new(Pacing::RealTime, Vec::new());
        let window = Duration::try_from_secs_f64(1e19).unwrap();
        let started = Instant::now();
        let report = driver.run(&mut sim, window, |_| {});
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(report.wakeups, 1);
        assert_eq!(sim.elapsed(), window);
    }
}
