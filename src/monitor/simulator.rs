//! Live monitoring simulator: the state container behind the edge widget.
//!
//! The simulator owns the displayed inference result, the bounded alert
//! history and the device gauges. Time is virtual: nothing fires until the
//! host calls [`MonitorSimulator::advance`] (directly in tests, or through
//! [`crate::monitor::driver::Driver`] for wall-clock runs).

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::alert_log::{AlertLog, DEFAULT_LOG_CAPACITY};
use super::clock::WallClock;
use super::draw::{self, DeviceRanges, OutcomeProfile};
use super::events::{FeedStats, MonitorEvent, MonitorSnapshot, UploadError};
use super::scheduler::{Scheduler, TimerKind};
use super::types::{
    AlertLogEntry, AlertStatus, DeviceMetrics, DeviceProfile, InferenceResult, InferenceStatus,
};

/// Default cadence of the monitoring tick.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(3_000);
/// Default processing delay of a manual upload.
pub const DEFAULT_UPLOAD_DELAY: Duration = Duration::from_millis(1_500);

/// Tunables for one simulator instance.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    pub tick_interval: Duration,
    pub upload_delay: Duration,
    pub log_capacity: usize,
    pub tick_profile: OutcomeProfile,
    pub upload_profile: OutcomeProfile,
    pub device_ranges: DeviceRanges,
    pub device: DeviceProfile,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            upload_delay: DEFAULT_UPLOAD_DELAY,
            log_capacity: DEFAULT_LOG_CAPACITY,
            tick_profile: OutcomeProfile::TICK,
            upload_profile: OutcomeProfile::UPLOAD,
            device_ranges: DeviceRanges::default(),
            device: DeviceProfile::RASPBERRY_PI_4,
        }
    }
}

/// Simulated edge inference device.
pub struct MonitorSimulator<R = StdRng> {
    config: SimulatorConfig,
    rng: R,
    clock: WallClock,
    scheduler: Scheduler,
    current: InferenceResult,
    metrics: DeviceMetrics,
    log: AlertLog,
    stats: FeedStats,
    last_id: u64,
    subscribers: Vec<Sender<MonitorEvent>>,
}

impl MonitorSimulator<StdRng> {
    /// Reproducible simulator: same seed and anchor, same feed.
    pub fn seeded(config: SimulatorConfig, seed: u64, clock: WallClock) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed), clock)
    }

    /// Simulator seeded from the thread-local generator, anchored at local now.
    pub fn from_entropy(config: SimulatorConfig) -> Self {
        let rng = StdRng::from_rng(&mut rand::rng());
        Self::with_rng(config, rng, WallClock::local_now())
    }
}

impl<R: Rng> MonitorSimulator<R> {
    /// Fresh simulator: idle result, empty log, monitoring off.
    pub fn with_rng(config: SimulatorConfig, rng: R, clock: WallClock) -> Self {
        let log = AlertLog::new(config.log_capacity);
        Self {
            config,
            rng,
            clock,
            scheduler: Scheduler::new(),
            current: InferenceResult::IDLE,
            metrics: DeviceMetrics::default(),
            log,
            stats: FeedStats::default(),
            last_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Replace the history with the five demo rows the dashboard opens with.
    pub fn seed_demo_history(&mut self) {
        let mut log = AlertLog::new(self.config.log_capacity);
        for entry in demo_history() {
            self.last_id = self.last_id.max(entry.id);
            log.push(entry);
        }
        self.log = log;
    }

    /// Enable the periodic generator. Returns `false` when already running.
    pub fn start_monitoring(&mut self) -> bool {
        if !self.scheduler.start_periodic(self.config.tick_interval) {
            return false;
        }
        tracing::info!(
            interval_ms = u64::try_from(self.config.tick_interval.as_millis()).unwrap_or(u64::MAX),
            "Live monitoring started"
        );
        self.publish(MonitorEvent::MonitoringChanged(true));
        true
    }

    /// Pause the periodic generator; the result and log stay as they are.
    ///
    /// A pending upload still completes. Returns `false` when already paused.
    pub fn stop_monitoring(&mut self) -> bool {
        if !self.scheduler.cancel_periodic() {
            return false;
        }
        tracing::info!("Live monitoring paused");
        self.publish(MonitorEvent::MonitoringChanged(false));
        true
    }

    /// Show `processing` now and settle on a drawn outcome after the upload delay.
    ///
    /// Refused while a previous upload is still pending, even if a tick has
    /// since replaced the `processing` display.
    pub fn simulate_upload(&mut self) -> Result<(), UploadError> {
        if !self.scheduler.schedule_once(self.config.upload_delay) {
            self.stats.uploads_rejected += 1;
            tracing::warn!("Upload rejected: previous upload still processing");
            self.publish(MonitorEvent::UploadRejected);
            return Err(UploadError::AlreadyProcessing);
        }
        self.set_current(InferenceResult::PROCESSING);
        tracing::debug!(
            delay_ms = u64::try_from(self.config.upload_delay.as_millis()).unwrap_or(u64::MAX),
            "Simulated upload accepted"
        );
        Ok(())
    }

    /// Move virtual time forward, firing every timer that falls due.
    ///
    /// Returns the number of timers fired.
    pub fn advance(&mut self, delta: Duration) -> usize {
        let until = self.scheduler.now() + delta;
        self.advance_to(until)
    }

    /// Move virtual time to `until` (no-op if it lies in the past).
    pub fn advance_to(&mut self, until: Duration) -> usize {
        let mut fired = 0;
        while let Some(kind) = self.scheduler.pop_due(until) {
            match kind {
                TimerKind::Tick => self.tick(),
                TimerKind::UploadComplete => self.complete_upload(),
            }
            fired += 1;
        }
        self.scheduler.settle(until);
        fired
    }

    /// Absolute virtual time of the next timer, if any is armed.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    pub fn elapsed(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn current(&self) -> InferenceResult {
        self.current
    }

    pub fn alert_log(&self) -> &AlertLog {
        &self.log
    }

    pub fn metrics(&self) -> DeviceMetrics {
        self.metrics
    }

    pub fn device(&self) -> DeviceProfile {
        self.config.device
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn is_monitoring(&self) -> bool {
        self.scheduler.is_periodic_armed()
    }

    pub fn is_upload_pending(&self) -> bool {
        self.scheduler.is_once_pending()
    }

    pub fn stats(&self) -> FeedStats {
        self.stats
    }

    /// Register an observer. Dropping the receiver unsubscribes it.
    pub fn subscribe(&mut self) -> Receiver<MonitorEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        MonitorSnapshot {
            monitoring: self.is_monitoring(),
            upload_pending: self.is_upload_pending(),
            elapsed: self.elapsed(),
            current: self.current,
            metrics: self.metrics,
            device: self.config.device,
            alerts: self.log.to_vec(),
            stats: self.stats,
        }
    }

    /// Tear down: cancel both timers and hand back the final state.
    pub fn shutdown(mut self) -> MonitorSnapshot {
        self.scheduler.cancel_all();
        tracing::info!(
            ticks = self.stats.ticks,
            uploads = self.stats.uploads_completed,
            "Live monitoring shut down"
        );
        self.snapshot()
    }

    fn tick(&mut self) {
        let outcome = draw::draw_outcome(&self.config.tick_profile, &mut self.rng);
        self.metrics = draw::draw_metrics(&self.config.device_ranges, &mut self.rng);
        let filename = draw::draw_filename(&mut self.rng);
        let elapsed = self.scheduler.now();
        let entry = AlertLogEntry {
            id: self.next_id(elapsed),
            timestamp: self.clock.display_time(elapsed),
            status: outcome.status,
            confidence: outcome.confidence,
            filename,
        };

        self.stats.ticks += 1;
        if outcome.status.is_anomaly() {
            self.stats.tick_anomalies += 1;
            tracing::warn!(
                file = %entry.filename,
                confidence = outcome.confidence,
                "Anomaly detected"
            );
        } else {
            tracing::debug!(
                file = %entry.filename,
                confidence = outcome.confidence,
                "Normal operation"
            );
        }

        self.publish(MonitorEvent::MetricsChanged(self.metrics));
        self.log.push(entry.clone());
        self.publish(MonitorEvent::AlertLogged(entry));
        self.set_current(outcome.into());
    }

    fn complete_upload(&mut self) {
        let outcome = draw::draw_outcome(&self.config.upload_profile, &mut self.rng);
        self.stats.uploads_completed += 1;
        if outcome.status.is_anomaly() {
            self.stats.upload_anomalies += 1;
        }
        tracing::debug!(
            status = InferenceStatus::from(outcome.status).label(),
            confidence = outcome.confidence,
            "Simulated upload classified"
        );
        self.set_current(outcome.into());
    }

    fn set_current(&mut self, result: InferenceResult) {
        self.current = result;
        self.publish(MonitorEvent::ResultChanged(result));
    }

    fn next_id(&mut self, elapsed: Duration) -> u64 {
        let id = self.clock.unix_millis(elapsed).max(self.last_id + 1);
        self.last_id = id;
        id
    }

    fn publish(&mut self, event: MonitorEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

/// Demo rows shown before the first tick, oldest first.
pub fn demo_history() -> Vec<AlertLogEntry> {
    const ROWS: [(u64, &str, AlertStatus, f64); 5] = [
        (1, "14:32:15", AlertStatus::Normal, 0.94),
        (2, "14:32:18", AlertStatus::Normal, 0.91),
        (3, "14:32:21", AlertStatus::Anomaly, 0.87),
        (4, "14:32:24", AlertStatus::Normal, 0.96),
        (5, "14:32:27", AlertStatus::Normal, 0.89),
    ];
    ROWS.iter()
        .map(|&(id, timestamp, status, confidence)| AlertLogEntry {
            id,
            timestamp: timestamp.to_string(),
            status,
            confidence,
            filename: draw::clip_filename(id as u32),
        })
        .collect()
}
