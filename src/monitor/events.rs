use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use super::types::{AlertLogEntry, DeviceMetrics, DeviceProfile, InferenceResult};

/// Change notifications delivered to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent {
    /// The displayed inference result changed.
    ResultChanged(InferenceResult),
    /// A tick appended a new alert to the history.
    AlertLogged(AlertLogEntry),
    /// A tick redrew the device gauges.
    MetricsChanged(DeviceMetrics),
    /// Monitoring was started (`true`) or paused (`false`).
    MonitoringChanged(bool),
    /// A manual upload was refused because another one is still pending.
    UploadRejected,
}

/// Errors surfaced by the user-intent operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UploadError {
    /// A previous upload has not produced its result yet.
    #[error("An upload is already being processed")]
    AlreadyProcessing,
}

/// Running totals since the simulator was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeedStats {
    pub ticks: u64,
    pub tick_anomalies: u64,
    pub uploads_completed: u64,
    pub upload_anomalies: u64,
    pub uploads_rejected: u64,
}

impl FeedStats {
    pub fn tick_anomaly_rate(&self) -> Option<f64> {
        rate(self.tick_anomalies, self.ticks)
    }

    pub fn upload_anomaly_rate(&self) -> Option<f64> {
        rate(self.upload_anomalies, self.uploads_completed)
    }
}

fn rate(hits: u64, total: u64) -> Option<f64> {
    (total > 0).then(|| hits as f64 / total as f64)
}

/// Serializable view of everything the presentation layer reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorSnapshot {
    pub monitoring: bool,
    pub upload_pending: bool,
    #[serde(serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    pub current: InferenceResult,
    pub metrics: DeviceMetrics,
    pub device: DeviceProfile,
    pub alerts: Vec<AlertLogEntry>,
    pub stats: FeedStats,
}

fn serialize_millis<S: serde::Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
}
