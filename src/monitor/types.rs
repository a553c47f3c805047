//! Value types shared by the monitor feed and its observers.

use serde::{Deserialize, Serialize};

/// Display state of the live inference widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InferenceStatus {
    /// Nothing has been classified yet.
    #[default]
    Idle,
    /// A simulated upload is waiting for its result.
    Processing,
    /// The last outcome was classified as normal operation.
    Normal,
    /// The last outcome was classified as an anomaly.
    Anomaly,
}

impl InferenceStatus {
    /// True for the two classification outcomes that carry a confidence.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Normal | Self::Anomaly)
    }

    /// Lowercase label used in logs and JSON.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Processing => "processing",
            Self::Normal => "normal",
            Self::Anomaly => "anomaly",
        }
    }
}

/// Classification outcome recorded in the alert log.
///
/// Only settled outcomes can be logged, so the idle and processing states
/// have no counterpart here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Normal,
    Anomaly,
}

impl AlertStatus {
    pub fn is_anomaly(self) -> bool {
        matches!(self, Self::Anomaly)
    }
}

impl From<AlertStatus> for InferenceStatus {
    fn from(status: AlertStatus) -> Self {
        match status {
            AlertStatus::Normal => Self::Normal,
            AlertStatus::Anomaly => Self::Anomaly,
        }
    }
}

/// A drawn classification: outcome plus confidence in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub status: AlertStatus,
    pub confidence: f64,
}

/// The result currently shown by the live inference widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InferenceResult {
    pub status: InferenceStatus,
    /// Meaningful only when `status` is settled; zero otherwise.
    pub confidence: f64,
}

impl InferenceResult {
    /// Initial state before any tick or upload.
    pub const IDLE: Self = Self {
        status: InferenceStatus::Idle,
        confidence: 0.0,
    };

    /// Placeholder shown while an upload is in flight.
    pub const PROCESSING: Self = Self {
        status: InferenceStatus::Processing,
        confidence: 0.0,
    };

    /// Percentage with one decimal (`"94.3%"`), or `None` when not settled.
    pub fn confidence_percent(&self) -> Option<String> {
        self.status
            .is_settled()
            .then(|| format!("{:.1}%", self.confidence * 100.0))
    }
}

impl Default for InferenceResult {
    fn default() -> Self {
        Self::IDLE
    }
}

impl From<Outcome> for InferenceResult {
    fn from(outcome: Outcome) -> Self {
        Self {
            status: outcome.status.into(),
            confidence: outcome.confidence,
        }
    }
}

/// One row of the alert history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertLogEntry {
    /// Time-based key, strictly increasing within one simulator.
    pub id: u64,
    /// Local wall-clock time, `HH:MM:SS`.
    pub timestamp: String,
    pub status: AlertStatus,
    pub confidence: f64,
    /// Synthetic clip label such as `valve_042.wav`.
    pub filename: String,
}

impl AlertLogEntry {
    /// Whole-percent confidence as shown in the history list (`"94%"`).
    pub fn confidence_label(&self) -> String {
        format!("{:.0}%", self.confidence * 100.0)
    }
}

/// Device gauges redrawn on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceMetrics {
    pub inference_ms: f64,
    pub memory_mb: f64,
}

impl DeviceMetrics {
    /// `"18.0ms"`
    pub fn inference_label(&self) -> String {
        format!("{:.1}ms", self.inference_ms)
    }

    /// `"42 MB"`
    pub fn memory_label(&self) -> String {
        format!("{:.0} MB", self.memory_mb)
    }
}

impl Default for DeviceMetrics {
    fn default() -> Self {
        Self {
            inference_ms: 18.0,
            memory_mb: 42.0,
        }
    }
}

/// Static facts about the simulated edge device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeviceProfile {
    pub name: &'static str,
    pub mode: &'static str,
    pub model_size_mb: f64,
    pub throughput_per_sec: u32,
}

impl DeviceProfile {
    pub const RASPBERRY_PI_4: Self = Self {
        name: "Raspberry Pi 4 Model B",
        mode: "CPU Mode",
        model_size_mb: 17.6,
        throughput_per_sec: 55,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_classification_outcomes_are_settled() {
        assert!(!InferenceStatus::Idle.is_settled());
        assert!(!InferenceStatus::Processing.is_settled());
        assert!(InferenceStatus::Normal.is_settled());
        assert!(InferenceStatus::Anomaly.is_settled());
    }

    #[test]
    fn confidence_percent_hidden_until_settled() {
        assert_eq!(InferenceResult::IDLE.confidence_percent(), None);
        assert_eq!(InferenceResult::PROCESSING.confidence_percent(), None);
        let result = InferenceResult::from(Outcome {
            status: AlertStatus::Anomaly,
            confidence: 0.9134,
        });
        assert_eq!(result.status, InferenceStatus::Anomaly);
        assert_eq!(result.confidence_percent().as_deref(), Some("91.3%"));
    }

    #[test]
    fn display_labels_match_widget_format() {
        let entry = AlertLogEntry {
            id: 1,
            timestamp: "14:32:15".into(),
            status: AlertStatus::Normal,
            confidence: 0.94,
            filename: "valve_001.wav".into(),
        };
        assert_eq!(entry.confidence_label(), "94%");
        let metrics = DeviceMetrics::default();
        assert_eq!(metrics.inference_label(), "18.0ms");
        assert_eq!(metrics.memory_label(), "42 MB");
    }

    #[test]
    fn statuses_serialize_lowercase() {
        let json = serde_json::to_string(&InferenceStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
        let json = serde_json::to_string(&AlertStatus::Anomaly).unwrap();
        assert_eq!(json, "\"anomaly\"");
    }
}
