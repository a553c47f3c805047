use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::monitor::{DeviceRanges, OutcomeProfile, SimulatorConfig, ValueRange};

use super::defaults::{
    clamp_interval_ms, clamp_log_capacity, clamp_unit, default_inference_ms_max,
    default_inference_ms_min, default_log_capacity, default_memory_mb_max, default_memory_mb_min,
    default_tick_anomaly_probability, default_tick_confidence_max, default_tick_confidence_min,
    default_tick_interval_ms, default_true, default_upload_anomaly_probability,
    default_upload_confidence_max, default_upload_confidence_min, default_upload_delay_ms, ordered,
};

/// Settings stored in `config.toml`.
///
/// Config keys (TOML): `seed`, `autostart`, `seed_demo_history`, `monitor`,
/// `upload`, `device`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Fixed generator seed; omitted for entropy-seeded runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Start the periodic feed as soon as the host comes up.
    #[serde(default = "default_true")]
    pub autostart: bool,
    /// Open with the five demo alert rows instead of an empty history.
    #[serde(default)]
    pub seed_demo_history: bool,
    #[serde(default)]
    pub monitor: MonitorSettings,
    #[serde(default)]
    pub upload: UploadSettings,
    #[serde(default)]
    pub device: DeviceSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            seed: None,
            autostart: default_true(),
            seed_demo_history: false,
            monitor: MonitorSettings::default(),
            upload: UploadSettings::default(),
            device: DeviceSettings::default(),
        }
    }
}

/// Periodic tick settings.
///
/// Config keys: `tick_interval_ms`, `log_capacity`, `anomaly_probability`,
/// `confidence_min`, `confidence_max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSettings {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
    #[serde(default = "default_tick_anomaly_probability")]
    pub anomaly_probability: f64,
    #[serde(default = "default_tick_confidence_min")]
    pub confidence_min: f64,
    #[serde(default = "default_tick_confidence_max")]
    pub confidence_max: f64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            log_capacity: default_log_capacity(),
            anomaly_probability: default_tick_anomaly_probability(),
            confidence_min: default_tick_confidence_min(),
            confidence_max: default_tick_confidence_max(),
        }
    }
}

/// Manual upload settings.
///
/// Config keys: `delay_ms`, `anomaly_probability`, `confidence_min`, `confidence_max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadSettings {
    #[serde(default = "default_upload_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_upload_anomaly_probability")]
    pub anomaly_probability: f64,
    #[serde(default = "default_upload_confidence_min")]
    pub confidence_min: f64,
    #[serde(default = "default_upload_confidence_max")]
    pub confidence_max: f64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            delay_ms: default_upload_delay_ms(),
            anomaly_probability: default_upload_anomaly_probability(),
            confidence_min: default_upload_confidence_min(),
            confidence_max: default_upload_confidence_max(),
        }
    }
}

/// Ranges for the device gauges.
///
/// Config keys: `inference_ms_min`, `inference_ms_max`, `memory_mb_min`, `memory_mb_max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSettings {
    #[serde(default = "default_inference_ms_min")]
    pub inference_ms_min: f64,
    #[serde(default = "default_inference_ms_max")]
    pub inference_ms_max: f64,
    #[serde(default = "default_memory_mb_min")]
    pub memory_mb_min: f64,
    #[serde(default = "default_memory_mb_max")]
    pub memory_mb_max: f64,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            inference_ms_min: default_inference_ms_min(),
            inference_ms_max: default_inference_ms_max(),
            memory_mb_min: default_memory_mb_min(),
            memory_mb_max: default_memory_mb_max(),
        }
    }
}

impl AppSettings {
    /// Reject values no clamping can repair.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("monitor.anomaly_probability", self.monitor.anomaly_probability),
            ("monitor.confidence_min", self.monitor.confidence_min),
            ("monitor.confidence_max", self.monitor.confidence_max),
            ("upload.anomaly_probability", self.upload.anomaly_probability),
            ("upload.confidence_min", self.upload.confidence_min),
            ("upload.confidence_max", self.upload.confidence_max),
            ("device.inference_ms_min", self.device.inference_ms_min),
            ("device.inference_ms_max", self.device.inference_ms_max),
            ("device.memory_mb_min", self.device.memory_mb_min),
            ("device.memory_mb_max", self.device.memory_mb_max),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a finite number, got {value}"),
                });
            }
        }
        Ok(())
    }

    /// Clamp probabilities and confidences into `[0, 1]`, order min/max pairs,
    /// and keep intervals and the log capacity positive.
    pub fn normalized(mut self) -> Self {
        let monitor = &mut self.monitor;
        monitor.tick_interval_ms = clamp_interval_ms(monitor.tick_interval_ms);
        monitor.log_capacity = clamp_log_capacity(monitor.log_capacity);
        monitor.anomaly_probability = clamp_unit(monitor.anomaly_probability);
        (monitor.confidence_min, monitor.confidence_max) = ordered(
            clamp_unit(monitor.confidence_min),
            clamp_unit(monitor.confidence_max),
        );

        let upload = &mut self.upload;
        upload.delay_ms = clamp_interval_ms(upload.delay_ms);
        upload.anomaly_probability = clamp_unit(upload.anomaly_probability);
        (upload.confidence_min, upload.confidence_max) = ordered(
            clamp_unit(upload.confidence_min),
            clamp_unit(upload.confidence_max),
        );

        let device = &mut self.device;
        (device.inference_ms_min, device.inference_ms_max) =
            ordered(device.inference_ms_min.max(0.0), device.inference_ms_max.max(0.0));
        (device.memory_mb_min, device.memory_mb_max) =
            ordered(device.memory_mb_min.max(0.0), device.memory_mb_max.max(0.0));
        self
    }

    /// Simulator tunables derived from these settings.
    pub fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig {
            tick_interval: Duration::from_millis(self.monitor.tick_interval_ms),
            upload_delay: Duration::from_millis(self.upload.delay_ms),
            log_capacity: self.monitor.log_capacity,
            tick_profile: OutcomeProfile::new(
                self.monitor.anomaly_probability,
                ValueRange::new(self.monitor.confidence_min, self.monitor.confidence_max),
            ),
            upload_profile: OutcomeProfile::new(
                self.upload.anomaly_probability,
                ValueRange::new(self.upload.confidence_min, self.upload.confidence_max),
            ),
            device_ranges: DeviceRanges {
                inference_ms: ValueRange::new(
                    self.device.inference_ms_min,
                    self.device.inference_ms_max,
                ),
                memory_mb: ValueRange::new(self.device.memory_mb_min, self.device.memory_mb_max),
            },
            ..SimulatorConfig::default()
        }
    }
}

/// Errors that can occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No suitable config directory available")]
    NoConfigDir,
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config for {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
