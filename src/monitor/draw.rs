//! Random draws behind the simulated feed.
//!
//! Every function takes the generator explicitly so callers decide between a
//! seeded `StdRng` for reproducible runs and an entropy-seeded one.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::{AlertStatus, DeviceMetrics, Outcome};

/// Closed interval `[min, max]` sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub const fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.random_range(self.min..=self.max)
    }
}

/// Probability model for one kind of simulated classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProfile {
    pub anomaly_probability: f64,
    pub confidence: ValueRange,
}

impl OutcomeProfile {
    /// Periodic monitoring ticks.
    pub const TICK: Self = Self {
        anomaly_probability: 0.15,
        confidence: ValueRange::new(0.82, 0.99),
    };

    /// Manual uploads.
    pub const UPLOAD: Self = Self {
        anomaly_probability: 0.30,
        confidence: ValueRange::new(0.85, 0.99),
    };

    /// Build a profile with the probability and confidence clamped into `[0, 1]`.
    pub fn new(anomaly_probability: f64, confidence: ValueRange) -> Self {
        Self {
            anomaly_probability: anomaly_probability.clamp(0.0, 1.0),
            confidence: ValueRange::new(
                confidence.min.clamp(0.0, 1.0),
                confidence.max.clamp(0.0, 1.0),
            ),
        }
    }
}

/// Ranges for the device gauges redrawn on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceRanges {
    pub inference_ms: ValueRange,
    pub memory_mb: ValueRange,
}

impl Default for DeviceRanges {
    fn default() -> Self {
        Self {
            inference_ms: ValueRange::new(16.0, 24.0),
            memory_mb: ValueRange::new(38.0, 50.0),
        }
    }
}

/// Highest clip number used in synthetic filenames.
pub const MAX_CLIP_NUMBER: u32 = 999;

/// Draw the outcome first, then its confidence.
pub fn draw_outcome<R: Rng + ?Sized>(profile: &OutcomeProfile, rng: &mut R) -> Outcome {
    let status = if rng.random_bool(profile.anomaly_probability) {
        AlertStatus::Anomaly
    } else {
        AlertStatus::Normal
    };
    Outcome {
        status,
        confidence: profile.confidence.sample(rng),
    }
}

pub fn draw_metrics<R: Rng + ?Sized>(ranges: &DeviceRanges, rng: &mut R) -> DeviceMetrics {
    DeviceMetrics {
        inference_ms: ranges.inference_ms.sample(rng),
        memory_mb: ranges.memory_mb.sample(rng),
    }
}

/// `valve_NNN.wav` with a zero-padded clip number in `[0, 999]`.
pub fn draw_filename<R: Rng + ?Sized>(rng: &mut R) -> String {
    clip_filename(rng.random_range(0..=MAX_CLIP_NUMBER))
}

pub(crate) fn clip_filename(number: u32) -> String {
    format!("valve_{number:03}.wav")
}
