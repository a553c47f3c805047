use crate::monitor::DEFAULT_LOG_CAPACITY;

pub(super) const MIN_INTERVAL_MS: u64 = 1;

pub(super) fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

pub(super) fn clamp_interval_ms(value: u64) -> u64 {
    value.max(MIN_INTERVAL_MS)
}

/// The history never holds more than the dashboard's ten rows.
pub(super) fn clamp_log_capacity(value: usize) -> usize {
    value.clamp(1, DEFAULT_LOG_CAPACITY)
}

/// Put a `(min, max)` pair back in order.
pub(super) fn ordered(min: f64, max: f64) -> (f64, f64) {
    if min <= max { (min, max) } else { (max, min) }
}

pub(super) fn default_true() -> bool {
    true
}

pub(super) fn default_tick_interval_ms() -> u64 {
    3_000
}

pub(super) fn default_log_capacity() -> usize {
    DEFAULT_LOG_CAPACITY
}

pub(super) fn default_tick_anomaly_probability() -> f64 {
    0.15
}

pub(super) fn default_tick_confidence_min() -> f64 {
    0.82
}

pub(super) fn default_tick_confidence_max() -> f64 {
    0.99
}

pub(super) fn default_upload_delay_ms() -> u64 {
    1_500
}

pub(super) fn default_upload_anomaly_probability() -> f64 {
    0.30
}

pub(super) fn default_upload_confidence_min() -> f64 {
    0.85
}

pub(super) fn default_upload_confidence_max() -> f64 {
    0.99
}

pub(super) fn default_inference_ms_min() -> f64 {
    16.0
}

pub(super) fn default_inference_ms_max() -> f64 {
    24.0
}

pub(super) fn default_memory_mb_min() -> f64 {
    38.0
}

pub(super) fn default_memory_mb_max() -> f64 {
    50.0
}
