//! Simulated live monitoring feed for the edge deployment view.
//!
//! A periodic tick draws a classification, redraws the device gauges and
//! prepends an alert to a bounded history. A manual upload shows
//! `processing` for a fixed delay before settling on its own outcome.

pub mod alert_log;
pub mod clock;
pub mod draw;
pub mod driver;
pub mod events;
pub mod scheduler;
pub mod simulator;
pub mod types;

pub use alert_log::{AlertLog, DEFAULT_LOG_CAPACITY};
pub use clock::WallClock;
pub use draw::{DeviceRanges, OutcomeProfile, ValueRange};
pub use driver::{Driver, Intent, Pacing, RunReport, ScheduledIntent};
pub use events::{FeedStats, MonitorEvent, MonitorSnapshot, UploadError};
pub use simulator::{
    DEFAULT_TICK_INTERVAL, DEFAULT_UPLOAD_DELAY, MonitorSimulator, SimulatorConfig, demo_history,
};
pub use types::{
    AlertLogEntry, AlertStatus, DeviceMetrics, DeviceProfile, InferenceResult, InferenceStatus,
    Outcome,
};
