//! Library exports for the EdgeSense monitor binaries, tests and benchmarks.
/// Per-user application directories.
pub mod app_dirs;
/// Persistent TOML settings.
pub mod config;
/// Static dashboard datasets and navigation state.
pub mod dashboard;
/// Tracing setup shared by the binaries.
pub mod logging;
/// Simulated live inference feed.
pub mod monitor;
