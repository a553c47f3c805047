//! Persistent settings for the monitor host, stored as TOML in the app directory.

mod defaults;
mod io;
mod types;

#[cfg(test)]
mod tests;

/// Default filename used to store the settings.
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub use io::{config_path, load_from, load_or_default, save, save_to_path};
pub use types::{AppSettings, ConfigError, DeviceSettings, MonitorSettings, UploadSettings};
