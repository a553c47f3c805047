use std::time::Duration;

use super::*;
use crate::monitor::{DEFAULT_LOG_CAPACITY, MonitorSimulator, OutcomeProfile, SimulatorConfig, WallClock};
use tempfile::tempdir;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let settings = load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
    assert_eq!(settings, AppSettings::default());
    assert!(settings.autostart);
    assert_eq!(settings.seed, None);
}

#[test]
fn default_settings_map_to_default_simulator_config() {
    assert_eq!(
        AppSettings::default().simulator_config(),
        SimulatorConfig::default()
    );
}

#[test]
fn saves_and_reloads_settings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
    let settings = AppSettings {
        seed: Some(1234),
        autostart: false,
        seed_demo_history: true,
        monitor: MonitorSettings {
            tick_interval_ms: 500,
            ..MonitorSettings::default()
        },
        ..AppSettings::default()
    };
    save_to_path(&settings, &path).unwrap();
    let loaded = load_from(&path).unwrap();
    assert_eq!(loaded, settings);

    let leftovers = std::fs::read_dir(path.parent().unwrap())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp-"))
        .count();
    assert_eq!(leftovers, 0);
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        "seed = 7\n\n[upload]\ndelay_ms = 250\n\n[monitor]\nanomaly_probability = 0.5\n",
    )
    .unwrap();
    let settings = load_from(&path).unwrap();
    assert_eq!(settings.seed, Some(7));
    assert!(settings.autostart);
    assert_eq!(settings.upload.delay_ms, 250);
    assert_eq!(settings.upload.anomaly_probability, 0.30);
    assert_eq!(settings.monitor.anomaly_probability, 0.5);
    assert_eq!(settings.monitor.tick_interval_ms, 3_000);

    let config = settings.simulator_config();
    assert_eq!(config.upload_delay, Duration::from_millis(250));
    assert_eq!(config.upload_profile, OutcomeProfile::UPLOAD);
    assert_eq!(config.tick_profile.anomaly_probability, 0.5);
}

#[test]
fn out_of_range_values_are_normalized_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        "[monitor]\ntick_interval_ms = 0\nlog_capacity = 0\nanomaly_probability = 1.5\n\
         confidence_min = 1.2\nconfidence_max = 0.4\n\n\
         [device]\nmemory_mb_min = 60.0\nmemory_mb_max = 30.0\n",
    )
    .unwrap();
    let settings = load_from(&path).unwrap();
    assert_eq!(settings.monitor.tick_interval_ms, 1);
    assert_eq!(settings.monitor.log_capacity, 1);
    assert_eq!(settings.monitor.anomaly_probability, 1.0);
    assert_eq!(settings.monitor.confidence_min, 0.4);
    assert_eq!(settings.monitor.confidence_max, 1.0);
    assert_eq!(settings.device.memory_mb_min, 30.0);
    assert_eq!(settings.device.memory_mb_max, 60.0);
}

#[test]
fn oversized_log_capacity_is_capped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[monitor]\nlog_capacity = 9000000000000000000\n").unwrap();
    let settings = load_from(&path).unwrap();
    assert_eq!(settings.monitor.log_capacity, DEFAULT_LOG_CAPACITY);

    let mut sim =
        MonitorSimulator::seeded(settings.simulator_config(), 5, WallClock::local_now());
    sim.start_monitoring();
    sim.advance(Duration::from_millis(settings.monitor.tick_interval_ms) * 12);
    assert_eq!(sim.alert_log().len(), DEFAULT_LOG_CAPACITY);
}

#[test]
fn non_finite_values_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[upload]\nconfidence_max = nan\n").unwrap();
    let err = load_from(&path).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "upload.confidence_max",
            ..
        }
    ));
}

#[test]
fn malformed_toml_reports_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "autostart = \"sometimes\"\n").unwrap();
    let err = load_from(&path).unwrap_err();
    match err {
        ConfigError::ParseToml { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}
