//! Tracing setup for the monitor binaries.
//!
//! Every launch gets its own `edgesense_<timestamp>.log` under the app's
//! `logs` directory; stderr mirroring is optional so stdout can carry the
//! alert feed untouched.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use time::{
    OffsetDateTime, UtcOffset,
    format_description::{BorrowedFormatItem, FormatItem},
    macros::format_description,
};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

use crate::app_dirs;

/// Launch logs kept on disk, newest first.
const RETAINED_LAUNCH_LOGS: usize = 10;
const LOG_FILE_PREFIX: &str = "edgesense_";
const LOG_FILE_EXTENSION: &str = "log";
const FILE_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
const LINE_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

static FLUSH_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Log directory unavailable: {0}")]
    Directory(#[from] app_dirs::AppDirError),
    #[error("Could not stamp log file name: {0}")]
    Stamp(#[from] time::error::Format),
    #[error("Could not open launch log: {0}")]
    Open(#[from] InitError),
    #[error("Could not list launch logs in {path}: {source}")]
    List {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not delete stale launch log {path}: {source}")]
    Prune {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Another tracing subscriber is already installed: {0}")]
    Install(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Knobs for the global subscriber.
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Mirror log lines to stderr in addition to the launch log.
    pub console: bool,
    /// Filter directive used when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            console: true,
            default_filter: "info".to_string(),
        }
    }
}

/// Install the global subscriber once per process.
///
/// Later calls return `Ok(())` without touching the installed subscriber.
pub fn init(options: &LogOptions) -> Result<(), LoggingError> {
    if FLUSH_GUARD.get().is_some() {
        return Ok(());
    }
    let dir = app_dirs::logs_dir()?;
    let started = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let stem = launch_log_stem(started)?;
    prune_launch_logs(&dir, RETAINED_LAUNCH_LOGS.saturating_sub(1))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(&stem)
        .filename_suffix(LOG_FILE_EXTENSION)
        .build(&dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let timer = fmt::time::OffsetTime::new(offset, BorrowedFormatItem::Compound(LINE_STAMP));
    let console = options.console.then(|| {
        fmt::layer()
            .with_timer(timer.clone())
            .with_writer(std::io::stderr)
            .boxed()
    });
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&options.default_filter));

    tracing::subscriber::set_global_default(
        Registry::default()
            .with(filter)
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_timer(timer)
                    .with_writer(writer),
            )
            .with(console),
    )?;
    let _ = FLUSH_GUARD.set(guard);
    tracing::info!(
        path = %dir.join(format!("{stem}.{LOG_FILE_EXTENSION}")).display(),
        "Launch log opened"
    );
    Ok(())
}

/// File name without the extension; the appender adds `.log`.
fn launch_log_stem(at: OffsetDateTime) -> Result<String, LoggingError> {
    Ok(format!("{LOG_FILE_PREFIX}{}", at.format(FILE_STAMP)?))
}

/// Delete the oldest launch logs so at most `keep` remain.
///
/// Only `edgesense_*.log` files are considered; their stamped names sort
/// chronologically.
fn prune_launch_logs(dir: &Path, keep: usize) -> Result<(), LoggingError> {
    let listing = fs::read_dir(dir).map_err(|source| LoggingError::List {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut logs: Vec<PathBuf> = listing
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_file()))
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| {
                    let is_log = Path::new(name)
                        .extension()
                        .is_some_and(|ext| ext == LOG_FILE_EXTENSION);
                    name.starts_with(LOG_FILE_PREFIX) && is_log
                })
        })
        .collect();
    logs.sort();

    let stale = logs.len().saturating_sub(keep);
    for path in logs.into_iter().take(stale) {
        fs::remove_file(&path).map_err(|source| LoggingError::Prune { path, source })?;
    }
    Ok(())
}
