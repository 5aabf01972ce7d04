//! Tracing setup: a human-readable stderr layer plus an optional log file.
//!
//! Migration runs append to the same log file, so the file keeps a history
//! of every run. A log file that cannot be opened is reported and the run
//! continues with stderr logging only.

use notemigrate_core::config::{LoggingConfig, ResolvedConfig};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

static LOG_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

pub fn init(cfg: &ResolvedConfig) {
    let logging = &cfg.logging;
    let stderr_level = parse_level(&logging.level).unwrap_or(LevelFilter::INFO);

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(true)
        .with_target(false)
        .with_filter(level_filter(stderr_level));

    let registry = tracing_subscriber::registry().with(stderr_layer);

    let Some(file) = logging.file.as_deref().and_then(open_or_report) else {
        registry.init();
        return;
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    if let Ok(mut g) = LOG_GUARD.lock() {
        *g = Some(guard);
    }

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(level_filter(file_level(logging)));

    registry.with(file_layer).init();
}

/// Flush the file writer, if any, before the process exits.
pub fn shutdown() {
    if let Ok(mut g) = LOG_GUARD.lock() {
        g.take();
    }
}

fn level_filter(default: LevelFilter) -> EnvFilter {
    EnvFilter::builder().with_default_directive(default.into()).from_env_lossy()
}

/// `file_level` if set, else the stderr level; unparsable values mean debug.
fn file_level(logging: &LoggingConfig) -> LevelFilter {
    let name = logging.file_level.as_deref().unwrap_or(&logging.level);
    parse_level(name).unwrap_or(LevelFilter::DEBUG)
}

fn open_or_report(path: &Path) -> Option<File> {
    match open_log_file(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Cannot open log file {}: {}; logging to stderr only", path.display(), e);
            None
        }
    }
}

/// Open `path` for appending, creating missing parent directories.
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.to_lowercase().as_str() {
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}
