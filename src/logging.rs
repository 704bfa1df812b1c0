// src/logging.rs

use chrono::Local;
use log::LevelFilter;
use std::io::Write;

/// Resolve the log level: explicit flag, then RUST_LOG, then `warn`.
pub fn resolve_level(level: Option<&str>) -> LevelFilter {
    level
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .or_else(|| std::env::var("RUST_LOG").ok().and_then(|v| v.parse().ok()))
        .unwrap_or(LevelFilter::Warn)
}

/// Install the stderr logger. Safe to call more than once; later calls are ignored.
pub fn init_logging(level: Option<&str>) {
    let log_level = resolve_level(level);
    let installed = env_logger::Builder::new()
        .filter_level(log_level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:5}] {}",
                Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .try_init();
    if installed.is_ok() {
        log::debug!("logger initialised (level: {log_level})");
    }
}
