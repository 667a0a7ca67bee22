//! Minimal stderr backend for the `log` facade.

use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable that overrides the configured level.
pub const LOG_ENV: &str = "PAGEMARK_LOG";

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut err = std::io::stderr().lock();
        let _ = writeln!(
            err,
            "[{:<5} {}] {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Pick the level: a valid `PAGEMARK_LOG` wins over `configured`.
pub fn resolve_level(env: Option<&str>, configured: LevelFilter) -> LevelFilter {
    env.and_then(|v| v.trim().parse().ok())
        .unwrap_or(configured)
}

/// Install the stderr logger. Safe to call more than once; only the first
/// call installs, later calls just adjust the level.
pub fn init(configured: LevelFilter) {
    let env = std::env::var(LOG_ENV).ok();
    let level = resolve_level(env.as_deref(), configured);
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
