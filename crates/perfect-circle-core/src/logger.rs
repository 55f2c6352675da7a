//! Stderr logger for the CLI and examples.
//!
//! Prints `[elapsed LEVEL target] message`. The level passed to
//! [`init_with_level`] can be overridden at runtime with the
//! `PERFECT_CIRCLE_LOG` environment variable (`error`, `warn`, `info`,
//! `debug`, `trace`, `off`).

use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

const LEVEL_ENV: &str = "PERFECT_CIRCLE_LOG";

struct StrokeLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StrokeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        let target = record.target().rsplit("::").next().unwrap_or("");
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:7.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            target,
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StrokeLogger> = OnceLock::new();

fn env_level() -> Option<LevelFilter> {
    std::env::var(LEVEL_ENV)
        .ok()
        .and_then(|raw| LevelFilter::from_str(raw.trim()).ok())
}

/// Install the stderr logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let level = env_level().unwrap_or(level);
        let logger = LOGGER.get_or_init(|| StrokeLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install a `tracing` fmt subscriber filtered by `RUST_LOG` (default
/// `info`). Span close events carry the timings of the instrumented fit and
/// score calls; `log` records are forwarded to the same subscriber.
#[cfg(feature = "tracing")]
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_timer(fmt::time::Uptime::default())
        .with_target(false)
        .finish();
    if subscriber.try_init().is_err() {
        log::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_logger_respects_level() {
        let logger = StrokeLogger {
            level: LevelFilter::Warn,
            started: Instant::now(),
        };
        let warn = Metadata::builder().level(log::Level::Warn).build();
        let debug = Metadata::builder().level(log::Level::Debug).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&debug));
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn repeated_tracing_init_is_harmless() {
        init_tracing();
        init_tracing();
        tracing::info!("subscriber installed once");
    }
}
