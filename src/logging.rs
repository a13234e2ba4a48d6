use std::fs;
use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Keeps the background log writer alive; drop it last.
pub struct LogGuard {
    _guard: WorkerGuard,
}

/// Log to a daily rolling file under `log_dir`. The terminal belongs to the
/// UI, so nothing goes to stdout or stderr. `RUST_LOG` overrides `level`.
pub fn init(log_dir: &Path, level: &str) -> Result<LogGuard> {
    fs::create_dir_all(log_dir)?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "slovarik.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    Ok(LogGuard { _guard: guard })
}
