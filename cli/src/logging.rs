use std::path::Path;

use anyhow::{anyhow, Result};
use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

pub const LOG_PREFIX: &str = "timetally";

/// Logs go to a daily-rotated file under `logs_dir`; with `show_stderr` they
/// are echoed to stderr as well. `RUST_LOG` wins over `default_level`.
pub fn enable_logging(logs_dir: &Path, default_level: &str, show_stderr: bool) -> Result<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(7)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(logs_dir)?;

    let stderr = std::io::stderr.with_filter(move |_| show_stderr);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(stderr.and(appender))
        .try_init()
        .map_err(|e| anyhow!("could not install logger: {}", e))
}
