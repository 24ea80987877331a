//! Logging Infrastructure
//!
//! Console logging on stderr (stdout carries command output), or a daily
//! rolling file when a log directory is given and exists.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger with optional file output
///
/// `log_level` takes precedence over `RUST_LOG`; both fall back to `info`.
pub fn init_logger_with_file(
    log_level: Option<&str>,
    log_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let filter = match log_level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir
        && dir.is_dir()
    {
        let file_appender = tracing_appender::rolling::daily(dir, "despacho.log");
        subscriber
            .with_ansi(false)
            .with_writer(file_appender)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install logger: {}", e))?;
        return Ok(());
    }

    subscriber
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {}", e))?;
    Ok(())
}
