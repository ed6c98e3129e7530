use std::io;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_LOG_DIR: &str = "COLLECTOR_LOG_DIR";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const LOG_FILE_NAME: &str = "deepwater_news_collector.log";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Console + file logging. `RUST_LOG` controls both; the file goes to
/// `$COLLECTOR_LOG_DIR` (default `logs/`). If the log file cannot be opened
/// the collector still runs with console output only.
pub fn init_tracing() {
    let log_dir = std::env::var(ENV_LOG_DIR).unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());

    let stdout_log = fmt::layer()
        .compact()
        .with_writer(io::stdout)
        .with_filter(filter());

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(&log_dir);
    let (file_log, file_err) = match file_appender {
        Ok(appender) => (
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(appender)
                    .with_filter(filter()),
            ),
            None,
        ),
        Err(e) => (None, Some(e)),
    };

    let _ = tracing_subscriber::registry()
        .with(stdout_log)
        .with(file_log)
        .try_init();

    if let Some(e) = file_err {
        tracing::warn!(dir = %log_dir, error = %e, "file logging disabled");
    }
}
