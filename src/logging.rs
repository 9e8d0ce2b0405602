//! # Structured Logging Module
//!
//! Console logging is always on; when a log file path is configured the
//! same events are additionally written there as JSON lines.

use std::path::Path;
use std::sync::OnceLock;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging.
///
/// `log_file` mirrors the server's `--log` option: `None` keeps output on
/// the console only. Safe to call more than once; later calls are no-ops.
pub fn init_structured_logging(log_file: Option<&Path>) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let log_level = default_log_level();

        let console_layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_filter(env_filter(&log_level));

        let file_layer = log_file.map(|path| {
            let directory = path.parent().unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "scoring-api.log".to_string());

            let file_appender = tracing_appender::rolling::never(directory, file_name);
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            // The guard must outlive the process or buffered lines are lost.
            std::mem::forget(guard);

            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .json()
                .with_filter(env_filter(&log_level))
        });

        let subscriber = tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer);

        // try_init so embedding in tests with their own subscriber works.
        if subscriber.try_init().is_err() {
            tracing::debug!("global tracing subscriber already initialized");
        }
    });
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Default log level based on environment.
fn default_log_level() -> String {
    match detect_environment().as_str() {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Get current environment from environment variables.
fn detect_environment() -> String {
    std::env::var("SCORING_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}
