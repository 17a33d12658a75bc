use std::sync::OnceLock;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::basic_logging::{default_filter, init_basic_console_logging};

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

const LOG_DIR: &str = "storage/logs";

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true) // Enabled by default
    })
}

/// Console logging plus daily rolling files under `storage/logs`.
///
/// - `k12.log`: errors only, plain text
/// - `k12.json`: info and above, structured, with span context
///
/// Falls back to console-only logging when observability is switched off
/// or the log directory cannot be created.
pub fn init_tracing() {
    if !is_observability_enabled() {
        init_basic_console_logging();
        return;
    }

    if let Err(e) = std::fs::create_dir_all(LOG_DIR) {
        init_basic_console_logging();
        warn!(error = %e, log_dir = LOG_DIR, "Could not create log directory, console logging only");
        return;
    }

    let console_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_filter(default_filter());

    let file_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, "k12.log");

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    // JSON file layer for structured logs
    let json_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, "k12.json");

    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    if tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .try_init()
        .is_ok()
    {
        info!(log_dir = LOG_DIR, "Tracing initialized with file logging");
    }
}
