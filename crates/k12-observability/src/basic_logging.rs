use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set.
///
/// `LOG_LEVEL` (default "info") applies to the k12 crates; noisy
/// dependencies are held at warn.
pub(crate) fn default_filter() -> EnvFilter {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "k12={level},k12_store={level},k12_auth={level},redis=warn",
            level = log_level
        ))
    })
}

/// Initialize basic console logging when observability feature is disabled.
///
/// - **Log Level**: Controlled by `LOG_LEVEL` environment variable (default: "info")
/// - **Format**: Compact, written to stderr so prompts on stdout stay readable
/// - **Target**: Shows module paths (e.g., "k12::modules::students")
pub fn init_basic_console_logging() {
    let console_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(default_filter());

    // Ignore the error when a subscriber is already installed (tests, re-init)
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
