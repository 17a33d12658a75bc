//! K12 Observability Module
//!
//! Provides configurable observability features including:
//! - Console and rolling-file logging via `tracing`
//! - Business counters via the `metrics` facade, exported in Prometheus format
//!
//! This module can be enabled or disabled at compile time via the `observability` feature flag.
//! At runtime, observability can be further controlled via the `OBSERVABILITY_ENABLED` environment variable.
//! Console logging is always available through [`init_basic_console_logging`].
//!
//! # Features
//!
//! - `observability` (default): Enables file logging and metrics counters
//!
//! # Examples
//!
//! ```no_run
//! use k12_observability::init_tracing;
//!
//! init_tracing();
//! ```

pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, is_observability_enabled};
#[cfg(feature = "observability")]
pub use self::metrics::{
    init_metrics, render_metrics, track_batch_write, track_login_failure, track_login_success,
    track_record_created, track_registration_failure, track_registration_success,
};

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    /// No-op observability check when feature disabled
    pub fn is_observability_enabled() -> bool {
        false
    }

    /// Falls back to console logging when feature disabled
    pub fn init_tracing() {
        super::init_basic_console_logging();
    }

    /// No-op metrics initialization when feature disabled
    pub fn init_metrics() -> Option<()> {
        None
    }

    pub fn render_metrics() -> Option<String> {
        None
    }

    // No-op tracking functions
    pub fn track_record_created(_collection: &str) {}
    pub fn track_batch_write(_success: bool) {}
    pub fn track_login_success() {}
    pub fn track_login_failure(_reason: &str) {}
    pub fn track_registration_success(_role: &str) {}
    pub fn track_registration_failure(_reason: &str) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
