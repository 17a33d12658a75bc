//! Business counters.
//!
//! Recorded through the `metrics` facade into the Prometheus recorder that
//! [`init_metrics`] installs. Without a recorder they cost nothing.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::warn;

use crate::logging::is_observability_enabled;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the global Prometheus recorder, with an upkeep task when called
/// inside a Tokio runtime.
///
/// Returns `None` when observability is disabled or a recorder is already
/// installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_observability_enabled() {
        return None;
    }

    let handle = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            warn!(error = %e, "Could not install metrics recorder");
            return None;
        }
    };

    if let Ok(runtime) = tokio::runtime::Handle::try_current() {
        let upkeep_handle = handle.clone();
        runtime.spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(5)).await;
                upkeep_handle.run_upkeep();
            }
        });
    }

    let _ = METRICS_HANDLE.set(handle.clone());
    Some(handle)
}

/// Prometheus text rendering of everything recorded since [`init_metrics`].
pub fn render_metrics() -> Option<String> {
    METRICS_HANDLE.get().map(PrometheusHandle::render)
}

/// A document was created in `collection`.
pub fn track_record_created(collection: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("k12_records_created_total", "collection" => collection.to_string()).increment(1);
}

/// One write attempted by the batch orchestrator.
pub fn track_batch_write(success: bool) {
    if !is_observability_enabled() {
        return;
    }
    let outcome = if success { "success" } else { "failure" };
    counter!("k12_batch_writes_total", "outcome" => outcome).increment(1);
}

pub fn track_login_success() {
    if !is_observability_enabled() {
        return;
    }
    counter!("k12_logins_total", "outcome" => "success").increment(1);
}

pub fn track_login_failure(reason: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("k12_logins_total", "outcome" => "failure", "reason" => reason.to_string())
        .increment(1);
}

pub fn track_registration_success(role: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("k12_registrations_total", "role" => role.to_string(), "outcome" => "success")
        .increment(1);
}

pub fn track_registration_failure(reason: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("k12_registrations_total", "outcome" => "failure", "reason" => reason.to_string())
        .increment(1);
}
